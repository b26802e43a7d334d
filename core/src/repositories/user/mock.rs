//! In-memory implementation of UserRepository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};

use super::repository::UserRepository;

/// Mock user repository backed by a `HashMap` keyed on the user id.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no users are stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.write().await;
        let duplicate = users.values().any(|u| {
            (user.reg_no.is_some() && u.reg_no == user.reg_no)
                || (user.national_id.is_some() && u.national_id == user.national_id)
        });
        if duplicate {
            return Err(DomainError::conflict(
                "User with the same identifier already exists",
            ));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_reg_no(&self, reg_no: i64) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.reg_no == Some(reg_no)).cloned())
    }

    async fn find_by_national_id(&self, national_id: i64) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.national_id == Some(national_id))
            .cloned())
    }

    async fn update(&self, user: &User) -> DomainResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}
