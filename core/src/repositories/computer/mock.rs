//! In-memory implementation of ComputerRepository for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use cr_shared::types::pagination::Pagination;

use crate::domain::entities::computer::Computer;
use crate::errors::{DomainError, DomainResult};

use super::repository::ComputerRepository;

/// Mock computer repository backed by a `Vec`.
#[derive(Clone, Default)]
pub struct MockComputerRepository {
    computers: Arc<RwLock<Vec<Computer>>>,
}

impl MockComputerRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.computers.read().await.len()
    }

    /// Whether no records are stored
    pub async fn is_empty(&self) -> bool {
        self.computers.read().await.is_empty()
    }
}

#[async_trait]
impl ComputerRepository for MockComputerRepository {
    async fn insert(&self, computer: &Computer) -> DomainResult<()> {
        let mut computers = self.computers.write().await;
        if computers.iter().any(|c| c.serial_no == computer.serial_no) {
            return Err(DomainError::conflict("Serial number already registered"));
        }
        if computers.iter().any(|c| c.token_code == computer.token_code) {
            return Err(DomainError::conflict("Token already linked to a registration"));
        }
        computers.push(computer.clone());
        Ok(())
    }

    async fn find_by_token_code(&self, code: &str) -> DomainResult<Option<Computer>> {
        let computers = self.computers.read().await;
        Ok(computers.iter().find(|c| c.token_code == code).cloned())
    }

    async fn find_by_owner_and_serial(
        &self,
        owner_id: Uuid,
        serial_no: &str,
    ) -> DomainResult<Option<Computer>> {
        let computers = self.computers.read().await;
        Ok(computers
            .iter()
            .find(|c| c.owner_id == owner_id && c.serial_no == serial_no)
            .cloned())
    }

    async fn relink(
        &self,
        id: Uuid,
        token_code: &str,
        brand: &str,
    ) -> DomainResult<Option<Computer>> {
        let mut computers = self.computers.write().await;
        match computers.iter_mut().find(|c| c.id == id) {
            Some(computer) => {
                computer.relink(token_code, brand);
                Ok(Some(computer.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Computer>, u64)> {
        let computers = self.computers.read().await;
        let mut owned: Vec<Computer> = computers
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = owned.len() as u64;
        let page = owned
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }
}
