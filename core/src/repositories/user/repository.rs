//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Repository trait for User entity persistence operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// `reg_no` and `national_id` are each unique across users; a violation
    /// maps to `DomainError::Conflict`.
    async fn insert(&self, user: &User) -> DomainResult<()>;

    /// Find a user by their unique identifier.
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find a student by registration number.
    async fn find_by_reg_no(&self, reg_no: i64) -> DomainResult<Option<User>>;

    /// Find a guest by national id.
    async fn find_by_national_id(&self, national_id: i64) -> DomainResult<Option<User>>;

    /// Find a user by either external identifier.
    ///
    /// Used by the photo route, where the caller only knows "the number on
    /// the card".
    async fn find_by_identifier(&self, identifier: i64) -> DomainResult<Option<User>> {
        if let Some(user) = self.find_by_reg_no(identifier).await? {
            return Ok(Some(user));
        }
        self.find_by_national_id(identifier).await
    }

    /// Persist updated user details. Returns whether a user with this id
    /// existed.
    async fn update(&self, user: &User) -> DomainResult<bool>;

    /// Delete a user. Returns whether a user with this id existed.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
