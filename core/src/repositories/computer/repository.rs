//! Computer repository trait defining the interface for registration record
//! persistence.

use async_trait::async_trait;
use uuid::Uuid;

use cr_shared::types::pagination::Pagination;

use crate::domain::entities::computer::Computer;
use crate::errors::DomainResult;

/// Repository trait for Computer (registration record) persistence.
#[async_trait]
pub trait ComputerRepository: Send + Sync {
    /// Insert a new registration record.
    ///
    /// `serial_no` and `token_code` are unique across all records; a
    /// violation maps to `DomainError::Conflict`.
    async fn insert(&self, computer: &Computer) -> DomainResult<()>;

    /// Look up a registration by the token code linked to it.
    async fn find_by_token_code(&self, code: &str) -> DomainResult<Option<Computer>>;

    /// Look up a registration by its owner and serial number, the domain key
    /// used by the update path.
    async fn find_by_owner_and_serial(
        &self,
        owner_id: Uuid,
        serial_no: &str,
    ) -> DomainResult<Option<Computer>>;

    /// Rebind an existing record to a new token code and brand.
    ///
    /// Returns the updated record, or `None` if no record with this id
    /// exists.
    async fn relink(
        &self,
        id: Uuid,
        token_code: &str,
        brand: &str,
    ) -> DomainResult<Option<Computer>>;

    /// Page through a user's registrations, newest first, together with the
    /// total count.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Computer>, u64)>;
}
