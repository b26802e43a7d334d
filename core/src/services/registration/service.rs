//! Registration service implementation.

use std::sync::Arc;

use cr_shared::types::pagination::Pagination;
use cr_shared::utils::validation::is_valid_token_code;

use crate::domain::entities::computer::Computer;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::computer::ComputerRepository;
use crate::repositories::token::TokenRepository;
use crate::repositories::user::UserRepository;
use crate::services::token::TokenService;

/// Reference to the person a registration belongs to, as supplied by the
/// caller: a student's registration number or a guest's national id.
#[derive(Debug, Clone, Default)]
pub struct OwnerRef {
    pub reg_no: Option<i64>,
    pub national_id: Option<i64>,
}

/// Input for a registration create or update.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub owner: OwnerRef,
    pub serial_no: String,
    pub brand: String,
}

/// A registration joined with its owner, as returned by the verify path.
#[derive(Debug, Clone)]
pub struct RegistrationDetails {
    pub computer: Computer,
    pub owner: User,
}

/// Coordinates token redemption with registration writes.
///
/// The sequence for a write is always: redeem the token through
/// [`TokenService`], then perform the domain write. A failure after the
/// token was claimed triggers a compensating release, so a failed
/// registration never leaves its token burned. The two steps suspend
/// between each other and concurrent callers interleave freely; correctness
/// rests entirely on the store-level atomicity of the claim itself.
pub struct RegistrationService<T, C, U>
where
    T: TokenRepository,
    C: ComputerRepository,
    U: UserRepository,
{
    tokens: Arc<TokenService<T>>,
    computers: Arc<C>,
    users: Arc<U>,
}

impl<T, C, U> RegistrationService<T, C, U>
where
    T: TokenRepository,
    C: ComputerRepository,
    U: UserRepository,
{
    /// Create a new registration service
    pub fn new(tokens: Arc<TokenService<T>>, computers: Arc<C>, users: Arc<U>) -> Self {
        Self {
            tokens,
            computers,
            users,
        }
    }

    /// Register a computer under a fresh token.
    ///
    /// Token failures (`InvalidToken`, `AlreadyUsed`) propagate with no
    /// side effect. If the registration write fails after the token was
    /// claimed (owner missing, duplicate serial), the claim is released
    /// before the error propagates.
    pub async fn register(&self, code: &str, registration: NewRegistration) -> DomainResult<Computer> {
        validate_shape(&registration)?;
        self.tokens.redeem(code).await?;

        match self.write_registration(code, &registration).await {
            Ok(computer) => {
                tracing::info!(
                    registration_id = code,
                    serial_no = %computer.serial_no,
                    "computer registered"
                );
                Ok(computer)
            }
            Err(error) => {
                self.tokens.release(code).await;
                Err(error)
            }
        }
    }

    /// Re-register an existing computer under a fresh token.
    ///
    /// The prior record is located by its current domain key (owner +
    /// serial number) and relinked to the new token. Follows the same
    /// compensation discipline as [`register`](Self::register).
    pub async fn update(&self, code: &str, registration: NewRegistration) -> DomainResult<Computer> {
        validate_shape(&registration)?;
        self.tokens.redeem(code).await?;

        match self.relink_registration(code, &registration).await {
            Ok(computer) => {
                tracing::info!(
                    registration_id = code,
                    serial_no = %computer.serial_no,
                    "registration relinked"
                );
                Ok(computer)
            }
            Err(error) => {
                self.tokens.release(code).await;
                Err(error)
            }
        }
    }

    /// Look up a registration by the (consumed) token code it is linked to,
    /// joined with its owner. A pure read: no redemption happens here.
    pub async fn verify(&self, code: &str) -> DomainResult<RegistrationDetails> {
        if !is_valid_token_code(code) {
            return Err(TokenError::InvalidToken.into());
        }

        let computer = self
            .computers
            .find_by_token_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Computer"))?;
        let owner = self
            .users
            .find_by_id(computer.owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        Ok(RegistrationDetails { computer, owner })
    }

    /// Page through a person's registrations.
    pub async fn search(
        &self,
        owner: &OwnerRef,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Computer>, u64)> {
        let user = self.resolve_owner(owner).await?;
        self.computers.list_by_owner(user.id, pagination).await
    }

    async fn write_registration(
        &self,
        code: &str,
        registration: &NewRegistration,
    ) -> DomainResult<Computer> {
        let owner = self.resolve_owner(&registration.owner).await?;
        let computer = Computer::new(
            code,
            &registration.serial_no,
            &registration.brand,
            owner.id,
        );
        self.computers.insert(&computer).await?;
        Ok(computer)
    }

    async fn relink_registration(
        &self,
        code: &str,
        registration: &NewRegistration,
    ) -> DomainResult<Computer> {
        let owner = self.resolve_owner(&registration.owner).await?;
        let existing = self
            .computers
            .find_by_owner_and_serial(owner.id, &registration.serial_no)
            .await?
            .ok_or_else(|| DomainError::not_found("Matching registration"))?;

        self.computers
            .relink(existing.id, code, &registration.brand)
            .await?
            .ok_or_else(|| DomainError::not_found("Matching registration"))
    }

    async fn resolve_owner(&self, owner: &OwnerRef) -> DomainResult<User> {
        let found = if let Some(reg_no) = owner.reg_no {
            self.users.find_by_reg_no(reg_no).await?
        } else if let Some(national_id) = owner.national_id {
            self.users.find_by_national_id(national_id).await?
        } else {
            None
        };

        found.ok_or_else(|| DomainError::not_found("User"))
    }
}

fn validate_shape(registration: &NewRegistration) -> DomainResult<()> {
    if registration.owner.reg_no.is_none() && registration.owner.national_id.is_none() {
        return Err(DomainError::validation("regNo or nationalId is required"));
    }
    if registration.serial_no.trim().is_empty() {
        return Err(DomainError::validation("serialNo cannot be empty"));
    }
    if registration.brand.trim().is_empty() {
        return Err(DomainError::validation("brand cannot be empty"));
    }
    Ok(())
}
