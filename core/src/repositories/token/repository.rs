//! Token repository trait defining the interface for registration token
//! persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RegistrationToken;
use crate::errors::DomainResult;

/// Result of an atomic claim attempt on a token code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// This caller transitioned the token from unused to used
    Claimed,
    /// The token exists but was already used (or another caller won the race)
    AlreadyUsed,
    /// No token with this code exists
    NotFound,
}

/// Repository trait for RegistrationToken persistence.
///
/// Tokens are an append-only audit trail: they are inserted at issuance and
/// flipped between used/unused, never deleted.
///
/// # Atomicity contract
///
/// [`claim`](TokenRepository::claim) is the synchronization point for the
/// whole system. Implementations must perform the unused→used transition as
/// a single conditional mutation against the backing store (an update guarded
/// on the current unused state, judged by how many rows it matched). A
/// read-check-write sequence is forbidden: it opens a race window in which
/// two concurrent callers both observe the token as unused and both claim
/// success. Under k concurrent claims of one code, exactly one caller may
/// observe [`ClaimOutcome::Claimed`].
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a freshly issued token.
    ///
    /// A unique-key violation on the code maps to
    /// [`TokenError::DuplicateCode`](crate::errors::TokenError::DuplicateCode)
    /// so issuance can retry with a new code instead of failing the batch.
    async fn insert(&self, token: &RegistrationToken) -> DomainResult<()>;

    /// Look up a token by its code.
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<RegistrationToken>>;

    /// Atomically claim a token: flip it to used if and only if it is
    /// currently unused. See the trait-level atomicity contract.
    async fn claim(&self, code: &str) -> DomainResult<ClaimOutcome>;

    /// Revert a used token back to unused.
    ///
    /// The compensating half of a failed registration: conditional on the
    /// token currently being used, mirroring `claim`. Returns whether a
    /// token was actually reverted.
    async fn release(&self, code: &str) -> DomainResult<bool>;
}
