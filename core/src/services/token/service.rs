//! Token service: issuance of registration tokens and the exactly-once
//! redemption gate.

use std::sync::Arc;

use cr_shared::utils::validation::is_valid_token_code;

use crate::domain::entities::token::{RegistrationToken, MAX_BATCH_SIZE};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::token::{ClaimOutcome, TokenRepository};

// 256-bit codes make collisions astronomically unlikely, but an insert can
// still trip the unique key; a couple of retries with fresh codes covers it.
const MAX_COLLISION_RETRIES: usize = 3;

/// Service for issuing and redeeming registration tokens.
pub struct TokenService<T: TokenRepository> {
    repository: Arc<T>,
}

impl<T: TokenRepository> TokenService<T> {
    /// Create a new token service
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Issue a batch of fresh tokens.
    ///
    /// `count` must be in `1..=1000`. Every token is persisted before the
    /// batch is returned; a code collision at insert time is retried with a
    /// newly generated code rather than failing the batch.
    pub async fn issue(&self, count: u32) -> DomainResult<Vec<RegistrationToken>> {
        if count < 1 || count > MAX_BATCH_SIZE {
            return Err(TokenError::InvalidCount.into());
        }

        let mut tokens = Vec::with_capacity(count as usize);
        for _ in 0..count {
            tokens.push(self.insert_with_retry().await?);
        }

        tracing::info!(count = tokens.len(), "issued registration tokens");
        Ok(tokens)
    }

    async fn insert_with_retry(&self) -> DomainResult<RegistrationToken> {
        for _ in 0..MAX_COLLISION_RETRIES {
            let token = RegistrationToken::new();
            match self.repository.insert(&token).await {
                Ok(()) => return Ok(token),
                Err(DomainError::Token(TokenError::DuplicateCode)) => {
                    tracing::warn!("token code collision, regenerating");
                    continue;
                }
                Err(other) => return Err(other),
            }
        }
        Err(DomainError::Internal {
            message: format!(
                "failed to generate a unique token code after {} attempts",
                MAX_COLLISION_RETRIES
            ),
        })
    }

    /// Redeem a token: atomically transition it from unused to used.
    ///
    /// The format check runs before any store access; malformed codes never
    /// reach the repository. Among k concurrent redemptions of the same code
    /// exactly one caller gets `Ok(())`, the rest get
    /// [`TokenError::AlreadyUsed`]. No error path leaves a side effect.
    pub async fn redeem(&self, code: &str) -> DomainResult<()> {
        if !is_valid_token_code(code) {
            return Err(TokenError::InvalidToken.into());
        }

        match self.repository.claim(code).await? {
            ClaimOutcome::Claimed => {
                tracing::debug!(code, "token redeemed");
                Ok(())
            }
            ClaimOutcome::AlreadyUsed => Err(TokenError::AlreadyUsed.into()),
            ClaimOutcome::NotFound => Err(TokenError::InvalidToken.into()),
        }
    }

    /// Revert a redeemed token after a failed downstream write.
    ///
    /// Logged as a compensating action. A failure here is reported to the
    /// caller's logs but produces no error of its own: the caller is already
    /// propagating the failure that triggered the compensation.
    pub async fn release(&self, code: &str) {
        match self.repository.release(code).await {
            Ok(true) => {
                tracing::warn!(code, "compensating release: token reverted to unused");
            }
            Ok(false) => {
                tracing::warn!(code, "compensating release found no used token to revert");
            }
            Err(error) => {
                tracing::error!(code, %error, "compensating release failed; token stays burned");
            }
        }
    }
}
