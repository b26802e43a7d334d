//! In-memory implementation of TokenRepository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RegistrationToken;
use crate::errors::{DomainResult, TokenError};

use super::repository::{ClaimOutcome, TokenRepository};

/// Mock token repository backed by a `HashMap`.
///
/// Every operation runs inside one lock acquisition, so `claim` has the same
/// exactly-once behavior as the conditional UPDATE in the MySQL
/// implementation.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RegistrationToken>>>,
}

impl MockTokenRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether no tokens are stored
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, token: &RegistrationToken) -> DomainResult<()> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.code) {
            return Err(TokenError::DuplicateCode.into());
        }
        tokens.insert(token.code.clone(), token.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<RegistrationToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(code).cloned())
    }

    async fn claim(&self, code: &str) -> DomainResult<ClaimOutcome> {
        // Single critical section: check and flip under one write lock
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(code) {
            Some(token) if !token.is_used => {
                token.mark_used();
                Ok(ClaimOutcome::Claimed)
            }
            Some(_) => Ok(ClaimOutcome::AlreadyUsed),
            None => Ok(ClaimOutcome::NotFound),
        }
    }

    async fn release(&self, code: &str) -> DomainResult<bool> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(code) {
            Some(token) if token.is_used => {
                token.mark_unused();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
