//! MySQL implementation of the TokenRepository trait.
//!
//! The claim operation is a single conditional UPDATE judged by its affected
//! row count, which is what makes redemption exactly-once under concurrent
//! requests: the database serializes the transition, so only one caller can
//! match the `is_used = FALSE` predicate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::token::RegistrationToken;
use cr_core::errors::{DomainError, DomainResult, TokenError};
use cr_core::repositories::token::{ClaimOutcome, TokenRepository};

use super::map_sqlx_error;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> DomainResult<RegistrationToken> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(RegistrationToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            is_used: row.try_get("is_used").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_used: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("used_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get used_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn insert(&self, token: &RegistrationToken) -> DomainResult<()> {
        let query = r#"
            INSERT INTO registration_tokens (id, code, is_used, created_at, used_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(&token.code)
            .bind(token.is_used)
            .bind(token.created_at)
            .bind(token.used_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, TokenError::DuplicateCode.into()))?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<RegistrationToken>> {
        let query = r#"
            SELECT id, code, is_used, created_at, used_at
            FROM registration_tokens
            WHERE code = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn claim(&self, code: &str) -> DomainResult<ClaimOutcome> {
        // The atomic gate: flip unused -> used in one statement. Exactly one
        // of any number of concurrent callers matches the predicate.
        let query = r#"
            UPDATE registration_tokens
            SET is_used = TRUE, used_at = ?
            WHERE code = ? AND is_used = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to claim token: {}", e),
            })?;

        if result.rows_affected() > 0 {
            return Ok(ClaimOutcome::Claimed);
        }

        // Zero rows: either consumed already or never issued
        match self.find_by_code(code).await? {
            Some(_) => Ok(ClaimOutcome::AlreadyUsed),
            None => Ok(ClaimOutcome::NotFound),
        }
    }

    async fn release(&self, code: &str) -> DomainResult<bool> {
        let query = r#"
            UPDATE registration_tokens
            SET is_used = FALSE, used_at = NULL
            WHERE code = ? AND is_used = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to release token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
