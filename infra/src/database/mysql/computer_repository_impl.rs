//! MySQL implementation of the ComputerRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::computer::Computer;
use cr_core::errors::{DomainError, DomainResult};
use cr_core::repositories::computer::ComputerRepository;
use cr_shared::types::pagination::Pagination;

use super::map_sqlx_error;

/// MySQL implementation of ComputerRepository
pub struct MySqlComputerRepository {
    pool: MySqlPool,
}

impl MySqlComputerRepository {
    /// Create a new MySQL computer repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_computer(row: &sqlx::mysql::MySqlRow) -> DomainResult<Computer> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let owner_id: String = row.try_get("owner_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get owner_id: {}", e),
        })?;

        Ok(Computer {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid computer UUID: {}", e),
            })?,
            token_code: row
                .try_get("token_code")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_code: {}", e),
                })?,
            serial_no: row.try_get("serial_no").map_err(|e| DomainError::Internal {
                message: format!("Failed to get serial_no: {}", e),
            })?,
            brand: row.try_get("brand").map_err(|e| DomainError::Internal {
                message: format!("Failed to get brand: {}", e),
            })?,
            owner_id: Uuid::parse_str(&owner_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid owner UUID: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, token_code, serial_no, brand, owner_id, created_at, updated_at";

#[async_trait]
impl ComputerRepository for MySqlComputerRepository {
    async fn insert(&self, computer: &Computer) -> DomainResult<()> {
        let query = r#"
            INSERT INTO computers (id, token_code, serial_no, brand, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(computer.id.to_string())
            .bind(&computer.token_code)
            .bind(&computer.serial_no)
            .bind(&computer.brand)
            .bind(computer.owner_id.to_string())
            .bind(computer.created_at)
            .bind(computer.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_sqlx_error(e, DomainError::conflict("Serial number already registered"))
            })?;

        Ok(())
    }

    async fn find_by_token_code(&self, code: &str) -> DomainResult<Option<Computer>> {
        let query = format!(
            "SELECT {} FROM computers WHERE token_code = ? LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find computer: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_computer(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_owner_and_serial(
        &self,
        owner_id: Uuid,
        serial_no: &str,
    ) -> DomainResult<Option<Computer>> {
        let query = format!(
            "SELECT {} FROM computers WHERE owner_id = ? AND serial_no = ? LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(owner_id.to_string())
            .bind(serial_no)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find computer: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_computer(&row)?)),
            None => Ok(None),
        }
    }

    async fn relink(
        &self,
        id: Uuid,
        token_code: &str,
        brand: &str,
    ) -> DomainResult<Option<Computer>> {
        let query = r#"
            UPDATE computers
            SET token_code = ?, brand = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(token_code)
            .bind(brand)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_sqlx_error(e, DomainError::conflict("Token already linked to a registration"))
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!("SELECT {} FROM computers WHERE id = ? LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to reload computer: {}", e),
            })?;

        Ok(Some(Self::row_to_computer(&row)?))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Computer>, u64)> {
        let query = format!(
            "SELECT {} FROM computers WHERE owner_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(owner_id.to_string())
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to list computers: {}", e),
            })?;

        let mut computers = Vec::with_capacity(rows.len());
        for row in &rows {
            computers.push(Self::row_to_computer(row)?);
        }

        let count_row = sqlx::query("SELECT COUNT(*) AS total FROM computers WHERE owner_id = ?")
            .bind(owner_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to count computers: {}", e),
            })?;
        let total: i64 = count_row.try_get("total").map_err(|e| DomainError::Internal {
            message: format!("Failed to get total: {}", e),
        })?;

        Ok((computers, total as u64))
    }
}
