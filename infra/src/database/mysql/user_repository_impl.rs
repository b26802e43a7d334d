//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::user::{Photo, User, UserType};
use cr_core::errors::{DomainError, DomainResult};
use cr_core::repositories::user::UserRepository;

use super::map_sqlx_error;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

const SELECT_COLUMNS: &str =
    "id, reg_no, national_id, name, photo_data, photo_content_type, user_type, created_at, updated_at";

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let user_type: String = row.try_get("user_type").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_type: {}", e),
        })?;
        let photo_data: Option<Vec<u8>> =
            row.try_get("photo_data").map_err(|e| DomainError::Internal {
                message: format!("Failed to get photo_data: {}", e),
            })?;
        let photo_content_type: Option<String> =
            row.try_get("photo_content_type")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get photo_content_type: {}", e),
                })?;

        let photo = match (photo_data, photo_content_type) {
            (Some(data), Some(content_type)) => Some(Photo { data, content_type }),
            _ => None,
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            reg_no: row.try_get("reg_no").map_err(|e| DomainError::Internal {
                message: format!("Failed to get reg_no: {}", e),
            })?,
            national_id: row
                .try_get("national_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get national_id: {}", e),
                })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            photo,
            user_type: UserType::parse(&user_type).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown user_type: {}", user_type),
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

    async fn find_one(&self, column: &str, value: i64) -> DomainResult<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? LIMIT 1",
            SELECT_COLUMNS, column
        );

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let query = r#"
            INSERT INTO users (id, reg_no, national_id, name, photo_data, photo_content_type,
                               user_type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(user.reg_no)
            .bind(user.national_id)
            .bind(&user.name)
            .bind(user.photo.as_ref().map(|p| p.data.clone()))
            .bind(user.photo.as_ref().map(|p| p.content_type.clone()))
            .bind(user.user_type.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_sqlx_error(
                    e,
                    DomainError::conflict("User with the same identifier already exists"),
                )
            })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_reg_no(&self, reg_no: i64) -> DomainResult<Option<User>> {
        self.find_one("reg_no", reg_no).await
    }

    async fn find_by_national_id(&self, national_id: i64) -> DomainResult<Option<User>> {
        self.find_one("national_id", national_id).await
    }

    async fn find_by_identifier(&self, identifier: i64) -> DomainResult<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE reg_no = ? OR national_id = ? LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, user: &User) -> DomainResult<bool> {
        let query = r#"
            UPDATE users
            SET reg_no = ?, national_id = ?, name = ?, photo_data = ?,
                photo_content_type = ?, user_type = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(user.reg_no)
            .bind(user.national_id)
            .bind(&user.name)
            .bind(user.photo.as_ref().map(|p| p.data.clone()))
            .bind(user.photo.as_ref().map(|p| p.content_type.clone()))
            .bind(user.user_type.as_str())
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_sqlx_error(
                    e,
                    DomainError::conflict("User with the same identifier already exists"),
                )
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete user: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
