//! # Infrastructure Layer
//!
//! MySQL implementations of the CampusReg repository traits, plus connection
//! pool management. The domain crate stays free of SQL; everything that
//! talks to the database lives here.

pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
