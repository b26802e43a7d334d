//! MySQL repository implementations.

mod computer_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use computer_repository_impl::MySqlComputerRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use cr_core::errors::DomainError;

/// Map a SQLx error to the domain taxonomy, routing unique-key violations to
/// the supplied conflict error.
pub(crate) fn map_sqlx_error(error: sqlx::Error, on_unique_violation: DomainError) -> DomainError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => on_unique_violation,
        _ => DomainError::Database {
            message: error.to_string(),
        },
    }
}
