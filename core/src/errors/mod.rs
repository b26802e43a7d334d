//! Domain-specific error types and error handling.

use thiserror::Error;

/// Token-gate errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The code does not exist or is not a well-formed 64-hex-character code
    #[error("Invalid QR code")]
    InvalidToken,

    /// The code exists but was already consumed (or the atomic claim lost
    /// the race)
    #[error("QR code already used")]
    AlreadyUsed,

    /// Issuance count outside the accepted range
    #[error("count must be between 1 and 1000")]
    InvalidCount,

    /// A freshly generated code collided with a stored one; issuance retries
    /// with a new code
    #[error("generated code collided with an existing token")]
    DuplicateCode,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a uniqueness conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_render_client_messages() {
        assert_eq!(TokenError::InvalidToken.to_string(), "Invalid QR code");
        assert_eq!(TokenError::AlreadyUsed.to_string(), "QR code already used");
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = DomainError::not_found("User");
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn token_error_is_transparent() {
        let err: DomainError = TokenError::AlreadyUsed.into();
        assert_eq!(err.to_string(), "QR code already used");
    }
}
