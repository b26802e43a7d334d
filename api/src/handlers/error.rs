//! Mapping from domain errors to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cr_core::errors::{DomainError, TokenError};

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error type returned by all route handlers.
///
/// Wraps a [`DomainError`] and renders it with the status mapping of the
/// error taxonomy: validation and token-gate failures are 400s, missing
/// resources 404s, everything store-internal a sanitized 500.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    /// A 400 validation error with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError(DomainError::validation(message))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } | DomainError::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Token(
                TokenError::InvalidToken | TokenError::AlreadyUsed | TokenError::InvalidCount,
            ) => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Token(TokenError::DuplicateCode)
            | DomainError::Database { .. }
            | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Store-level detail stays in the logs
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "internal error while handling request");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        HttpResponse::build(status).json(ErrorBody { error: message })
    }
}

/// Flatten `validator` errors into the single joined message the API
/// returns for malformed bodies.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.sort();
    messages.join(", ")
}
