//! Token issuance routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{ComputerRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::token::{GenerateTokensRequest, GenerateTokensResponse};
use crate::handlers::error::{validation_message, ApiError};

/// Handler for POST /api/tokens/generate
///
/// Issues a batch of single-use registration tokens.
///
/// # Responses
/// - `201` `{"codes": ["<64 hex chars>", ...]}`
/// - `400` when `count` is outside `[1, 1000]`
pub async fn generate_tokens<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    request: web::Json<GenerateTokensRequest>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    let tokens = state.tokens.issue(request.count).await?;
    let codes = tokens.into_iter().map(|token| token.code).collect();

    Ok(HttpResponse::Created().json(GenerateTokensResponse { codes }))
}
