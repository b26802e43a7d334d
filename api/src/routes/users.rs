//! User management routes.

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use cr_core::repositories::{ComputerRepository, TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::user::{MessageResponse, UserRequest, UserResponse};
use crate::handlers::error::{validation_message, ApiError};

/// Handler for POST /api/users
///
/// Creates a student or guest, optionally with a base64 photo payload.
pub async fn create_user<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    let data = request.into_inner().into_new_user()?;
    let user = state.users.create(data).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Handler for GET /api/users/{id}
pub async fn get_user<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let user = state.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Handler for PUT /api/users/{id}
pub async fn update_user<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<Uuid>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    let data = request.into_inner().into_new_user()?;
    let user = state.users.update(path.into_inner(), data).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Handler for DELETE /api/users/{id}
pub async fn delete_user<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    state.users.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

/// Handler for GET /api/photos/{identifier}
///
/// Serves the stored photo for a regNo or nationalId, inline with its
/// original content type.
pub async fn get_photo<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let photo = state.users.photo(path.into_inner()).await?;

    let extension = photo.content_type.split('/').nth(1).unwrap_or("bin");
    let disposition = format!("inline; filename=\"photo.{}\"", extension);

    Ok(HttpResponse::Ok()
        .content_type(photo.content_type.clone())
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .body(photo.data))
}
