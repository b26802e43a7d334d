//! Computer registration routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use cr_core::repositories::{ComputerRepository, TokenRepository, UserRepository};
use cr_core::services::registration::{OwnerRef, RegistrationDetails};
use cr_shared::types::pagination::{PageMeta, Pagination};

use crate::app::AppState;
use crate::dto::computer::{
    ComputerSummary, RegisterComputerRequest, RegisterComputerResponse, SearchQuery,
    SearchResponse, UpdateComputerResponse, VerifyComputerResponse,
};
use crate::handlers::error::{validation_message, ApiError};

/// Handler for POST /api/computers/{registrationId}
///
/// Registers a computer under a fresh single-use token.
///
/// # Responses
/// - `201` `{"message": ..., "registrationId": ...}`
/// - `400` invalid/used token, validation failure, duplicate serial
/// - `404` referenced person does not exist
pub async fn register_computer<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<String>,
    request: web::Json<RegisterComputerRequest>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let registration_id = path.into_inner();
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    let computer = state
        .registrations
        .register(&registration_id, request.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(RegisterComputerResponse {
        message: "Computer registered successfully".to_string(),
        registration_id: computer.token_code,
    }))
}

/// Handler for PUT /api/computers/{registrationId}
///
/// Relinks an existing registration (located by owner + serial number) to a
/// fresh token.
///
/// # Responses
/// - `200` `{"registrationId": ...}`
/// - `400` invalid/used token or validation failure
/// - `404` no matching prior registration, or unknown person
pub async fn update_computer<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<String>,
    request: web::Json<RegisterComputerRequest>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let registration_id = path.into_inner();
    if let Err(errors) = request.validate() {
        return Err(ApiError::validation(validation_message(&errors)));
    }

    let computer = state
        .registrations
        .update(&registration_id, request.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(UpdateComputerResponse {
        registration_id: computer.token_code,
    }))
}

/// Handler for GET /api/computers/verify/{registrationId}
///
/// Returns the owner details behind a registration, for gate checks.
pub async fn verify_computer<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let registration_id = path.into_inner();
    let details = state.registrations.verify(&registration_id).await?;

    Ok(HttpResponse::Ok().json(verify_response(details)))
}

fn verify_response(details: RegistrationDetails) -> VerifyComputerResponse {
    let photo_link = match (&details.owner.photo, details.owner.identifier()) {
        (Some(_), Some(identifier)) => Some(format!("/api/photos/{}", identifier)),
        _ => None,
    };

    VerifyComputerResponse {
        photo_link,
        reg_no: details.owner.reg_no,
        national_id: details.owner.national_id,
        names: details.owner.name,
        serial_no: details.computer.serial_no,
    }
}

/// Handler for GET /api/computers/search
///
/// Pages through a person's registrations by regNo or nationalId.
pub async fn search_computers<T, C, U>(
    state: web::Data<AppState<T, C, U>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError>
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    let query = query.into_inner();
    if query.reg_no.is_none() && query.national_id.is_none() {
        return Err(ApiError::validation("regNo or nationalId is required"));
    }

    let owner = OwnerRef {
        reg_no: query.reg_no,
        national_id: query.national_id,
    };
    let pagination = Pagination::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (computers, total) = state.registrations.search(&owner, &pagination).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        computers: computers.into_iter().map(ComputerSummary::from).collect(),
        pagination: PageMeta::new(&pagination, total),
    }))
}
