//! Application state and route configuration.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use cr_core::repositories::{ComputerRepository, TokenRepository, UserRepository};
use cr_core::services::registration::RegistrationService;
use cr_core::services::token::TokenService;
use cr_core::services::user::UserService;

use crate::routes::{computers, tokens, users};

/// Shared application state holding the domain services.
pub struct AppState<T, C, U>
where
    T: TokenRepository,
    C: ComputerRepository,
    U: UserRepository,
{
    pub tokens: Arc<TokenService<T>>,
    pub registrations: Arc<RegistrationService<T, C, U>>,
    pub users: Arc<UserService<U>>,
}

impl<T, C, U> AppState<T, C, U>
where
    T: TokenRepository,
    C: ComputerRepository,
    U: UserRepository,
{
    /// Wire the services over the given repositories
    pub fn new(token_repo: Arc<T>, computer_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        let tokens = Arc::new(TokenService::new(token_repo));
        let registrations = Arc::new(RegistrationService::new(
            tokens.clone(),
            computer_repo,
            user_repo.clone(),
        ));
        let users = Arc::new(UserService::new(user_repo));

        Self {
            tokens,
            registrations,
            users,
        }
    }
}

/// Register every route of the API.
///
/// Shared between the binary and the integration tests so both always serve
/// the same route table. The caller adds `web::Data<AppState<..>>` and any
/// middleware.
pub fn configure<T, C, U>(cfg: &mut web::ServiceConfig)
where
    T: TokenRepository + 'static,
    C: ComputerRepository + 'static,
    U: UserRepository + 'static,
{
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                // Token issuance
                .route("/tokens/generate", web::post().to(tokens::generate_tokens::<T, C, U>))
                // Computer registration; verify/search before the {registrationId} matcher
                .route(
                    "/computers/verify/{registration_id}",
                    web::get().to(computers::verify_computer::<T, C, U>),
                )
                .route(
                    "/computers/search",
                    web::get().to(computers::search_computers::<T, C, U>),
                )
                .route(
                    "/computers/{registration_id}",
                    web::post().to(computers::register_computer::<T, C, U>),
                )
                .route(
                    "/computers/{registration_id}",
                    web::put().to(computers::update_computer::<T, C, U>),
                )
                // Users and photos
                .route("/users", web::post().to(users::create_user::<T, C, U>))
                .route("/users/{id}", web::get().to(users::get_user::<T, C, U>))
                .route("/users/{id}", web::put().to(users::update_user::<T, C, U>))
                .route("/users/{id}", web::delete().to(users::delete_user::<T, C, U>))
                .route("/photos/{identifier}", web::get().to(users::get_photo::<T, C, U>)),
        )
        .default_service(web::route().to(not_found));
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "campus-reg-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "The requested resource was not found"
    }))
}
