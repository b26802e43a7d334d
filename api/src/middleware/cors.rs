//! CORS middleware configuration.
//!
//! Permissive in development so the registration desk frontend and QR
//! scanner apps can be served from anywhere; restricted to the configured
//! origins in production.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Creates a CORS middleware instance configured for the current environment.
///
/// # Environment Variables
/// - `ENVIRONMENT`: set to "production" for production settings
/// - `ALLOWED_ORIGINS`: comma-separated list of allowed origins (production)
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    if environment == "production" {
        create_production_cors()
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    tracing::info!("configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

fn create_production_cors() -> Cors {
    tracing::info!("configuring CORS for production environment");

    let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    for origin in allowed_origins.split(',').filter(|o| !o.trim().is_empty()) {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}
