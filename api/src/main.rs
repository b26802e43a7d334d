//! CampusReg API server binary.

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use cr_api::app::{self, AppState};
use cr_api::middleware::cors::create_cors;
use cr_infra::database::mysql::{
    MySqlComputerRepository, MySqlTokenRepository, MySqlUserRepository,
};
use cr_infra::database::DatabasePool;
use cr_shared::config::{DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("starting CampusReg API server");

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    let pool = DatabasePool::new(&database_config).await?;
    pool.run_migrations().await?;

    let token_repo = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
    let computer_repo = Arc::new(MySqlComputerRepository::new(pool.get_pool().clone()));
    let user_repo = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let state = web::Data::new(AppState::new(token_repo, computer_repo, user_repo));

    let bind_address = server_config.bind_address();
    tracing::info!(address = %bind_address, "binding HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(create_cors())
            .configure(
                app::configure::<MySqlTokenRepository, MySqlComputerRepository, MySqlUserRepository>,
            )
    })
    .bind(&bind_address)?
    .run()
    .await?;

    pool.close().await;
    Ok(())
}
