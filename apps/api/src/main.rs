//! Leadroute API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use leadroute_application::ClientRepository;
use leadroute_core::AppError;
use leadroute_infrastructure::{InMemoryClientRepository, PostgresClientRepository, SystemClock};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, ClientRegistryConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let repository: Arc<dyn ClientRepository> = match &config.client_registry {
        ClientRegistryConfig::Memory => {
            warn!("using in-memory client registry, data is lost on restart");
            Arc::new(InMemoryClientRepository::new())
        }
        ClientRegistryConfig::Postgres(postgres) => {
            let pool = PgPoolOptions::new()
                .max_connections(postgres.max_connections)
                .acquire_timeout(Duration::from_secs(postgres.acquire_timeout_seconds))
                .connect(&postgres.database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            sqlx::migrate!("../../crates/infrastructure/migrations")
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            Arc::new(PostgresClientRepository::new(pool))
        }
    };

    let app_state = AppState::new(
        repository,
        Arc::new(SystemClock::new()),
        config.client_registry.backend_name(),
    );
    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "leadroute-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
