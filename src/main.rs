//! Marketplace API server entry point.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build the ledger over the PostgreSQL store
//! 5. Serve the router on the configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use writing_market_server::{
    config::Config, db, routes, services::LedgerService, state::AppState, store::PgLedgerStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let ledger = LedgerService::new(Arc::new(PgLedgerStore::new(pool.clone())));
    let addr = format!("0.0.0.0:{}", config.server_port);
    let app = routes::router(AppState::new(pool, ledger, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
