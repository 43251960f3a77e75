mod app;
mod config;
mod db;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::logging::LoggingConfig;
use crate::services::AggregationService;
use crate::state::AppState;
use crate::store::PgStockStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    let aggregation = AggregationService::new(
        Arc::new(PgStockStore::new(pool)),
        config.history_data_dir.clone(),
    );
    tracing::info!("Reading price history from {}", aggregation.data_dir().display());

    let state = AppState {
        aggregation: Arc::new(aggregation),
    };
    let cors = app::cors_layer(&config.cors_allowed_origin)
        .with_context(|| format!("invalid CORS_ALLOWED_ORIGIN: {}", config.cors_allowed_origin))?;
    let app = app::create_app(state, cors);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Stockview backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
