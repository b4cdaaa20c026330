//! aquameter-gateway server entry point.
//!
//! Starts the Axum HTTP server, optionally rehydrates the reading
//! series from Postgres, and seeds demo readings into empty series.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use aquameter_gateway::api;
use aquameter_gateway::app_state::AppState;
use aquameter_gateway::config::MeterConfig;
use aquameter_gateway::persistence::PostgresReadingStore;
use aquameter_gateway::service::{BillingCalculator, MeterService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = MeterConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(
        addr = %config.listen_addr,
        tariff = config.tariff_per_cubic_meter,
        "starting aquameter-gateway"
    );

    // Optional Postgres mirror
    let store = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let store = PostgresReadingStore::new(pool);
        store.ensure_schema().await?;
        tracing::info!("postgres mirror enabled");
        Some(store)
    } else {
        None
    };

    // Build service layer
    let billing = BillingCalculator::new(config.tariff_per_cubic_meter);
    let meter_service = Arc::new(MeterService::new(billing, store));
    meter_service.load_persisted().await?;

    // Seed deterministic demo readings into empty series
    if config.seed_fixtures {
        meter_service.seed_demo_data(Utc::now()).await?;
    }

    // Build application state
    let app_state = AppState { meter_service };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
