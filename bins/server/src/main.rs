//! Fairshare API Server
//!
//! Loads configuration, connects to the database, resolves the initial rate
//! table (live or fallback) and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fairshare_api::{AppState, create_router};
use fairshare_core::currency::{FallbackRates, RateProvider};
use fairshare_db::connect_with;
use fairshare_quotes::DolarApiSource;
use fairshare_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairshare=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let overrides = config.rates.fallback_overrides()?;
    if !overrides.is_empty() {
        warn!(count = overrides.len(), "Using configured fallback rate overrides");
    }
    let fallback = FallbackRates::with_overrides(&overrides)?;
    let source = DolarApiSource::from_config(&config.rates)?;
    info!(endpoint = %source.endpoint(), "Fetching initial exchange rates");

    // Calculations must not run before the first table is resolved
    let rates = RateProvider::init(source, fallback).await;
    info!(status = rates.current().status().label(), "Exchange rates ready");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        rates: Arc::new(rates),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
