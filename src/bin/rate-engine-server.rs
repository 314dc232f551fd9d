//! Rate engine HTTP server binary.
//!
//! Loads the tariff configuration, builds the rate store and serves the
//! API until interrupted.
//!
//! # Usage
//!
//! ```bash
//! # Serve linehaul rates from the configured YAML rows
//! cargo run --bin rate-engine-server
//!
//! # Serve linehaul rates from an SQLite database
//! LINEHAUL_RATES_DB=./rates.db cargo run --bin rate-engine-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RATE_ENGINE_CONFIG_DIR`: Configuration directory (default: ./config/tariff400ng)
//! - `LINEHAUL_RATES_DB`: SQLite rate database; seeded from the configuration when empty
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rate_engine::api::{AppState, create_router};
use rate_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/tariff400ng";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_dir =
        env::var("RATE_ENGINE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    info!(config_dir = %config_dir, "Starting rate engine server");

    let config = ConfigLoader::load(&config_dir)?;
    let state = build_state(config)?;
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(feature = "sqlite")]
fn build_state(config: ConfigLoader) -> anyhow::Result<AppState> {
    use std::sync::Arc;

    use rate_engine::store::SqliteRateStore;

    let Ok(path) = env::var("LINEHAUL_RATES_DB") else {
        info!("Serving linehaul rates from configuration");
        return Ok(AppState::new(config)?);
    };

    let store = SqliteRateStore::open(&path)?;
    if store.count()? == 0 {
        store.insert_all(config.config().linehaul_rates())?;
        info!(path = %path, "Seeded linehaul rate database from configuration");
    }
    info!(path = %path, rows = store.count()?, "Serving linehaul rates from SQLite");

    Ok(AppState::with_rate_store(config, Arc::new(store)))
}

#[cfg(not(feature = "sqlite"))]
fn build_state(config: ConfigLoader) -> anyhow::Result<AppState> {
    if env::var("LINEHAUL_RATES_DB").is_ok() {
        tracing::warn!("LINEHAUL_RATES_DB is set but the sqlite feature is disabled");
    }
    Ok(AppState::new(config)?)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
