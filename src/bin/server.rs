//! Shrimp Yield Server - HTTP prediction service
//!
//! Loads the trained model and feature schema once, then serves
//! `POST /predict` until Ctrl+C.
//!
//! # Usage
//! ```sh
//! ARTIFACT_ROOT=/srv/backend PORT=8000 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `ARTIFACT_ROOT`, `MODEL_PATH`, `FEATURES_PATH`, `MODEL_FORMAT` - model artifacts
//! - `SERVER_BIND_ADDRESS`, `PORT` - listen address (default: 0.0.0.0:8000)
//! - `CORS_ALLOWED_ORIGINS`, `CORS_ALLOW_CREDENTIALS` - browser access
//! - `RANGE_VALIDATION_ENABLED` - reject out-of-range inputs with 422 (default: true)
//! - `METRICS_ENABLED` - expose `/metrics` (default: true)

use anyhow::{Context, Result};
use shrimp_yield::config::Config;
use shrimp_yield::domain::validation::RangeValidator;
use shrimp_yield::infrastructure::ArtifactLoader;
use shrimp_yield::infrastructure::observability::Metrics;
use shrimp_yield::interfaces::http::{self, AppState, RouterOptions};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Shrimp Yield Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Address={}, RangeValidation={}, Origins={:?}",
        config.server.socket_address(),
        config.range_validation_enabled,
        config.server.cors.allowed_origins
    );

    // Fatal on any artifact problem: never serve without a model
    let artifacts =
        ArtifactLoader::load(&config.artifacts).context("Failed to load model artifacts")?;

    let metrics = Metrics::new()?;
    let state = AppState::new(
        artifacts.into_service(),
        RangeValidator::new(config.range_validation_enabled),
        metrics,
    );

    let options = RouterOptions {
        cors: config.server.cors.clone(),
        metrics_enabled: config.observability.metrics_enabled,
    };
    let app = http::router(state, &options)?;

    http::serve(app, &config.server.socket_address()).await?;
    info!("Server stopped.");

    Ok(())
}
