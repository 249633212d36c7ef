//! Configuration module for the yield service.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server (incl. CORS), Artifacts, Validation and Observability.

mod artifact_config;
mod observability_config;
mod server_config;

pub use artifact_config::{ArtifactEnvConfig, DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE};
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::{CorsEnvConfig, DEFAULT_ALLOWED_ORIGIN, ServerEnvConfig};

use anyhow::{Context, Result};
use std::env;
use tracing::warn;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub artifacts: ArtifactEnvConfig,
    /// Reject out-of-range inputs with 422 before they reach the model
    pub range_validation_enabled: bool,
    pub observability: ObservabilityEnvConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerEnvConfig::default(),
            artifacts: ArtifactEnvConfig::default(),
            range_validation_enabled: true,
            observability: ObservabilityEnvConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let artifacts = ArtifactEnvConfig::from_env().context("Failed to load artifact config")?;
        let observability = ObservabilityEnvConfig::from_env();

        let range_validation_enabled = env_flag("RANGE_VALIDATION_ENABLED", true);

        Ok(Self {
            server,
            artifacts,
            range_validation_enabled,
            observability,
        })
    }
}

/// Reads a boolean flag, case-insensitively. Unset means `default`; an
/// unparseable value also falls back to `default` but is logged.
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().parse::<bool>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "Ignoring {}={:?}: expected true or false, using {}",
                name, raw, default
            );
            default
        }
    }
}
