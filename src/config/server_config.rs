//! HTTP server and CORS configuration parsing from environment variables.

use super::env_flag;
use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://frontend-shrimp.vercel.app";

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
    pub cors: CorsEnvConfig,
}

/// Cross-origin policy for browser callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsEnvConfig {
    /// Exact origins, or a single `*` for any origin
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsEnvConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsEnvConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            allow_credentials: false,
        }
    }
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            cors: CorsEnvConfig::default(),
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let bind_address =
            env::var("SERVER_BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse PORT")?;

        let origins_str = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origins: Vec<String> = origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let allow_credentials = env_flag("CORS_ALLOW_CREDENTIALS", false);

        let cors = CorsEnvConfig {
            allowed_origins,
            allow_credentials,
        };

        // Browsers refuse credentialed responses with a wildcard origin
        if cors.allow_credentials && cors.allows_any_origin() {
            anyhow::bail!("CORS_ALLOW_CREDENTIALS=true cannot be combined with CORS_ALLOWED_ORIGINS=*");
        }

        Ok(Self {
            bind_address,
            port,
            cors,
        })
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
