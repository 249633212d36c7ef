//! HTTP surface built on axum.

pub mod error;
pub mod handlers;

use crate::application::PredictionService;
use crate::config::CorsEnvConfig;
use crate::domain::validation::RangeValidator;
use crate::infrastructure::observability::Metrics;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by every handler; all members are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub validator: RangeValidator,
    pub metrics: Metrics,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: PredictionService, validator: RangeValidator, metrics: Metrics) -> Self {
        metrics.set_model(service.model().name(), &service.model().format().to_string());
        Self {
            service,
            validator,
            metrics,
            started_at: Utc::now(),
        }
    }
}

/// Router options that come from configuration
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub cors: CorsEnvConfig,
    pub metrics_enabled: bool,
}

/// Build the axum Router with `/`, `/health`, `/predict` and optionally `/metrics`.
pub fn router(state: AppState, options: &RouterOptions) -> Result<Router> {
    let mut app = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/predict", post(handlers::predict_handler));

    if options.metrics_enabled {
        app = app.route("/metrics", get(handlers::metrics_handler));
    }

    Ok(app
        .fallback(handlers::not_found_handler)
        .method_not_allowed_fallback(handlers::method_not_allowed_handler)
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(cors_layer(&options.cors)?)
        .layer(TraceLayer::new_for_http()))
}

pub fn cors_layer(cors: &CorsEnvConfig) -> Result<CorsLayer> {
    let origin = if cors.allows_any_origin() {
        if cors.allow_credentials {
            anyhow::bail!("Credentialed CORS cannot allow any origin");
        }
        AllowOrigin::from(Any)
    } else {
        let origins = cors
            .allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    // Wildcards are not allowed together with credentials; mirror instead
    let (methods, headers) = if cors.allow_credentials {
        (AllowMethods::mirror_request(), AllowHeaders::mirror_request())
    } else {
        (AllowMethods::from(Any), AllowHeaders::from(Any))
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(cors.allow_credentials))
}

/// Bind and serve until the process receives Ctrl+C.
pub async fn serve(app: Router, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received. Draining connections...");
        })
        .await?;
    Ok(())
}
