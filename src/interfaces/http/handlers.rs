use super::AppState;
use super::error::ApiError;
use crate::domain::ml::FeatureVector;
use crate::infrastructure::observability::metrics::{
    OUTCOME_ERROR, OUTCOME_MISSING_FEATURE, OUTCOME_OUT_OF_RANGE,
};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;
use tracing::{info, info_span};
use uuid::Uuid;

pub const LIVENESS_MESSAGE: &str = "Shrimp Yield Prediction API is running";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
}

/// Liveness message.
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// Health check with the loaded artifact summary.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.service;
    Json(json!({
        "status": "ok",
        "model": service.model().name(),
        "format": service.model().format().to_string(),
        "features": service.schema().len(),
        "range_validation": state.validator.is_enabled(),
        "started_at": state.started_at.to_rfc3339(),
        "uptime_secs": state.metrics.uptime_secs(),
    }))
}

pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeatureVector>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);
    let _enter = span.enter();

    let Json(features) = payload.inspect_err(|e| {
        info!("Rejected request body: {}", e.body_text());
        state.metrics.record_outcome(OUTCOME_ERROR);
    })?;

    if let Err(violations) = state.validator.validate(&features) {
        state.metrics.record_outcome(OUTCOME_OUT_OF_RANGE);
        return Err(ApiError::OutOfRange(violations));
    }

    let started = Instant::now();
    match state.service.predict_yield(&features) {
        Ok(prediction) => {
            let elapsed = started.elapsed();
            state
                .metrics
                .record_success(prediction.value(), elapsed.as_secs_f64());
            info!("Predicted yield {:.2}% in {:?}", prediction.value(), elapsed);
            Ok(Json(PredictResponse {
                prediction: prediction.value(),
            }))
        }
        Err(e) => {
            let err = ApiError::from(e);
            let outcome = match err {
                ApiError::MissingFeature(_) => OUTCOME_MISSING_FEATURE,
                _ => OUTCOME_ERROR,
            };
            state.metrics.record_outcome(outcome);
            Err(err)
        }
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
