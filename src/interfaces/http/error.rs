use crate::domain::errors::{PredictionError, RangeViolation};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use tracing::error;

/// Generic message for failures whose cause must stay server-side
pub const GENERIC_FAILURE: &str = "Prediction failed";

/// Errors returned to HTTP callers, rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a JSON object, or a required input was not a number
    InvalidBody(JsonRejection),
    MissingFeature(String),
    OutOfRange(Vec<RangeViolation>),
    NotFound,
    MethodNotAllowed,
    Internal,
}

#[derive(Debug, Serialize)]
struct ViolationDetail {
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    msg: String,
}

impl From<&RangeViolation> for ViolationDetail {
    fn from(v: &RangeViolation) -> Self {
        Self {
            field: v.field,
            value: v.value,
            min: v.min,
            max: v.max,
            msg: format!("Input should be between {} and {}", v.min, v.max),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::MissingFeature { name } => ApiError::MissingFeature(name),
            PredictionError::Inference { reason } => {
                error!("Prediction failed: {}", reason);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody(rejection) => {
                let status = rejection.status();
                (status, Json(json!({ "detail": rejection.body_text() }))).into_response()
            }
            ApiError::MissingFeature(name) => {
                let err = PredictionError::MissingFeature { name };
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "detail": err.to_string() })),
                )
                    .into_response()
            }
            ApiError::OutOfRange(violations) => {
                let detail: Vec<ViolationDetail> =
                    violations.iter().map(ViolationDetail::from).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "detail": "Method Not Allowed" })),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": GENERIC_FAILURE })),
            )
                .into_response(),
        }
    }
}

/// Converts a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}
