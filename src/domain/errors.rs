use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the prediction pipeline
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Missing required feature: {name}")]
    MissingFeature { name: String },

    /// Any failure while assembling the row or running the model.
    /// The reason is for logs only and must not reach the caller.
    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

impl PredictionError {
    pub fn inference(reason: impl Into<String>) -> Self {
        PredictionError::Inference {
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading the model and feature schema at startup.
/// All of them are fatal: the service must not start serving.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Feature schema {} is empty", path.display())]
    EmptySchema { path: PathBuf },

    #[error("Feature schema {} lists column '{column}' more than once", path.display())]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("Warmup inference failed: {reason}")]
    Warmup { reason: String },
}

/// A single field outside its documented operating range
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} = {value} is outside [{min}, {max}]")]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_feature_message_names_key() {
        let err = PredictionError::MissingFeature {
            name: "DO_mg_L".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required feature: DO_mg_L");
    }

    #[test]
    fn test_artifact_error_formatting() {
        let err = ArtifactError::DuplicateColumn {
            path: PathBuf::from("feature_columns.json"),
            column: "pH".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("feature_columns.json"));
        assert!(msg.contains("'pH'"));
    }

    #[test]
    fn test_range_violation_formatting() {
        let violation = RangeViolation {
            field: "prawn_density_per_m2",
            value: 100.0,
            min: 5.0,
            max: 45.0,
        };
        assert_eq!(
            violation.to_string(),
            "prawn_density_per_m2 = 100 is outside [5, 45]"
        );
    }
}

/// A required input that is present but not a JSON number
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: Input should be a valid number, got {found}")]
pub struct FeatureTypeError {
    pub field: &'static str,
    pub found: String,
}
