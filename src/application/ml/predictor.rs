use crate::domain::errors::PredictionError;
use crate::domain::ml::{FeatureRow, ModelFormat};

/// Interface for trained yield regression models
pub trait YieldModel: Send + Sync {
    /// Predict the raw (unrounded) yield percentage for one ordered row
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Artifact encoding the model was loaded from
    fn format(&self) -> ModelFormat;
}
