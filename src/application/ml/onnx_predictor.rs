use super::predictor::YieldModel;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::{FeatureRow, ModelFormat};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Runs an ONNX regression graph taking a `[1, n_features]` f32 tensor.
pub struct OnnxPredictor {
    // Session::run needs &mut
    session: Mutex<Session>,
}

impl OnnxPredictor {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        info!("Successfully loaded ONNX model from {:?}", path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl YieldModel for OnnxPredictor {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::inference(format!("Mutex lock failed: {}", e)))?;

        let shape = vec![1, row.len()];
        let input_value = ort::value::Value::from_array((shape.as_slice(), row.to_f32()))
            .map_err(|e| {
                PredictionError::inference(format!("Input value creation failed: {}", e))
            })?;

        let inputs = ort::inputs![input_value];

        let outputs = session
            .run(inputs)
            .map_err(|e| PredictionError::inference(e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| PredictionError::inference("No output found"))?;
        let data = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError::inference(e.to_string()))?;

        data.1
            .iter()
            .next()
            .map(|v| *v as f64)
            .ok_or_else(|| PredictionError::inference("Empty output"))
    }

    fn name(&self) -> &str {
        "ONNX Runtime Regressor"
    }

    fn format(&self) -> ModelFormat {
        ModelFormat::Onnx
    }
}
