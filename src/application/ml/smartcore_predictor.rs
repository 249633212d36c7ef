use super::predictor::YieldModel;
use crate::domain::errors::{ArtifactError, PredictionError};
use crate::domain::ml::{FeatureRow, ModelFormat};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;
use tracing::info;

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub struct SmartCorePredictor {
    model: ForestRegressor,
}

impl SmartCorePredictor {
    pub fn new(model: ForestRegressor) -> Self {
        Self { model }
    }

    /// Loads a random forest serialized with serde_json.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let buffer = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let model: ForestRegressor =
            serde_json::from_slice(&buffer).map_err(|e| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        info!("Successfully loaded smartcore model from {:?}", path);
        Ok(Self::new(model))
    }
}

impl YieldModel for SmartCorePredictor {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![row.values().to_vec()])
            .map_err(|e| PredictionError::inference(format!("Matrix creation failed: {}", e)))?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| PredictionError::inference(format!("Prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::inference("No prediction returned"))
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn format(&self) -> ModelFormat {
        ModelFormat::SmartCore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;

    fn fitted() -> ForestRegressor {
        // y = 10 * x0 on a tiny grid; x1 is noise-free filler
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 1.0]).collect();
        let y: Vec<f64> = (0..20).map(|i| 10.0 * i as f64).collect();
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(5)
            .with_max_depth(6);
        RandomForestRegressor::fit(&DenseMatrix::from_2d_vec(&x).unwrap(), &y, params).unwrap()
    }

    #[test]
    fn test_predict_single_row() {
        let predictor = SmartCorePredictor::new(fitted());
        let value = predictor
            .predict(&FeatureRow::from_values(vec![10.0, 1.0]))
            .unwrap();
        assert!(value.is_finite());
        assert!((0.0..=190.0).contains(&value));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = std::env::temp_dir().join(format!("garbage-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"{not json").unwrap();

        let result = SmartCorePredictor::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ArtifactError::Corrupt { .. })));
    }

    #[test]
    fn test_serde_roundtrip_preserves_predictions() {
        let model = fitted();
        let json = serde_json::to_vec(&model).unwrap();
        let restored: ForestRegressor = serde_json::from_slice(&json).unwrap();

        let row = FeatureRow::from_values(vec![3.0, 1.0]);
        let a = SmartCorePredictor::new(model).predict(&row).unwrap();
        let b = SmartCorePredictor::new(restored).predict(&row).unwrap();
        assert_eq!(a, b);
    }
}
