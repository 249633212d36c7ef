//! Startup loading of the trained model and its feature schema.
//!
//! Both artifacts are read exactly once; any failure here is fatal and the
//! service must not accept traffic.

use crate::application::ml::{OnnxPredictor, SmartCorePredictor, YieldModel};
use crate::application::prediction_service::PredictionService;
use crate::config::ArtifactEnvConfig;
use crate::domain::errors::ArtifactError;
use crate::domain::ml::feature_registry::DERIVED_FEATURES;
use crate::domain::ml::{FeatureSchema, ModelFormat};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Model and schema held for the process lifetime.
pub struct LoadedArtifacts {
    pub model: Arc<dyn YieldModel>,
    pub schema: Arc<FeatureSchema>,
}

impl LoadedArtifacts {
    pub fn into_service(self) -> PredictionService {
        PredictionService::new(self.model, self.schema)
    }
}

pub struct ArtifactLoader;

impl ArtifactLoader {
    pub fn load(config: &ArtifactEnvConfig) -> Result<LoadedArtifacts, ArtifactError> {
        let model_path = config.resolved_model_path();
        let features_path = config.resolved_features_path();
        let format = config.format();

        let schema = Self::load_schema(&features_path)?;
        let model = Self::load_model(&model_path, format)?;

        Self::warmup(model.as_ref(), &schema)?;

        info!(
            "Artifacts ready: model='{}' format={} features={} path={:?}",
            model.name(),
            format,
            schema.len(),
            model_path
        );

        Ok(LoadedArtifacts {
            model,
            schema: Arc::new(schema),
        })
    }

    pub fn load_schema(path: &Path) -> Result<FeatureSchema, ArtifactError> {
        ensure_exists(path)?;

        let buffer = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: FeatureSchema =
            serde_json::from_slice(&buffer).map_err(|e| ArtifactError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if schema.is_empty() {
            return Err(ArtifactError::EmptySchema {
                path: path.to_path_buf(),
            });
        }
        if let Some(column) = schema.first_duplicate() {
            return Err(ArtifactError::DuplicateColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }

        let missing_derived: Vec<&str> = DERIVED_FEATURES
            .iter()
            .copied()
            .filter(|d| !schema.columns().iter().any(|c| c.as_str() == *d))
            .collect();
        if !missing_derived.is_empty() {
            warn!(
                "Feature schema {:?} does not list derived columns {:?}; they will be ignored",
                path, missing_derived
            );
        }

        Ok(schema)
    }

    pub fn load_model(
        path: &Path,
        format: ModelFormat,
    ) -> Result<Arc<dyn YieldModel>, ArtifactError> {
        ensure_exists(path)?;

        let model: Arc<dyn YieldModel> = match format {
            ModelFormat::SmartCore => Arc::new(SmartCorePredictor::load(path)?),
            ModelFormat::Onnx => Arc::new(OnnxPredictor::load(path)?),
        };
        Ok(model)
    }

    /// Runs one all-zero row through the model so a schema/model width
    /// mismatch fails at startup instead of on the first request.
    fn warmup(model: &dyn YieldModel, schema: &FeatureSchema) -> Result<(), ArtifactError> {
        let row = schema.zero_row();
        // smartcore indexes columns directly and panics on a narrow row
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| model.predict(&row)));

        match outcome {
            Ok(Ok(_)) => {
                info!("Warmup inference ok ({} columns)", row.len());
                Ok(())
            }
            Ok(Err(e)) => Err(ArtifactError::Warmup {
                reason: e.to_string(),
            }),
            Err(_) => Err(ArtifactError::Warmup {
                reason: format!("model panicked on a {}-column row", row.len()),
            }),
        }
    }
}

fn ensure_exists(path: &Path) -> Result<(), ArtifactError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ArtifactError::NotFound {
            path: path.to_path_buf(),
        })
    }
}
