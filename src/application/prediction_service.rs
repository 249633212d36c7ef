use crate::application::ml::YieldModel;
use crate::domain::errors::PredictionError;
use crate::domain::ml::{DerivedFeatures, FeatureSchema, FeatureVector, Prediction};
use std::sync::Arc;
use tracing::debug;

/// Turns raw pond inputs into a rounded yield prediction.
///
/// Holds the model and schema loaded at startup; both are read-only, so a
/// single instance is shared by every request handler.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn YieldModel>,
    schema: Arc<FeatureSchema>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn YieldModel>, schema: Arc<FeatureSchema>) -> Self {
        Self { model, schema }
    }

    pub fn model(&self) -> &dyn YieldModel {
        self.model.as_ref()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn predict_yield(&self, input: &FeatureVector) -> Result<Prediction, PredictionError> {
        if let Some(name) = input.first_missing() {
            return Err(PredictionError::MissingFeature {
                name: name.to_string(),
            });
        }

        let derived = DerivedFeatures::compute(input)?;
        let row = self.schema.assemble(input, &derived);
        debug!(
            "Assembled feature row: width={} density_x_lowDO={:.4} ammonia_x_nitrite={:.4}",
            row.len(),
            derived.density_x_low_do,
            derived.ammonia_x_nitrite
        );

        let raw = self.model.predict(&row)?;
        let prediction = Prediction::from_raw(raw);
        if !prediction.is_finite() {
            return Err(PredictionError::inference(format!(
                "Model returned non-finite value {}",
                raw
            )));
        }

        Ok(prediction)
    }
}
