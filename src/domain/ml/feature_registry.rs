use crate::domain::errors::{FeatureTypeError, PredictionError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const PRAWN_DENSITY: &str = "prawn_density_per_m2";
pub const FEED_QUALITY: &str = "feed_quality_index";
pub const WATER_EXCHANGE: &str = "water_exchange_per_month";
pub const DISSOLVED_OXYGEN: &str = "DO_mg_L";
pub const TEMPERATURE: &str = "temperature_C";
pub const PH: &str = "pH";
pub const AMMONIA: &str = "ammonia_mg_L";
pub const NITRITE: &str = "nitrite_mg_L";
pub const HYDROGEN_SULFIDE: &str = "H2S_mg_L";
pub const TURBIDITY: &str = "turbidity_cm";
pub const SALINITY: &str = "salinity_ppt";
pub const POND_SIZE: &str = "pond_size_ha";
pub const RECYCLING_EFFICIENCY: &str = "recycling_efficiency_pct";

pub const DENSITY_X_LOW_DO: &str = "density_x_lowDO";
pub const AMMONIA_X_NITRITE: &str = "ammonia_x_nitrite";

/// Raw inputs every request must carry, in the order they are checked.
/// Names must match the column names used when the model was trained.
pub const REQUIRED_FEATURES: [&str; 13] = [
    PRAWN_DENSITY,
    FEED_QUALITY,
    WATER_EXCHANGE,
    DISSOLVED_OXYGEN,
    TEMPERATURE,
    PH,
    AMMONIA,
    NITRITE,
    HYDROGEN_SULFIDE,
    TURBIDITY,
    SALINITY,
    POND_SIZE,
    RECYCLING_EFFICIENCY,
];

/// Interaction terms appended after the raw inputs.
pub const DERIVED_FEATURES: [&str; 2] = [DENSITY_X_LOW_DO, AMMONIA_X_NITRITE];

/// Oxygen level (mg/L) below which stocking density starts to hurt yield.
pub const LOW_DO_THRESHOLD: f64 = 5.0;

/// Named numeric pond inputs as received from the caller.
///
/// Deserializing keeps only the required raw inputs: other keys are dropped
/// whatever their JSON type, while a required key holding a non-number is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Looks up a value, failing with the missing key's name.
    pub fn require(&self, name: &str) -> Result<f64, PredictionError> {
        self.get(name).ok_or_else(|| PredictionError::MissingFeature {
            name: name.to_string(),
        })
    }

    /// First required key absent from this vector, in canonical order.
    pub fn first_missing(&self) -> Option<&'static str> {
        REQUIRED_FEATURES
            .iter()
            .copied()
            .find(|name| !self.0.contains_key(*name))
    }

}

impl TryFrom<Map<String, Value>> for FeatureVector {
    type Error = FeatureTypeError;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut features = Self::new();
        for name in REQUIRED_FEATURES {
            // Absent keys are reported later, by the pipeline
            let Some(value) = object.get(name) else {
                continue;
            };
            let number = value.as_f64().ok_or_else(|| FeatureTypeError {
                field: name,
                found: value.to_string(),
            })?;
            features.insert(name, number);
        }
        Ok(features)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub density_x_low_do: f64,
    pub ammonia_x_nitrite: f64,
}

impl DerivedFeatures {
    pub fn from_values(density: f64, dissolved_oxygen: f64, ammonia: f64, nitrite: f64) -> Self {
        Self {
            // Clamped: oxygen above the threshold contributes nothing
            density_x_low_do: density * (LOW_DO_THRESHOLD - dissolved_oxygen).max(0.0),
            ammonia_x_nitrite: ammonia * nitrite,
        }
    }

    pub fn compute(input: &FeatureVector) -> Result<Self, PredictionError> {
        Ok(Self::from_values(
            input.require(PRAWN_DENSITY)?,
            input.require(DISSOLVED_OXYGEN)?,
            input.require(AMMONIA)?,
            input.require(NITRITE)?,
        ))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            DENSITY_X_LOW_DO => Some(self.density_x_low_do),
            AMMONIA_X_NITRITE => Some(self.ammonia_x_nitrite),
            _ => None,
        }
    }
}
