use crate::domain::errors::RangeViolation;
use crate::domain::ml::feature_registry::*;
use crate::domain::ml::FeatureVector;
use tracing::warn;

/// Inclusive operating range for one raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Documented operating ranges of the training data, one per raw input.
pub const OPERATING_RANGES: [FieldRange; 13] = [
    FieldRange::new(PRAWN_DENSITY, 5.0, 45.0),
    FieldRange::new(FEED_QUALITY, 0.4, 1.0),
    FieldRange::new(WATER_EXCHANGE, 1.0, 12.0),
    FieldRange::new(DISSOLVED_OXYGEN, 3.0, 8.5),
    FieldRange::new(TEMPERATURE, 24.0, 34.0),
    FieldRange::new(PH, 6.5, 9.0),
    FieldRange::new(AMMONIA, 0.0, 1.5),
    FieldRange::new(NITRITE, 0.0, 0.8),
    FieldRange::new(HYDROGEN_SULFIDE, 0.0, 0.2),
    FieldRange::new(TURBIDITY, 20.0, 80.0),
    FieldRange::new(SALINITY, 5.0, 35.0),
    FieldRange::new(POND_SIZE, 0.1, 2.5),
    FieldRange::new(RECYCLING_EFFICIENCY, 40.0, 95.0),
];

/// Boundary check run before a request reaches the prediction pipeline.
///
/// Absent fields are skipped: presence is enforced by the pipeline itself.
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    enabled: bool,
}

impl RangeValidator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns every violating field in table order.
    pub fn validate(&self, input: &FeatureVector) -> Result<(), Vec<RangeViolation>> {
        if !self.enabled {
            return Ok(());
        }

        let violations: Vec<RangeViolation> = OPERATING_RANGES
            .iter()
            .filter_map(|range| {
                let value = input.get(range.field)?;
                // NaN never satisfies the bounds and is reported too
                if range.contains(value) {
                    None
                } else {
                    Some(RangeViolation {
                        field: range.field,
                        value,
                        min: range.min,
                        max: range.max,
                    })
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            for v in &violations {
                warn!("Validation FAILED: {}", v);
            }
            Err(violations)
        }
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self::new(true)
    }
}
