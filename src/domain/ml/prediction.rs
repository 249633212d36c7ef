use serde::{Deserialize, Serialize};

/// Predicted yield percentage, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction(f64);

impl Prediction {
    /// Rounds the exact binary value to two decimal places, ties to even.
    ///
    /// Goes through decimal formatting instead of `(raw * 100).round()`: the
    /// multiplication can itself round (2.675 becomes exactly 267.5) or
    /// overflow for very large values.
    pub fn from_raw(raw: f64) -> Self {
        Self(format!("{:.2}", raw).parse().unwrap_or(raw))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}
