use super::feature_registry::{DerivedFeatures, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered column names the model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        self.columns
            .iter()
            .find(|c| !seen.insert(c.as_str()))
            .map(String::as_str)
    }

    /// Builds the model row in schema order. Raw inputs win over derived
    /// terms on a name clash; columns found in neither are zero.
    pub fn assemble(&self, input: &FeatureVector, derived: &DerivedFeatures) -> FeatureRow {
        let values = self
            .columns
            .iter()
            .map(|column| {
                input
                    .get(column)
                    .or_else(|| derived.get(column))
                    .unwrap_or(0.0)
            })
            .collect();
        FeatureRow { values }
    }

    /// Row of zeros with the schema's width, used to warm the model up.
    pub fn zero_row(&self) -> FeatureRow {
        FeatureRow {
            values: vec![0.0; self.columns.len()],
        }
    }
}

/// A single model input row, already ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }
}
