#![allow(dead_code)]

use shrimp_yield::application::ml::ForestRegressor;
use shrimp_yield::config::ArtifactEnvConfig;
use shrimp_yield::domain::ml::feature_registry::DERIVED_FEATURES;
use shrimp_yield::domain::ml::{DerivedFeatures, FeatureSchema, FeatureVector, REQUIRED_FEATURES};
use shrimp_yield::domain::validation::OPERATING_RANGES;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::PathBuf;

pub const MODEL_FILE: &str = "shrimp_yield_model.json";
pub const FEATURES_FILE: &str = "feature_columns.json";

/// Scratch directory holding one model + schema pair; removed on drop.
pub struct ArtifactDir {
    pub root: PathBuf,
}

impl ArtifactDir {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("shrimp-yield-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    /// Directory with a forest fitted on the training column layout.
    pub fn trained() -> Self {
        let dir = Self::new();
        let schema = training_schema();
        dir.write_schema(schema.columns());
        dir.write_model(&fit_forest(&schema, 80, |_| {}));
        dir
    }

    pub fn write_schema<S: AsRef<str>>(&self, columns: &[S]) -> PathBuf {
        let cols: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
        self.write_raw(FEATURES_FILE, serde_json::to_string(&cols).unwrap().as_bytes())
    }

    pub fn write_model(&self, model: &ForestRegressor) -> PathBuf {
        self.write_raw(MODEL_FILE, &serde_json::to_vec(model).unwrap())
    }

    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn config(&self) -> ArtifactEnvConfig {
        ArtifactEnvConfig {
            root: self.root.clone(),
            ..ArtifactEnvConfig::with_paths(MODEL_FILE, FEATURES_FILE)
        }
    }
}

impl Drop for ArtifactDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

/// Raw inputs followed by the two interaction terms.
pub fn training_schema() -> FeatureSchema {
    FeatureSchema::new(
        REQUIRED_FEATURES
            .iter()
            .chain(DERIVED_FEATURES.iter())
            .map(|c| c.to_string())
            .collect(),
    )
}

/// Deterministic pseudo-random source for synthetic ponds.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Synthetic pond drawn uniformly from the operating ranges.
fn synthetic_pond(rng: &mut Lcg) -> FeatureVector {
    OPERATING_RANGES
        .iter()
        .map(|r| (r.field, r.min + rng.next_f64() * (r.max - r.min)))
        .collect()
}

fn synthetic_yield(pond: &FeatureVector, derived: &DerivedFeatures) -> f64 {
    let get = |name: &str| pond.get(name).unwrap_or(0.0);
    45.0 + 20.0 * get("feed_quality_index") + 2.0 * get("DO_mg_L")
        - 0.4 * derived.density_x_low_do
        - 30.0 * derived.ammonia_x_nitrite
        - 1.2 * (get("temperature_C") - 29.0).abs()
        + 0.1 * get("recycling_efficiency_pct")
}

/// Fits a small forest on `rows` synthetic ponds laid out per `schema`.
/// `tweak` may adjust each pond before it is assembled.
pub fn fit_forest(
    schema: &FeatureSchema,
    rows: usize,
    tweak: impl Fn(&mut FeatureVector),
) -> ForestRegressor {
    let mut rng = Lcg(42);
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);

    for _ in 0..rows {
        let mut pond = synthetic_pond(&mut rng);
        tweak(&mut pond);
        let derived = DerivedFeatures::compute(&pond).unwrap();
        y.push(synthetic_yield(&pond, &derived));
        x.push(schema.assemble(&pond, &derived).values().to_vec());
    }

    let params = RandomForestRegressorParameters::default()
        .with_n_trees(20)
        .with_max_depth(6);
    RandomForestRegressor::fit(&DenseMatrix::from_2d_vec(&x).unwrap(), &y, params).unwrap()
}

/// The documented example request.
pub fn nominal_payload() -> serde_json::Value {
    serde_json::json!({
        "prawn_density_per_m2": 20,
        "feed_quality_index": 0.8,
        "water_exchange_per_month": 6,
        "DO_mg_L": 6.5,
        "temperature_C": 28,
        "pH": 7.8,
        "ammonia_mg_L": 0.1,
        "nitrite_mg_L": 0.05,
        "H2S_mg_L": 0.01,
        "turbidity_cm": 40,
        "salinity_ppt": 20,
        "pond_size_ha": 1.0,
        "recycling_efficiency_pct": 70
    })
}

pub fn nominal_features() -> FeatureVector {
    serde_json::from_value(nominal_payload()).unwrap()
}

pub fn is_two_decimal(value: f64) -> bool {
    ((value * 100.0).round() - value * 100.0).abs() < 1e-6
}
