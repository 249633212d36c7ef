pub mod feature_registry;
pub mod feature_schema;
pub mod model_format;
pub mod prediction;

pub use feature_registry::{DerivedFeatures, FeatureVector, REQUIRED_FEATURES};
pub use feature_schema::{FeatureRow, FeatureSchema};
pub use model_format::ModelFormat;
pub use prediction::Prediction;
