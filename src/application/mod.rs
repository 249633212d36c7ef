// Model backends
pub mod ml;

// Feature assembly and inference
pub mod prediction_service;

pub use prediction_service::PredictionService;
