pub mod onnx_predictor;
pub mod predictor;
pub mod smartcore_predictor;

pub use onnx_predictor::OnnxPredictor;
pub use predictor::YieldModel;
pub use smartcore_predictor::{ForestRegressor, SmartCorePredictor};
