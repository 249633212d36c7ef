use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// On-disk encoding of the trained model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// smartcore random forest serialized with serde_json
    SmartCore,
    /// ONNX graph, e.g. exported from scikit-learn
    Onnx,
}

impl ModelFormat {
    /// Guesses the format from the file extension; anything but `.onnx`
    /// is treated as a smartcore JSON artifact.
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => ModelFormat::Onnx,
            _ => ModelFormat::SmartCore,
        }
    }
}

impl FromStr for ModelFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smartcore" | "json" => Ok(ModelFormat::SmartCore),
            "onnx" => Ok(ModelFormat::Onnx),
            _ => anyhow::bail!("Invalid MODEL_FORMAT: {}. Must be 'smartcore' or 'onnx'", s),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFormat::SmartCore => write!(f, "smartcore"),
            ModelFormat::Onnx => write!(f, "onnx"),
        }
    }
}
