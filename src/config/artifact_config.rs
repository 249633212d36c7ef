//! Model artifact location parsing from environment variables.

use crate::domain::ml::ModelFormat;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MODEL_FILE: &str = "shrimp_yield_model.json";
pub const DEFAULT_FEATURES_FILE: &str = "feature_columns.json";

/// Artifact environment configuration
#[derive(Debug, Clone)]
pub struct ArtifactEnvConfig {
    /// Deployment root that relative artifact paths resolve against
    pub root: PathBuf,
    pub model_path: PathBuf,
    pub features_path: PathBuf,
    /// Explicit format; inferred from the model extension when unset
    pub model_format: Option<ModelFormat>,
}

impl Default for ArtifactEnvConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            features_path: PathBuf::from(DEFAULT_FEATURES_FILE),
            model_format: None,
        }
    }
}

impl ArtifactEnvConfig {
    pub fn from_env() -> Result<Self> {
        let root = env::var("ARTIFACT_ROOT").unwrap_or_else(|_| ".".to_string());
        let model_path =
            env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_FILE.to_string());
        let features_path =
            env::var("FEATURES_PATH").unwrap_or_else(|_| DEFAULT_FEATURES_FILE.to_string());

        let model_format = match env::var("MODEL_FORMAT") {
            Ok(s) if !s.trim().is_empty() => {
                Some(ModelFormat::from_str(s.trim()).context("Failed to parse MODEL_FORMAT")?)
            }
            _ => None,
        };

        Ok(Self {
            root: PathBuf::from(root),
            model_path: PathBuf::from(model_path),
            features_path: PathBuf::from(features_path),
            model_format,
        })
    }

    /// Builds a config pointing at two files, inferring the format.
    pub fn with_paths(model_path: impl Into<PathBuf>, features_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            features_path: features_path.into(),
            ..Self::default()
        }
    }

    pub fn resolved_model_path(&self) -> PathBuf {
        self.root.join(&self.model_path)
    }

    pub fn resolved_features_path(&self) -> PathBuf {
        self.root.join(&self.features_path)
    }

    pub fn format(&self) -> ModelFormat {
        self.model_format
            .unwrap_or_else(|| ModelFormat::infer(&self.model_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_resolve_against_root() {
        let config = ArtifactEnvConfig {
            root: PathBuf::from("/srv/backend"),
            ..ArtifactEnvConfig::default()
        };
        assert_eq!(
            config.resolved_model_path(),
            PathBuf::from("/srv/backend/shrimp_yield_model.json")
        );
        assert_eq!(
            config.resolved_features_path(),
            PathBuf::from("/srv/backend/feature_columns.json")
        );
    }

    #[test]
    fn test_absolute_paths_ignore_root() {
        let config = ArtifactEnvConfig {
            root: PathBuf::from("/srv/backend"),
            ..ArtifactEnvConfig::with_paths("/models/forest.onnx", "cols.json")
        };
        assert_eq!(config.resolved_model_path(), PathBuf::from("/models/forest.onnx"));
        assert_eq!(config.format(), ModelFormat::Onnx);
    }

    #[test]
    fn test_explicit_format_wins() {
        let config = ArtifactEnvConfig {
            model_format: Some(ModelFormat::Onnx),
            ..ArtifactEnvConfig::default()
        };
        assert_eq!(config.format(), ModelFormat::Onnx);
    }
}
