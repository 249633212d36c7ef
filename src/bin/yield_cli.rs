//! Scores a single pond payload offline with the same artifacts and
//! pipeline the server uses.
//!
//! ```sh
//! cargo run --bin yield-cli -- --input pond.json
//! echo '{"prawn_density_per_m2": 20, ...}' | cargo run --bin yield-cli -- --input -
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use shrimp_yield::config::Config;
use shrimp_yield::domain::ml::{FeatureVector, ModelFormat};
use shrimp_yield::domain::validation::RangeValidator;
use shrimp_yield::infrastructure::ArtifactLoader;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON object with the 13 pond parameters, or `-` for stdin
    #[arg(long)]
    input: PathBuf,

    /// Model artifact (overrides MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Feature column list (overrides FEATURES_PATH)
    #[arg(long)]
    features: Option<PathBuf>,

    /// Model format: smartcore or onnx (overrides MODEL_FORMAT)
    #[arg(long)]
    format: Option<ModelFormat>,

    /// Do not reject values outside the documented operating ranges
    #[arg(long)]
    skip_range_check: bool,
}

fn read_payload(input: &Path) -> Result<FeatureVector> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read payload {:?}", input))?
    };
    serde_json::from_str(&raw).context("Payload must be a JSON object with numeric pond inputs")
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(model) = args.model {
        config.artifacts.model_path = model;
    }
    if let Some(features) = args.features {
        config.artifacts.features_path = features;
    }
    if args.format.is_some() {
        config.artifacts.model_format = args.format;
    }

    let payload = read_payload(&args.input)?;

    let enabled = config.range_validation_enabled && !args.skip_range_check;
    if let Err(violations) = RangeValidator::new(enabled).validate(&payload) {
        for v in &violations {
            eprintln!("out of range: {}", v);
        }
        anyhow::bail!("{} field(s) outside operating ranges", violations.len());
    }

    let service = ArtifactLoader::load(&config.artifacts)
        .context("Failed to load model artifacts")?
        .into_service();
    let prediction = service.predict_yield(&payload)?;

    println!(
        "{}",
        serde_json::json!({ "prediction": prediction.value() })
    );
    Ok(())
}
