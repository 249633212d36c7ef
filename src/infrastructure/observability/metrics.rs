//! Prometheus metrics definitions for the yield service
//!
//! All metrics use the `shrimp_yield_` prefix.

use prometheus::{
    CounterVec, Gauge, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge, GenericGaugeVec},
};
use std::sync::Arc;
use std::time::Instant;

/// Prediction outcome label values
pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_MISSING_FEATURE: &str = "missing_feature";
pub const OUTCOME_OUT_OF_RANGE: &str = "out_of_range";
pub const OUTCOME_ERROR: &str = "error";

/// Prometheus metrics for the prediction service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    start_time: Instant,
    /// Predictions by outcome
    pub predictions_total: CounterVec,
    /// End-to-end pipeline latency
    pub prediction_latency_seconds: Histogram,
    /// Most recent successful prediction
    pub last_prediction: GenericGauge<AtomicF64>,
    /// Loaded model identity (constant 1)
    pub model_info: GenericGaugeVec<AtomicF64>,
    /// Uptime in seconds, refreshed on every scrape
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new("shrimp_yield_predictions_total", "Predictions served by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let prediction_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "shrimp_yield_prediction_latency_seconds",
                "Prediction pipeline latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25,
            ]),
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let last_prediction = Gauge::with_opts(Opts::new(
            "shrimp_yield_last_prediction",
            "Most recent predicted yield percentage",
        ))?;
        registry.register(Box::new(last_prediction.clone()))?;

        let model_info = GaugeVec::new(
            Opts::new("shrimp_yield_model_info", "Loaded model (always 1)"),
            &["model", "format"],
        )?;
        registry.register(Box::new(model_info.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "shrimp_yield_uptime_seconds",
            "Server uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            start_time: Instant::now(),
            predictions_total,
            prediction_latency_seconds,
            last_prediction,
            model_info,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        self.uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn set_model(&self, name: &str, format: &str) {
        self.model_info.with_label_values(&[name, format]).set(1.0);
    }

    pub fn record_outcome(&self, outcome: &str) {
        self.predictions_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_success(&self, prediction: f64, latency_secs: f64) {
        self.record_outcome(OUTCOME_OK);
        self.last_prediction.set(prediction);
        self.prediction_latency_seconds.observe(latency_secs);
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
