//! Observability for the yield service
//!
//! Prometheus counters and histograms, scraped from `GET /metrics`.
//! Request and startup logging goes through `tracing`.

pub mod metrics;

pub use metrics::Metrics;
