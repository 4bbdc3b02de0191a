//! Lightweight in-process metrics (dependency-free).
//!
//! Outcome, rejection, and lock metrics are stored as atomics and rendered
//! in Prometheus text format by `RulerMetrics::render`.

pub mod metrics;

pub use metrics::RulerMetrics;
