//! Metrics collection and statistics for queueing simulations
//!
//! This crate provides descriptive statistics over recorded samples, a
//! high-resolution waiting-time histogram, and a per-resource metrics
//! collector that also reports through the standard `metrics` facade. The
//! facade is a no-op unless the host installs a recorder.

pub mod error;
pub mod histogram;
pub mod queue_metrics;
pub mod stats;

pub use error::MetricsError;
pub use histogram::{Percentiles, WaitHistogram};
pub use queue_metrics::{QueueMetrics, QueueMetricsSnapshot};
pub use stats::{mean, SampleSummary};
