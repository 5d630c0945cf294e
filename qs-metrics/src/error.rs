//! Error types for metrics collection

use thiserror::Error;

/// Errors related to metrics collection
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Histogram error: {0}")]
    Histogram(String),

    #[error("Invalid metric value: {0}")]
    InvalidValue(f64),
}
