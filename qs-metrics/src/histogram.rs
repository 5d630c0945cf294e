//! High-resolution percentile tracking for waiting times

use crate::error::MetricsError;
use hdrhistogram::Histogram as HdrHistogram;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest resolvable value, in time units (one microsecond of a second).
const RESOLUTION: f64 = 1e-6;

/// Waiting-time histogram backed by HdrHistogram.
///
/// Values are stored in units of [`RESOLUTION`] with three significant
/// figures; the histogram grows as needed.
#[derive(Debug, Clone)]
pub struct WaitHistogram {
    inner: HdrHistogram<u64>,
}

impl WaitHistogram {
    pub fn new() -> Result<Self, MetricsError> {
        let mut inner =
            HdrHistogram::new(3).map_err(|e| MetricsError::Histogram(e.to_string()))?;
        inner.auto(true);
        Ok(Self { inner })
    }

    /// Record one non-negative, finite value.
    pub fn record(&mut self, value: f64) -> Result<(), MetricsError> {
        if !(value.is_finite() && value >= 0.0) {
            return Err(MetricsError::InvalidValue(value));
        }
        let scaled = (value / RESOLUTION).round() as u64;
        self.inner
            .record(scaled)
            .map_err(|e| MetricsError::Histogram(e.to_string()))
    }

    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Value at `quantile` (0.0 to 1.0), or `0.0` if nothing was recorded.
    pub fn value_at_quantile(&self, quantile: f64) -> f64 {
        if self.inner.is_empty() {
            return 0.0;
        }
        self.inner.value_at_quantile(quantile) as f64 * RESOLUTION
    }

    pub fn percentiles(&self) -> Percentiles {
        Percentiles {
            p50: self.value_at_quantile(0.5),
            p95: self.value_at_quantile(0.95),
            p99: self.value_at_quantile(0.99),
        }
    }
}

/// Selected percentiles of a recorded distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl fmt::Display for Percentiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p50={:.3}, p95={:.3}, p99={:.3}", self.p50, self.p95, self.p99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let h = WaitHistogram::new().unwrap();
        assert!(h.is_empty());
        assert_eq!(h.percentiles(), Percentiles::default());
    }

    #[test]
    fn test_percentiles_within_precision() {
        let mut h = WaitHistogram::new().unwrap();
        for i in 1..=100 {
            h.record(i as f64 / 10.0).unwrap();
        }
        assert_eq!(h.len(), 100);
        let p = h.percentiles();
        assert!((p.p50 - 5.0).abs() < 0.01, "p50 was {}", p.p50);
        assert!((p.p99 - 9.9).abs() < 0.02, "p99 was {}", p.p99);
    }

    #[test]
    fn test_zero_is_recordable() {
        let mut h = WaitHistogram::new().unwrap();
        h.record(0.0).unwrap();
        assert_eq!(h.value_at_quantile(1.0), 0.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut h = WaitHistogram::new().unwrap();
        assert!(h.record(-1.0).is_err());
        assert!(h.record(f64::NAN).is_err());
    }
}
