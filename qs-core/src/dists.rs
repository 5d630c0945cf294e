//! Distribution traits and implementations for arrival patterns and service times
//!
//! Distributions hold only their parameters. Draws go through a borrowed
//! [`RandomProvider`], so the same pattern can be replayed exactly by handing
//! it a provider built from the same seed.

use crate::draw_site;
use crate::error::SimError;
use crate::randomness::RandomProvider;

/// Trait for generating arrival patterns
///
/// Abstracts over the gap between consecutive arrivals (Poisson, constant, ...).
pub trait ArrivalPattern {
    /// Time until the next arrival, in time units.
    fn next_interarrival(&mut self, rng: &mut dyn RandomProvider) -> Result<f64, SimError>;
}

/// Trait for sampling service times from a distribution
pub trait ServiceTimeDistribution {
    /// Sample the service time of a single entity.
    fn sample(&mut self, rng: &mut dyn RandomProvider) -> Result<f64, SimError>;
}

// =============================================================================
// Arrival Pattern Implementations
// =============================================================================

/// Simple constant arrival pattern
///
/// Arrivals are spaced by a fixed gap and consume no random draws.
#[derive(Debug, Clone)]
pub struct ConstantArrivalPattern {
    interarrival: f64,
}

impl ConstantArrivalPattern {
    pub fn new(interarrival: f64) -> Result<Self, SimError> {
        if !(interarrival.is_finite() && interarrival >= 0.0) {
            return Err(SimError::Configuration(format!(
                "interarrival time must be finite and non-negative, got {interarrival}"
            )));
        }
        Ok(Self { interarrival })
    }
}

impl ArrivalPattern for ConstantArrivalPattern {
    fn next_interarrival(&mut self, _rng: &mut dyn RandomProvider) -> Result<f64, SimError> {
        Ok(self.interarrival)
    }
}

/// Poisson arrival pattern
///
/// Interarrival gaps are exponentially distributed with rate `1 / mean`.
#[derive(Debug, Clone)]
pub struct PoissonArrivals {
    /// Rate parameter (lambda): average arrivals per unit of time
    rate: f64,
}

impl PoissonArrivals {
    /// Create a Poisson arrival pattern from the mean gap between arrivals.
    pub fn with_mean_interarrival(mean: f64) -> Result<Self, SimError> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(SimError::Configuration(format!(
                "mean interarrival time must be positive and finite, got {mean}"
            )));
        }
        let rate = mean.recip();
        if !rate.is_finite() {
            return Err(SimError::Configuration(format!(
                "mean interarrival time {mean} is too small to invert"
            )));
        }
        Ok(Self { rate })
    }

    /// Get the rate parameter
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn mean_interarrival(&self) -> f64 {
        1.0 / self.rate
    }
}

impl ArrivalPattern for PoissonArrivals {
    fn next_interarrival(&mut self, rng: &mut dyn RandomProvider) -> Result<f64, SimError> {
        rng.sample_exp(draw_site!("interarrival"), self.rate)
    }
}

// =============================================================================
// Service Time Distribution Implementations
// =============================================================================

/// Uniform service time distribution
///
/// Samples service times uniformly from `[min, max]`. A degenerate range
/// (`min == max`) returns `min` exactly without consuming a draw.
#[derive(Debug, Clone)]
pub struct UniformServiceTime {
    min: f64,
    max: f64,
}

impl UniformServiceTime {
    pub fn new(min: f64, max: f64) -> Result<Self, SimError> {
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(SimError::Configuration(format!(
                "service time range must satisfy 0 <= min <= max, got [{min}, {max}]"
            )));
        }
        if !((max - min) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(SimError::Configuration(format!(
                "service time range [{min}, {max}] is too wide to sample"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn mean_service_time(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl ServiceTimeDistribution for UniformServiceTime {
    fn sample(&mut self, rng: &mut dyn RandomProvider) -> Result<f64, SimError> {
        if self.min == self.max {
            return Ok(self.min);
        }
        rng.sample_uniform(draw_site!("service_time"), self.min, self.max)
    }
}
