//! Simulation time management

use crate::error::EventError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// Point in virtual time, measured in seconds since the simulation start.
///
/// `SimTime` is always finite and non-negative, which makes the total order
/// over its `f64` representation well defined. Arithmetic saturates at zero
/// rather than going negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimTime(f64);

impl SimTime {
    /// The simulation start.
    pub const fn zero() -> Self {
        SimTime(0.0)
    }

    /// Create a SimTime from seconds, rejecting negative or non-finite values.
    pub fn from_secs(secs: f64) -> Result<Self, EventError> {
        if !secs.is_finite() {
            return Err(EventError::InvalidTime(format!(
                "time must be finite, got {secs}"
            )));
        }
        if secs < 0.0 {
            return Err(EventError::InvalidTime(format!(
                "time must be non-negative, got {secs}"
            )));
        }
        // Normalise -0.0 so equal times compare equal under total_cmp.
        Ok(SimTime(secs + 0.0))
    }

    /// Seconds since the simulation start.
    pub const fn as_secs(&self) -> f64 {
        self.0
    }

    /// Elapsed seconds since `earlier`, clamped at zero.
    pub fn duration_since(&self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Advance by `delay` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidDelay`] if `delay` is negative or not finite,
    /// or [`EventError::InvalidTime`] if the sum overflows to infinity.
    pub fn checked_add(&self, delay: f64) -> Result<Self, EventError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(EventError::InvalidDelay(delay));
        }
        SimTime::from_secs(self.0 + delay)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// Consistent with `Eq`: construction rejects NaN and folds -0.0 into 0.0.
impl Hash for SimTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl TryFrom<f64> for SimTime {
    type Error = EventError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        SimTime::from_secs(secs)
    }
}

impl From<SimTime> for f64 {
    fn from(time: SimTime) -> Self {
        time.0
    }
}

impl Add<SimTime> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> Self::Output {
        SimTime(self.0 + rhs.0)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = f64;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
