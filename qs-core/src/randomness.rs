//! Randomness facade for deterministic simulation.
//!
//! This module is intentionally small. It provides:
//! - `DrawSite`: a stable identifier for a sampling location, plus a human tag.
//! - `RandomProvider`: a trait for sampling the distributions the models need.
//! - `RandomSource`: the seedable default provider.
//!
//! Models never reach for a thread-local or global generator. Every run borrows
//! a provider explicitly, which is what makes a run reproducible from its seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Exp, Uniform};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SimError;

/// A labeled sampling location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawSite {
    pub tag: &'static str,
    pub site_id: u64,
}

impl DrawSite {
    pub const fn new(tag: &'static str, site_id: u64) -> Self {
        Self { tag, site_id }
    }
}

/// Sampling interface that can be swapped for tracing or replay.
///
/// Note: this is designed to be borrowed by a model and used on the
/// simulation thread.
pub trait RandomProvider {
    /// Sample uniformly from the closed interval `[low, high]`.
    fn sample_uniform(&mut self, site: DrawSite, low: f64, high: f64) -> Result<f64, SimError>;

    /// Sample an exponential distribution parameterized by `rate` (events per
    /// unit of time). Returns a value in time units.
    fn sample_exp(&mut self, site: DrawSite, rate: f64) -> Result<f64, SimError>;
}

impl<P: RandomProvider + ?Sized> RandomProvider for &mut P {
    fn sample_uniform(&mut self, site: DrawSite, low: f64, high: f64) -> Result<f64, SimError> {
        (**self).sample_uniform(site, low, high)
    }

    fn sample_exp(&mut self, site: DrawSite, rate: f64) -> Result<f64, SimError> {
        (**self).sample_exp(site, rate)
    }
}

/// Const-friendly 64-bit FNV-1a hash.
pub const fn fnv1a64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash: u64 = 0xcbf29ce484222325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x100000001b3);
        i += 1;
    }
    hash
}

/// Generate a `DrawSite` at the macro expansion site.
#[macro_export]
macro_rules! draw_site {
    ($tag:expr) => {{
        const _SITE_ID: u64 = $crate::randomness::fnv1a64(concat!(
            module_path!(),
            "::",
            file!(),
            ":",
            line!(),
            ":",
            column!(),
            ":",
            $tag,
        ));
        $crate::randomness::DrawSite::new($tag, _SITE_ID)
    }};
}

/// Run-level configuration for the randomness of a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the random source; `None` seeds from operating-system entropy.
    pub seed: Option<u64>,
}

/// Seedable generator of uniform and exponential variates.
///
/// Two sources built from the same seed produce the same sequence of draws.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: Option<u64>,
    draws: u64,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
            draws: 0,
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
            draws: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed this source was created from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomProvider for RandomSource {
    fn sample_uniform(&mut self, site: DrawSite, low: f64, high: f64) -> Result<f64, SimError> {
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(SimError::Configuration(format!(
                "uniform bounds must be finite with low <= high, got [{low}, {high}]"
            )));
        }
        // `Uniform::new_inclusive` panics when the scaled span overflows.
        if !((high - low) / (1.0 - f64::EPSILON)).is_finite() {
            return Err(SimError::Configuration(format!(
                "uniform range [{low}, {high}] is too wide to sample"
            )));
        }
        let value = self.rng.sample(Uniform::new_inclusive(low, high));
        self.draws += 1;
        trace!(site = site.tag, value, "uniform draw");
        Ok(value)
    }

    fn sample_exp(&mut self, site: DrawSite, rate: f64) -> Result<f64, SimError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(SimError::Configuration(format!(
                "exponential rate must be positive and finite, got {rate}"
            )));
        }
        let dist = Exp::new(rate).map_err(|e| SimError::Configuration(e.to_string()))?;
        let value = self.rng.sample(dist);
        self.draws += 1;
        trace!(site = site.tag, value, "exponential draw");
        Ok(value)
    }
}
