//! # queuesim
//!
//! Queueing and sampling simulations on a deterministic discrete-event engine.
//!
//! Five kinds of simulation are available. Three are queueing systems
//! (hairdresser, restaurant, network servers) in which arrivals contend for a
//! fixed pool of servers; they share one engine and differ only in labels.
//! The other two (chemical reaction, nuclear reactor) draw independent
//! uniform samples.
//!
//! ```rust
//! use queuesim::prelude::*;
//!
//! let mut rng = RandomSource::seeded(42);
//! let outcome = run_queueing(SimulationKind::Hairdresser, 5, 2.0, 4.0, 3.0, 1, &mut rng).unwrap();
//! assert_eq!(outcome.waits.len(), 5);
//!
//! let outcome = run_sampling(SimulationKind::NuclearReactor, 100, 1.0, 5.0, &mut rng).unwrap();
//! assert!(outcome.mean >= 1.0 && outcome.mean <= 5.0);
//! ```
//!
//! Runs never touch a global random generator: pass the same seeded
//! [`RandomSource`](queuesim_core::RandomSource) to get the same outcome.

pub mod config;
pub mod error;
pub mod kind;
pub mod queueing;
pub mod sampling;

use serde::Serialize;
use tracing::instrument;

pub use queuesim_components as components;
pub use queuesim_core as engine;
pub use queuesim_metrics as metrics;

pub use config::{parse_parameters, QueueingParams, SamplingParams, SimulationParams};
pub use error::SimulationError;
pub use kind::{KindLabels, ParameterKind, ParameterSpec, SimulationFamily, SimulationKind, UnknownKind};
pub use queueing::{QueueingOutcome, QueueingSimulation, StepObservation};
pub use sampling::{SamplingOutcome, SamplingSimulation};

use queuesim_core::RandomProvider;

/// Outcome of [`run`], tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Queueing(QueueingOutcome),
    Sampling(SamplingOutcome),
}

impl SimulationOutcome {
    pub fn kind(&self) -> SimulationKind {
        match self {
            SimulationOutcome::Queueing(outcome) => outcome.kind,
            SimulationOutcome::Sampling(outcome) => outcome.kind,
        }
    }

    /// The figure a front end shows under `kind().labels().result`.
    pub fn headline(&self) -> f64 {
        match self {
            SimulationOutcome::Queueing(outcome) => outcome.mean_wait,
            SimulationOutcome::Sampling(outcome) => outcome.mean,
        }
    }
}

/// Run one queueing simulation.
///
/// `kind` only selects labels; every queueing kind runs the same engine.
///
/// # Errors
///
/// [`SimulationError::Validation`] naming the offending parameter, or when
/// `kind` is a sampling kind.
pub fn run_queueing<R: RandomProvider>(
    kind: SimulationKind,
    count: usize,
    min_service: f64,
    max_service: f64,
    mean_interarrival: f64,
    server_count: usize,
    rng: &mut R,
) -> Result<QueueingOutcome, SimulationError> {
    let params = QueueingParams {
        count,
        min_service,
        max_service,
        mean_interarrival,
        server_count,
    };
    Ok(QueueingSimulation::new(kind, params)?.run(rng)?)
}

/// Run one sampling simulation.
///
/// # Errors
///
/// [`SimulationError::Validation`] if the range is invalid or `kind` is a
/// queueing kind.
pub fn run_sampling<R: RandomProvider>(
    kind: SimulationKind,
    count: usize,
    min_value: f64,
    max_value: f64,
    rng: &mut R,
) -> Result<SamplingOutcome, SimulationError> {
    let params = SamplingParams {
        count,
        min_value,
        max_value,
    };
    Ok(SamplingSimulation::new(kind, params)?.run(rng)?)
}

/// Run either family from already-built parameters.
#[instrument(skip(params, rng), fields(family = %params.family()))]
pub fn run<R: RandomProvider>(
    kind: SimulationKind,
    params: SimulationParams,
    rng: &mut R,
) -> Result<SimulationOutcome, SimulationError> {
    kind.expect_family(params.family())?;
    let outcome = match params {
        SimulationParams::Queueing(params) => {
            SimulationOutcome::Queueing(QueueingSimulation::new(kind, params)?.run(rng)?)
        }
        SimulationParams::Sampling(params) => {
            SimulationOutcome::Sampling(SamplingSimulation::new(kind, params)?.run(rng)?)
        }
    };
    Ok(outcome)
}

// Convenience re-exports of commonly used items
pub mod prelude {
    //! Commonly used types and functions

    pub use crate::{
        parse_parameters, run, run_queueing, run_sampling, QueueingOutcome, QueueingParams,
        SamplingOutcome, SamplingParams, SimulationError, SimulationKind, SimulationOutcome,
        SimulationParams,
    };

    pub use queuesim_components::{Validate, ValidationError};

    pub use queuesim_core::{
        init_simulation_logging, RandomProvider, RandomSource, SimTime, SimulationConfig,
    };
}
