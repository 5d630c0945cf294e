//! Queueing runs: entities contend for a pool of servers
//!
//! One run owns its scheduler, its pool and every entity record; nothing
//! outlives [`QueueingSimulation::run`] except the returned outcome. The
//! random source is borrowed, so a caller can replay a run from its seed.

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::QueueingParams;
use crate::kind::{SimulationFamily, SimulationKind};
use queuesim_components::{
    ArrivalGenerator, ComponentError, ResourcePool, ServiceSystem, Validate, ValidationError,
    ValidationResult,
};
use queuesim_core::dists::UniformServiceTime;
use queuesim_core::{simulation_span, Execute, Executor, RandomProvider, SimError, SimTime, Simulation};
use queuesim_metrics::{mean, QueueMetricsSnapshot, SampleSummary};

/// State of the system between two dispatched events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepObservation {
    pub time: SimTime,
    pub in_use: usize,
    pub capacity: usize,
    pub queue_len: usize,
}

/// Result of one queueing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueingOutcome {
    pub kind: SimulationKind,
    /// Mean of `waits`, `0.0` when nothing arrived
    pub mean_wait: f64,
    /// Waiting times in the order entities entered service
    pub waits: Vec<f64>,
    pub summary: SampleSummary,
    pub metrics: QueueMetricsSnapshot,
}

/// A validated queueing scenario, ready to run any number of times.
#[derive(Debug, Clone)]
pub struct QueueingSimulation {
    kind: SimulationKind,
    params: QueueingParams,
}

impl QueueingSimulation {
    pub fn new(kind: SimulationKind, params: QueueingParams) -> ValidationResult<Self> {
        kind.expect_family(SimulationFamily::Queueing)?;
        params.validate()?;
        Ok(Self { kind, params })
    }

    pub fn kind(&self) -> SimulationKind {
        self.kind
    }

    pub fn params(&self) -> &QueueingParams {
        &self.params
    }

    pub fn run<R: RandomProvider>(&self, rng: &mut R) -> Result<QueueingOutcome, SimError> {
        self.run_observed(rng, |_| {})
    }

    /// Run once, calling `observer` after every dispatched event.
    #[instrument(skip(self, rng, observer), fields(kind = %self.kind, count = self.params.count))]
    pub fn run_observed<R, F>(&self, rng: &mut R, mut observer: F) -> Result<QueueingOutcome, SimError>
    where
        R: RandomProvider,
        F: FnMut(&StepObservation),
    {
        let _span = simulation_span(self.kind.name()).entered();
        let params = &self.params;
        info!(
            servers = params.server_count,
            min_service = params.min_service,
            max_service = params.max_service,
            mean_interarrival = params.mean_interarrival,
            "Starting queueing run"
        );

        let system = ServiceSystem::new(
            self.kind.name(),
            ResourcePool::new(params.server_count).map_err(config_error)?,
            ArrivalGenerator::poisson(params.count, params.mean_interarrival)
                .map_err(config_error)?,
            UniformServiceTime::new(params.min_service, params.max_service)?,
            rng,
        )?;

        let first = system.first_event();
        let mut sim = Simulation::new(system);
        if let Some(event) = first {
            sim.schedule(0.0, event)?;
        }

        Executor::unbound()
            .side_effect(|sim: &Simulation<ServiceSystem<&mut R>>| {
                let pool = sim.component().pool();
                observer(&StepObservation {
                    time: sim.time(),
                    in_use: pool.in_use(),
                    capacity: pool.capacity(),
                    queue_len: pool.queue_len(),
                });
            })
            .execute(&mut sim)?;

        let end = sim.time();
        let system = sim.into_component();
        let metrics = system.metrics_snapshot(end);
        let waits = system.into_waits();
        let mean_wait = mean(&waits);
        info!(mean_wait, end = %end, "Queueing run finished");

        Ok(QueueingOutcome {
            kind: self.kind,
            mean_wait,
            summary: SampleSummary::from_samples(&waits),
            waits,
            metrics,
        })
    }
}

// Parameters were validated in `new`; a failure here is a bug, not bad input.
fn config_error(err: ValidationError) -> SimError {
    ComponentError::InvalidConfiguration(err.to_string()).into()
}
