//! Sampling runs: independent uniform draws, no scheduler

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::SamplingParams;
use crate::kind::{SimulationFamily, SimulationKind};
use queuesim_components::{Validate, ValidationResult};
use queuesim_core::{draw_site, RandomProvider, SimError};
use queuesim_metrics::{mean, SampleSummary};

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingOutcome {
    pub kind: SimulationKind,
    /// Mean of `samples`, `0.0` when `count` is zero
    pub mean: f64,
    /// Values in the order they were drawn
    pub samples: Vec<f64>,
    pub summary: SampleSummary,
}

#[derive(Debug, Clone)]
pub struct SamplingSimulation {
    kind: SimulationKind,
    params: SamplingParams,
}

impl SamplingSimulation {
    pub fn new(kind: SimulationKind, params: SamplingParams) -> ValidationResult<Self> {
        kind.expect_family(SimulationFamily::Sampling)?;
        params.validate()?;
        Ok(Self { kind, params })
    }

    pub fn kind(&self) -> SimulationKind {
        self.kind
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Draw `count` values uniformly from `[min_value, max_value]`.
    #[instrument(skip(self, rng), fields(kind = %self.kind, count = self.params.count))]
    pub fn run<R: RandomProvider>(&self, rng: &mut R) -> Result<SamplingOutcome, SimError> {
        let SamplingParams {
            count,
            min_value,
            max_value,
        } = self.params;
        info!(min_value, max_value, "Starting sampling run");

        let site = draw_site!("sample");
        let samples = (0..count)
            .map(|_| rng.sample_uniform(site, min_value, max_value))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(drawn = samples.len(), "Sampling complete");

        let mean = mean(&samples);
        info!(mean, "Sampling run finished");
        Ok(SamplingOutcome {
            kind: self.kind,
            mean,
            summary: SampleSummary::from_samples(&samples),
            samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_core::RandomSource;

    fn params(count: usize, min_value: f64, max_value: f64) -> SamplingParams {
        SamplingParams {
            count,
            min_value,
            max_value,
        }
    }

    #[test]
    fn test_zero_count() {
        let sim = SamplingSimulation::new(SimulationKind::ChemicalReaction, params(0, 1.0, 5.0))
            .unwrap();
        let outcome = sim.run(&mut RandomSource::seeded(3)).unwrap();
        assert!(outcome.samples.is_empty());
        assert_eq!(outcome.mean, 0.0);
        assert!(outcome.summary.is_empty());
    }

    #[test]
    fn test_samples_within_bounds() {
        let sim =
            SamplingSimulation::new(SimulationKind::NuclearReactor, params(500, 2.0, 3.0)).unwrap();
        let outcome = sim.run(&mut RandomSource::seeded(4)).unwrap();
        assert_eq!(outcome.samples.len(), 500);
        assert!(outcome.samples.iter().all(|v| (2.0..=3.0).contains(v)));
        assert!((outcome.mean - outcome.summary.mean).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_range() {
        let sim =
            SamplingSimulation::new(SimulationKind::NuclearReactor, params(4, 7.0, 7.0)).unwrap();
        let outcome = sim.run(&mut RandomSource::seeded(4)).unwrap();
        assert_eq!(outcome.samples, vec![7.0; 4]);
        assert_eq!(outcome.mean, 7.0);
    }

    #[test]
    fn test_rejects_queueing_kind_and_bad_range() {
        assert!(SamplingSimulation::new(SimulationKind::Hairdresser, params(1, 1.0, 2.0)).is_err());
        let err = SamplingSimulation::new(SimulationKind::ChemicalReaction, params(1, 3.0, 2.0))
            .unwrap_err();
        assert_eq!(err.field(), Some("max_value"));
    }
}
