//! Finite stream of stochastic arrivals
//!
//! The first unit arrives at time zero; every further unit arrives one
//! interarrival gap after its predecessor, so unit `i` arrives at the sum of
//! the first `i` gaps. No gap is drawn after the last unit.

use queuesim_core::dists::{ArrivalPattern, PoissonArrivals};
use queuesim_core::{RandomProvider, SimError};

use crate::builder::{validate_invertible, ValidationError, ValidationResult};

pub struct ArrivalGenerator {
    count: usize,
    emitted: usize,
    pattern: Box<dyn ArrivalPattern>,
}

impl ArrivalGenerator {
    pub fn new(count: usize, pattern: Box<dyn ArrivalPattern>) -> Self {
        Self {
            count,
            emitted: 0,
            pattern,
        }
    }

    /// `count` arrivals with exponential gaps of mean `mean_interarrival`.
    pub fn poisson(count: usize, mean_interarrival: f64) -> ValidationResult<Self> {
        validate_invertible("mean_interarrival", mean_interarrival)?;
        let pattern = PoissonArrivals::with_mean_interarrival(mean_interarrival).map_err(|e| {
            ValidationError::InvalidValue {
                field: "mean_interarrival".to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(count, Box::new(pattern)))
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn remaining(&self) -> usize {
        self.count - self.emitted
    }

    pub fn is_exhausted(&self) -> bool {
        self.emitted == self.count
    }

    /// Mark one arrival as emitted and return the delay until the next one,
    /// or `None` if that was the last arrival (or there were none).
    pub fn next_gap(&mut self, rng: &mut dyn RandomProvider) -> Result<Option<f64>, SimError> {
        if self.is_exhausted() {
            return Ok(None);
        }
        self.emitted += 1;
        if self.is_exhausted() {
            return Ok(None);
        }
        self.pattern.next_interarrival(rng).map(Some)
    }
}

impl std::fmt::Debug for ArrivalGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrivalGenerator")
            .field("count", &self.count)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_core::dists::ConstantArrivalPattern;
    use queuesim_core::RandomSource;

    /// Arrival instants as the service system sees them: the first at zero,
    /// each later one a gap after its predecessor.
    fn schedule(generator: &mut ArrivalGenerator, rng: &mut RandomSource) -> Vec<f64> {
        if generator.is_exhausted() {
            return Vec::new();
        }
        let mut now = 0.0;
        let mut times = vec![now];
        while let Some(gap) = generator.next_gap(rng).unwrap() {
            now += gap;
            times.push(now);
        }
        times
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let mut rng = RandomSource::seeded(1);
        let mut generator = ArrivalGenerator::poisson(0, 3.0).unwrap();
        assert!(generator.is_exhausted());
        assert_eq!(generator.next_gap(&mut rng).unwrap(), None);
        assert_eq!(rng.draws(), 0);
        assert!(schedule(&mut generator, &mut rng).is_empty());
    }

    #[test]
    fn test_constant_schedule_is_cumulative() {
        let mut rng = RandomSource::seeded(1);
        let pattern = ConstantArrivalPattern::new(2.5).unwrap();
        let mut generator = ArrivalGenerator::new(4, Box::new(pattern));
        assert_eq!(schedule(&mut generator, &mut rng), vec![0.0, 2.5, 5.0, 7.5]);
        assert!(generator.is_exhausted());
    }

    #[test]
    fn test_poisson_draws_one_gap_fewer_than_count() {
        let mut rng = RandomSource::seeded(9);
        let mut generator = ArrivalGenerator::poisson(5, 3.0).unwrap();
        let times = schedule(&mut generator, &mut rng);
        assert_eq!(times.len(), 5);
        assert_eq!(times[0], 0.0);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_counters() {
        let mut rng = RandomSource::seeded(2);
        let mut generator = ArrivalGenerator::poisson(2, 1.0).unwrap();
        assert_eq!(generator.remaining(), 2);
        assert!(generator.next_gap(&mut rng).unwrap().is_some());
        assert_eq!(generator.emitted(), 1);
        assert!(generator.next_gap(&mut rng).unwrap().is_none());
        assert_eq!(generator.remaining(), 0);
        assert!(generator.next_gap(&mut rng).unwrap().is_none());
        assert_eq!(generator.emitted(), 2);
    }

    #[test]
    fn test_invalid_mean_rejected() {
        let err = ArrivalGenerator::poisson(3, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("mean_interarrival"));
        let err = ArrivalGenerator::poisson(3, 5e-324).unwrap_err();
        assert_eq!(err.field(), Some("mean_interarrival"));
    }
}
