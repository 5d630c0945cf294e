//! Nuclear reactor: average of uniformly drawn reaction times.

use queuesim::prelude::*;
use tracing::info;

fn main() -> Result<(), SimulationError> {
    init_simulation_logging();

    let kind = SimulationKind::NuclearReactor;
    let config = SimulationConfig { seed: Some(7) };
    let mut rng = RandomSource::from_config(&config);

    let outcome = run_sampling(kind, 1_000, 1.0, 5.0, &mut rng)?;
    info!(summary = %outcome.summary, "Sampling finished");
    println!("{}: {:.2}", kind.labels().result, outcome.mean);
    Ok(())
}
