//! Hairdresser shop: customers wait for one of a few hairdressers.
//!
//! ```bash
//! cargo run -p queuesim --example hairdresser -- 50 2 4 3 2
//! RUST_LOG=queuesim_components=debug cargo run -p queuesim --example hairdresser
//! ```

use queuesim::prelude::*;
use tracing::{error, info};

fn main() {
    init_simulation_logging();

    let kind = SimulationKind::Hairdresser;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let raw: Vec<&str> = if args.is_empty() {
        vec!["20", "2", "4", "3", "1"]
    } else {
        args.iter().map(String::as_str).collect()
    };

    let params = match parse_parameters(kind, &raw) {
        Ok(params) => params,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut rng = RandomSource::seeded(42);
    match run(kind, params, &mut rng) {
        Ok(SimulationOutcome::Queueing(outcome)) => {
            let labels = kind.labels();
            info!("{}", outcome.metrics);
            println!("{}: {:.2}", labels.result, outcome.mean_wait);
            for (i, wait) in outcome.waits.iter().enumerate() {
                println!("  {} {:>3}: waited {:.3}", labels.entity, i, wait);
            }
        }
        Ok(other) => println!("{}: {:.2}", kind.labels().result, other.headline()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
