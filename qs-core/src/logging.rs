//! Structured logging for discrete event simulation debugging
//!
//! Everything in the workspace logs through `tracing`. These helpers install a
//! `tracing-subscriber` formatter for binaries, examples and tests.
//!
//! # Controlling output
//!
//! ```bash
//! # Default (info level)
//! cargo run -p queuesim --example hairdresser
//!
//! # Watch every arrival, grant and departure
//! RUST_LOG=queuesim_components=debug cargo run -p queuesim --example hairdresser
//!
//! # Scheduler pushes and pops (very verbose)
//! RUST_LOG=queuesim_core::scheduler=trace cargo run -p queuesim --example hairdresser
//! ```
//!
//! Log level guidelines:
//! - **TRACE**: scheduler pushes/pops and individual random draws
//! - **DEBUG**: entity lifecycle transitions and resource pool decisions
//! - **INFO**: run start and completion with summary figures
//! - **WARN**: unusual but recoverable conditions

use crate::{EntityId, EventId, SimTime};
use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the simulation with sensible defaults (`info`).
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// `RUST_LOG` takes precedence when set. Calling this more than once (for
/// example from several tests) leaves the first subscriber in place.
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{level},queuesim_core::scheduler={},queuesim_core::randomness={}",
            quieter(level),
            quieter(level)
        )
        .into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Initialize logging with everything enabled, pretty-printed.
pub fn init_detailed_simulation_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace,queuesim_core=trace,queuesim_components=trace".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed simulation logging initialized");
    }
}

// Scheduler internals log at trace; keep them one notch below the requested
// level unless the caller asked for everything.
fn quieter(level: &str) -> &'static str {
    match level {
        "trace" => "trace",
        "debug" => "debug",
        _ => "warn",
    }
}

/// Create a span for tracking one simulation run
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Create a span for tracking one entity's lifecycle
pub fn entity_span(entity: EntityId) -> Span {
    tracing::debug_span!("entity", id = %entity)
}

/// Create a span for tracking event processing
pub fn event_span(event_id: EventId, event_type: &str, time: SimTime) -> Span {
    tracing::trace_span!("event",
        id = %event_id,
        event_type = event_type,
        time = %time
    )
}
