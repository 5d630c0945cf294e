//! Error types for the simulation engine

use thiserror::Error;

/// Top-level error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Component error: {0}")]
    Component(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Errors related to event scheduling and handling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EventError {
    #[error("Invalid event time: {0}")]
    InvalidTime(String),

    #[error("Invalid delay {0}: delays must be finite and non-negative")]
    InvalidDelay(f64),

    #[error("Event scheduling failed: cannot schedule at {requested}s, clock is already at {now}s")]
    ScheduleInPast { requested: f64, now: f64 },
}
