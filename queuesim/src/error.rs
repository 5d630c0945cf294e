//! Error type for the simulation entry points

use queuesim_components::ValidationError;
use queuesim_core::SimError;
use thiserror::Error;

/// Anything that can stop a simulation from producing an outcome.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Bad input; raised before any simulation state exists.
    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),
}

impl SimulationError {
    /// The rejected parameter, for validation errors about a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            SimulationError::Validation(err) => err.field(),
            SimulationError::Simulation(_) => None,
        }
    }
}
