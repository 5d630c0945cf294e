//! Error types for simulation components

use crate::entity::{EntityAction, EntityState};
use queuesim_core::{EntityId, SimError};
use thiserror::Error;

/// Errors related to resource pool operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Release without a matching grant (capacity: {capacity})")]
    NotHeld { capacity: usize },
}

/// Errors related to entity lifecycle transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntityError {
    #[error("{id} cannot {action} while {from}")]
    InvalidTransition {
        id: EntityId,
        from: EntityState,
        action: EntityAction,
    },

    #[error("Unknown entity: {0}")]
    Unknown(EntityId),
}

/// Errors related to component operations
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("Invalid component configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<ResourceError> for SimError {
    fn from(err: ResourceError) -> Self {
        SimError::Component(err.to_string())
    }
}

impl From<EntityError> for SimError {
    fn from(err: EntityError) -> Self {
        SimError::Component(err.to_string())
    }
}

impl From<ComponentError> for SimError {
    fn from(err: ComponentError) -> Self {
        SimError::Component(err.to_string())
    }
}
