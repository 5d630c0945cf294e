//! Reusable building blocks for queueing simulations
//!
//! This crate provides a capacity-bounded resource with FIFO waiting, the
//! lifecycle of an arriving entity, a finite arrival stream, and the
//! `ServiceSystem` component that runs them together on a `queuesim-core`
//! scheduler. Parameter validation shared with the facade crate lives in
//! [`builder`].

pub mod arrivals;
pub mod builder;
pub mod entity;
pub mod error;
pub mod resource;
pub mod service;

pub use arrivals::ArrivalGenerator;
pub use builder::{
    validate_at_least, validate_finite, validate_finite_span, validate_invertible,
    validate_non_negative, validate_ordered, validate_positive, validate_range, Validate,
    ValidationError, ValidationResult,
};
pub use entity::{EntityAction, EntityProcess, EntityState};
pub use error::{ComponentError, EntityError, ResourceError};
pub use resource::{PendingRequest, PoolSnapshot, RequestOutcome, ResourcePool};
pub use service::{ServiceEvent, ServiceSystem};
