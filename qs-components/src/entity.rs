//! Lifecycle of one arriving unit
//!
//! ```text
//! Created --request--> Waiting --grant--> InService --depart--> Completed
//! ```
//!
//! Every entity passes through `Waiting`, possibly for zero time when a server
//! is free on arrival. `Completed` is terminal.

use crate::error::EntityError;
use queuesim_core::{EntityId, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityState {
    Created,
    Waiting,
    InService,
    Completed,
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityState::Created => "created",
            EntityState::Waiting => "waiting",
            EntityState::InService => "in service",
            EntityState::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Transition requested of an entity, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityAction {
    Request,
    Grant,
    Depart,
}

impl fmt::Display for EntityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityAction::Request => "request a server",
            EntityAction::Grant => "be granted a server",
            EntityAction::Depart => "depart",
        };
        f.write_str(s)
    }
}

/// State machine and timing record of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProcess {
    id: EntityId,
    arrival_time: SimTime,
    service_start_time: Option<SimTime>,
    service_duration: Option<f64>,
    departure_time: Option<SimTime>,
    state: EntityState,
}

impl EntityProcess {
    pub fn new(id: EntityId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            service_start_time: None,
            service_duration: None,
            departure_time: None,
            state: EntityState::Created,
        }
    }

    fn expect_state(&self, expected: EntityState, action: EntityAction) -> Result<(), EntityError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EntityError::InvalidTransition {
                id: self.id,
                from: self.state,
                action,
            })
        }
    }

    /// Created → Waiting. The arrival time stays as recorded at creation.
    pub fn request(&mut self) -> Result<(), EntityError> {
        self.expect_state(EntityState::Created, EntityAction::Request)?;
        self.state = EntityState::Waiting;
        Ok(())
    }

    /// Waiting → InService at `now` for `service_duration` time units.
    ///
    /// Returns the time at which the entity will depart.
    pub fn grant(&mut self, now: SimTime, service_duration: f64) -> Result<SimTime, EntityError> {
        self.expect_state(EntityState::Waiting, EntityAction::Grant)?;
        let departure = now
            .checked_add(service_duration)
            .map_err(|_| EntityError::InvalidTransition {
                id: self.id,
                from: self.state,
                action: EntityAction::Grant,
            })?;
        self.service_start_time = Some(now);
        self.service_duration = Some(service_duration);
        self.state = EntityState::InService;
        Ok(departure)
    }

    /// InService → Completed at `now`.
    pub fn depart(&mut self, now: SimTime) -> Result<(), EntityError> {
        self.expect_state(EntityState::InService, EntityAction::Depart)?;
        self.departure_time = Some(now);
        self.state = EntityState::Completed;
        Ok(())
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    pub fn service_start_time(&self) -> Option<SimTime> {
        self.service_start_time
    }

    pub fn service_duration(&self) -> Option<f64> {
        self.service_duration
    }

    pub fn departure_time(&self) -> Option<SimTime> {
        self.departure_time
    }

    /// Time spent waiting for a server, once service has started.
    pub fn waiting_time(&self) -> Option<f64> {
        self.service_start_time
            .map(|start| start.duration_since(self.arrival_time))
    }

    pub fn is_completed(&self) -> bool {
        self.state == EntityState::Completed
    }
}
