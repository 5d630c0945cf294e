//! Core discrete event simulation engine.
//!
//! This crate provides the building blocks every queuesim model runs on:
//! virtual time, a deterministic event scheduler, seedable randomness and
//! structured logging.
//!
//! # Architecture Overview
//!
//! - [`Scheduler`]: the virtual clock plus the ordered set of pending events.
//!   Events due at the same instant are dispatched in the order they were
//!   scheduled, so a run is a pure function of its random draws.
//!
//! - [`Component`]: the model being simulated. Each event popped from the
//!   scheduler is handed to [`Component::process_event`], which may change
//!   the component's state and schedule further events. Events are the
//!   continuations of the model: a suspended entity is resumed by an event
//!   naming it.
//!
//! - [`Simulation`]: owns one scheduler and one component for the duration of
//!   a run and drives the dispatch loop.
//!
//! # Basic Usage
//!
//! ```rust
//! use queuesim_core::{Component, Scheduler, SimError, Simulation};
//!
//! #[derive(Debug)]
//! struct Tick;
//!
//! struct Counter {
//!     ticks: u32,
//! }
//!
//! impl Component for Counter {
//!     type Event = Tick;
//!
//!     fn process_event(&mut self, _event: Tick, scheduler: &mut Scheduler<Tick>) -> Result<(), SimError> {
//!         self.ticks += 1;
//!         if self.ticks < 5 {
//!             scheduler.schedule(1.0, Tick)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut simulation = Simulation::new(Counter { ticks: 0 });
//! simulation.schedule(0.0, Tick).unwrap();
//! simulation.run_to_completion().unwrap();
//! assert_eq!(simulation.component().ticks, 5);
//! assert_eq!(simulation.time().as_secs(), 4.0);
//! ```
//!
//! # Time Model
//!
//! All timing uses [`SimTime`], which represents simulation time (not wall-clock time).
//! Nothing in this crate blocks or reads the wall clock.

pub mod dists;
pub mod error;
pub mod execute;
pub mod logging;
pub mod randomness;
pub mod scheduler;
pub mod time;
pub mod types;

use std::fmt;
use tracing::{info, instrument, trace};

pub use error::{EventError, SimError};
pub use execute::{Execute, Executor};
pub use logging::{
    entity_span, event_span, init_detailed_simulation_logging, init_simulation_logging,
    init_simulation_logging_with_level, simulation_span,
};
pub use randomness::{DrawSite, RandomProvider, RandomSource, SimulationConfig};
pub use scheduler::{ClockRef, EventEntry, EventHandle, Scheduler};
pub use time::SimTime;
pub use types::{EntityId, EventId};

/// A simulated model that reacts to its own scheduled events.
pub trait Component {
    type Event: fmt::Debug;

    /// Handle one dispatched event. The scheduler clock already reads the
    /// event's due time.
    fn process_event(
        &mut self,
        event: Self::Event,
        scheduler: &mut Scheduler<Self::Event>,
    ) -> Result<(), SimError>;
}

/// Simulation struct that puts a scheduler and the model it drives together.
///
/// The simulation exclusively owns both; they are dropped together when the
/// run is over. Dispatch is single-threaded: one event handler runs at a time.
///
/// See the [crate-level documentation](crate) for more information.
pub struct Simulation<C: Component> {
    scheduler: Scheduler<C::Event>,
    component: C,
}

impl<C: Component> Simulation<C> {
    pub fn new(component: C) -> Self {
        Self {
            scheduler: Scheduler::default(),
            component,
        }
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.scheduler.time()
    }

    /// Returns a ClockRef for reading the simulation time.
    pub fn clock(&self) -> ClockRef {
        self.scheduler.clock()
    }

    pub fn scheduler(&self) -> &Scheduler<C::Event> {
        &self.scheduler
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Consume the simulation, keeping the component to inspect its final state.
    pub fn into_component(self) -> C {
        self.component
    }

    /// Schedules an event `delay` seconds after the current time.
    pub fn schedule(&mut self, delay: f64, event: C::Event) -> Result<EventHandle, EventError> {
        self.scheduler.schedule(delay, event)
    }

    /// Schedules an event at an absolute time.
    pub fn schedule_at(&mut self, time: SimTime, event: C::Event) -> Result<EventHandle, EventError> {
        self.scheduler.schedule_at(time, event)
    }

    /// Cancel a scheduled event
    pub fn cancel(&mut self, handle: EventHandle) -> bool {
        self.scheduler.cancel(handle)
    }

    /// Returns the time of the next scheduled event, or None if no events are scheduled.
    pub fn peek_next_event_time(&mut self) -> Option<SimTime> {
        self.scheduler.peek_time()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Performs one step of the simulation. Returns `Ok(true)` if an event was
    /// processed and `Ok(false)` once no events are left.
    pub fn step(&mut self) -> Result<bool, SimError> {
        let Some(entry) = self.scheduler.pop() else {
            return Ok(false);
        };
        let _span =
            event_span(entry.id(), std::any::type_name::<C::Event>(), entry.time()).entered();
        trace!(
            event_id = %entry.id(),
            event_time = %entry.time(),
            "Processing simulation step"
        );
        self.component
            .process_event(entry.into_event(), &mut self.scheduler)?;
        Ok(true)
    }

    /// Runs the simulation with the given executor.
    ///
    /// The stopping condition and other execution details depend on the executor used.
    /// See [`Execute`] and [`Executor`] for more details.
    #[instrument(skip(self, executor), fields(initial_time = %self.time()))]
    pub fn execute<X: Execute<C>>(&mut self, executor: X) -> Result<(), SimError> {
        info!("Starting simulation execution");
        executor.execute(self)?;
        info!(
            final_time = %self.time(),
            events = self.scheduler.dispatched(),
            "Simulation execution completed"
        );
        Ok(())
    }

    /// Dispatches events until none remain.
    pub fn run_to_completion(&mut self) -> Result<(), SimError> {
        self.execute(Executor::unbound())
    }
}
