//! Multi-server queueing system driven by scheduler events
//!
//! `ServiceSystem` owns one [`ResourcePool`], every [`EntityProcess`] created
//! during the run, the arrival stream and the service-time distribution. Each
//! point where an entity would suspend (waiting for a server, waiting for its
//! service to finish) is a [`ServiceEvent`] scheduled back to this component.
//!
//! Waiting times are recorded in the order entities enter service.

use crate::arrivals::ArrivalGenerator;
use crate::entity::EntityProcess;
use crate::error::{ComponentError, EntityError};
use crate::resource::{PoolSnapshot, RequestOutcome, ResourcePool};
use queuesim_core::dists::{ServiceTimeDistribution, UniformServiceTime};
use queuesim_core::{entity_span, Component, EntityId, RandomProvider, Scheduler, SimError, SimTime};
use queuesim_metrics::{QueueMetrics, QueueMetricsSnapshot};
use tracing::debug;

/// Events handled by a [`ServiceSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceEvent {
    /// The next entity of the arrival stream shows up.
    Arrival,
    /// A server was handed over to a queued entity.
    Granted(EntityId),
    /// The entity's service time has elapsed.
    Departure(EntityId),
}

/// Queueing system with `capacity` identical servers and a FIFO wait queue.
pub struct ServiceSystem<R: RandomProvider> {
    name: String,
    pool: ResourcePool,
    entities: Vec<EntityProcess>,
    arrivals: ArrivalGenerator,
    service: UniformServiceTime,
    rng: R,
    waits: Vec<f64>,
    metrics: QueueMetrics,
}

impl<R: RandomProvider> ServiceSystem<R> {
    pub fn new(
        name: impl Into<String>,
        pool: ResourcePool,
        arrivals: ArrivalGenerator,
        service: UniformServiceTime,
        rng: R,
    ) -> Result<Self, ComponentError> {
        let name = name.into();
        let metrics = QueueMetrics::new(name.clone(), pool.capacity())
            .map_err(|e| ComponentError::InvalidConfiguration(e.to_string()))?;
        Ok(Self {
            name,
            pool,
            entities: Vec::with_capacity(arrivals.count()),
            arrivals,
            service,
            rng,
            waits: Vec::new(),
            metrics,
        })
    }

    /// The event that starts the run, if there is anything to simulate.
    pub fn first_event(&self) -> Option<ServiceEvent> {
        (!self.arrivals.is_exhausted()).then_some(ServiceEvent::Arrival)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        self.pool.snapshot()
    }

    pub fn entities(&self) -> &[EntityProcess] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityProcess> {
        usize::try_from(id.0).ok().and_then(|i| self.entities.get(i))
    }

    /// Waiting times in the order entities entered service.
    pub fn waits(&self) -> &[f64] {
        &self.waits
    }

    pub fn into_waits(self) -> Vec<f64> {
        self.waits
    }

    pub fn completed(&self) -> usize {
        self.entities.iter().filter(|e| e.is_completed()).count()
    }

    pub fn metrics_snapshot(&self, end: SimTime) -> QueueMetricsSnapshot {
        self.metrics.snapshot(end)
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut EntityProcess, EntityError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.entities.get_mut(i))
            .ok_or(EntityError::Unknown(id))
    }

    fn on_arrival(&mut self, scheduler: &mut Scheduler<ServiceEvent>) -> Result<(), SimError> {
        let now = scheduler.time();
        let id = EntityId(self.entities.len() as u64);
        let _span = entity_span(id).entered();

        let mut entity = EntityProcess::new(id, now);
        entity.request()?;
        self.entities.push(entity);
        self.metrics.record_arrival();
        debug!(time = %now, "Arrived");

        match self.pool.request(id, now) {
            RequestOutcome::Granted { .. } => {
                self.metrics.record_in_use(now, self.pool.in_use());
                self.start_service(id, true, scheduler)?;
            }
            RequestOutcome::Queued { position } => {
                self.metrics.record_queued(self.pool.queue_len());
                debug!(position, "Waiting for a server");
            }
        }

        if let Some(gap) = self.arrivals.next_gap(&mut self.rng)? {
            scheduler.schedule(gap, ServiceEvent::Arrival)?;
        }
        Ok(())
    }

    fn start_service(
        &mut self,
        id: EntityId,
        immediate: bool,
        scheduler: &mut Scheduler<ServiceEvent>,
    ) -> Result<(), SimError> {
        let now = scheduler.time();
        let duration = self.service.sample(&mut self.rng)?;
        let entity = self.entity_mut(id)?;
        let departs = entity.grant(now, duration)?;
        let waited = entity.waiting_time().unwrap_or(0.0);

        self.waits.push(waited);
        self.metrics
            .record_service_start(waited, immediate, self.pool.queue_len());
        debug!(entity = %id, waited, duration, "Service started");

        scheduler.schedule_at(departs, ServiceEvent::Departure(id))?;
        Ok(())
    }

    fn on_departure(
        &mut self,
        id: EntityId,
        scheduler: &mut Scheduler<ServiceEvent>,
    ) -> Result<(), SimError> {
        let now = scheduler.time();
        self.entity_mut(id)?.depart(now)?;
        self.metrics.record_departure();
        debug!(entity = %id, time = %now, "Departed");

        match self.pool.release(now)? {
            // The server passes straight to the head of the queue; `in_use`
            // does not change.
            Some(next) => {
                scheduler.schedule_now(ServiceEvent::Granted(next.entity_id));
            }
            None => self.metrics.record_in_use(now, self.pool.in_use()),
        }
        Ok(())
    }
}

impl<R: RandomProvider> Component for ServiceSystem<R> {
    type Event = ServiceEvent;

    fn process_event(
        &mut self,
        event: ServiceEvent,
        scheduler: &mut Scheduler<ServiceEvent>,
    ) -> Result<(), SimError> {
        match event {
            ServiceEvent::Arrival => self.on_arrival(scheduler),
            ServiceEvent::Granted(id) => self.start_service(id, false, scheduler),
            ServiceEvent::Departure(id) => self.on_departure(id, scheduler),
        }
    }
}
