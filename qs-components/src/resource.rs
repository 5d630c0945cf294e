//! Capacity-bounded shared resource with a FIFO wait queue
//!
//! A `ResourcePool` models a fixed number of identical servers (hairdressers,
//! cooks, network servers). Requests beyond capacity wait in arrival order;
//! a release hands the freed server straight to the head of the queue.

use crate::builder::{validate_at_least, ValidationResult};
use crate::error::ResourceError;
use queuesim_core::{EntityId, SimTime};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// A request that could not be granted immediately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub entity_id: EntityId,
    /// Time the request was made
    pub arrival_time: SimTime,
}

impl PendingRequest {
    /// How long this request has been waiting at `now`.
    pub fn waited(&self, now: SimTime) -> f64 {
        now.duration_since(self.arrival_time)
    }
}

/// Result of [`ResourcePool::request`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestOutcome {
    /// A server was free and is now held by the requester.
    Granted { at: SimTime },
    /// The requester was appended to the wait queue at `position` (0 = head).
    Queued { position: usize },
}

/// Point-in-time view of a pool, for instrumentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub in_use: usize,
    pub queue_len: usize,
}

impl PoolSnapshot {
    /// `0 <= in_use <= capacity`, and nobody waits while a server is free.
    pub fn is_consistent(&self) -> bool {
        self.in_use <= self.capacity && (self.queue_len == 0 || self.in_use == self.capacity)
    }
}

/// Capacity-bounded resource with strict FIFO fairness.
///
/// Invariants: `in_use <= capacity`, and the wait queue only holds requests
/// that have not been granted.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    capacity: usize,
    in_use: usize,
    wait_queue: VecDeque<PendingRequest>,
}

impl ResourcePool {
    /// Create a pool with `capacity` servers.
    ///
    /// # Errors
    ///
    /// A capacity of zero is rejected: nothing could ever be served.
    pub fn new(capacity: usize) -> ValidationResult<Self> {
        validate_at_least("capacity", capacity, 1)?;
        Ok(Self {
            capacity,
            in_use: 0,
            wait_queue: VecDeque::new(),
        })
    }

    /// Ask for one server on behalf of `entity_id`.
    pub fn request(&mut self, entity_id: EntityId, at_time: SimTime) -> RequestOutcome {
        if self.in_use < self.capacity {
            self.in_use += 1;
            debug!(entity = %entity_id, in_use = self.in_use, capacity = self.capacity, "Granted immediately");
            RequestOutcome::Granted { at: at_time }
        } else {
            self.wait_queue.push_back(PendingRequest {
                entity_id,
                arrival_time: at_time,
            });
            let position = self.wait_queue.len() - 1;
            debug!(entity = %entity_id, position, "All servers busy, queued");
            RequestOutcome::Queued { position }
        }
    }

    /// Give one server back.
    ///
    /// If anyone is waiting, the server passes directly to the head of the
    /// queue at `at_time` and that request is returned; `in_use` is unchanged
    /// overall in that case.
    ///
    /// # Errors
    ///
    /// [`ResourceError::NotHeld`] if no server is currently in use.
    pub fn release(&mut self, at_time: SimTime) -> Result<Option<PendingRequest>, ResourceError> {
        if self.in_use == 0 {
            return Err(ResourceError::NotHeld {
                capacity: self.capacity,
            });
        }
        self.in_use -= 1;
        let next = self.wait_queue.pop_front();
        if let Some(request) = &next {
            self.in_use += 1;
            debug!(
                entity = %request.entity_id,
                waited = request.waited(at_time),
                queue_len = self.wait_queue.len(),
                "Granted to head of queue"
            );
        }
        Ok(next)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    pub fn available(&self) -> usize {
        self.capacity - self.in_use
    }

    pub fn queue_len(&self) -> usize {
        self.wait_queue.len()
    }

    pub fn is_saturated(&self) -> bool {
        self.in_use == self.capacity
    }

    /// Fraction of servers currently busy (0.0 to 1.0)
    pub fn utilization(&self) -> f64 {
        self.in_use as f64 / self.capacity as f64
    }

    /// Requests currently waiting, head first.
    pub fn waiting(&self) -> impl Iterator<Item = &PendingRequest> {
        self.wait_queue.iter()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            capacity: self.capacity,
            in_use: self.in_use,
            queue_len: self.wait_queue.len(),
        }
    }
}
