use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

use crate::error::EventError;
use crate::types::EventId;
use crate::SimTime;

/// Entry stored in the scheduler: the event payload together with its due time
/// and the sequence id assigned when it was scheduled.
///
/// Entries are ordered by `(time, id)` so that events due at the same instant
/// are dispatched in the order they were scheduled.
#[derive(Debug)]
pub struct EventEntry<E> {
    id: EventId,
    time: SimTime,
    event: E,
}

impl<E> EventEntry<E> {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn into_event(self) -> E {
        self.event
    }
}

impl<E> PartialEq for EventEntry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.id == other.id
    }
}

impl<E> Eq for EventEntry<E> {}

impl<E> PartialOrd for EventEntry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for EventEntry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the ordering for min-heap behavior in BinaryHeap
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Handle for a scheduled event, used to cancel it before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventHandle {
    id: EventId,
    time: SimTime,
}

impl EventHandle {
    pub fn id(&self) -> EventId {
        self.id
    }

    /// Time at which the event is due.
    pub fn due(&self) -> SimTime {
        self.time
    }
}

type Clock = Rc<Cell<SimTime>>;

/// This struct exposes only immutable access to the simulation clock.
/// The clock itself is owned by the scheduler, while others can obtain `ClockRef`
/// to read the current simulation time.
///
/// # Example
///
/// ```
/// # use queuesim_core::Scheduler;
/// let scheduler = Scheduler::<()>::default();
/// let clock_ref = scheduler.clock();
/// assert_eq!(clock_ref.time(), scheduler.time());
/// ```
#[derive(Clone)]
pub struct ClockRef {
    clock: Clock,
}

impl From<Clock> for ClockRef {
    fn from(clock: Clock) -> Self {
        Self { clock }
    }
}

impl ClockRef {
    /// Return the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock.get()
    }
}

impl fmt::Debug for ClockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockRef").field("time", &self.time()).finish()
    }
}

/// Scheduler keeps the virtual clock and the set of upcoming events.
///
/// `E` is the event (continuation) type of the component that owns the
/// scheduler. The clock only moves forward: it is set to an event's due time
/// when that event is popped, and nothing can be scheduled before it.
///
/// See the [crate-level documentation](crate) for more information.
pub struct Scheduler<E> {
    next_event_id: u64,
    events: BinaryHeap<EventEntry<E>>,
    /// Ids of events that are scheduled and neither dispatched nor cancelled.
    live: HashSet<EventId>,
    clock: Clock,
    dispatched: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            next_event_id: 0,
            events: BinaryHeap::default(),
            live: HashSet::new(),
            clock: Rc::new(Cell::new(SimTime::default())),
            dispatched: 0,
        }
    }
}

impl<E: fmt::Debug> Scheduler<E> {
    /// Schedules `event` to fire at `self.time() + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidDelay`] if `delay` is negative, NaN or infinite.
    pub fn schedule(&mut self, delay: f64, event: E) -> Result<EventHandle, EventError> {
        let time = self.time().checked_add(delay)?;
        Ok(self.push(time, event))
    }

    /// Schedules `event` to fire at the absolute time `time`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::ScheduleInPast`] if `time` is earlier than the clock.
    pub fn schedule_at(&mut self, time: SimTime, event: E) -> Result<EventHandle, EventError> {
        let now = self.time();
        if time < now {
            return Err(EventError::ScheduleInPast {
                requested: time.as_secs(),
                now: now.as_secs(),
            });
        }
        Ok(self.push(time, event))
    }

    /// Schedules `event` at the current time, after anything already due now.
    pub fn schedule_now(&mut self, event: E) -> EventHandle {
        let now = self.time();
        self.push(now, event)
    }

    fn push(&mut self, time: SimTime, event: E) -> EventHandle {
        self.next_event_id += 1;
        let id = EventId(self.next_event_id);
        trace!(event_id = %id, due = %time, ?event, "Scheduling event");
        self.live.insert(id);
        self.events.push(EventEntry { id, time, event });
        EventHandle { id, time }
    }
}

impl<E> Scheduler<E> {
    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock.get()
    }

    /// Alias of [`Scheduler::time`].
    #[must_use]
    pub fn now(&self) -> SimTime {
        self.time()
    }

    /// Returns a structure with immutable access to the simulation time.
    #[must_use]
    pub fn clock(&self) -> ClockRef {
        ClockRef {
            clock: Rc::clone(&self.clock),
        }
    }

    /// Cancels a pending event. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: EventHandle) -> bool {
        let removed = self.live.remove(&handle.id);
        if removed {
            trace!(event_id = %handle.id, "Cancelled event");
        }
        removed
    }

    /// Returns the due time of the next live event, or `None` if none are left.
    pub fn peek_time(&mut self) -> Option<SimTime> {
        self.discard_cancelled();
        self.events.peek().map(EventEntry::time)
    }

    /// Removes and returns the next live event, advancing the clock to it.
    pub fn pop(&mut self) -> Option<EventEntry<E>> {
        self.discard_cancelled();
        let entry = self.events.pop()?;
        self.live.remove(&entry.id);
        self.clock.replace(entry.time);
        self.dispatched += 1;
        trace!(event_id = %entry.id, time = %entry.time, "Dispatching event");
        Some(entry)
    }

    /// Number of live (scheduled, not yet dispatched or cancelled) events.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of events dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    fn discard_cancelled(&mut self) {
        while let Some(head) = self.events.peek() {
            if self.live.contains(&head.id) {
                break;
            }
            self.events.pop();
        }
    }
}
