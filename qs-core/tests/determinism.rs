//! Determinism guardrail tests
//!
//! These tests detect accidental non-determinism in event execution order for
//! identical simulations.

use queuesim_core::{
    Component, Execute, Executor, RandomProvider, RandomSource, Scheduler, SimError, Simulation,
};

#[derive(Debug, Clone)]
enum LogEvent {
    Push(usize),
    Spawn { remaining: usize },
}

struct LoggerComponent {
    log: Vec<(f64, usize)>,
}

impl Component for LoggerComponent {
    type Event = LogEvent;

    fn process_event(
        &mut self,
        event: LogEvent,
        scheduler: &mut Scheduler<LogEvent>,
    ) -> Result<(), SimError> {
        match event {
            LogEvent::Push(value) => self.log.push((scheduler.time().as_secs(), value)),
            LogEvent::Spawn { remaining } => {
                // Children scheduled at the current instant run after
                // everything already due now.
                scheduler.schedule_now(LogEvent::Push(1000 + remaining));
                if remaining > 0 {
                    scheduler.schedule(1.0, LogEvent::Spawn { remaining: remaining - 1 })?;
                }
            }
        }
        Ok(())
    }
}

fn run_same_time_events(event_count: usize) -> Vec<(f64, usize)> {
    let mut sim = Simulation::new(LoggerComponent { log: Vec::new() });

    for i in 0..event_count {
        // All events land at the same timestamp.
        sim.schedule(0.0, LogEvent::Push(i)).unwrap();
    }

    Executor::unbound().execute(&mut sim).unwrap();

    let result = sim.into_component().log;
    assert_eq!(result.len(), event_count);
    result
}

#[test]
fn same_time_events_fire_in_scheduling_order() {
    let result = run_same_time_events(200);
    let values: Vec<usize> = result.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, (0..200).collect::<Vec<_>>());
}

#[test]
fn deterministic_same_time_event_order_across_runs() {
    let baseline = run_same_time_events(200);
    for _ in 0..20 {
        assert_eq!(baseline, run_same_time_events(200));
    }
}

#[test]
fn events_scheduled_now_run_after_already_due_events() {
    let mut sim = Simulation::new(LoggerComponent { log: Vec::new() });
    sim.schedule(0.0, LogEvent::Spawn { remaining: 2 }).unwrap();
    sim.schedule(0.0, LogEvent::Push(1)).unwrap();
    sim.run_to_completion().unwrap();

    assert_eq!(
        sim.component().log,
        vec![(0.0, 1), (0.0, 1002), (1.0, 1001), (2.0, 1000)]
    );
}

/// Random delays drawn from a seeded source reproduce bit-for-bit.
struct RandomDelays {
    rng: RandomSource,
    fired: Vec<f64>,
}

impl Component for RandomDelays {
    type Event = usize;

    fn process_event(&mut self, left: usize, scheduler: &mut Scheduler<usize>) -> Result<(), SimError> {
        self.fired.push(scheduler.time().as_secs());
        if left > 0 {
            let delay = self
                .rng
                .sample_exp(queuesim_core::draw_site!("delay"), 2.0)?;
            scheduler.schedule(delay, left - 1)?;
        }
        Ok(())
    }
}

fn run_random(seed: u64) -> Vec<u64> {
    let mut sim = Simulation::new(RandomDelays {
        rng: RandomSource::seeded(seed),
        fired: Vec::new(),
    });
    sim.schedule(0.0, 100).unwrap();
    sim.run_to_completion().unwrap();
    sim.into_component().fired.iter().map(|t| t.to_bits()).collect()
}

#[test]
fn seeded_random_delays_replay_exactly() {
    assert_eq!(run_random(11), run_random(11));
    assert_ne!(run_random(11), run_random(12));
}
