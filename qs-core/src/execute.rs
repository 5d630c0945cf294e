use crate::{Component, SimError, SimTime, Simulation};

/// Simulation execution trait.
pub trait Execute<C: Component> {
    /// Executes the simulation until some stopping condition is reached.
    /// The condition is implementation-specific.
    fn execute(self, sim: &mut Simulation<C>) -> Result<(), SimError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum EndCondition {
    Time(SimTime),
    NoEvents,
    Steps(usize),
}

/// Executor is used for simple execution of an entire simulation.
///
/// See the crate level documentation for examples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Executor {
    end_condition: EndCondition,
}

impl Executor {
    /// Simulation will end only once there is no available events in the queue.
    #[must_use]
    pub fn unbound() -> Self {
        Self {
            end_condition: EndCondition::NoEvents,
        }
    }

    /// Simulation will be run no longer than the given time.
    /// It may terminate early if no events are available.
    #[must_use]
    pub fn timed(time: SimTime) -> Self {
        Self {
            end_condition: EndCondition::Time(time),
        }
    }

    /// Simulation will execute exactly this many steps, unless we run out of events.
    #[must_use]
    pub fn steps(steps: usize) -> Self {
        Self {
            end_condition: EndCondition::Steps(steps),
        }
    }

    /// Registers a side effect that is called _after_ each simulation step.
    ///
    /// This is the instrumentation hook: the closure sees the simulation
    /// between two dispatches, when every invariant of the model must hold.
    #[must_use]
    pub fn side_effect<F>(self, func: F) -> ExecutorWithSideEffect<F> {
        ExecutorWithSideEffect {
            end_condition: self.end_condition,
            side_effect: func,
        }
    }
}

impl<C: Component> Execute<C> for Executor {
    fn execute(self, sim: &mut Simulation<C>) -> Result<(), SimError> {
        run_with(sim, self.end_condition, |_| {})
    }
}

pub struct ExecutorWithSideEffect<F> {
    end_condition: EndCondition,
    side_effect: F,
}

impl<C, F> Execute<C> for ExecutorWithSideEffect<F>
where
    C: Component,
    F: FnMut(&Simulation<C>),
{
    fn execute(self, sim: &mut Simulation<C>) -> Result<(), SimError> {
        run_with(sim, self.end_condition, self.side_effect)
    }
}

fn run_with<C, F>(
    sim: &mut Simulation<C>,
    end_condition: EndCondition,
    mut side_effect: F,
) -> Result<(), SimError>
where
    C: Component,
    F: FnMut(&Simulation<C>),
{
    let mut step = |sim: &mut Simulation<C>| -> Result<bool, SimError> {
        let stepped = sim.step()?;
        if stepped {
            side_effect(sim);
        }
        Ok(stepped)
    };
    match end_condition {
        EndCondition::NoEvents => while step(sim)? {},
        EndCondition::Time(time) => {
            while sim.peek_next_event_time().is_some_and(|t| t <= time) {
                step(sim)?;
            }
        }
        EndCondition::Steps(steps) => {
            for _ in 0..steps {
                if !step(sim)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Scheduler;

    struct TestComponent {
        counter: usize,
    }

    #[derive(Debug)]
    struct TestEvent;

    impl Component for TestComponent {
        type Event = TestEvent;

        fn process_event(
            &mut self,
            _event: TestEvent,
            scheduler: &mut Scheduler<TestEvent>,
        ) -> Result<(), SimError> {
            self.counter += 1;
            if self.counter < 10 {
                scheduler.schedule(2.0, TestEvent)?;
            }
            Ok(())
        }
    }

    fn sim() -> Simulation<TestComponent> {
        let mut sim = Simulation::new(TestComponent { counter: 0 });
        sim.schedule(0.0, TestEvent).unwrap();
        sim
    }

    #[test]
    fn test_create_executor() {
        assert_eq!(
            Executor::unbound(),
            Executor {
                end_condition: EndCondition::NoEvents
            }
        );
        assert_eq!(
            Executor::timed(SimTime::zero()),
            Executor {
                end_condition: EndCondition::Time(SimTime::zero())
            }
        );
        assert_eq!(
            Executor::steps(7),
            Executor {
                end_condition: EndCondition::Steps(7)
            }
        );
    }

    #[test]
    fn test_unbound() {
        let mut sim = sim();
        Executor::unbound().execute(&mut sim).unwrap();
        assert_eq!(sim.component().counter, 10);
        assert_eq!(sim.time().as_secs(), 18.0);
        assert!(!sim.has_pending_events());
    }

    #[test]
    fn test_steps() {
        let mut sim = sim();
        Executor::steps(4).execute(&mut sim).unwrap();
        assert_eq!(sim.component().counter, 4);
    }

    #[test]
    fn test_steps_stops_before() {
        let mut sim = sim();
        // After 10 steps there are no events, so it will not execute all 100
        Executor::steps(100).execute(&mut sim).unwrap();
        assert_eq!(sim.into_component().counter, 10);
    }

    #[test]
    fn test_timed() {
        let mut sim = sim();
        Executor::timed(SimTime::from_secs(6.0).unwrap())
            .execute(&mut sim)
            .unwrap();
        assert_eq!(sim.component().counter, 4);
        assert_eq!(sim.clock().time().as_secs(), 6.0);
    }

    #[test]
    fn test_timed_clock_stops_early() {
        let mut sim = sim();
        Executor::timed(SimTime::from_secs(5.0).unwrap())
            .execute(&mut sim)
            .unwrap();
        assert_eq!(sim.component().counter, 3);
        assert_eq!(sim.clock().time().as_secs(), 4.0);
    }

    #[test]
    fn test_side_effect_runs_after_every_step() {
        let mut sim = sim();
        let mut seen = Vec::new();
        Executor::unbound()
            .side_effect(|s: &Simulation<TestComponent>| seen.push(s.component().counter))
            .execute(&mut sim)
            .unwrap();
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
    }
}
