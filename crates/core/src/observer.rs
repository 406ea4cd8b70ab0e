/// Watches a solver's iterations and can steer them.
///
/// Every solver calls `observe` once per iteration with an event borrowing
/// that iteration's record. Returning `Some(action)` asks the solver to act
/// on it (all solvers understand a `StopEarly` action); returning `None`
/// lets the iteration continue.
///
/// `FnMut(&E) -> Option<A>` closures are observers, and `()` is the observer
/// that never acts.
pub trait Observer<E, A> {
    /// Receives one event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick(usize);

    #[derive(Debug, PartialEq)]
    enum Stop {
        Now,
    }

    fn drive<Obs: Observer<Tick, Stop>>(mut observer: Obs, ticks: usize) -> usize {
        for i in 0..ticks {
            if observer.observe(&Tick(i)).is_some() {
                return i;
            }
        }
        ticks
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 5), 5);
    }

    #[test]
    fn closure_observer_can_stop() {
        let observer = |tick: &Tick| (tick.0 == 2).then_some(Stop::Now);
        assert_eq!(drive(observer, 5), 2);
    }
}
