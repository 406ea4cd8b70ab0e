use descent_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a solver once the objective stops improving.
///
/// An event counts as an improvement when its objective is lower than the best
/// seen so far by more than `tolerance`. After `patience` consecutive events
/// without an improvement the observer requests an early stop. A NaN objective
/// never counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stall {
    patience: usize,
    tolerance: f64,
    best: f64,
    since_best: usize,
}

impl Stall {
    /// Creates a stall detector.
    ///
    /// A `patience` of zero is treated as one.
    #[must_use]
    pub fn new(patience: usize, tolerance: f64) -> Self {
        Self {
            patience: patience.max(1),
            tolerance,
            best: f64::INFINITY,
            since_best: 0,
        }
    }

    /// Returns the lowest objective seen so far.
    #[must_use]
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Records an objective and returns true once patience has run out.
    fn record(&mut self, objective: f64) -> bool {
        let improved = if self.best.is_finite() {
            objective < self.best - self.tolerance
        } else {
            objective < self.best
        };
        if improved {
            self.best = objective;
            self.since_best = 0;
            return false;
        }
        self.since_best += 1;
        self.since_best >= self.patience
    }
}

impl<E, A> Observer<E, A> for Stall
where
    E: HasObjective,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.objective()).then(A::stop_early)
    }
}
