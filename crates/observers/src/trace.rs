use tracing::info;

use descent_core::Observer;

use crate::traits::{HasIteration, HasObjective};

/// Logs every event at `info` level and never intervenes.
///
/// Each event becomes one `tracing` event with `label`, `iter`, and
/// `objective` fields, so a run can be followed with any subscriber.
///
/// ```
/// use descent_observers::Trace;
/// use descent_solvers::unconstrained::{Config, minimize};
///
/// let bowl = |x: &[f64; 2]| x[0] * x[0] + 4.0 * x[1] * x[1];
/// let solution = minimize(&bowl, [1.0, 1.0], &Config::default(), Trace::new("bowl")).unwrap();
///
/// assert!(solution.converged());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trace {
    label: &'static str,
}

impl Trace {
    /// Creates a trace observer that tags its events with `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// Returns the label attached to every event.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<E, A> Observer<E, A> for Trace
where
    E: HasIteration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        info!(
            label = self.label,
            iter = event.iteration(),
            objective = event.objective(),
            "solver event"
        );
        None
    }
}
