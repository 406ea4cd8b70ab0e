use descent_core::Vector;

use super::Record;

/// Event emitted by the trust-region solver once per iteration.
///
/// Iteration 0 reports the starting point; both reductions are zero there.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, const N: usize> {
    /// The record appended to the history for this iteration.
    pub record: &'a Record<N>,

    /// The gradient at the current iterate.
    pub gradient: &'a Vector<N>,

    /// `f(x) − f(x + p)` for the trial step.
    pub actual_reduction: f64,

    /// `m(0) − m(p)` for the trial step.
    pub predicted_reduction: f64,
}
