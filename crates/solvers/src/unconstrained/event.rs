use descent_core::Vector;

use super::Record;

/// Event emitted by the unconstrained solver once per iteration.
///
/// Iteration 0 reports the starting point before any step is taken.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, const N: usize> {
    /// The record appended to the history for this iteration.
    pub record: &'a Record<N>,

    /// The gradient at the current iterate.
    pub gradient: &'a Vector<N>,
}
