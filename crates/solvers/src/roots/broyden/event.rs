use descent_core::Vector;

use super::Record;

/// Event emitted by the Broyden solver once per iteration.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, const N: usize> {
    pub record: &'a Record<N>,

    /// The residuals `F(x)` at the current iterate.
    pub residuals: &'a Vector<N>,
}
