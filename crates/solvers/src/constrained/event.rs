use super::OuterRecord;

/// Event emitted by the constrained solvers once per outer iteration.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, const N: usize> {
    /// The record appended to the history for this outer iteration.
    pub record: &'a OuterRecord<N>,
}
