/// Control actions supported by the constrained solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current outer iteration and return its iterate.
    StopEarly,
}
