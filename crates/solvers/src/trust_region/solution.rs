use std::fmt;

use descent_core::Vector;

use crate::Method;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient norm fell below `gradient_tol`.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// The radius shrank below `min_radius`.
    RadiusCollapsed,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Converged => "gradient norm below tolerance",
            Self::MaxIters => "iteration limit reached",
            Self::RadiusCollapsed => "trust radius collapsed",
            Self::StoppedByObserver => "stopped by observer",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// A snapshot of one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<const N: usize> {
    pub iter: usize,

    /// The iterate after this iteration, unchanged if the step was rejected.
    pub x: Vector<N>,

    pub objective: f64,
    pub gradient_norm: f64,

    /// Radius for the next iteration.
    pub radius: f64,

    /// Ratio of actual to predicted reduction for this iteration's step.
    pub ratio: f64,

    pub step_norm: f64,
    pub accepted: bool,

    /// True if the SR1 model skipped this iteration's correction pair.
    pub stale: bool,
}

/// The result of a trust-region minimization.
#[derive(Debug, Clone)]
pub struct Solution<const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// Final iterate.
    pub x: Vector<N>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Gradient at `x`.
    pub gradient: Vector<N>,

    /// Norm of `gradient`.
    pub gradient_norm: f64,

    /// Final trust radius.
    pub radius: f64,

    /// Number of completed iterations, accepted or not.
    pub iters: usize,

    /// Per-iteration records, oldest first.
    pub history: Vec<Record<N>>,

    /// Number of records evicted by `history_limit`.
    pub dropped_records: usize,

    /// The subproblem solver that produced this solution.
    pub method: Method,
}

impl<const N: usize> Solution<N> {
    /// Returns true if the solver met its gradient tolerance.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Returns a short explanation of why the solver stopped.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        self.status.reason()
    }
}
