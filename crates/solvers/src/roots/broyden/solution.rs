use std::fmt;

use descent_core::Vector;

use crate::Method;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual norm fell below `residual_tol`.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// No step reduced the residual norm, even with a fresh Jacobian.
    LineSearchFailed,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Converged => "residual norm below tolerance",
            Self::MaxIters => "iteration limit reached",
            Self::LineSearchFailed => "no step reduced the residual norm",
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
    /// Iteration number, 0 for the starting point.
    pub iter: usize,

    pub x: Vector<N>,

    /// `‖F(x)‖`.
    pub residual_norm: f64,

    /// Step length `α` taken to reach `x`, zero for the starting point.
    pub step_length: f64,

    /// True if the Jacobian was recomputed by finite differences before this
    /// iteration's step.
    pub refreshed: bool,
}

/// The result of a Broyden solve.
#[derive(Debug, Clone)]
pub struct Solution<const N: usize> {
    pub status: Status,
    pub x: Vector<N>,

    /// Residuals `F(x)` at the final iterate.
    pub residuals: Vector<N>,

    pub residual_norm: f64,
    pub iters: usize,

    /// Per-iteration records, oldest first.
    pub history: Vec<Record<N>>,

    /// Number of records evicted by `history_limit`.
    pub dropped_records: usize,

    pub method: Method,
}

impl<const N: usize> Solution<N> {
    /// Returns true if the residual tolerance was met.
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
