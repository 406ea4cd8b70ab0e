use std::fmt;

use descent_core::Vector;

use crate::{History, Method, unconstrained};

/// Indicates why a constrained solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The method's convergence measure fell below its tolerance.
    Converged,

    /// Reached the outer iteration limit without converging.
    MaxIters,

    /// The projected-gradient arc search found no acceptable step.
    LineSearchFailed,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Converged => "convergence measure below tolerance",
            Self::MaxIters => "outer iteration limit reached",
            Self::LineSearchFailed => "projected search found no decrease",
            Self::StoppedByObserver => "stopped by observer",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// The quantity a method drives below its tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// Largest constraint violation, `max(|h_i|, max(0, g_i))`.
    Violation(f64),

    /// Barrier duality gap estimate `m/t`.
    DualityGap(f64),

    /// Projected-gradient residual `‖x − P(x − ∇f)‖`.
    ProjectedGradient(f64),
}

impl Measure {
    /// Returns the measured value.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Violation(v) | Self::DualityGap(v) | Self::ProjectedGradient(v) => v,
        }
    }
}

/// Lagrange multiplier estimates, in constraint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multipliers {
    pub equality: Vec<f64>,
    pub inequality: Vec<f64>,
}

/// A snapshot of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterRecord<const N: usize> {
    pub iter: usize,
    pub x: Vector<N>,

    /// The true objective at `x`, not the surrogate.
    pub objective: f64,

    pub measure: Measure,

    /// Penalty weight, barrier `t`, augmented Lagrangian `ρ`, or the
    /// projected-gradient step length used in this iteration.
    pub parameter: f64,

    /// Iterations of the inner solve, zero when there is none.
    pub inner_iters: usize,

    /// Status of the inner solve, if there was one.
    pub inner_status: Option<unconstrained::Status>,
}

/// The result of a constrained minimization.
#[derive(Debug, Clone)]
pub struct Solution<const N: usize> {
    pub status: Status,
    pub x: Vector<N>,

    /// The true objective at `x`.
    pub objective: f64,

    pub outer_iters: usize,
    pub measure: Measure,
    pub parameter: f64,
    pub multipliers: Multipliers,

    /// Per-outer-iteration records, oldest first.
    pub history: Vec<OuterRecord<N>>,

    /// Number of records evicted by `history_limit`.
    pub dropped_records: usize,

    pub method: Method,
}

impl<const N: usize> Solution<N> {
    pub(super) fn new(
        status: Status,
        last: OuterRecord<N>,
        multipliers: Multipliers,
        history: History<OuterRecord<N>>,
        method: Method,
    ) -> Self {
        let dropped_records = history.dropped();
        Self {
            status,
            x: last.x,
            objective: last.objective,
            outer_iters: last.iter,
            measure: last.measure,
            parameter: last.parameter,
            multipliers,
            history: history.into_vec(),
            dropped_records,
            method,
        }
    }

    /// Returns true if the method met its tolerance.
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
