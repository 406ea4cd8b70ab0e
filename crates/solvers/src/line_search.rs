//! Step-length selection along a descent direction.
//!
//! Given a point `x`, its objective `f(x)`, gradient `g`, and a direction `d`
//! with `gᵗd < 0`, a line search picks `α > 0` so that `x + αd` makes
//! acceptable progress.
//!
//! # Searches
//!
//! - [`backtracking`] — shrinks `α` until the Armijo sufficient-decrease
//!   condition holds
//! - [`strong_wolfe`] — bisection bracketing that enforces both the Armijo
//!   and the strong curvature condition
//!
//! Neither search raises an error when its iteration cap is exhausted. The
//! returned [`Step`] reports `satisfied = false` and the caller decides what
//! to do with it.

pub mod backtracking;
pub mod strong_wolfe;

use thiserror::Error;

use descent_core::{Objective, Vector};

/// A step length chosen by a line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<const N: usize> {
    /// The step length.
    pub alpha: f64,

    /// Objective value at `x + αd`.
    pub value: f64,

    /// Gradient at `x + αd`, if the search had to compute it.
    pub gradient: Option<Vector<N>>,

    /// Whether the search's acceptance conditions hold at `alpha`.
    pub satisfied: bool,

    /// Number of objective evaluations performed.
    pub evaluations: usize,
}

impl<const N: usize> Step<N> {
    /// Returns true if the step strictly decreases the objective from `fx`.
    #[must_use]
    pub fn decreases(&self, fx: f64) -> bool {
        self.value.is_finite() && self.value < fx
    }
}

/// Errors that can occur when validating a line search config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("c1 must lie in (0, 1)")]
    SufficientDecrease,

    #[error("c2 must lie in (c1, 1)")]
    Curvature,

    #[error("shrink factor must lie in (0, 1)")]
    Shrink,

    #[error("max_iters must be at least 1")]
    MaxIters,
}

/// Returns true if `value` lies strictly between 0 and 1.
pub(crate) fn in_open_unit(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

/// Selects the line search used by a solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSearch {
    Backtracking(backtracking::Config),
    StrongWolfe(strong_wolfe::Config),
}

impl Default for LineSearch {
    fn default() -> Self {
        Self::StrongWolfe(strong_wolfe::Config::default())
    }
}

impl LineSearch {
    /// Validates the selected search's parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Backtracking(config) => config.validate(),
            Self::StrongWolfe(config) => config.validate(),
        }
    }

    /// Runs the selected search from `x` along `d`, starting at `alpha0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective or its gradient fails.
    pub fn search<P, const N: usize>(
        &self,
        problem: &P,
        x: &Vector<N>,
        fx: f64,
        g: &Vector<N>,
        d: &Vector<N>,
        alpha0: f64,
    ) -> Result<Step<N>, P::Error>
    where
        P: Objective<N>,
    {
        match self {
            Self::Backtracking(config) => backtracking::search(problem, x, fx, g, d, alpha0, config),
            Self::StrongWolfe(config) => strong_wolfe::search(problem, x, fx, g, d, alpha0, config),
        }
    }
}
