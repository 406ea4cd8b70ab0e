//! Backtracking line search with the Armijo condition.

use descent_core::{Objective, Vector, linalg};

use super::{ConfigError, Step, in_open_unit};

/// Configuration for the backtracking line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Sufficient-decrease constant in `f(x+αd) ≤ f(x) + c1·α·gᵗd`.
    pub c1: f64,

    /// Factor applied to `α` after each rejected trial.
    pub shrink: f64,

    /// Maximum number of trial steps.
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            shrink: 0.5,
            max_iters: 50,
        }
    }
}

impl Config {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `c1` or `shrink` is outside `(0, 1)` or
    /// `max_iters` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !in_open_unit(self.c1) {
            return Err(ConfigError::SufficientDecrease);
        }
        if !in_open_unit(self.shrink) {
            return Err(ConfigError::Shrink);
        }
        if self.max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(())
    }
}

/// Shrinks `α` from `alpha0` until the Armijo condition holds.
///
/// Non-finite trial values count as failing the condition. If `max_iters`
/// trials are exhausted, the last `α` tried is returned with
/// `satisfied = false` and no guarantee of decrease.
///
/// # Errors
///
/// Returns an error if the objective fails.
pub fn search<P, const N: usize>(
    problem: &P,
    x: &Vector<N>,
    fx: f64,
    g: &Vector<N>,
    d: &Vector<N>,
    alpha0: f64,
    config: &Config,
) -> Result<Step<N>, P::Error>
where
    P: Objective<N>,
{
    let slope = linalg::dot(g, d);
    let mut alpha = alpha0;
    let mut value = f64::NAN;

    for trial in 1..=config.max_iters {
        value = problem.value(&linalg::axpy(x, alpha, d))?;
        if value.is_finite() && value <= fx + config.c1 * alpha * slope {
            return Ok(Step {
                alpha,
                value,
                gradient: None,
                satisfied: true,
                evaluations: trial,
            });
        }
        if trial < config.max_iters {
            alpha *= config.shrink;
        }
    }

    Ok(Step {
        alpha,
        value,
        gradient: None,
        satisfied: false,
        evaluations: config.max_iters,
    })
}
