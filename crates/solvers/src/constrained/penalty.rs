//! Quadratic penalty method.
//!
//! Minimizes `f + μΣh² + μΣmax(0, g)²` for a growing sequence of weights `μ`,
//! warm starting each inner solve from the previous solution. The iterates
//! approach the feasible set from outside, with violation of order `1/μ`.

use descent_core::{ConstraintSet, Objective, Observer, Vector};

use crate::{History, Method, unconstrained};

use super::{
    Action, ConfigError, Error, Event, Measure, Multipliers, OuterRecord, Solution, Status,
    config::{check_outer_iters, check_schedule, check_tolerance, default_inner},
    outcome, report, start,
    surrogate::Penalty,
};

/// Configuration for the quadratic penalty method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub inner: unconstrained::Config,
    pub initial_penalty: f64,
    pub growth: f64,
    pub max_penalty: f64,

    /// Converged once the largest violation drops below this value.
    pub tolerance: f64,

    pub max_outer_iters: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner: default_inner(),
            initial_penalty: 1.0,
            growth: 10.0,
            max_penalty: 1e8,
            tolerance: 1e-6,
            max_outer_iters: 20,
            history_limit: None,
        }
    }
}

impl Config {
    /// Validates the schedule, tolerance, and inner solver config.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_schedule(self.initial_penalty, self.growth, Some(self.max_penalty))?;
        check_tolerance(self.tolerance)?;
        check_outer_iters(self.max_outer_iters)?;
        self.inner.validate()?;
        Ok(())
    }
}

/// Minimizes the objective subject to `constraints` with a quadratic penalty.
///
/// The observer receives an [`Event`] after each outer iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective is not finite
/// at `x0`, or if the objective fails.
pub fn minimize<P, Obs, const N: usize>(
    problem: &P,
    constraints: &ConstraintSet<'_, N>,
    x0: Vector<N>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    config.validate()?;
    let method = Method::QuadraticPenalty;
    let mut weight = config.initial_penalty;
    let violation = Measure::Violation(constraints.max_violation(&x0));
    let mut last = start(problem, x0, violation, weight)?;
    let mut history = History::new(config.history_limit);

    for iter in 1..=config.max_outer_iters {
        let surrogate = Penalty {
            problem,
            constraints,
            weight,
        };
        let inner = unconstrained::minimize_unobserved(&surrogate, last.x, &config.inner)
            .map_err(Error::Inner)?;

        let violation = constraints.max_violation(&inner.x);
        last = OuterRecord {
            iter,
            x: inner.x,
            objective: problem.value(&inner.x).map_err(Error::objective)?,
            measure: Measure::Violation(violation),
            parameter: weight,
            inner_iters: inner.iters,
            inner_status: Some(inner.status),
        };

        let stop = report(&mut history, last, method, &mut observer);
        if let Some(status) = outcome(violation < config.tolerance, stop) {
            let multipliers = estimate(constraints, &last.x, weight);
            return Ok(Solution::new(status, last, multipliers, history, method));
        }

        weight = (weight * config.growth).min(config.max_penalty);
    }

    let multipliers = estimate(constraints, &last.x, last.parameter);
    Ok(Solution::new(Status::MaxIters, last, multipliers, history, method))
}

/// Minimizes with a quadratic penalty without observer support.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective is not finite
/// at `x0`, or if the objective fails.
pub fn minimize_unobserved<P, const N: usize>(
    problem: &P,
    constraints: &ConstraintSet<'_, N>,
    x0: Vector<N>,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
{
    minimize(problem, constraints, x0, config, ())
}

/// Multiplier estimates `λ = 2μh` and `μ_g = 2μ·max(0, g)`.
fn estimate<const N: usize>(
    constraints: &ConstraintSet<'_, N>,
    x: &Vector<N>,
    weight: f64,
) -> Multipliers {
    Multipliers {
        equality: constraints
            .equalities()
            .iter()
            .map(|h| 2.0 * weight * h.value(x))
            .collect(),
        inequality: constraints
            .inequalities()
            .iter()
            .map(|g| 2.0 * weight * g.value(x).max(0.0))
            .collect(),
    }
}
