//! Projected gradient descent over box bounds.
//!
//! Each iteration steps along `−∇f` and projects back onto the box,
//! `x ← P(x − α∇f)`, choosing `α` by backtracking along the projection arc
//! until `f(x_new) ≤ f(x) + c1·∇fᵗ(x_new − x)`. The method stops when the
//! projected-gradient residual `‖x − P(x − ∇f)‖` drops below the tolerance,
//! which is zero exactly at first-order optimal points of the box problem.

use tracing::warn;

use descent_core::{Bounds, Objective, Observer, Vector, linalg};

use crate::{Evaluation, History, Method, evaluate, line_search::in_open_unit};

use super::{
    Action, ConfigError, Error, Event, Measure, Multipliers, OuterRecord, Solution, Status,
    config::check_tolerance, outcome, report,
};

/// Configuration for projected gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// First step length tried in every iteration.
    pub initial_step: f64,

    /// Sufficient-decrease constant along the projection arc.
    pub c1: f64,

    /// Factor applied to the step after each rejected trial.
    pub shrink: f64,

    pub max_backtracks: usize,

    /// Converged once the projected-gradient residual drops below this value.
    pub tolerance: f64,

    pub max_iters: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            c1: 1e-4,
            shrink: 0.5,
            max_backtracks: 50,
            tolerance: 1e-6,
            max_iters: 1000,
            history_limit: None,
        }
    }
}

impl Config {
    /// Validates the step parameters and the tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_step.is_finite()
            || self.initial_step <= 0.0
            || !in_open_unit(self.c1)
            || !in_open_unit(self.shrink)
            || self.max_backtracks == 0
        {
            return Err(ConfigError::Step);
        }
        check_tolerance(self.tolerance)?;
        if self.max_iters == 0 {
            return Err(ConfigError::OuterIters);
        }
        Ok(())
    }
}

/// Minimizes the objective over `bounds` by projected gradient descent.
///
/// The starting point is projected onto the bounds first. The observer
/// receives an [`Event`] after each iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective or its gradient
/// is not finite at the projected start, or if the objective fails.
pub fn minimize<P, Obs, const N: usize>(
    problem: &P,
    bounds: &Bounds<N>,
    x0: Vector<N>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    config.validate()?;
    let method = Method::ProjectedGradient;
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteStart);
    }

    let mut current = evaluate(problem, bounds.project(&x0)).map_err(Error::objective)?;
    if !current.is_finite() {
        return Err(Error::NonFiniteStart);
    }

    let mut history = History::new(config.history_limit);
    let mut last = OuterRecord {
        iter: 0,
        x: current.x,
        objective: current.value,
        measure: Measure::ProjectedGradient(residual(bounds, &current)),
        parameter: 0.0,
        inner_iters: 0,
        inner_status: None,
    };

    for iter in 1..=config.max_iters {
        if last.measure.value() < config.tolerance {
            let status = Status::Converged;
            return Ok(Solution::new(status, last, Multipliers::default(), history, method));
        }

        let Some((alpha, next)) = arc_search(problem, bounds, &current, config)? else {
            warn!(iter, objective = current.value, "projected search found no decrease");
            let status = Status::LineSearchFailed;
            return Ok(Solution::new(status, last, Multipliers::default(), history, method));
        };
        current = next;

        last = OuterRecord {
            iter,
            x: current.x,
            objective: current.value,
            measure: Measure::ProjectedGradient(residual(bounds, &current)),
            parameter: alpha,
            inner_iters: 0,
            inner_status: None,
        };

        let stop = report(&mut history, last, method, &mut observer);
        if let Some(status) = outcome(last.measure.value() < config.tolerance, stop) {
            return Ok(Solution::new(status, last, Multipliers::default(), history, method));
        }
    }

    Ok(Solution::new(Status::MaxIters, last, Multipliers::default(), history, method))
}

/// Minimizes over `bounds` without observer support.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective or its gradient
/// is not finite at the projected start, or if the objective fails.
pub fn minimize_unobserved<P, const N: usize>(
    problem: &P,
    bounds: &Bounds<N>,
    x0: Vector<N>,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
{
    minimize(problem, bounds, x0, config, ())
}

/// Returns `‖x − P(x − g)‖`.
fn residual<const N: usize>(bounds: &Bounds<N>, current: &Evaluation<N>) -> f64 {
    let stepped = bounds.project(&linalg::sub(&current.x, &current.gradient));
    linalg::norm(&linalg::sub(&current.x, &stepped))
}

/// Backtracks along the projection arc, returning the accepted step and point.
fn arc_search<P, const N: usize>(
    problem: &P,
    bounds: &Bounds<N>,
    current: &Evaluation<N>,
    config: &Config,
) -> Result<Option<(f64, Evaluation<N>)>, Error>
where
    P: Objective<N>,
{
    let mut alpha = config.initial_step;
    for _ in 0..config.max_backtracks {
        let x = bounds.project(&linalg::axpy(&current.x, -alpha, &current.gradient));
        let value = problem.value(&x).map_err(Error::objective)?;
        let decrease = linalg::dot(&current.gradient, &linalg::sub(&x, &current.x));

        if value.is_finite() && decrease < 0.0 && value <= current.value + config.c1 * decrease {
            let gradient = problem.gradient(&x).map_err(Error::objective)?;
            return Ok(Some((alpha, Evaluation { x, value, gradient })));
        }
        alpha *= config.shrink;
    }
    Ok(None)
}
