//! Logarithmic barrier method for inequality constraints.
//!
//! Minimizes `t·f − Σlog(−g_i)` for a growing sequence of `t`, starting from a
//! strictly feasible point. Every iterate stays strictly inside the feasible
//! region, and the suboptimality after each inner solve is bounded by the
//! duality gap `m/t`, where `m` is the number of inequality constraints.
//!
//! The surrogate gradient grows with `t`, so each inner solve stops at
//! `inner.gradient_tol · max(t, 1)` rather than the absolute tolerance.

use descent_core::{ConstraintSet, Objective, Observer, Vector};

use crate::{History, Method, unconstrained};

use super::{
    Action, ConfigError, ConstraintKind, Error, Event, Measure, Multipliers, OuterRecord,
    Solution, Status,
    config::{check_outer_iters, check_schedule, check_tolerance, default_inner},
    outcome, report, start,
    surrogate::Barrier,
};

/// Configuration for the log barrier method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Inner solver settings. Its `gradient_tol` is scaled by `max(t, 1)`.
    pub inner: unconstrained::Config,
    pub initial_t: f64,
    pub growth: f64,

    /// Converged once the duality gap `m/t` drops below this value.
    pub tolerance: f64,

    pub max_outer_iters: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner: default_inner(),
            initial_t: 1.0,
            growth: 10.0,
            tolerance: 1e-6,
            max_outer_iters: 50,
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
        check_schedule(self.initial_t, self.growth, None)?;
        check_tolerance(self.tolerance)?;
        check_outer_iters(self.max_outer_iters)?;
        self.inner.validate()?;
        Ok(())
    }
}

/// Minimizes the objective subject to inequality `constraints` with a log barrier.
///
/// The observer receives an [`Event`] after each outer iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if `constraints` contains an
/// equality, if `x0` is not strictly feasible, if the objective is not finite
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
    let method = Method::LogBarrier;
    if !constraints.equalities().is_empty() {
        return Err(Error::UnsupportedConstraint {
            method,
            kind: ConstraintKind::Equality,
        });
    }
    if let Some((index, value)) = constraints.first_not_strictly_feasible(&x0) {
        return Err(Error::InfeasibleStart { index, value });
    }

    #[allow(clippy::cast_precision_loss)]
    let m = constraints.inequalities().len() as f64;
    let mut t = config.initial_t;
    let mut last = start(problem, x0, Measure::DualityGap(m / t), t)?;
    let mut history = History::new(config.history_limit);

    for iter in 1..=config.max_outer_iters {
        let surrogate = Barrier {
            problem,
            constraints,
            t,
        };
        let inner_config = unconstrained::Config {
            gradient_tol: config.inner.gradient_tol * t.max(1.0),
            ..config.inner
        };
        let inner = unconstrained::minimize_unobserved(&surrogate, last.x, &inner_config)
            .map_err(Error::Inner)?;

        let gap = m / t;
        last = OuterRecord {
            iter,
            x: inner.x,
            objective: problem.value(&inner.x).map_err(Error::objective)?,
            measure: Measure::DualityGap(gap),
            parameter: t,
            inner_iters: inner.iters,
            inner_status: Some(inner.status),
        };

        let stop = report(&mut history, last, method, &mut observer);
        if let Some(status) = outcome(gap < config.tolerance, stop) {
            let multipliers = estimate(constraints, &last.x, t);
            return Ok(Solution::new(status, last, multipliers, history, method));
        }

        t *= config.growth;
    }

    let multipliers = estimate(constraints, &last.x, last.parameter);
    Ok(Solution::new(Status::MaxIters, last, multipliers, history, method))
}

/// Minimizes with a log barrier without observer support.
///
/// # Errors
///
/// Returns an error if the config is invalid, if `constraints` contains an
/// equality, if `x0` is not strictly feasible, if the objective is not finite
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

/// Central-path multiplier estimates `μ_i = 1 / (−t·g_i)`.
fn estimate<const N: usize>(
    constraints: &ConstraintSet<'_, N>,
    x: &Vector<N>,
    t: f64,
) -> Multipliers {
    Multipliers {
        equality: Vec::new(),
        inequality: constraints
            .inequalities()
            .iter()
            .map(|g| -1.0 / (t * g.value(x)))
            .collect(),
    }
}
