//! Augmented Lagrangian method.
//!
//! Minimizes
//!
//! ```text
//! f + Σ[λ_i·h_i + ½ρ·h_i²] + (1/2ρ)·Σ[max(0, μ_j + ρ·g_j)² − μ_j²]
//! ```
//!
//! then updates the multiplier estimates `λ ← λ + ρh` and
//! `μ ← max(0, μ + ρg)` and grows `ρ` geometrically up to `max_rho`. Because
//! the multipliers absorb most of the constraint force, feasibility is reached
//! at a far smaller `ρ` than the quadratic penalty needs.

use descent_core::{ConstraintSet, Objective, Observer, Vector};

use crate::{History, Method, unconstrained};

use super::{
    Action, ConfigError, Error, Event, Measure, Multipliers, OuterRecord, Solution, Status,
    config::{check_outer_iters, check_schedule, check_tolerance, default_inner},
    outcome, report, start,
    surrogate::AugmentedLagrangian,
};

/// Configuration for the augmented Lagrangian method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub inner: unconstrained::Config,
    pub initial_rho: f64,
    pub growth: f64,
    pub max_rho: f64,

    /// Converged once the largest violation drops below this value.
    pub tolerance: f64,

    pub max_outer_iters: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner: default_inner(),
            initial_rho: 1.0,
            growth: 10.0,
            max_rho: 1e8,
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
        check_schedule(self.initial_rho, self.growth, Some(self.max_rho))?;
        check_tolerance(self.tolerance)?;
        check_outer_iters(self.max_outer_iters)?;
        self.inner.validate()?;
        Ok(())
    }
}

/// Minimizes the objective subject to `constraints` with an augmented Lagrangian.
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
    let method = Method::AugmentedLagrangian;
    let mut rho = config.initial_rho;
    let violation = Measure::Violation(constraints.max_violation(&x0));
    let mut last = start(problem, x0, violation, rho)?;
    let mut history = History::new(config.history_limit);
    let mut multipliers = Multipliers {
        equality: vec![0.0; constraints.equalities().len()],
        inequality: vec![0.0; constraints.inequalities().len()],
    };

    for iter in 1..=config.max_outer_iters {
        let surrogate = AugmentedLagrangian {
            problem,
            constraints,
            rho,
            lambda: &multipliers.equality,
            mu: &multipliers.inequality,
        };
        let inner = unconstrained::minimize_unobserved(&surrogate, last.x, &config.inner)
            .map_err(Error::Inner)?;
        let x = inner.x;

        for (lambda, h) in multipliers.equality.iter_mut().zip(constraints.equalities()) {
            *lambda += rho * h.value(&x);
        }
        for (mu, g) in multipliers.inequality.iter_mut().zip(constraints.inequalities()) {
            *mu = (*mu + rho * g.value(&x)).max(0.0);
        }

        let violation = constraints.max_violation(&x);
        last = OuterRecord {
            iter,
            x,
            objective: problem.value(&x).map_err(Error::objective)?,
            measure: Measure::Violation(violation),
            parameter: rho,
            inner_iters: inner.iters,
            inner_status: Some(inner.status),
        };

        let stop = report(&mut history, last, method, &mut observer);
        if let Some(status) = outcome(violation < config.tolerance, stop) {
            return Ok(Solution::new(status, last, multipliers, history, method));
        }

        rho = (rho * config.growth).min(config.max_rho);
    }

    Ok(Solution::new(Status::MaxIters, last, multipliers, history, method))
}

/// Minimizes with an augmented Lagrangian without observer support.
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
