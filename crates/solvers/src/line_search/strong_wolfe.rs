//! Bisection line search enforcing the strong Wolfe conditions.
//!
//! # Algorithm
//!
//! The search keeps a bracket `[lo, hi]` known to contain acceptable steps,
//! starting from `[0, ∞)`:
//!
//! - If `α` fails sufficient decrease (or the objective is not finite),
//!   the step is too long: `hi ← α`.
//! - If the directional derivative at `α` is still negative and too steep,
//!   the step is too short: `lo ← α`.
//! - If the directional derivative is positive and too steep, the step
//!   overshot the minimizer along `d`: `hi ← α`.
//!
//! The next trial is the bracket midpoint, or `2α` while `hi` is unbounded.
//!
//! Sufficient decrease allows two ulps of `f(x)` as rounding slack. Near a
//! minimizer the predicted decrease can fall below the resolution of `f`, so
//! the curvature condition alone decides there.

use descent_core::{Objective, Vector, linalg};

use super::{ConfigError, Step, in_open_unit};

/// Ulps of `|f(x)|` tolerated in the sufficient-decrease test.
const ROUNDING_ULPS: f64 = 2.0;

/// Configuration for the strong-Wolfe line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Sufficient-decrease constant.
    pub c1: f64,

    /// Curvature constant in `|∇f(x+αd)ᵗd| ≤ c2·|gᵗd|`.
    pub c2: f64,

    /// Maximum number of trial steps.
    pub max_iters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            c2: 0.9,
            max_iters: 50,
        }
    }
}

impl Config {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < c1 < c2 < 1` and `max_iters > 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !in_open_unit(self.c1) {
            return Err(ConfigError::SufficientDecrease);
        }
        if !in_open_unit(self.c2) || self.c2 <= self.c1 {
            return Err(ConfigError::Curvature);
        }
        if self.max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(())
    }
}

/// Searches for a step satisfying the strong Wolfe conditions.
///
/// On exhaustion, returns the trial with the lowest finite objective value
/// (or the last trial if none was finite) with `satisfied = false`.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails.
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
    let slope0 = linalg::dot(g, d);
    let curvature_bound = config.c2 * slope0.abs();
    let slack = ROUNDING_ULPS * f64::EPSILON * fx.abs();

    let mut lo = 0.0;
    let mut hi = f64::INFINITY;
    let mut alpha = alpha0;
    let mut best: Option<Step<N>> = None;
    let mut last = Step {
        alpha,
        value: f64::NAN,
        gradient: None,
        satisfied: false,
        evaluations: 0,
    };

    for trial in 1..=config.max_iters {
        let point = linalg::axpy(x, alpha, d);
        let value = problem.value(&point)?;

        if !value.is_finite() || value > fx + config.c1 * alpha * slope0 + slack {
            last = Step {
                alpha,
                value,
                gradient: None,
                satisfied: false,
                evaluations: trial,
            };
            remember_best(&mut best, last);
            hi = alpha;
            alpha = 0.5 * (lo + hi);
            continue;
        }

        let gradient = problem.gradient(&point)?;
        let slope = linalg::dot(&gradient, d);
        last = Step {
            alpha,
            value,
            gradient: Some(gradient),
            satisfied: false,
            evaluations: trial,
        };

        if slope.abs() <= curvature_bound {
            return Ok(Step {
                satisfied: true,
                ..last
            });
        }
        remember_best(&mut best, last);

        if slope < 0.0 {
            lo = alpha;
            alpha = if hi.is_finite() {
                0.5 * (lo + hi)
            } else {
                2.0 * alpha
            };
        } else {
            hi = alpha;
            alpha = 0.5 * (lo + hi);
        }
    }

    let evaluations = last.evaluations;
    Ok(Step {
        evaluations,
        ..best.unwrap_or(last)
    })
}

/// Keeps the finite trial with the lowest objective value.
fn remember_best<const N: usize>(best: &mut Option<Step<N>>, step: Step<N>) {
    if !step.value.is_finite() {
        return;
    }
    if let Some(current) = best
        && current.value <= step.value
    {
        return;
    }
    *best = Some(step);
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use descent_core::WithGradient;

    fn parabola() -> impl Objective<1, Error = std::convert::Infallible> {
        WithGradient::new(|x: &[f64; 1]| x[0].powi(2), |x: &[f64; 1]| [2.0 * x[0]])
    }

    fn satisfies_wolfe(step: &Step<1>, fx: f64, slope0: f64, d: f64, config: &Config) -> bool {
        let gradient = step.gradient.expect("gradient at accepted step");
        let slope = gradient[0] * d;
        step.value <= fx + config.c1 * step.alpha * slope0 && slope.abs() <= config.c2 * slope0.abs()
    }

    #[test]
    fn bisects_overlong_step() {
        let config = Config::default();
        let step = search(&parabola(), &[1.0], 1.0, &[2.0], &[-2.0], 1.0, &config).unwrap();

        assert!(step.satisfied);
        assert_relative_eq!(step.alpha, 0.5);
        assert_eq!(step.evaluations, 2);
        assert!(satisfies_wolfe(&step, 1.0, -4.0, -2.0, &config));
    }

    #[test]
    fn expands_short_step() {
        let config = Config::default();
        let d = -0.01;
        let step = search(&parabola(), &[1.0], 1.0, &[2.0], &[d], 1.0, &config).unwrap();

        assert!(step.satisfied);
        assert!(step.alpha > 1.0);
        assert!(satisfies_wolfe(&step, 1.0, 2.0 * d, d, &config));
    }

    #[test]
    fn handles_non_finite_region() {
        let guarded = WithGradient::new(
            |x: &[f64; 1]| {
                if x[0] > 2.0 {
                    f64::INFINITY
                } else {
                    (x[0] - 1.0).powi(2)
                }
            },
            |x: &[f64; 1]| [2.0 * (x[0] - 1.0)],
        );

        let step = search(&guarded, &[0.0], 1.0, &[-2.0], &[2.0], 4.0, &Config::default()).unwrap();

        assert!(step.satisfied);
        assert_relative_eq!(step.alpha, 0.5);
    }

    #[test]
    fn accepts_step_lost_in_rounding() {
        // The true decrease is far below one ulp of f, and the trial rounds up.
        let flat = WithGradient::new(
            |x: &[f64; 1]| if x[0] >= 1.0 { 1.0 } else { 1.0 + f64::EPSILON },
            |x: &[f64; 1]| [2e-17 * x[0]],
        );

        let step = search(&flat, &[1.0], 1.0, &[2e-17], &[-1.0], 1.0, &Config::default()).unwrap();

        assert!(step.satisfied);
        assert_relative_eq!(step.alpha, 1.0);
        assert_eq!(step.evaluations, 1);
    }

    #[test]
    fn exhaustion_reports_best_trial() {
        let config = Config {
            max_iters: 3,
            ..Config::default()
        };

        // Ascent direction: every trial fails sufficient decrease.
        let step = search(&parabola(), &[1.0], 1.0, &[2.0], &[1.0], 1.0, &config).unwrap();

        assert!(!step.satisfied);
        assert!(!step.decreases(1.0));
        assert_eq!(step.evaluations, 3);
        // Trials were 1.0, 0.5, 0.25; the smallest has the lowest value.
        assert_relative_eq!(step.alpha, 0.25);
    }

    #[test]
    fn rejects_inverted_constants() {
        let config = Config {
            c1: 0.5,
            c2: 0.1,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Curvature));
    }
}
