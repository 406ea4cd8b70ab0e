use approx::assert_abs_diff_eq;
use thiserror::Error;

use descent_core::{Objective, Vector, WithGradient};

use crate::line_search::{LineSearch, backtracking};

use super::{Action, Config, ConfigError, Error, Event, Method, Status, minimize, minimize_unobserved};

/// f(x) = ½xᵗAx with A = [[3, 1], [1, 2]].
fn quadratic() -> impl Objective<2, Error = std::convert::Infallible> {
    WithGradient::new(
        |x: &[f64; 2]| 0.5 * (3.0 * x[0] * x[0] + 2.0 * x[0] * x[1] + 2.0 * x[1] * x[1]),
        |x: &[f64; 2]| [3.0 * x[0] + x[1], x[0] + 2.0 * x[1]],
    )
}

fn rosenbrock() -> impl Objective<2, Error = std::convert::Infallible> {
    WithGradient::new(
        |x: &[f64; 2]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
        |x: &[f64; 2]| {
            [
                -2.0 * (1.0 - x[0]) - 400.0 * x[0] * (x[1] - x[0] * x[0]),
                200.0 * (x[1] - x[0] * x[0]),
            ]
        },
    )
}

#[test]
fn every_method_minimizes_quadratic() {
    for method in [Method::Lbfgs { memory: 5 }, Method::Sr1, Method::Dfp] {
        let config = Config {
            method,
            ..Config::default()
        };

        let solution = minimize_unobserved(&quadratic(), [2.0, -3.0], &config).unwrap();

        assert_eq!(solution.status, Status::Converged, "{}", method.tag());
        assert!(solution.converged());
        assert!(solution.gradient_norm < config.gradient_tol);
        assert_abs_diff_eq!(solution.x[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.x[1], 0.0, epsilon = 1e-6);
        assert_eq!(solution.method, method.tag());
    }
}

#[test]
fn lbfgs_minimizes_rosenbrock() {
    let solution = minimize_unobserved(&rosenbrock(), [-1.2, 1.0], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.iters < 500);
    assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(solution.x[1], 1.0, epsilon = 1e-5);
}

#[test]
fn backtracking_with_numerical_gradient() {
    let config = Config {
        line_search: LineSearch::Backtracking(backtracking::Config::default()),
        gradient_tol: 1e-5,
        ..Config::default()
    };
    let bowl = |x: &[f64; 3]| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 2.0).powi(2) + 0.5 * x[2].powi(2);

    let solution = minimize_unobserved(&bowl, [0.0, 0.0, 4.0], &config).unwrap();

    assert!(solution.converged());
    assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-4);
    assert_abs_diff_eq!(solution.x[1], -2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(solution.x[2], 0.0, epsilon = 1e-4);
}

#[test]
fn history_records_every_iteration() {
    let solution = minimize_unobserved(&quadratic(), [1.0, 1.0], &Config::default()).unwrap();

    assert_eq!(solution.history.len(), solution.iters + 1);
    assert_eq!(solution.history[0].iter, 0);
    assert_eq!(solution.history[0].step_length, 0.0);
    assert!(
        solution
            .history
            .windows(2)
            .all(|pair| pair[1].objective < pair[0].objective)
    );
}

#[test]
fn history_limit_keeps_most_recent() {
    let config = Config {
        history_limit: Some(2),
        ..Config::default()
    };

    let solution = minimize_unobserved(&rosenbrock(), [-1.2, 1.0], &config).unwrap();

    assert_eq!(solution.history.len(), 2);
    assert_eq!(solution.dropped_records, solution.iters - 1);
    assert_eq!(solution.history[1].iter, solution.iters);
}

#[test]
fn observer_can_stop_early() {
    let mut seen = Vec::new();
    let observer = |event: &Event<'_, 2>| {
        seen.push(event.record.iter);
        (event.record.iter == 2).then_some(Action::StopEarly)
    };

    let solution = minimize(&rosenbrock(), [-1.2, 1.0], &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 2);
    assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn reports_max_iters() {
    let config = Config {
        max_iters: 3,
        ..Config::default()
    };

    let solution = minimize_unobserved(&rosenbrock(), [-1.2, 1.0], &config).unwrap();

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 3);
    assert!(solution.objective < 24.2);
}

#[test]
fn wrong_gradient_fails_line_search() {
    // The supplied gradient has the wrong sign, so every "descent" step climbs.
    let lying = WithGradient::new(|x: &[f64; 1]| x[0] * x[0], |x: &[f64; 1]| [-2.0 * x[0]]);

    let solution = minimize_unobserved(&lying, [1.0], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::LineSearchFailed);
    assert_eq!(solution.iters, 0);
    assert_eq!(solution.x, [1.0]);
    assert_eq!(solution.reason(), "line search found no decrease");
}

#[test]
fn rejects_non_finite_start() {
    let log = |x: &[f64; 1]| x[0].ln();

    assert!(matches!(
        minimize_unobserved(&log, [-1.0], &Config::default()),
        Err(Error::NonFiniteStart)
    ));
    assert!(matches!(
        minimize_unobserved(&log, [f64::NAN], &Config::default()),
        Err(Error::NonFiniteStart)
    ));
}

#[test]
fn rejects_invalid_config() {
    let config = Config {
        method: Method::Lbfgs { memory: 0 },
        ..Config::default()
    };

    assert!(matches!(
        minimize_unobserved(&quadratic(), [1.0, 1.0], &config),
        Err(Error::InvalidConfig(ConfigError::Memory))
    ));
}

#[derive(Debug, Error)]
#[error("evaluation budget exhausted")]
struct Exhausted;

/// A bowl that refuses to evaluate outside `|x| ≤ 10`.
struct Fenced;

impl Objective<1> for Fenced {
    type Error = Exhausted;

    fn value(&self, x: &Vector<1>) -> Result<f64, Self::Error> {
        if x[0].abs() > 10.0 {
            return Err(Exhausted);
        }
        Ok((x[0] - 3.0).powi(2))
    }

    fn gradient(&self, x: &Vector<1>) -> Result<Vector<1>, Self::Error> {
        Ok([2.0 * (x[0] - 3.0)])
    }
}

#[test]
fn objective_errors_propagate() {
    assert!(minimize_unobserved(&Fenced, [0.0], &Config::default()).unwrap().converged());

    let error = minimize_unobserved(&Fenced, [20.0], &Config::default()).unwrap_err();
    assert!(matches!(error, Error::Objective(_)));
    assert_eq!(error.to_string(), "objective error: evaluation budget exhausted");
}
