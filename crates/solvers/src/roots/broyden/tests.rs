use approx::assert_abs_diff_eq;

use descent_core::{EquationSystem, Vector};

use crate::Method;

use super::{Action, Config, ConfigError, Error, Event, Status, solve, solve_unobserved};

/// The circle `x² + y² = 4` intersected with the line `x = y`.
fn circle_and_line(x: &[f64; 2]) -> [f64; 2] {
    [x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]]
}

#[test]
fn solves_circle_and_line() {
    let solution = solve_unobserved(&circle_and_line, [1.0, 0.5], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.method, Method::Broyden);
    assert!(solution.residual_norm < 1e-10);
    assert_abs_diff_eq!(solution.x[0], 2.0_f64.sqrt(), epsilon = 1e-9);
    assert_abs_diff_eq!(solution.x[1], 2.0_f64.sqrt(), epsilon = 1e-9);
    assert_eq!(solution.history.len(), solution.iters + 1);
    assert!(solution.history[0].refreshed);
}

#[test]
fn linear_system_needs_few_iterations() {
    // 3x + y = 9, x + 2y = 8.
    let linear = |x: &[f64; 2]| [3.0 * x[0] + x[1] - 9.0, x[0] + 2.0 * x[1] - 8.0];

    let solution = solve_unobserved(&linear, [0.0, 0.0], &Config::default()).unwrap();

    assert!(solution.converged());
    assert!(solution.iters <= 3);
    assert_abs_diff_eq!(solution.x[0], 2.0, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.x[1], 3.0, epsilon = 1e-10);
    assert_eq!(solution.history[1].step_length, 1.0);
}

#[test]
fn residual_norm_decreases_every_iteration() {
    let solution = solve_unobserved(&circle_and_line, [3.0, -1.0], &Config::default()).unwrap();

    assert!(solution.converged());
    assert!(
        solution
            .history
            .windows(2)
            .all(|pair| pair[1].residual_norm < pair[0].residual_norm)
    );
}

#[test]
fn fails_when_no_root_exists() {
    // ‖F‖ bottoms out at 1 when x = 0.
    let lifted = |x: &[f64; 1]| [x[0] * x[0] + 1.0];

    let solution = solve_unobserved(&lifted, [1.0], &Config::default()).unwrap();

    assert_eq!(solution.status, Status::LineSearchFailed);
    assert_eq!(solution.iters, 1);
    assert_abs_diff_eq!(solution.x[0], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(solution.residual_norm, 1.0, epsilon = 1e-10);
}

#[test]
fn observer_can_stop_early() {
    let observer = |event: &Event<'_, 2>| (event.record.iter == 1).then_some(Action::StopEarly);

    let solution = solve(&circle_and_line, [1.0, 0.5], &Config::default(), observer).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 1);
    assert_eq!(solution.history.len(), 2);
}

#[test]
fn reports_max_iters() {
    let config = Config {
        max_iters: 1,
        ..Config::default()
    };

    let solution = solve_unobserved(&circle_and_line, [3.0, -1.0], &config).unwrap();

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 1);
    assert_eq!(solution.reason(), "iteration limit reached");
}

#[test]
fn rejects_bad_input() {
    let config = Config {
        shrink: 1.0,
        ..Config::default()
    };
    assert!(matches!(
        solve_unobserved(&circle_and_line, [1.0, 0.5], &config),
        Err(Error::InvalidConfig(ConfigError::Backtracking))
    ));

    let singular = |x: &[f64; 1]| [x[0].ln()];
    assert!(matches!(
        solve_unobserved(&singular, [-1.0], &Config::default()),
        Err(Error::NonFiniteStart)
    ));
}

#[derive(Debug, thiserror::Error)]
#[error("model diverged")]
struct Diverged;

/// `x − 3 = 0`, refusing to evaluate at negative `x`.
struct Guarded;

impl EquationSystem<1> for Guarded {
    type Error = Diverged;

    fn residuals(&self, x: &Vector<1>) -> Result<Vector<1>, Self::Error> {
        if x[0] < 0.0 {
            return Err(Diverged);
        }
        Ok([x[0] - 3.0])
    }
}

#[test]
fn system_errors_propagate() {
    assert!(solve_unobserved(&Guarded, [1.0], &Config::default()).unwrap().converged());

    let error = solve_unobserved(&Guarded, [-1.0], &Config::default()).unwrap_err();
    assert!(matches!(error, Error::System(_)));
    assert_eq!(error.to_string(), "system error: model diverged");
}
