//! Broyden's method for square nonlinear systems.
//!
//! # Algorithm
//!
//! The Jacobian is initialised by central differences at `x0`. Each
//! iteration solves `J·d = −F` and backtracks along `d` until
//! `‖F(x + αd)‖ ≤ (1 − c·α)·‖F(x)‖`. The accepted step then refreshes `J` with
//! Broyden's rank-one secant update, so no further residual derivatives are
//! needed.
//!
//! When a step fails with a Jacobian built from secant updates, the Jacobian
//! is recomputed once by finite differences at the current point and the step
//! is retried. A failure with a freshly differenced Jacobian ends the solve
//! with [`Status::LineSearchFailed`].
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, starting with iteration 0 for
//! the initial point. Observers can return [`Action::StopEarly`] to halt and
//! receive the current iterate.

mod action;
mod config;
mod error;
mod event;
mod search;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Record, Solution, Status};

use descent_core::{EquationSystem, Observer, Vector};

/// Solves `F(x) = 0` from `x0` with Broyden's method.
///
/// The observer receives an [`Event`] for each iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the residuals are not finite
/// at `x0`, or if the system itself fails.
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    x0: Vector<N>,
    config: &Config,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    S: EquationSystem<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    search::search(system, x0, config, observer)
}

/// Solves `F(x) = 0` without observer support.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the residuals are not finite
/// at `x0`, or if the system itself fails.
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    x0: Vector<N>,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    S: EquationSystem<N>,
{
    solve(system, x0, config, ())
}
