//! Line-search descent driven by a quasi-Newton curvature model.
//!
//! # Algorithm
//!
//! Each iteration asks the configured curvature model for a direction `d`,
//! replacing it with steepest descent `−g` whenever `gᵗd ≥ 0`, then picks a
//! step length with the configured line search. The initial trial step is
//! `min(1, 1/‖g‖)` until the model absorbs its first correction pair, and `1`
//! afterwards. The new point's correction pair `(s, y)` is then offered to the
//! model, which may skip it for numerical safety.
//!
//! Iteration stops when `‖g‖ < gradient_tol`, when the line search cannot
//! produce any decrease, or when `max_iters` is reached.
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
pub use config::{Config, ConfigError, Method};
pub use error::Error;
pub use event::Event;
pub use solution::{Record, Solution, Status};

use descent_core::{Objective, Observer, Vector};

/// Minimizes the objective from `x0`.
///
/// The observer receives an [`Event`] for each iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective or its gradient
/// is not finite at `x0`, or if the objective itself fails.
pub fn minimize<P, Obs, const N: usize>(
    problem: &P,
    x0: Vector<N>,
    config: &Config,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    search::search(problem, x0, config, observer)
}

/// Minimizes the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective or its gradient
/// is not finite at `x0`, or if the objective itself fails.
pub fn minimize_unobserved<P, const N: usize>(
    problem: &P,
    x0: Vector<N>,
    config: &Config,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
{
    minimize(problem, x0, config, ())
}
