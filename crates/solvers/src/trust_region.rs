//! Trust-region minimization.
//!
//! # Algorithm
//!
//! The solver keeps an iterate `x` and a radius `Δ`. Each iteration builds the
//! quadratic model `m(p) = f + gᵗp + ½pᵗHp`, asks the configured
//! [`Subproblem`] solver for an approximate minimizer with `‖p‖ ≤ Δ`, and
//! compares the actual reduction `f(x) − f(x+p)` with the predicted reduction
//! `m(0) − m(p)`:
//!
//! - `ρ < 0.25` shrinks the radius to `Δ/4`
//! - `ρ > 0.75` with a step on the boundary doubles it, up to `max_radius`
//! - the step is accepted iff `ρ > eta`, regardless of the radius change
//!
//! A non-positive predicted reduction counts as `ρ = 0`, and a non-finite
//! trial objective as `ρ = −∞`.
//!
//! # Model Hessian
//!
//! If the objective provides an analytic Hessian it is always used. Otherwise
//! the configured [`HessianApprox`] applies.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, accepted or not, starting
//! with iteration 0 for the initial point. Observers can return
//! [`Action::StopEarly`] to halt and receive the current iterate.

mod action;
mod config;
mod error;
mod event;
mod hessian;
mod search;
mod solution;
pub mod subproblem;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use hessian::HessianApprox;
pub use solution::{Record, Solution, Status};
pub use subproblem::{Subproblem, TrialStep, predicted_reduction};

use descent_core::{Objective, Observer, Vector};

/// Minimizes the objective from `x0` with a trust-region method.
///
/// The observer receives an [`Event`] for each iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, if the objective, gradient, or
/// model Hessian is not finite at `x0`, or if the objective itself fails.
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
/// Returns an error if the config is invalid, if the objective, gradient, or
/// model Hessian is not finite at `x0`, or if the objective itself fails.
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
