//! Constrained minimization by reduction to unconstrained subproblems.
//!
//! # Methods
//!
//! - [`penalty`] — quadratic penalty with a growing weight
//! - [`barrier`] — logarithmic barrier for strictly feasible inequality
//!   problems
//! - [`augmented_lagrangian`] — multiplier updates plus a bounded penalty
//! - [`projected_gradient`] — gradient steps projected onto box [`Bounds`]
//!
//! The first three minimize a surrogate objective with
//! [`unconstrained::minimize`](crate::unconstrained::minimize) in each outer
//! iteration, warm started from the previous outer iterate. The inner solver
//! is configured through each method's `inner` field and defaults to L-BFGS.
//! An inner solve that stops short of its tolerance is recorded in the
//! history but does not end the outer loop.
//!
//! Surrogate gradients are composed from the objective gradient and each
//! constraint's gradient, which falls back to central differences when no
//! analytic gradient was supplied.
//!
//! # Observer Events
//!
//! Every method emits one [`Event`] per outer iteration. Observers can return
//! [`Action::StopEarly`] to halt and receive that iteration's iterate.
//!
//! [`Bounds`]: descent_core::Bounds

mod action;
mod config;
mod error;
mod event;
mod solution;
mod surrogate;

pub mod augmented_lagrangian;
pub mod barrier;
pub mod penalty;
pub mod projected_gradient;


pub use action::Action;
pub use config::ConfigError;
pub use error::{ConstraintKind, Error};
pub use event::Event;
pub use solution::{Measure, Multipliers, OuterRecord, Solution, Status};

use tracing::debug;

use descent_core::{Objective, Observer, Vector};

use crate::{History, Method};

/// Builds the iteration-0 record, checking that the start is usable.
fn start<P, const N: usize>(
    problem: &P,
    x0: Vector<N>,
    measure: Measure,
    parameter: f64,
) -> Result<OuterRecord<N>, Error>
where
    P: Objective<N>,
{
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteStart);
    }
    let objective = problem.value(&x0).map_err(Error::objective)?;
    if !objective.is_finite() {
        return Err(Error::NonFiniteStart);
    }
    Ok(OuterRecord {
        iter: 0,
        x: x0,
        objective,
        measure,
        parameter,
        inner_iters: 0,
        inner_status: None,
    })
}

/// Appends a record and returns true if the observer asked to stop.
fn report<Obs, const N: usize>(
    history: &mut History<OuterRecord<N>>,
    record: OuterRecord<N>,
    method: Method,
    observer: &mut Obs,
) -> bool
where
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    history.push(record);
    debug!(
        %method,
        iter = record.iter,
        objective = record.objective,
        measure = record.measure.value(),
        parameter = record.parameter,
        inner_iters = record.inner_iters,
        "outer iteration"
    );
    matches!(
        observer.observe(&Event { record: &record }),
        Some(Action::StopEarly)
    )
}

/// Convergence takes precedence over an observer stop.
fn outcome(converged: bool, stop: bool) -> Option<Status> {
    if converged {
        Some(Status::Converged)
    } else if stop {
        Some(Status::StoppedByObserver)
    } else {
        None
    }
}
