use tracing::{debug, warn};

use descent_core::{EquationSystem, Matrix, Observer, Vector, differentiate, linalg};

use crate::{
    History, Method,
    curvature::{Broyden, Update},
};

use super::{Action, Config, Error, Event, Record, Solution, Status};

/// A point together with its residuals.
#[derive(Debug, Clone, Copy)]
struct Iterate<const N: usize> {
    x: Vector<N>,
    residuals: Vector<N>,
    norm: f64,
}

impl<const N: usize> Iterate<N> {
    fn new(x: Vector<N>, residuals: Vector<N>) -> Self {
        Self {
            x,
            residuals,
            norm: linalg::norm(&residuals),
        }
    }
}

/// Core Broyden loop.
pub(super) fn search<S, Obs, const N: usize>(
    system: &S,
    x0: Vector<N>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    S: EquationSystem<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    config.validate()?;
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteStart);
    }

    let mut current = Iterate::new(x0, system.residuals(&x0).map_err(Error::system)?);
    if !current.norm.is_finite() {
        return Err(Error::NonFiniteStart);
    }

    let mut model = Broyden::new(difference_jacobian(system, &x0)?);
    let mut fresh = true;
    let mut history = History::new(config.history_limit);

    let start = Record {
        iter: 0,
        x: current.x,
        residual_norm: current.norm,
        step_length: 0.0,
        refreshed: true,
    };
    history.push(start);
    if let Some(Action::StopEarly) = observer.observe(&Event {
        record: &start,
        residuals: &current.residuals,
    }) {
        return Ok(finish(current, Status::StoppedByObserver, 0, history));
    }

    for iter in 1..=config.max_iters {
        if current.norm < config.residual_tol {
            return Ok(finish(current, Status::Converged, iter - 1, history));
        }

        let mut refreshed = false;
        let trial = match attempt(system, &model, &current, config)? {
            Some(trial) => Some(trial),
            None if !fresh => {
                debug!(iter, residual_norm = current.norm, "recomputing stale Jacobian");
                model = Broyden::new(difference_jacobian(system, &current.x)?);
                refreshed = true;
                attempt(system, &model, &current, config)?
            }
            None => None,
        };
        let Some((alpha, next)) = trial else {
            warn!(iter, residual_norm = current.norm, "no step reduced the residual norm");
            return Ok(finish(current, Status::LineSearchFailed, iter - 1, history));
        };

        let s = linalg::sub(&next.x, &current.x);
        let y = linalg::sub(&next.residuals, &current.residuals);
        if model.update(&s, &y) == Update::Skipped {
            debug!(iter, "Broyden update skipped");
        }
        fresh = false;
        current = next;

        let record = Record {
            iter,
            x: current.x,
            residual_norm: current.norm,
            step_length: alpha,
            refreshed,
        };
        history.push(record);
        debug!(
            iter,
            residual_norm = record.residual_norm,
            alpha = record.step_length,
            refreshed,
            "broyden iteration"
        );

        if let Some(Action::StopEarly) = observer.observe(&Event {
            record: &record,
            residuals: &current.residuals,
        }) {
            return Ok(finish(current, Status::StoppedByObserver, iter, history));
        }
    }

    let status = if current.norm < config.residual_tol {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(finish(current, status, config.max_iters, history))
}

fn difference_jacobian<S, const N: usize>(system: &S, x: &Vector<N>) -> Result<Matrix<N>, Error>
where
    S: EquationSystem<N>,
{
    differentiate::jacobian(|p| system.residuals(p), x).map_err(Error::system)
}

/// Solves for the model step and backtracks along it.
///
/// Returns `None` if the Jacobian is singular or no trial step gives
/// sufficient decrease of `‖F‖`.
fn attempt<S, const N: usize>(
    system: &S,
    model: &Broyden<N>,
    current: &Iterate<N>,
    config: &Config,
) -> Result<Option<(f64, Iterate<N>)>, Error>
where
    S: EquationSystem<N>,
{
    let step = model.step(&current.residuals);
    if !step.is_regular() || step.x.iter().any(|v| !v.is_finite()) {
        debug!(regularized = step.regularized, "Broyden Jacobian is singular");
        return Ok(None);
    }

    let mut alpha = 1.0;
    for _ in 0..config.max_backtracks {
        let x = linalg::axpy(&current.x, alpha, &step.x);
        let trial = Iterate::new(x, system.residuals(&x).map_err(Error::system)?);
        if trial.norm.is_finite()
            && trial.norm <= (1.0 - config.sufficient_decrease * alpha) * current.norm
        {
            return Ok(Some((alpha, trial)));
        }
        alpha *= config.shrink;
    }
    Ok(None)
}

fn finish<const N: usize>(
    current: Iterate<N>,
    status: Status,
    iters: usize,
    history: History<Record<N>>,
) -> Solution<N> {
    let dropped_records = history.dropped();
    Solution {
        status,
        x: current.x,
        residuals: current.residuals,
        residual_norm: current.norm,
        iters,
        history: history.into_vec(),
        dropped_records,
        method: Method::Broyden,
    }
}
