use tracing::{debug, warn};

use descent_core::{Objective, Observer, Vector, linalg};

use crate::{
    Evaluation, History,
    curvature::{CurvatureModel, Update},
    evaluate,
};

use super::{Action, Config, Error, Event, Record, Solution, Status};

/// Core line-search descent loop.
pub(super) fn search<P, Obs, const N: usize>(
    problem: &P,
    x0: Vector<N>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: Objective<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    config.validate()?;
    if x0.iter().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteStart);
    }

    let mut current = evaluate(problem, x0).map_err(Error::objective)?;
    if !current.is_finite() {
        return Err(Error::NonFiniteStart);
    }

    let mut model = config.method.model::<N>();
    let mut history = History::new(config.history_limit);
    let mut scaled = false;

    let start = Record {
        iter: 0,
        x: current.x,
        objective: current.value,
        gradient_norm: current.gradient_norm(),
        step_length: 0.0,
        stale: false,
    };
    history.push(start);
    if let Some(Action::StopEarly) = observer.observe(&Event {
        record: &start,
        gradient: &current.gradient,
    }) {
        return Ok(finish(current, Status::StoppedByObserver, 0, history, config));
    }

    for iter in 1..=config.max_iters {
        if current.gradient_norm() < config.gradient_tol {
            return Ok(finish(current, Status::Converged, iter - 1, history, config));
        }

        let Evaluation { x, value: fx, gradient: g } = current;

        let mut d = model.direction(&g);
        let slope = linalg::dot(&g, &d);
        if slope.is_nan() || slope >= 0.0 {
            debug!(iter, "curvature direction is not a descent direction, using -g");
            d = linalg::scale(&g, -1.0);
        }

        let alpha0 = if scaled {
            1.0
        } else {
            (1.0 / linalg::norm(&g)).min(1.0)
        };
        let step = config
            .line_search
            .search(problem, &x, fx, &g, &d, alpha0)
            .map_err(Error::objective)?;

        if !step.satisfied && !step.decreases(fx) {
            warn!(iter, alpha = step.alpha, objective = fx, "line search found no decrease");
            return Ok(finish(current, Status::LineSearchFailed, iter - 1, history, config));
        }

        let x_next = linalg::axpy(&x, step.alpha, &d);
        let g_next = match step.gradient {
            Some(gradient) => gradient,
            None => problem.gradient(&x_next).map_err(Error::objective)?,
        };

        let s = linalg::sub(&x_next, &x);
        let y = linalg::sub(&g_next, &g);
        let update = model.update(&s, &y);
        match update {
            Update::Applied => scaled = true,
            Update::Skipped => debug!(iter, "curvature update skipped"),
        }

        current = Evaluation {
            x: x_next,
            value: step.value,
            gradient: g_next,
        };

        let record = Record {
            iter,
            x: current.x,
            objective: current.value,
            gradient_norm: current.gradient_norm(),
            step_length: step.alpha,
            stale: update == Update::Skipped,
        };
        history.push(record);
        debug!(
            iter,
            objective = record.objective,
            gradient_norm = record.gradient_norm,
            alpha = record.step_length,
            evaluations = step.evaluations,
            "unconstrained iteration"
        );

        if let Some(Action::StopEarly) = observer.observe(&Event {
            record: &record,
            gradient: &current.gradient,
        }) {
            return Ok(finish(current, Status::StoppedByObserver, iter, history, config));
        }
    }

    let status = if current.gradient_norm() < config.gradient_tol {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(finish(current, status, config.max_iters, history, config))
}

fn finish<const N: usize>(
    current: Evaluation<N>,
    status: Status,
    iters: usize,
    history: History<Record<N>>,
    config: &Config,
) -> Solution<N> {
    let dropped_records = history.dropped();
    Solution {
        status,
        x: current.x,
        objective: current.value,
        gradient: current.gradient,
        gradient_norm: current.gradient_norm(),
        iters,
        history: history.into_vec(),
        dropped_records,
        method: config.method.tag(),
    }
}
