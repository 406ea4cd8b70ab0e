use tracing::debug;

use descent_core::{Matrix, Objective, Observer, Vector, linalg};

use crate::{Evaluation, History, curvature::Update, evaluate};

use super::{
    Action, Config, Error, Event, Record, Solution, Status,
    hessian::HessianSource,
    subproblem::predicted_reduction,
};

/// Ratio below which the radius shrinks.
const SHRINK_BELOW: f64 = 0.25;

/// Ratio above which a boundary step grows the radius.
const GROW_ABOVE: f64 = 0.75;

/// Core trust-region loop.
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
    let mut source = HessianSource::new(config.hessian);
    let mut hessian = source.at(problem, &current.x).map_err(Error::objective)?;
    if !current.is_finite() || !is_finite_matrix(&hessian) {
        return Err(Error::NonFiniteStart);
    }

    let mut radius = config.initial_radius;
    let mut history = History::new(config.history_limit);

    let start = Record {
        iter: 0,
        x: current.x,
        objective: current.value,
        gradient_norm: current.gradient_norm(),
        radius,
        ratio: 0.0,
        step_norm: 0.0,
        accepted: false,
        stale: false,
    };
    history.push(start);
    if let Some(Action::StopEarly) = observer.observe(&Event {
        record: &start,
        gradient: &current.gradient,
        actual_reduction: 0.0,
        predicted_reduction: 0.0,
    }) {
        return Ok(finish(current, radius, Status::StoppedByObserver, 0, history, config));
    }

    for iter in 1..=config.max_iters {
        if current.gradient_norm() < config.gradient_tol {
            return Ok(finish(current, radius, Status::Converged, iter - 1, history, config));
        }
        if radius < config.min_radius {
            return Ok(finish(current, radius, Status::RadiusCollapsed, iter - 1, history, config));
        }

        let step = config.subproblem.solve(&current.gradient, &hessian, radius);
        let predicted = predicted_reduction(&current.gradient, &hessian, &step.p);
        let x_trial = linalg::add(&current.x, &step.p);
        let f_trial = problem.value(&x_trial).map_err(Error::objective)?;
        let actual = current.value - f_trial;

        let ratio = if !f_trial.is_finite() {
            f64::NEG_INFINITY
        } else if predicted <= 0.0 {
            0.0
        } else {
            actual / predicted
        };

        if ratio < SHRINK_BELOW {
            radius *= SHRINK_BELOW;
        } else if ratio > GROW_ABOVE && step.on_boundary {
            radius = (2.0 * radius).min(config.max_radius);
        }

        let accepted = ratio > config.eta;
        let mut stale = false;
        if accepted {
            let g_trial = problem.gradient(&x_trial).map_err(Error::objective)?;
            if source.record_step(&step.p, &linalg::sub(&g_trial, &current.gradient))
                == Update::Skipped
            {
                debug!(iter, "SR1 model update skipped");
                stale = true;
            }
            current = Evaluation {
                x: x_trial,
                value: f_trial,
                gradient: g_trial,
            };
            hessian = source.at(problem, &current.x).map_err(Error::objective)?;
        }

        let record = Record {
            iter,
            x: current.x,
            objective: current.value,
            gradient_norm: current.gradient_norm(),
            radius,
            ratio,
            step_norm: linalg::norm(&step.p),
            accepted,
            stale,
        };
        history.push(record);
        debug!(
            iter,
            objective = record.objective,
            gradient_norm = record.gradient_norm,
            radius,
            ratio,
            accepted,
            "trust-region iteration"
        );

        if let Some(Action::StopEarly) = observer.observe(&Event {
            record: &record,
            gradient: &current.gradient,
            actual_reduction: actual,
            predicted_reduction: predicted,
        }) {
            return Ok(finish(current, radius, Status::StoppedByObserver, iter, history, config));
        }
    }

    let status = if current.gradient_norm() < config.gradient_tol {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(finish(current, radius, status, config.max_iters, history, config))
}

fn is_finite_matrix<const N: usize>(m: &Matrix<N>) -> bool {
    m.iter().flatten().all(|v| v.is_finite())
}

fn finish<const N: usize>(
    current: Evaluation<N>,
    radius: f64,
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
        radius,
        iters,
        history: history.into_vec(),
        dropped_records,
        method: config.subproblem.tag(),
    }
}
