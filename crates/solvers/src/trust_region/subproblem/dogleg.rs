use tracing::warn;

use descent_core::{Matrix, Vector, linalg};

use super::{TrialStep, boundary_tau, cauchy::cauchy_point, predicted_reduction};

/// Returns the dogleg step.
///
/// The path runs from the origin to the unconstrained model minimizer along
/// steepest descent, `pU = −(gᵗg / gᵗHg)·g`, then on to the Newton step
/// `pB = −H⁻¹g`, and is cut where it leaves the trust region.
///
/// The path only makes sense when `H` is positive definite along it. If `H`
/// is singular, has non-positive curvature along `g`, or yields a Newton step
/// that is not a descent direction, the Cauchy point is returned instead.
#[must_use]
pub fn dogleg<const N: usize>(g: &Vector<N>, h: &Matrix<N>, radius: f64) -> TrialStep<N> {
    let g_norm = linalg::norm(g);
    if g_norm == 0.0 || radius <= 0.0 {
        return TrialStep::zero();
    }

    let ghg = linalg::quadratic_form(h, g);
    let newton = linalg::solve_linear(h, &linalg::scale(g, -1.0));
    if !newton.is_regular() {
        warn!(regularized = newton.regularized, "singular model Hessian, using the Cauchy point");
        return cauchy_point(g, h, radius);
    }
    let full = newton.x;
    if ghg <= 0.0 || linalg::dot(g, &full) >= 0.0 {
        return cauchy_point(g, h, radius);
    }

    let step = if linalg::norm(&full) <= radius {
        TrialStep {
            p: full,
            on_boundary: false,
        }
    } else {
        let unconstrained = linalg::scale(g, -(g_norm * g_norm) / ghg);
        let u_norm = linalg::norm(&unconstrained);
        if u_norm >= radius {
            TrialStep {
                p: linalg::scale(&unconstrained, radius / u_norm),
                on_boundary: true,
            }
        } else {
            let leg = linalg::sub(&full, &unconstrained);
            let tau = boundary_tau(&unconstrained, &leg, radius);
            TrialStep {
                p: linalg::axpy(&unconstrained, tau, &leg),
                on_boundary: true,
            }
        }
    };

    if predicted_reduction(g, h, &step.p) < 0.0 {
        return cauchy_point(g, h, radius);
    }
    step
}
