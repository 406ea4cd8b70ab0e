use descent_core::{Matrix, Vector, linalg};

use super::{TrialStep, boundary_tau};

/// Returns the Steihaug truncated conjugate-gradient step.
///
/// CG is run on `H·p = −g` from `p = 0` until the residual drops below
/// `min(0.5, √‖g‖)·‖g‖`. A direction of non-positive curvature, or an
/// iterate that would leave the region, ends the iteration on the boundary.
#[must_use]
pub fn steihaug_cg<const N: usize>(g: &Vector<N>, h: &Matrix<N>, radius: f64) -> TrialStep<N> {
    let g_norm = linalg::norm(g);
    if g_norm == 0.0 || radius <= 0.0 {
        return TrialStep::zero();
    }
    let tolerance = g_norm.sqrt().min(0.5) * g_norm;

    let mut z = [0.0; N];
    let mut r = *g;
    let mut d = linalg::scale(g, -1.0);

    for _ in 0..N {
        let curvature = linalg::quadratic_form(h, &d);
        if curvature.is_nan() || curvature <= 0.0 {
            return to_boundary(&z, &d, radius);
        }

        let rr = linalg::dot(&r, &r);
        let alpha = rr / curvature;
        let z_next = linalg::axpy(&z, alpha, &d);
        if linalg::norm(&z_next) >= radius {
            return to_boundary(&z, &d, radius);
        }

        let r_next = linalg::axpy(&r, alpha, &linalg::mat_vec(h, &d));
        if linalg::norm(&r_next) < tolerance {
            return TrialStep {
                p: z_next,
                on_boundary: false,
            };
        }

        let beta = linalg::dot(&r_next, &r_next) / rr;
        d = linalg::axpy(&linalg::scale(&r_next, -1.0), beta, &d);
        z = z_next;
        r = r_next;
    }

    TrialStep {
        p: z,
        on_boundary: false,
    }
}

fn to_boundary<const N: usize>(z: &Vector<N>, d: &Vector<N>, radius: f64) -> TrialStep<N> {
    let tau = boundary_tau(z, d, radius);
    TrialStep {
        p: linalg::axpy(z, tau, d),
        on_boundary: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::trust_region::subproblem::predicted_reduction;

    #[test]
    fn solves_newton_system_inside_region() {
        let g = [1.0, 2.0];
        let h = [[4.0, 1.0], [1.0, 3.0]];
        let step = steihaug_cg(&g, &h, 10.0);

        assert!(!step.on_boundary);
        // The residual tolerance is loose; the step is close to −H⁻¹g.
        let residual = linalg::add(&linalg::mat_vec(&h, &step.p), &g);
        assert!(linalg::norm(&residual) < 0.5 * linalg::norm(&g));
    }

    #[test]
    fn stops_on_boundary_for_long_steps() {
        let g = [1.0, 2.0];
        let h = [[0.1, 0.0], [0.0, 0.1]];
        let step = steihaug_cg(&g, &h, 1.0);

        assert!(step.on_boundary);
        assert_relative_eq!(linalg::norm(&step.p), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_curvature_goes_to_boundary() {
        let g = [1.0, 0.0];
        let h = [[-1.0, 0.0], [0.0, 1.0]];
        let step = steihaug_cg(&g, &h, 2.0);

        assert!(step.on_boundary);
        assert_relative_eq!(step.p[0], -2.0, epsilon = 1e-12);
        assert!(predicted_reduction(&g, &h, &step.p) > 0.0);
    }
}
