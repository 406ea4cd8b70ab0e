use descent_core::{Matrix, Vector, linalg};

use super::TrialStep;

/// Returns the Cauchy point: the model minimizer along `−g` within the radius.
///
/// With `gᵗHg > 0` the step length is `τΔ` with `τ = min(1, ‖g‖³/(Δ·gᵗHg))`;
/// otherwise the model decreases all the way to the boundary and `τ = 1`.
#[must_use]
pub fn cauchy_point<const N: usize>(g: &Vector<N>, h: &Matrix<N>, radius: f64) -> TrialStep<N> {
    let g_norm = linalg::norm(g);
    if g_norm == 0.0 || radius <= 0.0 {
        return TrialStep::zero();
    }

    let ghg = linalg::quadratic_form(h, g);
    let tau = if ghg > 0.0 {
        (g_norm.powi(3) / (radius * ghg)).min(1.0)
    } else {
        1.0
    };

    TrialStep {
        p: linalg::scale(g, -tau * radius / g_norm),
        on_boundary: tau >= 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn interior_minimizer_along_gradient() {
        // m(−t·g) = −t·‖g‖² + ½t²·gᵗHg is minimized at t = ‖g‖²/gᵗHg = 1/2.
        let step = cauchy_point(&[1.0, 0.0], &[[2.0, 0.0], [0.0, 1.0]], 10.0);

        assert!(!step.on_boundary);
        assert_relative_eq!(step.p[0], -0.5);
        assert_relative_eq!(step.p[1], 0.0);
    }

    #[test]
    fn clipped_to_boundary() {
        let step = cauchy_point(&[3.0, 4.0], &linalg::identity(), 1.0);

        assert!(step.on_boundary);
        assert_relative_eq!(step.p[0], -0.6);
        assert_relative_eq!(step.p[1], -0.8);
    }

    #[test]
    fn negative_curvature_goes_to_boundary() {
        let step = cauchy_point(&[1.0], &[[-1.0]], 2.0);

        assert!(step.on_boundary);
        assert_relative_eq!(step.p[0], -2.0);
    }

    #[test]
    fn zero_gradient_gives_zero_step() {
        let step = cauchy_point(&[0.0, 0.0], &linalg::identity(), 1.0);
        assert_eq!(step.p, [0.0, 0.0]);
    }
}
