use tracing::warn;

use descent_core::{Matrix, Vector, linalg};

use super::{CurvatureModel, Update};

/// Relative threshold for the SR1 denominator `|rᵗs| ≥ SKIP_RATIO·‖r‖·‖s‖`.
const SKIP_RATIO: f64 = 1e-8;

/// Symmetric rank-one update of a dense Hessian approximation.
///
/// `B` starts as the identity and is updated with
/// `B ← B + r·rᵗ / (rᵗs)` where `r = y − B·s`.
///
/// SR1 does not preserve positive definiteness, so the Newton direction
/// `B·d = −g` may point uphill. When it does, or when `B` is singular,
/// [`direction`](CurvatureModel::direction) falls back to steepest descent.
/// The indefinite `B` is still useful inside a trust region, see
/// [`hessian`](Sr1::hessian).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sr1<const N: usize> {
    b: Matrix<N>,
}

impl<const N: usize> Default for Sr1<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Sr1<N> {
    /// Creates a model with `B = I`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            b: linalg::identity(),
        }
    }

    /// Returns the current Hessian approximation.
    #[must_use]
    pub fn hessian(&self) -> &Matrix<N> {
        &self.b
    }
}

impl<const N: usize> CurvatureModel<N> for Sr1<N> {
    fn direction(&self, g: &Vector<N>) -> Vector<N> {
        let steepest = linalg::scale(g, -1.0);
        let newton = linalg::solve_linear(&self.b, &steepest);

        if !newton.is_regular() {
            warn!(regularized = newton.regularized, "singular SR1 Hessian, using steepest descent");
            return steepest;
        }
        if linalg::dot(g, &newton.x) < 0.0 {
            newton.x
        } else {
            steepest
        }
    }

    fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        let r = linalg::sub(y, &linalg::mat_vec(&self.b, s));
        let rs = linalg::dot(&r, s);
        let threshold = SKIP_RATIO * linalg::norm(&r) * linalg::norm(s);

        if rs.is_nan() || rs.abs() <= threshold || threshold == 0.0 {
            return Update::Skipped;
        }

        self.b = linalg::add_scaled(&self.b, 1.0 / rs, &linalg::outer(&r, &r));
        Update::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn identity_start_gives_steepest_descent() {
        let model = Sr1::<2>::new();
        assert_eq!(model.direction(&[3.0, -1.0]), [-3.0, 1.0]);
    }

    #[test]
    fn learns_curvature_along_step() {
        // A = diag(4, 1): one step along the first axis fixes B[0][0].
        let mut model = Sr1::<2>::new();
        assert_eq!(model.update(&[1.0, 0.0], &[4.0, 0.0]), Update::Applied);

        let b = model.hessian();
        assert_relative_eq!(b[0][0], 4.0);
        assert_relative_eq!(b[1][1], 1.0);
        assert_relative_eq!(b[0][1], 0.0);

        let d = model.direction(&[4.0, 1.0]);
        assert_relative_eq!(d[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(d[1], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn satisfies_secant_condition() {
        let mut model = Sr1::<3>::new();
        let s = [0.3, -0.2, 0.5];
        let y = [1.1, 0.4, -0.3];
        assert_eq!(model.update(&s, &y), Update::Applied);

        let bs = linalg::mat_vec(model.hessian(), &s);
        for (lhs, rhs) in bs.iter().zip(&y) {
            assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
        }
    }

    #[test]
    fn skips_when_secant_already_holds() {
        // B = I already maps s to y, so r = 0.
        let mut model = Sr1::<2>::new();
        assert_eq!(model.update(&[1.0, 2.0], &[1.0, 2.0]), Update::Skipped);
        assert_eq!(model.hessian(), &linalg::identity());
    }

    #[test]
    fn singular_hessian_falls_back_to_steepest_descent() {
        // r = [-1, 0] cancels the first diagonal entry: B = diag(0, 1).
        let mut model = Sr1::<2>::new();
        assert_eq!(model.update(&[1.0, 0.0], &[0.0, 0.0]), Update::Applied);
        assert_eq!(model.hessian(), &[[0.0, 0.0], [0.0, 1.0]]);

        assert_eq!(model.direction(&[1.0, 1.0]), [-1.0, -1.0]);
    }

    #[test]
    fn falls_back_when_newton_direction_ascends() {
        // Negative curvature along the first axis makes B indefinite.
        let mut model = Sr1::<2>::new();
        assert_eq!(model.update(&[1.0, 0.0], &[-2.0, 0.0]), Update::Applied);
        assert_relative_eq!(model.hessian()[0][0], -2.0);

        let g = [1.0, 0.0];
        let d = model.direction(&g);
        assert_eq!(d, [-1.0, 0.0]);
        assert!(linalg::dot(&g, &d) < 0.0);
    }
}
