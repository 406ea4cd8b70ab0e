use descent_core::{Matrix, Vector, linalg};

use super::{CurvatureModel, MIN_CURVATURE, Update};

/// Davidon–Fletcher–Powell update of a dense inverse Hessian.
///
/// `H` starts as the identity and is updated with
///
/// ```text
/// H ← H − (H·y)(H·y)ᵗ / (yᵗH·y) + s·sᵗ / (yᵗs)
/// ```
///
/// which preserves symmetry and positive definiteness whenever `yᵗs > 0`.
/// Pairs with `yᵗs ≤ 1e-10` or a vanishing `yᵗH·y` are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dfp<const N: usize> {
    h: Matrix<N>,
}

impl<const N: usize> Default for Dfp<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Dfp<N> {
    /// Creates a model with `H = I`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            h: linalg::identity(),
        }
    }

    /// Returns the current inverse Hessian approximation.
    #[must_use]
    pub fn inverse_hessian(&self) -> &Matrix<N> {
        &self.h
    }
}

impl<const N: usize> CurvatureModel<N> for Dfp<N> {
    fn direction(&self, g: &Vector<N>) -> Vector<N> {
        linalg::scale(&linalg::mat_vec(&self.h, g), -1.0)
    }

    fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        let ys = linalg::dot(y, s);
        let hy = linalg::mat_vec(&self.h, y);
        let yhy = linalg::dot(y, &hy);

        if ys.is_nan() || ys <= MIN_CURVATURE || yhy.is_nan() || yhy <= MIN_CURVATURE {
            return Update::Skipped;
        }

        let shrunk = linalg::add_scaled(&self.h, -1.0 / yhy, &linalg::outer(&hy, &hy));
        self.h = linalg::add_scaled(&shrunk, 1.0 / ys, &linalg::outer(s, s));
        Update::Applied
    }
}
