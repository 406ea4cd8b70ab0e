use std::collections::VecDeque;

use descent_core::{Vector, linalg};

use super::{CurvatureModel, MIN_CURVATURE, Update};

/// A stored correction triple `(s, y, ρ = 1/yᵗs)`.
#[derive(Debug, Clone, Copy)]
struct Correction<const N: usize> {
    s: Vector<N>,
    y: Vector<N>,
    rho: f64,
}

/// Limited-memory BFGS.
///
/// Keeps at most `memory` correction pairs in a FIFO and applies the implied
/// inverse Hessian with the two-loop recursion. The initial inverse Hessian is
/// scaled by `γ = sᵗy / yᵗy` from the newest pair.
///
/// Pairs with `yᵗs ≤ 1e-10` are skipped, which keeps the implied inverse
/// Hessian positive definite.
#[derive(Debug, Clone)]
pub struct Lbfgs<const N: usize> {
    memory: usize,
    corrections: VecDeque<Correction<N>>,
}

impl<const N: usize> Lbfgs<N> {
    /// Creates an empty model holding up to `memory` pairs.
    #[must_use]
    pub fn new(memory: usize) -> Self {
        Self {
            memory,
            corrections: VecDeque::with_capacity(memory),
        }
    }

    /// Returns the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    /// Returns true if no pairs are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}

impl<const N: usize> CurvatureModel<N> for Lbfgs<N> {
    fn direction(&self, g: &Vector<N>) -> Vector<N> {
        let mut q = *g;
        let mut alphas = Vec::with_capacity(self.corrections.len());

        for c in self.corrections.iter().rev() {
            let alpha = c.rho * linalg::dot(&c.s, &q);
            q = linalg::axpy(&q, -alpha, &c.y);
            alphas.push(alpha);
        }

        let gamma = self
            .corrections
            .back()
            .map_or(1.0, |c| linalg::dot(&c.s, &c.y) / linalg::dot(&c.y, &c.y));
        let mut r = linalg::scale(&q, gamma);

        for (c, alpha) in self.corrections.iter().zip(alphas.iter().rev()) {
            let beta = c.rho * linalg::dot(&c.y, &r);
            r = linalg::axpy(&r, alpha - beta, &c.s);
        }

        linalg::scale(&r, -1.0)
    }

    fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        let ys = linalg::dot(y, s);
        if ys.is_nan() || ys <= MIN_CURVATURE || self.memory == 0 {
            return Update::Skipped;
        }

        if self.corrections.len() == self.memory {
            self.corrections.pop_front();
        }
        self.corrections.push_back(Correction {
            s: *s,
            y: *y,
            rho: 1.0 / ys,
        });
        Update::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn empty_memory_gives_steepest_descent() {
        let model = Lbfgs::<2>::new(5);
        assert_eq!(model.direction(&[1.0, -2.0]), [-1.0, 2.0]);
    }

    #[test]
    fn recovers_newton_step_on_quadratic() {
        // f = ½xᵗAx with A = diag(2, 8). After one pair per axis, the
        // two-loop recursion reproduces A⁻¹ exactly.
        let mut model = Lbfgs::<2>::new(5);
        assert_eq!(model.update(&[1.0, 0.0], &[2.0, 0.0]), Update::Applied);
        assert_eq!(model.update(&[0.0, 1.0], &[0.0, 8.0]), Update::Applied);

        let d = model.direction(&[4.0, 4.0]);

        assert_relative_eq!(d[0], -2.0, epsilon = 1e-12);
        assert_relative_eq!(d[1], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn skips_non_positive_curvature() {
        let mut model = Lbfgs::<2>::new(5);

        assert_eq!(model.update(&[1.0, 0.0], &[-1.0, 0.0]), Update::Skipped);
        assert_eq!(model.update(&[1.0, 0.0], &[1e-12, 0.0]), Update::Skipped);
        assert!(model.is_empty());
    }

    #[test]
    fn memory_is_bounded_fifo() {
        let mut model = Lbfgs::<1>::new(2);
        model.update(&[1.0], &[1.0]);
        model.update(&[1.0], &[2.0]);
        model.update(&[1.0], &[4.0]);

        assert_eq!(model.len(), 2);
        // Newest pair sets γ = 1/4, so the direction reflects curvature 4.
        let d = model.direction(&[4.0]);
        assert_relative_eq!(d[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn direction_is_descent() {
        let mut model = Lbfgs::<3>::new(3);
        model.update(&[0.5, 0.1, -0.2], &[1.0, 0.3, -0.1]);
        model.update(&[-0.1, 0.4, 0.2], &[0.1, 1.5, 0.6]);

        let g = [0.3, -1.2, 0.8];
        let d = model.direction(&g);

        assert!(linalg::dot(&g, &d) < 0.0);
    }
}
