use descent_core::{LinearSolution, Matrix, Vector, linalg};

use super::Update;

/// Steps shorter than this (squared) leave the Jacobian unchanged.
const MIN_STEP_SQUARED: f64 = 1e-24;

/// Broyden's "good" rank-one Jacobian update for systems `F(x) = 0`.
///
/// Starting from an initial Jacobian `J`, each accepted step `s` with
/// residual change `y = F(x+s) − F(x)` applies
///
/// ```text
/// J ← J + (y − J·s)·sᵗ / (sᵗs)
/// ```
///
/// so that `J·s = y` afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Broyden<const N: usize> {
    jacobian: Matrix<N>,
}

impl<const N: usize> Broyden<N> {
    /// Creates a model from an initial Jacobian.
    #[must_use]
    pub fn new(jacobian: Matrix<N>) -> Self {
        Self { jacobian }
    }

    /// Returns the current Jacobian approximation.
    #[must_use]
    pub fn jacobian(&self) -> &Matrix<N> {
        &self.jacobian
    }

    /// Solves `J·d = −F` for the Newton-like step.
    ///
    /// A singular `J` is reported through [`LinearSolution::regularized`].
    #[must_use]
    pub fn step(&self, residuals: &Vector<N>) -> LinearSolution<N> {
        linalg::solve_linear(&self.jacobian, &linalg::scale(residuals, -1.0))
    }

    /// Applies the rank-one secant update for step `s` and residual change `y`.
    pub fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        let ss = linalg::dot(s, s);
        if ss.is_nan() || ss <= MIN_STEP_SQUARED {
            return Update::Skipped;
        }

        let r = linalg::sub(y, &linalg::mat_vec(&self.jacobian, s));
        self.jacobian = linalg::add_scaled(&self.jacobian, 1.0 / ss, &linalg::outer(&r, s));
        Update::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn update_satisfies_secant_condition() {
        let mut model = Broyden::new(linalg::identity::<2>());
        let s = [0.5, -1.0];
        let y = [2.0, 0.5];
        assert_eq!(model.update(&s, &y), Update::Applied);

        let js = linalg::mat_vec(model.jacobian(), &s);
        assert_relative_eq!(js[0], y[0], epsilon = 1e-12);
        assert_relative_eq!(js[1], y[1], epsilon = 1e-12);
    }

    #[test]
    fn step_solves_linear_model() {
        let model = Broyden::new([[2.0, 0.0], [0.0, 4.0]]);
        let step = model.step(&[2.0, -8.0]);

        assert!(step.is_regular());
        assert_relative_eq!(step.x[0], -1.0);
        assert_relative_eq!(step.x[1], 2.0);
    }

    #[test]
    fn zero_step_is_skipped() {
        let mut model = Broyden::new(linalg::identity::<2>());
        assert_eq!(model.update(&[0.0, 0.0], &[1.0, 1.0]), Update::Skipped);
        assert_eq!(model.jacobian(), &linalg::identity());
    }
}
