use std::convert::Infallible;

use crate::{
    differentiate,
    linalg::{Matrix, Vector},
};

/// Defines a scalar objective to be minimized.
///
/// Only [`value`](Objective::value) is required. The gradient defaults to
/// central differences with step [`GRADIENT_STEP`], which costs `2N` extra
/// evaluations per gradient and limits attainable accuracy to roughly
/// `1e-9·|f|`. Override it when an analytic gradient is available.
///
/// Plain closures `Fn(&[f64; N]) -> f64` implement this trait with an
/// infallible error type. Use [`WithGradient`] or [`WithHessian`] to pair a
/// closure with analytic derivatives.
///
/// The const generic `N` is the number of solver variables.
///
/// [`GRADIENT_STEP`]: crate::differentiate::GRADIENT_STEP
pub trait Objective<const N: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated.
    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error>;

    /// Evaluates the gradient at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be evaluated.
    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        differentiate::gradient(|p| self.value(p), x)
    }

    /// Evaluates the Hessian at `x`, if the objective can provide one.
    ///
    /// The default returns `Ok(None)`, letting solvers fall back to their own
    /// approximation.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Hessian cannot be evaluated.
    fn hessian(&self, _x: &Vector<N>) -> Result<Option<Matrix<N>>, Self::Error> {
        Ok(None)
    }
}

impl<F, const N: usize> Objective<N> for F
where
    F: Fn(&Vector<N>) -> f64,
{
    type Error = Infallible;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        Ok(self(x))
    }
}

/// An objective closure paired with its analytic gradient.
#[derive(Debug, Clone, Copy)]
pub struct WithGradient<F, G> {
    value: F,
    gradient: G,
}

impl<F, G> WithGradient<F, G> {
    /// Pairs an objective with its gradient.
    pub fn new(value: F, gradient: G) -> Self {
        Self { value, gradient }
    }

    /// Adds an analytic Hessian.
    pub fn with_hessian<H>(self, hessian: H) -> WithHessian<F, G, H> {
        WithHessian {
            value: self.value,
            gradient: self.gradient,
            hessian,
        }
    }
}

impl<F, G, const N: usize> Objective<N> for WithGradient<F, G>
where
    F: Fn(&Vector<N>) -> f64,
    G: Fn(&Vector<N>) -> Vector<N>,
{
    type Error = Infallible;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        Ok((self.value)(x))
    }

    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        Ok((self.gradient)(x))
    }
}

/// An objective closure paired with its analytic gradient and Hessian.
#[derive(Debug, Clone, Copy)]
pub struct WithHessian<F, G, H> {
    value: F,
    gradient: G,
    hessian: H,
}

impl<F, G, H, const N: usize> Objective<N> for WithHessian<F, G, H>
where
    F: Fn(&Vector<N>) -> f64,
    G: Fn(&Vector<N>) -> Vector<N>,
    H: Fn(&Vector<N>) -> Matrix<N>,
{
    type Error = Infallible;

    fn value(&self, x: &Vector<N>) -> Result<f64, Self::Error> {
        Ok((self.value)(x))
    }

    fn gradient(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        Ok((self.gradient)(x))
    }

    fn hessian(&self, x: &Vector<N>) -> Result<Option<Matrix<N>>, Self::Error> {
        Ok(Some((self.hessian)(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use thiserror::Error;

    fn bowl(x: &[f64; 2]) -> f64 {
        x[0].powi(2) + 3.0 * x[1].powi(2)
    }

    #[test]
    fn closure_uses_numeric_gradient() {
        let grad = bowl.gradient(&[1.0, -1.0]).unwrap();

        assert_relative_eq!(grad[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], -6.0, epsilon = 1e-6);
        assert!(bowl.hessian(&[1.0, -1.0]).unwrap().is_none());
    }

    #[test]
    fn analytic_derivatives_are_used() {
        let objective = WithGradient::new(bowl, |x: &[f64; 2]| [2.0 * x[0], 6.0 * x[1]])
            .with_hessian(|_: &[f64; 2]| [[2.0, 0.0], [0.0, 6.0]]);

        assert_relative_eq!(objective.value(&[1.0, 1.0]).unwrap(), 4.0);
        assert_eq!(objective.gradient(&[1.0, 1.0]).unwrap(), [2.0, 6.0]);
        assert_eq!(
            objective.hessian(&[1.0, 1.0]).unwrap(),
            Some([[2.0, 0.0], [0.0, 6.0]])
        );
    }

    #[derive(Debug, Error)]
    #[error("outside domain at {0}")]
    struct Domain(f64);

    struct SquareRoot;

    impl Objective<1> for SquareRoot {
        type Error = Domain;

        fn value(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
            if x[0] < 0.0 {
                return Err(Domain(x[0]));
            }
            Ok(x[0].sqrt())
        }
    }

    #[test]
    fn fallible_objective_propagates_through_gradient() {
        assert!(SquareRoot.gradient(&[4.0]).is_ok());
        assert!(SquareRoot.gradient(&[0.0]).is_err());
    }
}
