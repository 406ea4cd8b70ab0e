use std::convert::Infallible;

use crate::linalg::Vector;

/// Defines a square system of equations `F(x) = 0` to be solved.
///
/// Root solvers drive every residual toward zero. Plain closures
/// `Fn(&[f64; N]) -> [f64; N]` implement this trait with an infallible
/// error type.
pub trait EquationSystem<const N: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the residuals `F(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residuals cannot be computed.
    fn residuals(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error>;
}

impl<F, const N: usize> EquationSystem<N> for F
where
    F: Fn(&Vector<N>) -> Vector<N>,
{
    type Error = Infallible;

    fn residuals(&self, x: &Vector<N>) -> Result<Vector<N>, Self::Error> {
        Ok(self(x))
    }
}
