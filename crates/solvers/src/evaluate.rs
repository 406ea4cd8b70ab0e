use descent_core::{Objective, Vector, linalg};

/// The objective value and gradient evaluated at a given `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation<const N: usize> {
    pub x: Vector<N>,

    pub value: f64,

    pub gradient: Vector<N>,
}

impl<const N: usize> Evaluation<N> {
    /// Returns the Euclidean norm of the gradient.
    #[must_use]
    pub fn gradient_norm(&self) -> f64 {
        linalg::norm(&self.gradient)
    }

    /// Returns true if the value and every gradient component are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.gradient.iter().all(|g| g.is_finite())
    }
}

/// Evaluates the objective and its gradient at `x`.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails.
pub fn evaluate<P, const N: usize>(problem: &P, x: Vector<N>) -> Result<Evaluation<N>, P::Error>
where
    P: Objective<N>,
{
    let value = problem.value(&x)?;
    let gradient = problem.gradient(&x)?;
    Ok(Evaluation { x, value, gradient })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn evaluates_value_and_gradient() {
        let eval = evaluate(&|x: &[f64; 2]| x[0].powi(2) + x[1].powi(2), [3.0, 4.0]).unwrap();

        assert_relative_eq!(eval.value, 25.0);
        assert_relative_eq!(eval.gradient_norm(), 10.0, epsilon = 1e-6);
        assert!(eval.is_finite());
    }
}
