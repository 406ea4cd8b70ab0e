//! Central-difference derivative approximations.
//!
//! These are the default derivative sources whenever a caller does not supply
//! an analytic gradient, Jacobian, or Hessian. Each partial derivative costs
//! two function evaluations and carries an `O(h²)` truncation error plus a
//! rounding error that grows like `ε·|f| / h`.

use crate::linalg::{Matrix, Vector};

/// Step used for gradients and Jacobians.
pub const GRADIENT_STEP: f64 = 1e-7;

/// Step used for Hessians built from gradient differences.
///
/// Larger than [`GRADIENT_STEP`] because the gradient being differenced may
/// itself be a finite-difference approximation.
pub const HESSIAN_STEP: f64 = 1e-5;

/// Approximates the gradient of `f` at `x` by central differences.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn gradient<const N: usize, E>(
    f: impl Fn(&Vector<N>) -> Result<f64, E>,
    x: &Vector<N>,
) -> Result<Vector<N>, E> {
    let mut grad = [0.0; N];
    let mut probe = *x;
    for i in 0..N {
        probe[i] = x[i] + GRADIENT_STEP;
        let forward = f(&probe)?;
        probe[i] = x[i] - GRADIENT_STEP;
        let backward = f(&probe)?;
        probe[i] = x[i];
        grad[i] = (forward - backward) / (2.0 * GRADIENT_STEP);
    }
    Ok(grad)
}

/// Approximates the Jacobian of a vector function at `x` by central differences.
///
/// Row `i` holds the gradient of component `i`.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn jacobian<const N: usize, E>(
    f: impl Fn(&Vector<N>) -> Result<Vector<N>, E>,
    x: &Vector<N>,
) -> Result<Matrix<N>, E> {
    let mut jac = [[0.0; N]; N];
    let mut probe = *x;
    for j in 0..N {
        probe[j] = x[j] + GRADIENT_STEP;
        let forward = f(&probe)?;
        probe[j] = x[j] - GRADIENT_STEP;
        let backward = f(&probe)?;
        probe[j] = x[j];
        for (row, (fw, bw)) in jac.iter_mut().zip(forward.iter().zip(&backward)) {
            row[j] = (fw - bw) / (2.0 * GRADIENT_STEP);
        }
    }
    Ok(jac)
}

/// Approximates a Hessian by central differences of a gradient function.
///
/// The result is symmetrized as `(H + Hᵗ) / 2`.
///
/// # Errors
///
/// Returns the first error produced by `grad`.
pub fn hessian<const N: usize, E>(
    grad: impl Fn(&Vector<N>) -> Result<Vector<N>, E>,
    x: &Vector<N>,
) -> Result<Matrix<N>, E> {
    let mut hess = [[0.0; N]; N];
    let mut probe = *x;
    for j in 0..N {
        probe[j] = x[j] + HESSIAN_STEP;
        let forward = grad(&probe)?;
        probe[j] = x[j] - HESSIAN_STEP;
        let backward = grad(&probe)?;
        probe[j] = x[j];
        for i in 0..N {
            hess[i][j] = (forward[i] - backward[i]) / (2.0 * HESSIAN_STEP);
        }
    }

    for i in 0..N {
        for j in i + 1..N {
            let mean = 0.5 * (hess[i][j] + hess[j][i]);
            hess[i][j] = mean;
            hess[j][i] = mean;
        }
    }
    Ok(hess)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    fn cubic(x: &[f64; 2]) -> Result<f64, Infallible> {
        Ok(x[0].powi(3) + 2.0 * x[0] * x[1] + x[1].powi(2))
    }

    fn cubic_gradient(x: &[f64; 2]) -> Result<[f64; 2], Infallible> {
        Ok([3.0 * x[0].powi(2) + 2.0 * x[1], 2.0 * x[0] + 2.0 * x[1]])
    }

    #[test]
    fn gradient_matches_analytic() {
        let x = [1.5, -0.5];
        let numeric = gradient(cubic, &x).unwrap();
        let exact = cubic_gradient(&x).unwrap();

        assert_relative_eq!(numeric[0], exact[0], epsilon = 1e-6);
        assert_relative_eq!(numeric[1], exact[1], epsilon = 1e-6);
    }

    #[test]
    fn jacobian_of_linear_map() {
        let f = |x: &[f64; 2]| -> Result<[f64; 2], Infallible> {
            Ok([2.0 * x[0] - x[1], x[0] + 3.0 * x[1]])
        };

        let jac = jacobian(f, &[0.3, 0.7]).unwrap();

        assert_relative_eq!(jac[0][0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(jac[0][1], -1.0, epsilon = 1e-6);
        assert_relative_eq!(jac[1][0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(jac[1][1], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn hessian_is_symmetric_and_accurate() {
        let x = [1.5, -0.5];
        let hess = hessian(cubic_gradient, &x).unwrap();

        assert_relative_eq!(hess[0][0], 6.0 * x[0], epsilon = 1e-6);
        assert_relative_eq!(hess[0][1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(hess[1][0], hess[0][1]);
        assert_relative_eq!(hess[1][1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn errors_propagate() {
        #[derive(Debug, PartialEq)]
        struct Boom;

        let f = |_: &[f64; 1]| -> Result<f64, Boom> { Err(Boom) };
        assert_eq!(gradient(f, &[0.0]), Err(Boom));
    }
}
