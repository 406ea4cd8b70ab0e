//! Approximate solvers for `min m(p) = gᵗp + ½pᵗHp` subject to `‖p‖ ≤ Δ`.
//!
//! Every solver returns a step with `‖p‖ ≤ Δ` (up to rounding) and a
//! non-negative predicted reduction, for any symmetric `H` including
//! indefinite ones.

mod cauchy;
mod dogleg;
mod steihaug;

pub use cauchy::cauchy_point;
pub use dogleg::dogleg;
pub use steihaug::steihaug_cg;

use descent_core::{Matrix, Vector, linalg};

use crate::Method;

/// A step proposed by a subproblem solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialStep<const N: usize> {
    /// The proposed step `p`.
    pub p: Vector<N>,

    /// True if the step was cut at the trust-region boundary.
    pub on_boundary: bool,
}

impl<const N: usize> TrialStep<N> {
    pub(crate) fn zero() -> Self {
        Self {
            p: [0.0; N],
            on_boundary: false,
        }
    }
}

/// Selects the subproblem solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Subproblem {
    /// Minimizer of the model along steepest descent.
    Cauchy,

    /// Piecewise path from the Cauchy point to the Newton step.
    #[default]
    Dogleg,

    /// Truncated conjugate gradient.
    SteihaugCg,
}

impl Subproblem {
    /// Solves the subproblem for gradient `g`, model Hessian `h`, and radius `radius`.
    #[must_use]
    pub fn solve<const N: usize>(self, g: &Vector<N>, h: &Matrix<N>, radius: f64) -> TrialStep<N> {
        match self {
            Self::Cauchy => cauchy_point(g, h, radius),
            Self::Dogleg => dogleg(g, h, radius),
            Self::SteihaugCg => steihaug_cg(g, h, radius),
        }
    }

    /// Returns the tag reported in solutions.
    #[must_use]
    pub fn tag(self) -> Method {
        match self {
            Self::Cauchy => Method::TrustRegionCauchy,
            Self::Dogleg => Method::TrustRegionDogleg,
            Self::SteihaugCg => Method::TrustRegionSteihaugCg,
        }
    }
}

/// Returns the reduction `m(0) − m(p) = −gᵗp − ½pᵗHp` predicted by the model.
#[must_use]
pub fn predicted_reduction<const N: usize>(g: &Vector<N>, h: &Matrix<N>, p: &Vector<N>) -> f64 {
    -linalg::dot(g, p) - 0.5 * linalg::quadratic_form(h, p)
}

/// Returns the positive `τ` with `‖z + τd‖ = radius`, assuming `‖z‖ ≤ radius`.
fn boundary_tau<const N: usize>(z: &Vector<N>, d: &Vector<N>, radius: f64) -> f64 {
    let a = linalg::dot(d, d);
    let b = 2.0 * linalg::dot(z, d);
    let c = linalg::dot(z, z) - radius * radius;
    let discriminant = (b * b - 4.0 * a * c).max(0.0);
    (-b + discriminant.sqrt()) / (2.0 * a)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn boundary_tau_hits_radius() {
        let z = [0.5, 0.0];
        let d = [1.0, 1.0];
        let tau = boundary_tau(&z, &d, 2.0);

        assert!(tau > 0.0);
        assert_relative_eq!(linalg::norm(&linalg::axpy(&z, tau, &d)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn predicted_reduction_of_newton_step() {
        // m(p) = gᵗp + ½pᵗHp is minimized at p = −H⁻¹g with reduction ½gᵗH⁻¹g.
        let g = [2.0, 4.0];
        let h = [[2.0, 0.0], [0.0, 4.0]];
        assert_relative_eq!(predicted_reduction(&g, &h, &[-1.0, -1.0]), 3.0);
    }
}
