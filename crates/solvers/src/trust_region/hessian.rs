use descent_core::{Matrix, Objective, Vector, differentiate};

use crate::curvature::{CurvatureModel, Sr1, Update};

/// The model Hessian used when the objective has no analytic Hessian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HessianApprox {
    /// Central differences of the gradient, `2N` gradient evaluations per
    /// accepted step.
    #[default]
    FiniteDifference,

    /// Symmetric rank-one updates from accepted steps. May be indefinite,
    /// which the subproblem solvers handle.
    Sr1,
}

/// Supplies the model Hessian at each accepted iterate.
#[derive(Debug, Clone)]
pub(super) struct HessianSource<const N: usize> {
    approx: HessianApprox,
    sr1: Sr1<N>,
}

impl<const N: usize> HessianSource<N> {
    pub(super) fn new(approx: HessianApprox) -> Self {
        Self {
            approx,
            sr1: Sr1::new(),
        }
    }

    /// Returns the model Hessian at `x`.
    ///
    /// An analytic Hessian from the objective always takes precedence.
    pub(super) fn at<P>(&self, problem: &P, x: &Vector<N>) -> Result<Matrix<N>, P::Error>
    where
        P: Objective<N>,
    {
        if let Some(hessian) = problem.hessian(x)? {
            return Ok(hessian);
        }
        match self.approx {
            HessianApprox::FiniteDifference => {
                differentiate::hessian(|p| problem.gradient(p), x)
            }
            HessianApprox::Sr1 => Ok(*self.sr1.hessian()),
        }
    }

    /// Records an accepted step `s` with gradient change `y`.
    ///
    /// Only the SR1 model can skip a pair. Finite differences never do.
    pub(super) fn record_step(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        match self.approx {
            HessianApprox::FiniteDifference => Update::Applied,
            HessianApprox::Sr1 => self.sr1.update(s, y),
        }
    }
}
