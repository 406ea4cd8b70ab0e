//! Quasi-Newton curvature models.
//!
//! A curvature model turns the current gradient and the history of steps
//! `s = x_{k+1} − x_k` and gradient changes `y = g_{k+1} − g_k` into a search
//! direction. Each model decides for itself when a correction pair is
//! numerically unsafe and skips it.
//!
//! # Models
//!
//! - [`Lbfgs`] — limited-memory BFGS via the two-loop recursion, `O(mN)`
//! - [`Sr1`] — symmetric rank-one update of a dense Hessian, `O(N³)` solve
//! - [`Dfp`] — rank-two update of a dense inverse Hessian, `O(N²)`
//! - [`Broyden`] — rank-one Jacobian update for root finding
//!
//! The dense models store `N×N` matrices and are intended for small problems
//! (roughly `N < 20`). Use L-BFGS beyond that.

mod broyden;
mod dfp;
mod lbfgs;
mod sr1;

pub use broyden::Broyden;
pub use dfp::Dfp;
pub use lbfgs::Lbfgs;
pub use sr1::Sr1;

use descent_core::Vector;

/// Pairs with `yᵗs` at or below this value are skipped by BFGS-family models.
pub const MIN_CURVATURE: f64 = 1e-10;

/// The outcome of offering a correction pair to a curvature model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The pair was incorporated.
    Applied,

    /// The pair was rejected for numerical safety; the model is unchanged.
    Skipped,
}

/// A strategy that produces descent directions from curvature information.
pub trait CurvatureModel<const N: usize> {
    /// Returns a search direction for gradient `g`.
    ///
    /// The direction is expected to satisfy `gᵗd < 0`; callers should still
    /// check, since some models (SR1) do not guarantee it.
    fn direction(&self, g: &Vector<N>) -> Vector<N>;

    /// Offers a correction pair to the model.
    fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update;
}

/// The closed set of curvature models available to line-search solvers.
#[derive(Debug, Clone)]
pub enum Model<const N: usize> {
    Lbfgs(Lbfgs<N>),
    Sr1(Sr1<N>),
    Dfp(Dfp<N>),
}

impl<const N: usize> CurvatureModel<N> for Model<N> {
    fn direction(&self, g: &Vector<N>) -> Vector<N> {
        match self {
            Self::Lbfgs(model) => model.direction(g),
            Self::Sr1(model) => model.direction(g),
            Self::Dfp(model) => model.direction(g),
        }
    }

    fn update(&mut self, s: &Vector<N>, y: &Vector<N>) -> Update {
        match self {
            Self::Lbfgs(model) => model.update(s, y),
            Self::Sr1(model) => model.update(s, y),
            Self::Dfp(model) => model.update(s, y),
        }
    }
}
