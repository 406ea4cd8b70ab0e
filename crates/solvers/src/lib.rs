//! Numerical optimizers for the Descent framework.
//!
//! Every solver is a plain function taking a problem, a starting point, a
//! [`Config`](unconstrained::Config)-style record, and an observer, and
//! returning a typed solution. Solvers own all of their state for the
//! duration of a call; nothing persists between calls.
//!
//! # Modules
//!
//! - [`line_search`] — backtracking (Armijo) and strong-Wolfe step lengths
//! - [`curvature`] — quasi-Newton models: L-BFGS, SR1, DFP, and Broyden
//! - [`unconstrained`] — line-search descent driven by a curvature model
//! - [`trust_region`] — trust-region descent with Cauchy, Dogleg, or
//!   Steihaug-CG subproblem solvers
//! - [`constrained`] — quadratic penalty, log barrier, augmented Lagrangian,
//!   and projected gradient
//! - [`roots`] — Broyden's method for square nonlinear systems
//!
//! Non-convergence is reported through each solution's `status`, never as an
//! error. Errors are reserved for invalid input and for failures raised by the
//! caller's own functions.

pub mod constrained;
pub mod curvature;
pub mod line_search;
pub mod roots;
pub mod trust_region;
pub mod unconstrained;

mod evaluate;
mod history;
mod method;

pub use evaluate::{Evaluation, evaluate};
pub use history::History;
pub use method::Method;
