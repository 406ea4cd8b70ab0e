//! Root finding for square nonlinear systems `F(x) = 0`.
//!
//! An [`EquationSystem`] maps solver variables `x: [f64; N]` to `N`
//! residuals. Solvers in this module drive those residuals toward zero.
//!
//! # Solvers
//!
//! - [`broyden`] — quasi-Newton steps from a rank-one updated Jacobian
//!
//! [`EquationSystem`]: descent_core::EquationSystem

pub mod broyden;
