//! Core traits and types for the Descent optimizers.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`linalg`] — dense vector and matrix primitives over `[f64; N]`
//! - [`differentiate`] — central-difference gradients, Jacobians, and Hessians
//! - [`Objective`] — a scalar function with optional analytic derivatives
//! - [`EquationSystem`] — a square system of residuals for root finding
//! - [`ConstraintSet`], [`Bounds`] — constraints handled by outer methods
//! - [`Observer`] — receives solver events and optionally returns control actions

pub mod differentiate;
pub mod linalg;

mod observer;
mod problems;

pub use linalg::{LinearSolution, Matrix, Vector};
pub use observer::Observer;
pub use problems::{
    Bounds, BoundsError, Constraint, ConstraintSet, EquationSystem, Objective, WithGradient,
    WithHessian,
};
