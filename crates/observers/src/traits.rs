//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events that carry an iteration number
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasResidual`] — events that carry a residual norm
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use descent_core::Observer;
//! use descent_observers::traits::{CanStopEarly, HasResidual};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//! }
//!
//! impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.residual() < self.tolerance).then(A::stop_early)
//!     }
//! }
//! ```

use descent_solvers::{constrained, roots::broyden, trust_region, unconstrained};

/// An event that reports which iteration produced it.
pub trait HasIteration {
    /// Returns the iteration number, 0 for the starting point.
    fn iteration(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective at the event's iterate.
    fn objective(&self) -> f64;
}

/// An event that carries a residual norm.
pub trait HasResidual {
    /// Returns `‖F(x)‖` at the event's iterate.
    fn residual(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- HasIteration ---

impl<const N: usize> HasIteration for unconstrained::Event<'_, N> {
    fn iteration(&self) -> usize {
        self.record.iter
    }
}

impl<const N: usize> HasIteration for trust_region::Event<'_, N> {
    fn iteration(&self) -> usize {
        self.record.iter
    }
}

impl<const N: usize> HasIteration for constrained::Event<'_, N> {
    fn iteration(&self) -> usize {
        self.record.iter
    }
}

impl<const N: usize> HasIteration for broyden::Event<'_, N> {
    fn iteration(&self) -> usize {
        self.record.iter
    }
}

// --- HasObjective ---

impl<const N: usize> HasObjective for unconstrained::Event<'_, N> {
    fn objective(&self) -> f64 {
        self.record.objective
    }
}

impl<const N: usize> HasObjective for trust_region::Event<'_, N> {
    fn objective(&self) -> f64 {
        self.record.objective
    }
}

/// The true objective, not the surrogate minimized by the inner solver.
impl<const N: usize> HasObjective for constrained::Event<'_, N> {
    fn objective(&self) -> f64 {
        self.record.objective
    }
}

// --- HasResidual ---

impl<const N: usize> HasResidual for broyden::Event<'_, N> {
    fn residual(&self) -> f64 {
        self.record.residual_norm
    }
}

// --- CanStopEarly ---

impl CanStopEarly for unconstrained::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for trust_region::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for constrained::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for broyden::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
