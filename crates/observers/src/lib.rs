//! Reusable observers for the Descent optimizers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `descent-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasObjective`], [`HasResidual`], [`HasIteration`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Trace`] — logs every event through `tracing`
//! - [`Stall`] — stops a solver once the objective stops improving
//!
//! [`Observer`]: descent_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`HasResidual`]: traits::HasResidual
//! [`HasIteration`]: traits::HasIteration
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod stall;
mod trace;

pub use stall::Stall;
pub use trace::Trace;
