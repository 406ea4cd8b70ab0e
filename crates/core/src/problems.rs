mod bounds;
mod constraint;
mod equation;
mod objective;

pub use bounds::{Bounds, BoundsError};
pub use constraint::{Constraint, ConstraintSet};
pub use equation::EquationSystem;
pub use objective::{Objective, WithGradient, WithHessian};
