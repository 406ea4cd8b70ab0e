use std::{error::Error as StdError, fmt};

use crate::{Method, unconstrained};

use super::ConfigError;

/// The kinds of constraint in a [`ConstraintSet`](descent_core::ConstraintSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Equality,
    Inequality,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equality => f.write_str("equality"),
            Self::Inequality => f.write_str("inequality"),
        }
    }
}

/// Errors that can occur during constrained minimization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("objective is not finite at the starting point")]
    NonFiniteStart,

    #[error("starting point is not strictly feasible: inequality {index} has value {value}")]
    InfeasibleStart { index: usize, value: f64 },

    #[error("{method} does not support {kind} constraints")]
    UnsupportedConstraint { method: Method, kind: ConstraintKind },

    #[error("inner solve failed: {0}")]
    Inner(#[source] unconstrained::Error),

    #[error("objective error: {0}")]
    Objective(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn objective<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Objective(Box::new(err))
    }
}
