use thiserror::Error;

use crate::{
    curvature::{Dfp, Lbfgs, Model, Sr1},
    line_search::{self, LineSearch},
};

/// The curvature model that generates search directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Limited-memory BFGS keeping `memory` correction pairs.
    Lbfgs { memory: usize },

    /// Symmetric rank-one update of a dense Hessian.
    Sr1,

    /// Davidon–Fletcher–Powell update of a dense inverse Hessian.
    Dfp,
}

impl Default for Method {
    fn default() -> Self {
        Self::Lbfgs { memory: 10 }
    }
}

impl Method {
    /// Returns the tag reported in solutions.
    #[must_use]
    pub fn tag(self) -> crate::Method {
        match self {
            Self::Lbfgs { .. } => crate::Method::Lbfgs,
            Self::Sr1 => crate::Method::Sr1,
            Self::Dfp => crate::Method::Dfp,
        }
    }

    pub(crate) fn model<const N: usize>(self) -> Model<N> {
        match self {
            Self::Lbfgs { memory } => Model::Lbfgs(Lbfgs::new(memory)),
            Self::Sr1 => Model::Sr1(Sr1::new()),
            Self::Dfp => Model::Dfp(Dfp::new()),
        }
    }
}

/// Configuration for the unconstrained solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub method: Method,
    pub line_search: LineSearch,
    pub gradient_tol: f64,
    pub max_iters: usize,

    /// Keep only the most recent records when set.
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::default(),
            line_search: LineSearch::default(),
            gradient_tol: 1e-6,
            max_iters: 1000,
            history_limit: None,
        }
    }
}

/// Errors that can occur when validating an unconstrained solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gradient_tol must be finite and positive")]
    GradientTol,

    #[error("L-BFGS memory must be at least 1")]
    Memory,

    #[error("line search: {0}")]
    LineSearch(#[from] line_search::ConfigError),
}

impl Config {
    /// Validates the tolerances, the method parameters, and the line search.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gradient_tol.is_finite() || self.gradient_tol <= 0.0 {
            return Err(ConfigError::GradientTol);
        }
        if let Method::Lbfgs { memory: 0 } = self.method {
            return Err(ConfigError::Memory);
        }
        self.line_search.validate()?;
        Ok(())
    }
}
