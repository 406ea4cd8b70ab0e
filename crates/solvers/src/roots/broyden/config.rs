use thiserror::Error;

use crate::line_search::in_open_unit;

/// Configuration for the Broyden solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Converged once `‖F(x)‖` drops below this value.
    pub residual_tol: f64,

    pub max_iters: usize,

    /// Sufficient-decrease constant `c` in `‖F(x + αd)‖ ≤ (1 − c·α)·‖F(x)‖`.
    pub sufficient_decrease: f64,

    /// Factor applied to `α` after each rejected trial.
    pub shrink: f64,

    pub max_backtracks: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            residual_tol: 1e-10,
            max_iters: 100,
            sufficient_decrease: 1e-4,
            shrink: 0.5,
            max_backtracks: 40,
            history_limit: None,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.residual_tol.is_finite() || self.residual_tol <= 0.0 {
            return Err(ConfigError::ResidualTol);
        }
        if self.max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !in_open_unit(self.sufficient_decrease)
            || !in_open_unit(self.shrink)
            || self.max_backtracks == 0
        {
            return Err(ConfigError::Backtracking);
        }
        Ok(())
    }
}

/// Errors that can occur when validating a Broyden config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be positive and finite")]
    ResidualTol,

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("sufficient_decrease and shrink must lie in (0, 1) with max_backtracks ≥ 1")]
    Backtracking,
}
