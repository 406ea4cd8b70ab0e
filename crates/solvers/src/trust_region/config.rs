use thiserror::Error;

use super::{HessianApprox, Subproblem};

/// Configuration for the trust-region solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub subproblem: Subproblem,

    /// Model Hessian used when the objective does not provide one.
    pub hessian: HessianApprox,

    pub initial_radius: f64,
    pub max_radius: f64,

    /// The solver gives up once the radius shrinks below this value.
    pub min_radius: f64,

    /// Steps are accepted when `actual / predicted > eta`.
    pub eta: f64,

    pub gradient_tol: f64,
    pub max_iters: usize,
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subproblem: Subproblem::default(),
            hessian: HessianApprox::default(),
            initial_radius: 1.0,
            max_radius: 100.0,
            min_radius: 1e-12,
            eta: 0.15,
            gradient_tol: 1e-6,
            max_iters: 500,
            history_limit: None,
        }
    }
}

/// Errors that can occur when validating a trust-region solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_radius must be finite and positive")]
    MaxRadius,

    #[error("initial_radius must lie in (0, max_radius]")]
    InitialRadius,

    #[error("min_radius must be finite, non-negative, and below initial_radius")]
    MinRadius,

    #[error("eta must lie in [0, 0.25)")]
    Eta,

    #[error("gradient_tol must be finite and positive")]
    GradientTol,
}

impl Config {
    /// Validates the radii, the acceptance threshold, and the tolerance.
    ///
    /// `eta` must stay below the shrink threshold of 0.25 so that every
    /// rejected step also shrinks the radius.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(ConfigError::MaxRadius);
        }
        if !self.initial_radius.is_finite()
            || self.initial_radius <= 0.0
            || self.initial_radius > self.max_radius
        {
            return Err(ConfigError::InitialRadius);
        }
        if !self.min_radius.is_finite()
            || self.min_radius < 0.0
            || self.min_radius >= self.initial_radius
        {
            return Err(ConfigError::MinRadius);
        }
        if !(0.0..0.25).contains(&self.eta) {
            return Err(ConfigError::Eta);
        }
        if !self.gradient_tol.is_finite() || self.gradient_tol <= 0.0 {
            return Err(ConfigError::GradientTol);
        }
        Ok(())
    }
}
