use thiserror::Error;

use crate::unconstrained;

/// Errors that can occur when validating a constrained solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("the outer iteration limit must be at least 1")]
    OuterIters,

    #[error("the initial parameter must be finite and positive")]
    InitialParameter,

    #[error("growth factor must be finite and greater than 1")]
    Growth,

    #[error("the parameter cap must be finite and at least the initial parameter")]
    MaxParameter,

    #[error("step parameters must satisfy 0 < c1 < 1, 0 < shrink < 1, and initial_step > 0")]
    Step,

    #[error("inner solver: {0}")]
    Inner(#[from] unconstrained::ConfigError),
}

/// The inner solver config used by default: L-BFGS with a tight tolerance.
pub(super) fn default_inner() -> unconstrained::Config {
    unconstrained::Config {
        gradient_tol: 1e-8,
        ..unconstrained::Config::default()
    }
}

pub(super) fn check_tolerance(tolerance: f64) -> Result<(), ConfigError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(ConfigError::Tolerance);
    }
    Ok(())
}

pub(super) fn check_outer_iters(max_outer_iters: usize) -> Result<(), ConfigError> {
    if max_outer_iters == 0 {
        return Err(ConfigError::OuterIters);
    }
    Ok(())
}

/// Checks a geometric schedule `initial · growthᵏ`, optionally capped.
pub(super) fn check_schedule(initial: f64, growth: f64, cap: Option<f64>) -> Result<(), ConfigError> {
    if !initial.is_finite() || initial <= 0.0 {
        return Err(ConfigError::InitialParameter);
    }
    if !growth.is_finite() || growth <= 1.0 {
        return Err(ConfigError::Growth);
    }
    if let Some(cap) = cap
        && (!cap.is_finite() || cap < initial)
    {
        return Err(ConfigError::MaxParameter);
    }
    Ok(())
}
