use std::error::Error as StdError;

use super::ConfigError;

/// Errors that can occur during unconstrained minimization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("objective or gradient is not finite at the starting point")]
    NonFiniteStart,

    #[error("objective error: {0}")]
    Objective(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn objective<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Objective(Box::new(err))
    }
}
