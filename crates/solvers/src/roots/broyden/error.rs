use std::error::Error as StdError;

use super::ConfigError;

/// Errors that can occur while solving a nonlinear system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("residuals are not finite at the starting point")]
    NonFiniteStart,

    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
