//! Middleware configuration errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiddlewareError>;

#[derive(Debug, Error)]
pub enum MiddlewareError {
    #[error("Invalid secured path pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<MiddlewareError> for extras_core::Error {
    fn from(error: MiddlewareError) -> Self {
        extras_core::Error::Internal(error.to_string())
    }
}
