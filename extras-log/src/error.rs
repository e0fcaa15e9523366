//! Error types for the log writers.

use thiserror::Error;

/// Result type for log writer operations.
pub type LogResult<T> = Result<T, LogError>;

/// Log writer errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file could not be opened, read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTML log document could not be parsed or lacks its row container
    #[error("Document error: {0}")]
    Document(String),

    /// Invalid writer settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LogError> for extras_core::Error {
    fn from(error: LogError) -> Self {
        match error {
            LogError::Io(e) => extras_core::Error::Io(e),
            other => extras_core::Error::Internal(other.to_string()),
        }
    }
}
