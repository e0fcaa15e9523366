use thiserror::Error;

/// Body of the 400 response sent when a state-changing request carries no
/// valid token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or missing CSRF token.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("Invalid CSRF configuration: {0}")]
    InvalidConfiguration(String),

    #[error("A session is required to use the CSRF guard")]
    SessionRequired,

    #[error("Invalid or missing CSRF token.")]
    TokenMismatch,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

pub type Result<T> = std::result::Result<T, CsrfError>;

impl From<CsrfError> for extras_core::Error {
    fn from(error: CsrfError) -> Self {
        match error {
            CsrfError::TokenMismatch => {
                extras_core::Error::BadRequest(INVALID_TOKEN_MESSAGE.to_string())
            }
            CsrfError::SessionRequired => extras_core::Error::Session(error.to_string()),
            other => extras_core::Error::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_maps_to_bad_request() {
        let error: extras_core::Error = CsrfError::TokenMismatch.into();
        assert_eq!(error.status_code(), 400);
        assert_eq!(error.public_message(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn test_session_required_is_server_error() {
        let error: extras_core::Error = CsrfError::SessionRequired.into();
        assert!(error.is_server_error());
    }
}
