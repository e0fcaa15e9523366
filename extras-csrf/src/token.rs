use crate::error::{CsrfError, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// An anti-forgery token as stored in the session.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken {
    value: String,
}

impl CsrfToken {
    /// Generate a new token.
    ///
    /// With a secret the token is an HMAC-SHA256 over a random 32-bit nonce;
    /// without one it is a SHA-256 digest of `environment` followed by the
    /// nonce. Either way the result is URL-safe base64.
    pub fn generate(secret: Option<&[u8]>, environment: &str) -> Result<Self> {
        let nonce: u32 = rand::rng().random();

        let digest = match secret {
            Some(secret) => {
                let mut mac = HmacSha256::new_from_slice(secret)
                    .map_err(|e| CsrfError::GenerationFailed(e.to_string()))?;
                mac.update(&nonce.to_be_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            None => {
                let mut hasher = Sha256::new();
                hasher.update(environment.as_bytes());
                hasher.update(nonce.to_be_bytes());
                hasher.finalize().to_vec()
            }
        };

        Ok(Self {
            value: URL_SAFE_NO_PAD.encode(digest),
        })
    }

    /// Wrap a value read back from the session.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Compare a submitted candidate against this token in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.value.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

// Keep token values out of debug output and logs
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfToken").field("value", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation() {
        let token = CsrfToken::generate(None, "GET /form").unwrap();
        // 32 byte digest, unpadded base64
        assert_eq!(token.as_str().len(), 43);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_token_with_secret() {
        let token = CsrfToken::generate(Some(b"secret"), "").unwrap();
        assert_eq!(token.as_str().len(), 43);
    }

    #[test]
    fn test_tokens_differ() {
        let a = CsrfToken::generate(None, "env").unwrap();
        let b = CsrfToken::generate(None, "env").unwrap();
        // 2^-32 chance of a nonce collision
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches() {
        let token = CsrfToken::from_stored("abc123");
        assert!(token.matches("abc123"));
        assert!(!token.matches("abc124"));
        assert!(!token.matches("abc12"));
        assert!(!token.matches(""));
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = CsrfToken::from_stored("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
