use crate::error::{CsrfError, Result};
use serde::{Deserialize, Serialize};

/// CSRF guard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Session key and form field name carrying the token
    pub key: String,

    /// Header carrying the token when no form field is submitted
    pub header: String,

    /// Optional secret keying token generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Methods that must present a matching token
    pub protected_methods: Vec<String>,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            key: "csrf_token".to_string(),
            header: "X-CSRFToken".to_string(),
            secret: None,
            protected_methods: vec!["POST".to_string(), "PUT".to_string(), "DELETE".to_string()],
        }
    }
}

impl CsrfConfig {
    /// Create a configuration with the default key and header
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| CsrfError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the session key / form field name
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the header name
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the generation secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Replace the protected methods
    pub fn with_protected_methods(mut self, methods: Vec<String>) -> Self {
        self.protected_methods = methods;
        self
    }

    /// Check that the key and header are usable names.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_name(&self.key) {
            return Err(CsrfError::InvalidConfiguration(format!(
                "invalid key '{}': expected [A-Za-z0-9_-]+",
                self.key
            )));
        }
        if !is_valid_name(&self.header) {
            return Err(CsrfError::InvalidConfiguration(format!(
                "invalid header '{}': expected [A-Za-z0-9_-]+",
                self.header
            )));
        }
        Ok(())
    }

    /// Header name in its normalized lookup form (`X-CSRFToken` -> `X_CSRFTOKEN`).
    pub fn normalized_header(&self) -> String {
        self.header.to_uppercase().replace('-', "_")
    }
}

/// A non-empty string over `[A-Za-z0-9_-]`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
