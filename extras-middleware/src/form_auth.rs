//! Session-based form authentication.

use crate::error::{MiddlewareError, Result};
use async_trait::async_trait;
use extras_core::{Error, HttpRequest, HttpResponse, Middleware, Next, RequestContext, SessionStore};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Form authentication settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAuthConfig {
    /// Where anonymous visitors of secured paths are sent
    pub login_url: String,

    /// Session key that is set once the user has logged in
    pub session_key: String,

    /// Secured path patterns. Each is a regular expression matched against
    /// the whole resource path; a trailing `/` is optional.
    pub secured_paths: Vec<String>,
}

impl Default for FormAuthConfig {
    fn default() -> Self {
        Self {
            login_url: "/".to_string(),
            session_key: "user".to_string(),
            secured_paths: Vec::new(),
        }
    }
}

impl FormAuthConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| MiddlewareError::InvalidConfiguration(e.to_string()))
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    pub fn secure(mut self, pattern: impl Into<String>) -> Self {
        self.secured_paths.push(pattern.into());
        self
    }
}

/// Redirects anonymous requests for secured paths to the login page.
#[derive(Debug, Clone)]
pub struct FormAuthMiddleware {
    config: FormAuthConfig,
    patterns: Vec<Regex>,
}

impl FormAuthMiddleware {
    /// Compile the secured path patterns.
    pub fn new(config: FormAuthConfig) -> Result<Self> {
        if config.session_key.is_empty() {
            return Err(MiddlewareError::InvalidConfiguration(
                "session key must not be empty".to_string(),
            ));
        }

        let patterns = config
            .secured_paths
            .iter()
            .map(|path| compile_pattern(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &FormAuthConfig {
        &self.config
    }

    /// Whether `path` falls under a secured pattern.
    pub fn is_secured(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    fn is_logged_in(&self, req: &HttpRequest) -> bool {
        req.session.as_ref().is_some_and(|session| {
            session.is_active()
                && session
                    .get_string(&self.config.session_key)
                    .is_some_and(|value| !value.is_empty())
        })
    }
}

fn compile_pattern(path: &str) -> Result<Regex> {
    let optional_slash = if path.ends_with('/') { "?" } else { "" };
    let anchored = format!("^(?:{path}{optional_slash})$");
    Regex::new(&anchored).map_err(|source| MiddlewareError::InvalidPattern {
        pattern: path.to_string(),
        source,
    })
}

#[async_trait]
impl Middleware for FormAuthMiddleware {
    async fn handle(
        &self,
        req: HttpRequest,
        next: Next,
    ) -> std::result::Result<HttpResponse, Error> {
        if self.is_secured(&req.path)
            && !self.is_logged_in(&req)
            && RequestContext::path(&req) != self.config.login_url
        {
            debug!(path = %req.path, login_url = %self.config.login_url, "Redirecting to login");
            return Ok(HttpResponse::redirect(self.config.login_url.clone()));
        }

        next(req).await
    }
}
