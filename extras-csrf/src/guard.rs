use crate::config::CsrfConfig;
use crate::error::{CsrfError, Result};
use crate::token::CsrfToken;
use extras_core::{RequestContext, SessionStore, ViewContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// View key holding the token field name
pub const VIEW_KEY: &str = "csrf_key";
/// View key holding the token value
pub const VIEW_TOKEN: &str = "csrf_token";
/// View key holding the header name
pub const VIEW_HEADER: &str = "csrf_header";

/// Issues, stores and validates the per-session anti-forgery token.
///
/// Tokens are single use: a successful check on a protected method removes
/// the stored token, so the next protected request needs a freshly rendered
/// page.
#[derive(Debug, Clone)]
pub struct CsrfGuard {
    config: Arc<CsrfConfig>,
    normalized_header: String,
    protected_methods: Vec<String>,
}

impl CsrfGuard {
    /// Create a guard, validating the configuration eagerly.
    pub fn new(config: CsrfConfig) -> Result<Self> {
        config.validate()?;
        let normalized_header = config.normalized_header();
        let protected_methods = config
            .protected_methods
            .iter()
            .map(|m| m.to_uppercase())
            .collect();

        Ok(Self {
            config: Arc::new(config),
            normalized_header,
            protected_methods,
        })
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn header(&self) -> &str {
        &self.config.header
    }

    /// Whether requests with this method must present the token.
    pub fn needs_validation(&self, method: &str) -> bool {
        self.protected_methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Return the stored token, generating and storing one if none exists.
    pub fn ensure_token<R, S>(&self, request: &R, session: &mut S) -> Result<CsrfToken>
    where
        R: RequestContext + ?Sized,
        S: SessionStore + ?Sized,
    {
        if !session.is_active() {
            return Err(CsrfError::SessionRequired);
        }

        if let Some(Value::String(stored)) = session.get(self.key()) {
            return Ok(CsrfToken::from_stored(stored));
        }

        let secret = self.config.secret.as_deref().map(str::as_bytes);
        let token = CsrfToken::generate(secret, &environment_fingerprint(request))?;
        session.set(self.key(), Value::String(token.as_str().to_string()));
        debug!(key = %self.key(), "Issued CSRF token");
        Ok(token)
    }

    /// Run the pre-dispatch check for one request.
    ///
    /// Validates protected methods against the stored token (consuming it on
    /// success) and then exposes the key, token and header to the view.
    pub fn check<R, S, V>(&self, request: &R, session: &mut S, view: &mut V) -> Result<()>
    where
        R: RequestContext + ?Sized,
        S: SessionStore + ?Sized,
        V: ViewContext + ?Sized,
    {
        let token = self.ensure_token(request, session)?;

        if self.needs_validation(request.method()) {
            let candidate = self.candidate_token(request);
            let valid = candidate
                .as_deref()
                .is_some_and(|candidate| token.matches(candidate));

            if !valid {
                warn!(
                    method = %request.method(),
                    path = %request.path(),
                    token_present = candidate.is_some(),
                    "Rejected request with invalid CSRF token"
                );
                return Err(CsrfError::TokenMismatch);
            }

            session.remove(self.key());
            debug!(key = %self.key(), "Consumed CSRF token");
        }

        view.assign(VIEW_KEY, Value::String(self.key().to_string()));
        view.assign(VIEW_TOKEN, Value::String(token.into_string()));
        view.assign(VIEW_HEADER, Value::String(self.header().to_string()));
        Ok(())
    }

    /// The submitted token: the body field first, then the header.
    fn candidate_token<R: RequestContext + ?Sized>(&self, request: &R) -> Option<String> {
        request
            .body_field(self.key())
            .or_else(|| request.header(&self.normalized_header))
    }
}

/// Request state mixed into token generation when no secret is configured.
fn environment_fingerprint<R: RequestContext + ?Sized>(request: &R) -> String {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    format!(
        "{}|{}{}|{}|{}|{}|{}",
        request.method(),
        request.url(),
        request.path(),
        request.ip().unwrap_or_default(),
        request.user_agent().unwrap_or_default(),
        request.referer().unwrap_or_default(),
        nanos
    )
}
