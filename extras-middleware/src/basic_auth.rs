//! HTTP Basic authentication.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use extras_core::{Error, HttpRequest, HttpResponse, Middleware, Next};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Verifies a user name and password.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// A fixed set of user name and password pairs.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }
}

#[async_trait]
impl Authenticator for StaticCredentials {
    async fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| constant_time_eq(expected.as_bytes(), password.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Credentials carried by an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode the value of an `Authorization` header.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Requires valid Basic credentials before the request continues.
///
/// Requests without credentials, with an empty user name or password, or
/// with credentials the authenticator rejects get `401 Unauthorized` and a
/// `WWW-Authenticate` challenge for the configured realm.
#[derive(Clone)]
pub struct BasicAuthMiddleware {
    realm: String,
    authenticator: Arc<dyn Authenticator>,
}

impl BasicAuthMiddleware {
    pub fn new(realm: impl Into<String>, authenticator: impl Authenticator + 'static) -> Self {
        Self {
            realm: realm.into(),
            authenticator: Arc::new(authenticator),
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    fn challenge(&self) -> HttpResponse {
        HttpResponse::unauthorized()
            .with_header("WWW-Authenticate", format!("Basic realm=\"{}\"", self.realm))
    }
}

#[async_trait]
impl Middleware for BasicAuthMiddleware {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, Error> {
        let credentials = req
            .header("Authorization")
            .and_then(|value| BasicCredentials::from_header(value))
            .filter(|c| !c.username.is_empty() && !c.password.is_empty());

        let Some(credentials) = credentials else {
            debug!(path = %req.path, "Missing basic credentials");
            return Ok(self.challenge());
        };

        if self
            .authenticator
            .authenticate(&credentials.username, &credentials.password)
            .await
        {
            next(req).await
        } else {
            warn!(
                username = %credentials.username,
                path = %req.path,
                "Basic authentication failed"
            );
            Ok(self.challenge())
        }
    }
}
