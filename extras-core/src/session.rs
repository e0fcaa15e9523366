//! Session capability.
//!
//! The host owns session storage and lifecycle; add-ons only read and write
//! individual keys through [`SessionStore`].

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Key/value access to the session of the current request.
pub trait SessionStore {
    /// Whether a session has been started for this request.
    fn is_active(&self) -> bool;

    /// Get a value by key.
    fn get(&self, key: &str) -> Option<Value>;

    /// Set a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Value);

    /// Remove a value, returning it if it was present.
    fn remove(&mut self, key: &str) -> Option<Value>;

    /// Get a value as a string. Numbers and booleans are rendered as text;
    /// `null`, arrays and objects are treated as absent.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Session data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// Session data as key-value pairs
    pub data: HashMap<String, Value>,
    /// Session creation timestamp
    pub created_at: DateTime<Utc>,
    /// Session expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with the given ID and TTL.
    ///
    /// A TTL beyond the representable range never expires.
    pub fn new(id: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id: id.into(),
            data: HashMap::new(),
            created_at: now,
            expires_at,
        }
    }

    /// Create a session with a fresh random ID.
    pub fn start(ttl: Duration) -> Self {
        Self::new(generate_session_id(), ttl)
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if a key exists in the session data.
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Clear all session data.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl SessionStore for Session {
    fn is_active(&self) -> bool {
        !self.is_expired()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }
}

/// A session shared between the host and the middleware of one request.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> Session {
        self.inner.lock().clone()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Session> for SessionHandle {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}

impl SessionStore for SessionHandle {
    fn is_active(&self) -> bool {
        self.inner.lock().is_active()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.inner.lock().set(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.lock().remove(key)
    }
}

/// Generate a new unique session ID.
pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_store_roundtrip() {
        let mut session = Session::start(Duration::from_secs(60));
        assert!(session.is_active());

        session.set("user", Value::from("alice"));
        assert_eq!(session.get_string("user"), Some("alice".to_string()));

        assert_eq!(session.remove("user"), Some(Value::from("alice")));
        assert_eq!(session.get("user"), None);
    }

    #[test]
    fn test_expired_session_is_inactive() {
        let mut session = Session::new("s1", Duration::from_secs(60));
        session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        assert!(!session.is_active());
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let unbounded = Session::new("s2", Duration::MAX);
        assert_eq!(unbounded.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(unbounded.is_active());

        // Converts to a chrono duration but overflows the calendar
        let huge = Session::new("s3", Duration::from_secs(9_000_000_000_000_000));
        assert_eq!(huge.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(huge.is_active());
    }

    #[test]
    fn test_get_string_coercion() {
        let mut session = Session::start(Duration::from_secs(60));
        session.set("n", Value::from(7));
        session.set("nothing", Value::Null);
        assert_eq!(session.get_string("n"), Some("7".to_string()));
        assert_eq!(session.get_string("nothing"), None);
    }

    #[test]
    fn test_handle_shares_state() {
        let handle = SessionHandle::new(Session::start(Duration::from_secs(60)));
        let mut writer = handle.clone();
        writer.set("k", Value::from("v"));
        assert_eq!(handle.get_string("k"), Some("v".to_string()));
        assert!(handle.snapshot().contains("k"));
    }
}
