//! The record handed to a writer.

use crate::level::Severity;
use extras_core::{RequestContext, SessionStore};
use std::fmt;

/// One log message with the context it was emitted in.
pub struct LogRecord<'a> {
    pub level: Severity,
    pub message: String,
    pub request: Option<&'a dyn RequestContext>,
    pub session: Option<&'a dyn SessionStore>,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: Severity, message: impl fmt::Display) -> Self {
        Self {
            level,
            message: message.to_string(),
            request: None,
            session: None,
        }
    }

    /// Build a record from the host's numeric level (1 = emergency ... 8 = debug).
    pub fn from_code(code: i64, message: impl fmt::Display) -> Self {
        Self::new(Severity::from_code(code), message)
    }

    pub fn with_request(mut self, request: &'a dyn RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_session(mut self, session: &'a dyn SessionStore) -> Self {
        self.session = Some(session);
        self
    }
}

impl fmt::Debug for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("has_request", &self.request.is_some())
            .field("has_session", &self.session.is_some())
            .finish()
    }
}
