//! Severity levels.

use std::fmt;

/// Severity of a log record, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warn,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    /// Map the host framework's numeric level (1 = emergency ... 8 = debug).
    ///
    /// Unknown codes are treated as debug.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Severity::Emergency,
            2 => Severity::Alert,
            3 => Severity::Critical,
            4 => Severity::Error,
            5 => Severity::Warn,
            6 => Severity::Notice,
            7 => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// Numeric level as used by the host framework.
    pub fn code(&self) -> i64 {
        match self {
            Severity::Emergency => 1,
            Severity::Alert => 2,
            Severity::Critical => 3,
            Severity::Error => 4,
            Severity::Warn => 5,
            Severity::Notice => 6,
            Severity::Info => 7,
            Severity::Debug => 8,
        }
    }

    /// Canonical label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Alert => "ALERT",
            Severity::Emergency => "EMERGENCY",
        }
    }

    /// Lower-case label, used as the CSS class of HTML rows.
    pub fn css_class(&self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}
