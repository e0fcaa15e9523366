//! Writer settings.

use crate::date_format::format_date;
use crate::error::{LogError, LogResult};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{PathBuf, MAIN_SEPARATOR};

/// Default message format of the plain and user-annotated writers.
pub const DEFAULT_MESSAGE_FORMAT: &str = "%label% - %date% - %message%";

/// Default row format of the HTML writer.
pub const DEFAULT_HTML_ROW_FORMAT: &str =
    r#"<tr class="%class%"><td>%label%</td><td>%date%</td><td>%message%</td></tr>"#;

/// Settings shared by all rotating writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterSettings {
    /// Directory holding the log files
    pub path: String,

    /// Date pattern producing the file name
    pub name_format: String,

    /// File extension, without the dot
    pub extension: String,

    /// Date pattern used for `%date%`
    pub date_message_format: String,

    /// Line or row template
    pub message_format: String,

    /// Session key holding the user name
    pub username: String,
}

/// Partial settings read from configuration. Present fields replace the
/// variant defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsOverrides {
    path: Option<String>,
    name_format: Option<String>,
    extension: Option<String>,
    date_message_format: Option<String>,
    message_format: Option<String>,
    username: Option<String>,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self::plain()
    }
}

impl WriterSettings {
    /// Defaults of the plain-text writer.
    pub fn plain() -> Self {
        Self {
            path: "./logs".to_string(),
            name_format: "Y-m-d".to_string(),
            extension: "log".to_string(),
            date_message_format: "c".to_string(),
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
            username: String::new(),
        }
    }

    /// Defaults of the HTML writer.
    pub fn html() -> Self {
        Self {
            extension: "html".to_string(),
            message_format: DEFAULT_HTML_ROW_FORMAT.to_string(),
            ..Self::plain()
        }
    }

    /// Defaults of the user-annotated writer.
    pub fn user_control() -> Self {
        Self::plain()
    }

    /// Plain-text settings overridden by a TOML document.
    pub fn from_toml_str(source: &str) -> LogResult<Self> {
        Self::plain().merge_toml(source)
    }

    /// Replace the fields present in a TOML document, keeping the rest.
    pub fn merge_toml(self, source: &str) -> LogResult<Self> {
        let overrides: SettingsOverrides =
            toml::from_str(source).map_err(|e| LogError::Config(e.to_string()))?;
        Ok(self.merge(overrides))
    }

    fn merge(self, overrides: SettingsOverrides) -> Self {
        Self {
            path: overrides.path.unwrap_or(self.path),
            name_format: overrides.name_format.unwrap_or(self.name_format),
            extension: overrides.extension.unwrap_or(self.extension),
            date_message_format: overrides
                .date_message_format
                .unwrap_or(self.date_message_format),
            message_format: overrides.message_format.unwrap_or(self.message_format),
            username: overrides.username.unwrap_or(self.username),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_name_format(mut self, format: impl Into<String>) -> Self {
        self.name_format = format.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_date_message_format(mut self, format: impl Into<String>) -> Self {
        self.date_message_format = format.into();
        self
    }

    pub fn with_message_format(mut self, format: impl Into<String>) -> Self {
        self.message_format = format.into();
        self
    }

    /// Set the session key read for `%username%`.
    pub fn with_username_key(mut self, key: impl Into<String>) -> Self {
        self.username = key.into();
        self
    }

    /// Settings with trailing path separators removed.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.path.trim_end_matches(['/', MAIN_SEPARATOR]);
        if trimmed.is_empty() && !self.path.is_empty() {
            // The filesystem root itself
            self.path = self.path[..1].to_string();
        } else {
            self.path = trimmed.to_string();
        }
        self
    }

    /// File name for the given instant, e.g. `2024-03-02.log`.
    pub fn file_name(&self, now: &DateTime<FixedOffset>) -> String {
        let mut name = format_date(&self.name_format, now);
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        name
    }

    /// Full path of the log file for the given instant.
    pub fn file_path(&self, now: &DateTime<FixedOffset>) -> PathBuf {
        PathBuf::from(&self.path).join(self.file_name(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_second() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-02T10:15:30+00:00").unwrap()
    }

    #[test]
    fn test_variant_defaults() {
        let plain = WriterSettings::plain();
        assert_eq!(plain.path, "./logs");
        assert_eq!(plain.name_format, "Y-m-d");
        assert_eq!(plain.extension, "log");
        assert_eq!(plain.date_message_format, "c");
        assert_eq!(plain.message_format, "%label% - %date% - %message%");

        let html = WriterSettings::html();
        assert_eq!(html.extension, "html");
        assert!(html.message_format.starts_with("<tr class=\"%class%\">"));

        assert_eq!(WriterSettings::user_control().username, "");
    }

    #[test]
    fn test_file_name() {
        let settings = WriterSettings::plain();
        assert_eq!(settings.file_name(&march_second()), "2024-03-02.log");

        let bare = settings.with_extension("");
        assert_eq!(bare.file_name(&march_second()), "2024-03-02");
    }

    #[test]
    fn test_trailing_separators_stripped() {
        let settings = WriterSettings::plain().with_path("/var/log/app///").normalized();
        assert_eq!(settings.path, "/var/log/app");
        assert_eq!(
            settings.file_path(&march_second()),
            PathBuf::from("/var/log/app/2024-03-02.log")
        );

        let root = WriterSettings::plain().with_path("/").normalized();
        assert_eq!(root.path, "/");
    }

    #[test]
    fn test_merge_toml_keeps_variant_defaults() {
        let settings = WriterSettings::html()
            .merge_toml("path = \"/tmp/logs\"\nname_format = \"Y-m\"")
            .unwrap();
        assert_eq!(settings.path, "/tmp/logs");
        assert_eq!(settings.name_format, "Y-m");
        assert_eq!(settings.extension, "html");
        assert_eq!(settings.message_format, DEFAULT_HTML_ROW_FORMAT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = WriterSettings::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, LogError::Config(_)));
    }
}
