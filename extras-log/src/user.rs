//! Plain-text writer annotated with the logged-in user.

use crate::clock::{Clock, SystemClock};
use crate::date_format::format_date;
use crate::error::LogResult;
use crate::record::LogRecord;
use crate::settings::WriterSettings;
use crate::template::substitute;
use crate::writer::{AppendFile, LogWriter};
use std::sync::Arc;

/// Appends one line per record, resolving `%username%` from the session key
/// named by the `username` setting.
pub struct UserControlFileWriter {
    settings: WriterSettings,
    clock: Arc<dyn Clock>,
    file: AppendFile,
}

impl UserControlFileWriter {
    pub fn new(settings: WriterSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: WriterSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings: settings.normalized(),
            clock,
            file: AppendFile::new(),
        }
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// The user name for `record`, empty when it cannot be resolved.
    pub fn username(&self, record: &LogRecord<'_>) -> String {
        record
            .session
            .and_then(|session| session.get_string(&self.settings.username))
            .unwrap_or_default()
    }

    /// The line that would be written for `record`, without the newline.
    pub fn format(&self, record: &LogRecord<'_>) -> String {
        let now = self.clock.now();
        let values = [
            ("%label%", record.level.label().to_string()),
            ("%date%", format_date(&self.settings.date_message_format, &now)),
            ("%message%", record.message.clone()),
            ("%username%", self.username(record)),
        ];
        substitute(&self.settings.message_format, &values)
    }
}

impl LogWriter for UserControlFileWriter {
    fn write(&self, record: &LogRecord<'_>) -> LogResult<()> {
        let line = self.format(record);
        self.file
            .append_line(|| self.settings.file_path(&self.clock.now()), &line)
    }
}
