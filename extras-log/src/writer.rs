//! The writer trait and the append-only file handle the writers share.

use crate::error::LogResult;
use crate::level::Severity;
use crate::record::LogRecord;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// A sink for log records.
pub trait LogWriter: Send + Sync {
    /// Format and persist one record.
    fn write(&self, record: &LogRecord<'_>) -> LogResult<()>;

    /// Write a message with no request or session context.
    fn write_message(&self, level: Severity, message: &str) -> LogResult<()> {
        self.write(&LogRecord::new(level, message))
    }
}

/// A file opened in append mode on first use and kept for the lifetime of
/// the writer. Later writes go to the same file even when the computed name
/// has changed.
#[derive(Debug, Default)]
pub(crate) struct AppendFile {
    file: Mutex<Option<File>>,
}

impl AppendFile {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `line` and a newline. `path` is only consulted when no file is
    /// open yet.
    pub(crate) fn append_line(&self, path: impl FnOnce() -> PathBuf, line: &str) -> LogResult<()> {
        let mut guard = self.file.lock();
        let mut opened = None;

        let file = match &mut *guard {
            Some(file) => file,
            empty => {
                let path = path();
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                opened = Some(path);
                empty.insert(file)
            }
        };

        let result = write_line(file, line);
        drop(guard);

        // Not under the lock: the diagnostic can be routed back into this writer
        if let Some(path) = opened {
            debug!(path = %path.display(), "Opened log file");
        }

        result
    }
}

fn write_line(file: &mut File, line: &str) -> LogResult<()> {
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}
