//! Backing the `log` crate facade with a rotating writer.

use crate::level::Severity;
use crate::record::LogRecord;
use crate::writer::LogWriter;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::cell::Cell;

thread_local! {
    // Set while this thread is inside a bridged writer. Records emitted from
    // there are dropped rather than fed back into the writer.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// Adapts any [`LogWriter`] to [`log::Log`].
///
/// ```no_run
/// use extras_log::{DateTimeFileWriter, LogWriterBridge, WriterSettings};
///
/// let writer = DateTimeFileWriter::new(WriterSettings::plain());
/// LogWriterBridge::new(writer)
///     .with_max_level(log::LevelFilter::Info)
///     .install()
///     .unwrap();
///
/// log::info!("service started");
/// ```
pub struct LogWriterBridge<W> {
    writer: W,
    max_level: LevelFilter,
}

impl<W: LogWriter> LogWriterBridge<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_level: LevelFilter::Trace,
        }
    }

    pub fn with_max_level(mut self, level: LevelFilter) -> Self {
        self.max_level = level;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Register as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError>
    where
        W: 'static,
    {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl<W: LogWriter> Log for LogWriterBridge<W> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if WRITING.with(Cell::get) {
            return;
        }

        let entry = LogRecord::new(Severity::from(record.level()), record.args());
        WRITING.with(|writing| writing.set(true));
        let result = self.writer.write(&entry);
        WRITING.with(|writing| writing.set(false));

        if let Err(e) = result {
            // The logger has nowhere else to report its own failures
            eprintln!("log writer failed: {e}");
        }
    }

    fn flush(&self) {}
}
