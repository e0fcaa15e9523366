//! HTML table writer.
//!
//! Each log file is a small HTML document with a styled table. Rows are
//! appended to the element with id `log` (the skeleton's `<tbody id="log">`)
//! and the whole document is rewritten on every record, so earlier rows
//! survive restarts.

use crate::clock::{Clock, SystemClock};
use crate::date_format::format_date;
use crate::error::{LogError, LogResult};
use crate::record::LogRecord;
use crate::settings::WriterSettings;
use crate::template::substitute;
use crate::writer::LogWriter;
use parking_lot::Mutex;
use scraper::{Html, Selector};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Document written to a log file that does not exist yet.
pub const HTML_SKELETON: &str = concat!(
    r#"<html><head><title>Logger</title><style type="text/css">"#,
    ".emergency{color:#FF0000;} .alert{color:#FF0000;} .critical{color:#D80000;} ",
    ".error{color:#B00000;} .warn{color:#880000;} .notice{color:#600000;} ",
    ".info{color:#380000;} .debug{color:#080000;}",
    "</style></head><body><table border=\"1\"><thead><tr><th>Label</th><th>Date</th>",
    r#"<th>Message</th></tr></thead><tbody id="log"></tbody></table></body></html>"#,
);

const CONTAINER_SELECTOR: &str = "#log";

/// Writes records as rows of an HTML table.
///
/// Message formats may use `%label%`, `%date%` and `%message%` (escaped for
/// HTML) and `%class%`, the lower-case label.
pub struct HtmlFileWriter {
    settings: WriterSettings,
    clock: Arc<dyn Clock>,
    document: Mutex<Option<HtmlLog>>,
}

impl HtmlFileWriter {
    pub fn new(settings: WriterSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: WriterSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings: settings.normalized(),
            clock,
            document: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// The row markup for `record`.
    pub fn format(&self, record: &LogRecord<'_>) -> String {
        let now = self.clock.now();
        let values = [
            ("%label%", escape_html(record.level.label())),
            (
                "%date%",
                escape_html(&format_date(&self.settings.date_message_format, &now)),
            ),
            ("%message%", escape_html(&record.message)),
            ("%class%", record.level.css_class()),
        ];
        substitute(&self.settings.message_format, &values)
    }
}

impl LogWriter for HtmlFileWriter {
    fn write(&self, record: &LogRecord<'_>) -> LogResult<()> {
        let row = self.format(record);
        let mut guard = self.document.lock();
        let mut opened = None;

        let log = match &mut *guard {
            Some(log) => log,
            empty => {
                let path = self.settings.file_path(&self.clock.now());
                let (log, existed) = HtmlLog::open(path)?;
                opened = Some((log.path.clone(), existed));
                empty.insert(log)
            }
        };

        let result = log.append(&row);
        drop(guard);

        // Not under the lock: the diagnostic can be routed back into this writer
        match opened {
            Some((path, true)) => debug!(path = %path.display(), "Loaded HTML log"),
            Some((path, false)) => debug!(path = %path.display(), "Started new HTML log"),
            None => {}
        }

        result
    }
}

/// An HTML log document split around the contents of its row container.
#[derive(Debug)]
struct HtmlLog {
    path: PathBuf,
    head: String,
    rows: String,
    tail: String,
}

impl HtmlLog {
    /// Load the document at `path`, or start from the skeleton when the file
    /// does not exist. The flag tells whether the file existed.
    fn open(path: PathBuf) -> LogResult<(Self, bool)> {
        let (source, existed) = match fs::read_to_string(&path) {
            Ok(source) => (source, true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (HTML_SKELETON.to_string(), false),
            Err(e) => return Err(e.into()),
        };
        Ok((Self::parse(path, &source)?, existed))
    }

    fn parse(path: PathBuf, source: &str) -> LogResult<Self> {
        let document = Html::parse_document(source);
        let selector =
            Selector::parse(CONTAINER_SELECTOR).map_err(|e| LogError::Document(e.to_string()))?;
        let container = document.select(&selector).next().ok_or_else(|| {
            LogError::Document(format!(
                "{} has no element with id \"log\"",
                path.display()
            ))
        })?;

        let serialized = document.html();
        let outer = container.html();
        let rows = container.inner_html();
        let close_tag = format!("</{}>", container.value().name());

        let start = serialized
            .find(&outer)
            .ok_or_else(|| LogError::Document("row container not found in document".into()))?;
        let open_len = outer
            .len()
            .checked_sub(rows.len() + close_tag.len())
            .ok_or_else(|| LogError::Document("malformed row container".into()))?;
        let rows_start = start + open_len;
        let rows_end = rows_start + rows.len();

        Ok(Self {
            head: serialized[..rows_start].to_string(),
            tail: serialized[rows_end..].to_string(),
            rows,
            path,
        })
    }

    fn append(&mut self, row: &str) -> LogResult<()> {
        self.rows.push_str(&normalize_row(row));
        self.save(&self.path)
    }

    fn save(&self, path: &Path) -> LogResult<()> {
        let mut out = String::with_capacity(self.head.len() + self.rows.len() + self.tail.len());
        out.push_str(&self.head);
        out.push_str(&self.rows);
        out.push_str(&self.tail);
        fs::write(path, out)?;
        Ok(())
    }
}

/// Re-serialize row markup the way the HTML parser would place it inside a
/// table body. Markup that does not survive as table content is kept as is.
fn normalize_row(row: &str) -> String {
    let fragment = Html::parse_fragment(&format!("<table><tbody>{row}</tbody></table>"));
    let normalized = Selector::parse("tbody")
        .ok()
        .and_then(|selector| fragment.select(&selector).next().map(|body| body.inner_html()))
        .unwrap_or_default();

    if normalized.trim().is_empty() {
        row.to_string()
    } else {
        normalized
    }
}

/// Escape the characters significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
