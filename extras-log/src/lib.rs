//! Armature Extras Log Writers
//!
//! Log writers that append to a file named after the current date, so logs
//! rotate on their own as the date moves on.
//!
//! # Writers
//!
//! - [`DateTimeFileWriter`]: plain text lines, with optional request details
//! - [`HtmlFileWriter`]: rows of a styled HTML table
//! - [`UserControlFileWriter`]: plain text lines tagged with the session user
//!
//! Each writer opens its file on the first record and keeps writing to it
//! for as long as the instance lives. A new instance picks up the new date.
//!
//! # Usage
//!
//! ```rust,no_run
//! use extras_log::{DateTimeFileWriter, LogRecord, LogWriter, Severity, WriterSettings};
//!
//! let writer = DateTimeFileWriter::new(
//!     WriterSettings::plain()
//!         .with_path("/var/log/app")
//!         .with_message_format("%label% [%ip_address%] %message%"),
//! );
//!
//! writer.write_message(Severity::Error, "disk full").unwrap();
//! ```
//!
//! # Settings
//!
//! | Setting | Default | |
//! |---|---|---|
//! | `path` | `./logs` | directory, trailing separators ignored |
//! | `name_format` | `Y-m-d` | `date()`-style file name pattern |
//! | `extension` | `log` (`html`) | omitted with its dot when empty |
//! | `date_message_format` | `c` | pattern for `%date%` |
//! | `message_format` | `%label% - %date% - %message%` | line or row template |
//! | `username` | empty | session key for `%username%` |

pub mod bridge;
pub mod clock;
pub mod date_format;
pub mod datetime;
pub mod error;
pub mod html;
pub mod level;
pub mod record;
pub mod settings;
pub mod template;
pub mod user;
pub mod writer;

pub use bridge::LogWriterBridge;
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_format::format_date;
pub use datetime::DateTimeFileWriter;
pub use error::{LogError, LogResult};
pub use html::{HTML_SKELETON, HtmlFileWriter, escape_html};
pub use level::Severity;
pub use record::LogRecord;
pub use settings::{DEFAULT_HTML_ROW_FORMAT, DEFAULT_MESSAGE_FORMAT, WriterSettings};
pub use user::UserControlFileWriter;
pub use writer::LogWriter;
