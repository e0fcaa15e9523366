//! Plain-text writer annotated with request details.

use crate::clock::{Clock, SystemClock};
use crate::date_format::format_date;
use crate::error::LogResult;
use crate::record::LogRecord;
use crate::settings::WriterSettings;
use crate::template::substitute;
use crate::writer::{AppendFile, LogWriter};
use extras_core::RequestContext;
use std::sync::Arc;

/// Appends one line per record to a file named after the current date.
///
/// Besides `%label%`, `%date%` and `%message%`, the message format may use
/// request placeholders: `%root_uri%`, `%resurce_uri%` (also spelt
/// `%resource_uri%`), `%content_type%`, `%media_type%`, `%content_charset%`,
/// `%content_length%`, `%host%`, `%host_with_port%`, `%port%`, `%scheme%`,
/// `%path%`, `%url%`, `%ip_address%`, `%referer%` and `%user_agent%`.
/// They are empty when the record carries no request.
pub struct DateTimeFileWriter {
    settings: WriterSettings,
    clock: Arc<dyn Clock>,
    file: AppendFile,
}

impl DateTimeFileWriter {
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

    /// The line that would be written for `record`, without the newline.
    pub fn format(&self, record: &LogRecord<'_>) -> String {
        let now = self.clock.now();
        let mut values = vec![
            ("%label%", record.level.label().to_string()),
            ("%date%", format_date(&self.settings.date_message_format, &now)),
            ("%message%", record.message.clone()),
        ];
        values.extend(request_values(record.request));
        substitute(&self.settings.message_format, &values)
    }
}

fn request_values(request: Option<&dyn RequestContext>) -> Vec<(&'static str, String)> {
    let Some(req) = request else {
        return REQUEST_TOKENS.iter().map(|token| (*token, String::new())).collect();
    };

    let resource_uri = req.resource_uri();
    vec![
        ("%root_uri%", req.root_uri()),
        ("%resurce_uri%", resource_uri.clone()),
        ("%resource_uri%", resource_uri),
        ("%content_type%", req.content_type().unwrap_or_default()),
        ("%media_type%", req.media_type().unwrap_or_default()),
        ("%content_charset%", req.content_charset().unwrap_or_default()),
        ("%content_length%", req.content_length().to_string()),
        ("%host%", req.host()),
        ("%host_with_port%", req.host_with_port()),
        ("%port%", req.port().to_string()),
        ("%scheme%", req.scheme()),
        ("%path%", req.path()),
        ("%url%", req.url()),
        ("%ip_address%", req.ip().unwrap_or_default()),
        ("%referer%", req.referer().unwrap_or_default()),
        ("%user_agent%", req.user_agent().unwrap_or_default()),
    ]
}

const REQUEST_TOKENS: [&str; 16] = [
    "%root_uri%",
    "%resurce_uri%",
    "%resource_uri%",
    "%content_type%",
    "%media_type%",
    "%content_charset%",
    "%content_length%",
    "%host%",
    "%host_with_port%",
    "%port%",
    "%scheme%",
    "%path%",
    "%url%",
    "%ip_address%",
    "%referer%",
    "%user_agent%",
];

impl LogWriter for DateTimeFileWriter {
    fn write(&self, record: &LogRecord<'_>) -> LogResult<()> {
        let line = self.format(record);
        self.file
            .append_line(|| self.settings.file_path(&self.clock.now()), &line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::level::Severity;
    use extras_core::HttpRequest;

    fn writer(format: &str) -> DateTimeFileWriter {
        let clock = FixedClock::parse("2024-03-02T10:15:30+00:00").unwrap();
        DateTimeFileWriter::with_clock(
            WriterSettings::plain().with_message_format(format),
            Arc::new(clock),
        )
    }

    #[test]
    fn test_default_line() {
        let w = writer("%label% - %date% - %message%");
        let record = LogRecord::new(Severity::Error, "disk full");
        assert_eq!(w.format(&record), "ERROR - 2024-03-02T10:15:30+00:00 - disk full");
    }

    #[test]
    fn test_request_placeholders() {
        let req = HttpRequest::new("GET", "/orders/9")
            .with_root_uri("/shop")
            .with_header("Host", "shop.test:8443")
            .with_header("User-Agent", "curl/8.0")
            .with_header("Referer", "https://shop.test/")
            .with_scheme("https")
            .with_port(8443)
            .with_remote_addr("192.0.2.4");
        let w = writer(concat!(
            "%ip_address% %scheme% %host_with_port% %path% ",
            "%resurce_uri% %resource_uri% %url% %user_agent% %referer%",
        ));
        let record = LogRecord::new(Severity::Info, "hit").with_request(&req);

        assert_eq!(
            w.format(&record),
            concat!(
                "192.0.2.4 https shop.test:8443 /shop/orders/9 ",
                "/orders/9 /orders/9 https://shop.test:8443 curl/8.0 https://shop.test/",
            )
        );
    }

    #[test]
    fn test_request_placeholders_empty_without_request() {
        let w = writer("[%host%][%url%][%content_length%] %message%");
        let record = LogRecord::new(Severity::Debug, "boot");
        assert_eq!(w.format(&record), "[][][] boot");
    }

    #[test]
    fn test_message_text_is_not_substituted() {
        let w = writer("%label% %message%");
        let record = LogRecord::new(Severity::Warn, "literal %label% and %host%");
        assert_eq!(w.format(&record), "WARN literal %label% and %host%");
    }
}
