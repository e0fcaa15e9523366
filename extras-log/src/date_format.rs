//! Date patterns in the style of PHP's `date()`.
//!
//! Log file names and message dates are configured with single-letter
//! patterns such as `Y-m-d` or `c`. A backslash makes the next character
//! literal; characters without a meaning are copied through.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};

/// Format `at` according to `pattern`.
pub fn format_date(pattern: &str, at: &DateTime<FixedOffset>) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
            continue;
        }

        match expand(c, at) {
            Some(piece) => out.push_str(&piece),
            None => out.push(c),
        }
    }

    out
}

fn expand(c: char, at: &DateTime<FixedOffset>) -> Option<String> {
    let piece = match c {
        // Day
        'd' => format!("{:02}", at.day()),
        'D' => at.format("%a").to_string(),
        'j' => at.day().to_string(),
        'l' => at.format("%A").to_string(),
        'N' => at.weekday().number_from_monday().to_string(),
        'S' => ordinal_suffix(at.day()).to_string(),
        'w' => at.weekday().num_days_from_sunday().to_string(),
        'z' => at.ordinal0().to_string(),

        // Week
        'W' => format!("{:02}", at.iso_week().week()),

        // Month
        'F' => at.format("%B").to_string(),
        'm' => format!("{:02}", at.month()),
        'M' => at.format("%b").to_string(),
        'n' => at.month().to_string(),
        't' => days_in_month(at.year(), at.month()).to_string(),

        // Year
        'L' => u8::from(days_in_month(at.year(), 2) == 29).to_string(),
        'o' => at.iso_week().year().to_string(),
        'Y' => format!("{:04}", at.year()),
        'y' => format!("{:02}", at.year().rem_euclid(100)),

        // Time
        'a' => if at.hour() < 12 { "am" } else { "pm" }.to_string(),
        'A' => if at.hour() < 12 { "AM" } else { "PM" }.to_string(),
        'g' => at.hour12().1.to_string(),
        'G' => at.hour().to_string(),
        'h' => format!("{:02}", at.hour12().1),
        'H' => format!("{:02}", at.hour()),
        'i' => format!("{:02}", at.minute()),
        's' => format!("{:02}", at.second()),
        'u' => format!("{:06}", (at.nanosecond() % 1_000_000_000) / 1_000),
        'v' => format!("{:03}", (at.nanosecond() % 1_000_000_000) / 1_000_000),

        // Time zone
        'e' | 'T' => zone_name(at),
        'I' => "0".to_string(),
        'O' => at.format("%z").to_string(),
        'P' => at.format("%:z").to_string(),
        'p' if at.offset().local_minus_utc() == 0 => "Z".to_string(),
        'p' => at.format("%:z").to_string(),
        'Z' => at.offset().local_minus_utc().to_string(),

        // Full date/time
        'c' => at.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        'r' => at.to_rfc2822(),
        'U' => at.timestamp().to_string(),

        _ => return None,
    };
    Some(piece)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

// Fixed offsets carry no zone name
fn zone_name(at: &DateTime<FixedOffset>) -> String {
    if at.offset().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        at.format("%:z").to_string()
    }
}
