//! Best-effort date resolution for project records.
//!
//! Producers attach dates to projects in several shapes: machine timestamps,
//! human text such as `"April 7, 2025 08:25 PM"`, or only a capture stamp
//! embedded in the project id (`"<videoId>_<YYYYMMDD>_<HHMMSS>"`). Every
//! function here is pure and total: malformed input yields
//! [`ResolvedDate::Unresolvable`], never a panic.

use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::ProjectRecord;

/// Literal some producers store in `date` when they had no value.
pub const UNKNOWN_DATE_LITERAL: &str = "Unknown";

/// Display form: `April 7, 2025 08:44 PM`.
const DISPLAY_FORMAT: &str = "%B %-d, %Y %I:%M %p";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

static MONTH_DAY_YEAR_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\w+)\s+(\d+),?\s+(\d+)\s+(\d{1,2}):(\d{2})(?:\s*(AM|PM))?")
        .expect("valid regex")
});

static MONTH_DAY_YEAR_AT_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\w+)\s+(\d+),?\s+(\d+)\s+at\s+(\d+):(\d+)\s+(AM|PM)").expect("valid regex")
});

static COMPACT_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})(\d{2})(\d{2})_(\d{2})(\d{2})(\d{2})").expect("valid regex")
});

static COMPACT_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})(\d{2})(\d{2})(\d{2})?(\d{2})?(\d{2})?").expect("valid regex")
});

static SPELLED_OUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s(\d+),?\s(\d{4})").expect("valid regex"));

/// Outcome of resolving a project's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedDate {
    Valid(NaiveDateTime),
    Unresolvable(UnresolvedReason),
}

impl ResolvedDate {
    pub fn valid(self) -> Option<NaiveDateTime> {
        match self {
            ResolvedDate::Valid(value) => Some(value),
            ResolvedDate::Unresolvable(_) => None,
        }
    }
}

/// Why no date could be produced. Each reason has a fixed display sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Nothing usable was supplied.
    Missing,
    /// A date or timestamp was supplied but none of the parsers accepted it.
    Invalid,
    /// The date field holds a media time range instead of a calendar date.
    NotAvailable,
    /// A valid date could not be rendered.
    FormatFailed,
}

impl UnresolvedReason {
    pub fn sentinel(self) -> &'static str {
        match self {
            UnresolvedReason::Missing => "Unknown date",
            UnresolvedReason::Invalid => "Invalid date",
            UnresolvedReason::NotAvailable => "Date not available",
            UnresolvedReason::FormatFailed => "Error formatting date",
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Resolves the best available date for a project.
///
/// Order: `timestamp`, then `date` (machine parse, the two spelled-out
/// patterns, an embedded compact stamp), then the stamp encoded in `id`.
pub fn resolve(record: &ProjectRecord) -> ResolvedDate {
    if let Some(value) = record.timestamp.as_deref().and_then(parse_machine) {
        return ResolvedDate::Valid(value);
    }

    let date = usable_date_text(record.date.as_deref());
    if let Some(value) = date.and_then(parse_date_text) {
        return ResolvedDate::Valid(value);
    }

    if let Some(value) = date_from_id(&record.id) {
        return ResolvedDate::Valid(value);
    }

    let has_timestamp = record
        .timestamp
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());
    let reason = match date {
        Some(text) if is_time_range_object(text) => UnresolvedReason::NotAvailable,
        Some(_) => UnresolvedReason::Invalid,
        None if has_timestamp => UnresolvedReason::Invalid,
        None => UnresolvedReason::Missing,
    };
    ResolvedDate::Unresolvable(reason)
}

/// Parses a free-text `date` value without consulting any other field.
pub fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    parse_machine(text)
        .or_else(|| parse_month_day_year_time(text))
        .or_else(|| parse_month_day_year_at_time(text))
        .or_else(|| parse_compact_stamp(text))
}

/// Derives the capture time from an id shaped like `<videoId>_<YYYYMMDD>[_<HHMMSS>]`.
///
/// The time segment is optional; when absent or malformed the time is midnight.
pub fn date_from_id(id: &str) -> Option<NaiveDateTime> {
    let mut segments = id.split('_');
    segments.next()?;
    let date_part = segments.next()?;
    if date_part.len() != 8 || !is_ascii_digits(date_part) {
        return None;
    }
    let (hour, minute, second) = match segments.next() {
        Some(time) if time.len() == 6 && is_ascii_digits(time) => {
            (&time[0..2], &time[2..4], &time[4..6])
        }
        _ => ("00", "00", "00"),
    };
    build_datetime(
        &date_part[0..4],
        &date_part[4..6],
        &date_part[6..8],
        hour,
        minute,
        second,
    )
}

/// Renders a datetime in the fixed display convention.
pub fn format_datetime(value: NaiveDateTime) -> Result<String, UnresolvedReason> {
    let mut out = String::new();
    write!(out, "{}", value.format(DISPLAY_FORMAT)).map_err(|_| UnresolvedReason::FormatFailed)?;
    Ok(out)
}

/// Display string for a project's date column.
///
/// A `date` that is already spelled out (`"April 7, 2025 ..."`) is shown
/// verbatim; everything else goes through [`resolve`].
pub fn display_date(record: &ProjectRecord) -> String {
    if let Some(text) = record.date.as_deref() {
        if is_spelled_out(text) {
            return text.to_string();
        }
    }
    match resolve(record) {
        ResolvedDate::Valid(value) => {
            format_datetime(value).unwrap_or_else(|reason| reason.sentinel().to_string())
        }
        ResolvedDate::Unresolvable(reason) => reason.sentinel().to_string(),
    }
}

fn usable_date_text(date: Option<&str>) -> Option<&str> {
    date.map(str::trim)
        .filter(|text| !text.is_empty() && *text != UNKNOWN_DATE_LITERAL)
}

fn parse_machine(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_local());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|value| value.naive_local())
}

fn parse_month_day_year_time(text: &str) -> Option<NaiveDateTime> {
    let caps = MONTH_DAY_YEAR_TIME.captures(text)?;
    let month = month_number(&caps[1])?;
    let hour = apply_meridiem(caps[4].parse().ok()?, caps.get(6).map(|m| m.as_str()));
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)?
        .and_hms_opt(hour, caps[5].parse().ok()?, 0)
}

fn parse_month_day_year_at_time(text: &str) -> Option<NaiveDateTime> {
    let caps = MONTH_DAY_YEAR_AT_TIME.captures(text)?;
    let month = month_number(&caps[1])?;
    let hour = apply_meridiem(caps[4].parse().ok()?, Some(&caps[6]));
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)?
        .and_hms_opt(hour, caps[5].parse().ok()?, 0)
}

fn parse_compact_stamp(text: &str) -> Option<NaiveDateTime> {
    let caps = match COMPACT_STAMP.captures(text) {
        Some(caps) => caps,
        None => {
            let segment = text.split('_').nth(1)?;
            COMPACT_SEGMENT.captures(segment)?
        }
    };
    let part = |index: usize| caps.get(index).map_or("00", |m| m.as_str());
    build_datetime(part(1), part(2), part(3), part(4), part(5), part(6))
}

fn build_datetime(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
    second: &str,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?
        .and_hms_opt(hour.parse().ok()?, minute.parse().ok()?, second.parse().ok()?)
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}

fn apply_meridiem(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some(m) if m.eq_ignore_ascii_case("PM") && hour < 12 => hour + 12,
        Some(m) if m.eq_ignore_ascii_case("AM") && hour == 12 => 0,
        _ => hour,
    }
}

fn is_spelled_out(text: &str) -> bool {
    SPELLED_OUT
        .captures_iter(text)
        .any(|caps| month_number(&caps[1]).is_some())
}

fn is_time_range_object(text: &str) -> bool {
    text.contains("'start'") && text.contains("'end'")
}

fn is_ascii_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
