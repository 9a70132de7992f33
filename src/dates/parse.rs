//! Permissive calendar-date parsing for report dates.
//!
//! Report dates arrive in whatever shape the source spreadsheet used, so parsing
//! tries a cascade of layouts, most specific first. Ambiguous numeric dates are
//! read month-first (`01/05/2016` is January 5th); when the first number cannot
//! be a month the date is read day-first (`13/05/2016` is May 13th).

use crate::dates::error::InvalidDateError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const DATE_LAYOUTS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
];

const DATETIME_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parses a date string, accepting ISO, compact, month-first and named-month layouts.
///
/// Date-time strings (RFC 3339 or `YYYY-MM-DD HH:MM[:SS]`) are accepted and
/// truncated to their date part.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_enrich::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2016, 1, 5).unwrap();
/// assert_eq!(parse_date("01/05/2016").unwrap(), expected);
/// assert_eq!(parse_date("2016-01-05").unwrap(), expected);
/// assert_eq!(parse_date("January 5, 2016").unwrap(), expected);
/// assert!(parse_date("not-a-date").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, InvalidDateError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(InvalidDateError::new(input));
    }

    if let Some(date) = parse_compact(s) {
        return Ok(date);
    }
    if let Some(date) = parse_numeric(s) {
        return Ok(date);
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
            return Ok(date);
        }
    }
    if let Ok(dt) = s.parse::<DateTime<FixedOffset>>() {
        return Ok(dt.date_naive());
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(dt.date());
        }
    }
    Err(InvalidDateError::new(input))
}

/// `YYYYMMDD`, exactly eight digits.
fn parse_compact(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `M/D/YYYY`, `M-D-YYYY` or `M.D.YYYY`, falling back to `D/M/YYYY` when the
/// month-first reading is impossible. A two-digit year is read as 19xx/20xx.
fn parse_numeric(s: &str) -> Option<NaiveDate> {
    let separator = ['/', '-', '.'].into_iter().find(|c| s.contains(*c))?;
    let parts: Vec<&str> = s.split(separator).collect();
    let [first, second, year] = parts.as_slice() else {
        return None;
    };
    if first.len() > 2 || second.len() > 2 {
        return None;
    }
    let year_spec = match year.len() {
        2 => "%y",
        4 => "%Y",
        _ => return None,
    };
    [("%m", "%d"), ("%d", "%m")]
        .into_iter()
        .find_map(|(a, b)| {
            let layout = format!("{a}{separator}{b}{separator}{year_spec}");
            NaiveDate::parse_from_str(s, &layout).ok()
        })
}
