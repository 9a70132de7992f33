//! Defines the chronologically ordered `DateRange` used to bound a historical query.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// An inclusive calendar date window.
///
/// The invariant `start <= end` is enforced by [`DateRange::ordered`], the only
/// way to construct a range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two dates in any order; the earlier date becomes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use weather_enrich::DateRange;
    ///
    /// let later = NaiveDate::from_ymd_opt(2016, 1, 5).unwrap();
    /// let earlier = NaiveDate::from_ymd_opt(2015, 12, 29).unwrap();
    /// let range = DateRange::ordered(later, earlier);
    /// assert_eq!(range.start(), earlier);
    /// assert_eq!(range.end(), later);
    /// ```
    pub fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `start` as an 8-character `YYYYMMDD` string.
    pub fn start_compact(&self) -> String {
        compact_date(self.start)
    }

    /// `end` as an 8-character `YYYYMMDD` string.
    pub fn end_compact(&self) -> String {
        compact_date(self.end)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

pub(crate) fn compact_date(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}
