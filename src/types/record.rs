//! Input and output row types of the enrichment pipeline.

use crate::types::parameter::{StatKey, STAT_COLUMN_COUNT};
use std::fmt;
use std::fmt::{Display, Formatter};

/// One source row: a dated, geolocated report.
///
/// Coordinates are kept as the input strings and passed verbatim to the
/// remote query; no validation is performed on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub report_date: String,
    pub location: String,
    pub lat: String,
    pub lon: String,
}

impl InputRecord {
    pub fn new(
        report_date: impl Into<String>,
        location: impl Into<String>,
        lat: impl Into<String>,
        lon: impl Into<String>,
    ) -> Self {
        Self {
            report_date: report_date.into(),
            location: location.into(),
            lat: lat.into(),
            lon: lon.into(),
        }
    }
}

/// A single statistic cell of an [`OutputRow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    /// Computed from a successfully fetched series.
    Computed(f64),
    /// Substituted because the fetch failed or the statistic was missing.
    ZeroFilled,
}

impl StatValue {
    pub fn is_zero_filled(&self) -> bool {
        matches!(self, StatValue::ZeroFilled)
    }
}

/// Integral values print without a fractional part (`26`, not `26.0`).
impl Display for StatValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Computed(v) => write!(f, "{}", v),
            StatValue::ZeroFilled => f.write_str("0"),
        }
    }
}

/// An enriched record: the four identity fields followed by 15 statistics in
/// canonical order (see [`StatKey::canonical`]).
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub report_date: String,
    pub location: String,
    pub lat: String,
    pub lon: String,
    pub stats: [StatValue; STAT_COLUMN_COUNT],
}

impl OutputRow {
    /// Column names of the output file.
    pub fn header() -> Vec<String> {
        ["report_date", "location", "lat", "long"]
            .into_iter()
            .map(String::from)
            .chain(StatKey::canonical().map(|k| k.column_name()))
            .collect()
    }

    /// A row whose statistics are all zero-filled, identity fields copied from `record`.
    pub fn zero_filled(record: &InputRecord) -> Self {
        Self::with_stats(record, [StatValue::ZeroFilled; STAT_COLUMN_COUNT])
    }

    pub fn with_stats(record: &InputRecord, stats: [StatValue; STAT_COLUMN_COUNT]) -> Self {
        Self {
            report_date: record.report_date.clone(),
            location: record.location.clone(),
            lat: record.lat.clone(),
            lon: record.lon.clone(),
            stats,
        }
    }

    /// Looks up one statistic by key.
    pub fn stat(&self, key: StatKey) -> StatValue {
        // canonical() enumerates every key, so the position always exists
        let index = StatKey::canonical()
            .position(|k| k == key)
            .unwrap_or_default();
        self.stats[index]
    }

    /// Every field rendered as text, in output column order.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(4 + STAT_COLUMN_COUNT);
        fields.push(self.report_date.clone());
        fields.push(self.location.clone());
        fields.push(self.lat.clone());
        fields.push(self.lon.clone());
        fields.extend(self.stats.iter().map(|v| v.to_string()));
        fields
    }

    pub fn is_zero_filled(&self) -> bool {
        self.stats.iter().all(StatValue::is_zero_filled)
    }
}
