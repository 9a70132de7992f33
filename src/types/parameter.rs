//! Defines the tracked weather parameters and the summary statistics computed for each.

use std::fmt;
use std::fmt::{Display, Formatter};

/// One of the five weather measurements summarised for every record.
///
/// Each variant maps to the field name used in the observation series returned
/// by the historical endpoint (see [`TrackedParameter::field_name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedParameter {
    /// Dew point, field `dewPt`.
    Humidity,
    /// Precipitation total, field `precip_total`.
    Precipitation,
    /// Pressure, field `pressure`.
    Pressure,
    /// Temperature, field `temp`.
    Temperature,
    /// Wind speed, field `wspd`.
    WindSpeed,
}

impl TrackedParameter {
    /// All tracked parameters, in canonical output order.
    pub const ALL: [TrackedParameter; 5] = [
        TrackedParameter::Humidity,
        TrackedParameter::Precipitation,
        TrackedParameter::Pressure,
        TrackedParameter::Temperature,
        TrackedParameter::WindSpeed,
    ];

    /// The key of this parameter inside an observation entry.
    pub fn field_name(&self) -> &'static str {
        match self {
            TrackedParameter::Humidity => "dewPt",
            TrackedParameter::Precipitation => "precip_total",
            TrackedParameter::Pressure => "pressure",
            TrackedParameter::Temperature => "temp",
            TrackedParameter::WindSpeed => "wspd",
        }
    }
}

impl Display for TrackedParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A summary statistic of one parameter over a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistic {
    Max,
    Mean,
    Min,
}

impl Statistic {
    /// Canonical output order within a parameter.
    pub const ALL: [Statistic; 3] = [Statistic::Max, Statistic::Mean, Statistic::Min];

    pub fn suffix(&self) -> &'static str {
        match self {
            Statistic::Max => "max",
            Statistic::Mean => "mean",
            Statistic::Min => "min",
        }
    }
}

/// Identifies one output statistic column, rendered as `<field>_<stat>` (e.g. `dewPt_max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatKey {
    pub parameter: TrackedParameter,
    pub statistic: Statistic,
}

impl StatKey {
    pub fn new(parameter: TrackedParameter, statistic: Statistic) -> Self {
        Self {
            parameter,
            statistic,
        }
    }

    /// The 15 statistic columns in output order:
    /// `dewPt_{max,mean,min}`, `precip_total_*`, `pressure_*`, `temp_*`, `wspd_*`.
    pub fn canonical() -> impl Iterator<Item = StatKey> {
        TrackedParameter::ALL.into_iter().flat_map(|parameter| {
            Statistic::ALL
                .into_iter()
                .map(move |statistic| StatKey::new(parameter, statistic))
        })
    }

    pub fn column_name(&self) -> String {
        self.to_string()
    }
}

impl Display for StatKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.parameter.field_name(), self.statistic.suffix())
    }
}

/// Number of statistic columns in an output row.
pub const STAT_COLUMN_COUNT: usize = TrackedParameter::ALL.len() * Statistic::ALL.len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_column_order() {
        let names: Vec<String> = StatKey::canonical().map(|k| k.column_name()).collect();
        assert_eq!(
            names,
            [
                "dewPt_max",
                "dewPt_mean",
                "dewPt_min",
                "precip_total_max",
                "precip_total_mean",
                "precip_total_min",
                "pressure_max",
                "pressure_mean",
                "pressure_min",
                "temp_max",
                "temp_mean",
                "temp_min",
                "wspd_max",
                "wspd_mean",
                "wspd_min",
            ]
        );
        assert_eq!(names.len(), STAT_COLUMN_COUNT);
    }

    #[test]
    fn test_field_and_column_names() {
        assert_eq!(TrackedParameter::Humidity.field_name(), "dewPt");
        assert_eq!(TrackedParameter::Precipitation.to_string(), "precip_total");
        let key = StatKey::new(TrackedParameter::WindSpeed, Statistic::Mean);
        assert_eq!(key.to_string(), "wspd_mean");
        assert_eq!(key.column_name(), key.to_string());
    }
}
