//! Summary statistics over observation series.

use crate::types::parameter::{StatKey, Statistic, TrackedParameter};
use crate::weather_data::error::FieldMissingError;
use crate::weather_data::observation::ObservationSeries;
use std::collections::BTreeMap;

/// Min, max and mean of one parameter over one series.
///
/// All three are `0.0` when the series holds no non-null reading of the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ParameterStats {
    pub fn get(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Max => self.max,
            Statistic::Mean => self.mean,
            Statistic::Min => self.min,
        }
    }
}

/// Aggregates the non-null readings of `parameter` across `series`.
///
/// # Examples
///
/// ```
/// use weather_enrich::{aggregate, ObservationSeries, TrackedParameter};
///
/// let series = ObservationSeries::from_readings(
///     TrackedParameter::Temperature,
///     &[Some(1.0), Some(3.0), None, Some(5.0)],
/// );
/// let stats = aggregate(&series, TrackedParameter::Temperature);
/// assert_eq!((stats.min, stats.max, stats.mean), (1.0, 5.0, 3.0));
/// ```
pub fn aggregate(series: &ObservationSeries, parameter: TrackedParameter) -> ParameterStats {
    let readings: Vec<f64> = series.readings(parameter).collect();
    if readings.is_empty() {
        return ParameterStats::default();
    }

    let min = readings.iter().copied().fold(f64::INFINITY, f64::min);
    let max = readings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = readings.iter().sum::<f64>() / readings.len() as f64;
    ParameterStats { min, max, mean }
}

/// The `<field>_<stat>` values computed from one successfully fetched series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    values: BTreeMap<StatKey, f64>,
}

/// Runs [`aggregate`] once per tracked parameter.
pub fn aggregate_all(series: &ObservationSeries) -> StatsTable {
    let mut table = StatsTable::default();
    for parameter in TrackedParameter::ALL {
        table.insert_parameter(parameter, aggregate(series, parameter));
    }
    table
}

impl StatsTable {
    pub fn insert_parameter(&mut self, parameter: TrackedParameter, stats: ParameterStats) {
        for statistic in Statistic::ALL {
            self.values
                .insert(StatKey::new(parameter, statistic), stats.get(statistic));
        }
    }

    pub fn get(&self, key: StatKey) -> Result<f64, FieldMissingError> {
        self.values
            .get(&key)
            .copied()
            .ok_or(FieldMissingError { key })
    }

    #[cfg(test)]
    pub(crate) fn remove(&mut self, key: StatKey) -> Option<f64> {
        self.values.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
