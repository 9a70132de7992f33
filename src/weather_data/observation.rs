//! Typed view of the historical observations payload.

use crate::types::parameter::TrackedParameter;
use serde::{Deserialize, Serialize};

/// One point-in-time observation.
///
/// Only the tracked fields are kept; each may be absent or `null` in the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "dewPt", default)]
    pub dew_point: Option<f64>,
    #[serde(default)]
    pub precip_total: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub wspd: Option<f64>,
}

impl Observation {
    /// The reading for `parameter`, or `None` if it was absent or null.
    pub fn reading(&self, parameter: TrackedParameter) -> Option<f64> {
        match parameter {
            TrackedParameter::Humidity => self.dew_point,
            TrackedParameter::Precipitation => self.precip_total,
            TrackedParameter::Pressure => self.pressure,
            TrackedParameter::Temperature => self.temp,
            TrackedParameter::WindSpeed => self.wspd,
        }
    }

    pub fn set_reading(&mut self, parameter: TrackedParameter, value: Option<f64>) {
        let slot = match parameter {
            TrackedParameter::Humidity => &mut self.dew_point,
            TrackedParameter::Precipitation => &mut self.precip_total,
            TrackedParameter::Pressure => &mut self.pressure,
            TrackedParameter::Temperature => &mut self.temp,
            TrackedParameter::WindSpeed => &mut self.wspd,
        };
        *slot = value;
    }
}

/// Ordered sequence of observations returned for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationSeries(pub Vec<Observation>);

impl ObservationSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self(observations)
    }

    /// Builds a series where only `parameter` is populated, one entry per reading.
    pub fn from_readings(parameter: TrackedParameter, readings: &[Option<f64>]) -> Self {
        let observations = readings
            .iter()
            .map(|value| {
                let mut observation = Observation::default();
                observation.set_reading(parameter, *value);
                observation
            })
            .collect();
        Self(observations)
    }

    /// Non-null readings of `parameter`, in encounter order.
    pub fn readings(&self, parameter: TrackedParameter) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(move |o| o.reading(parameter))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of the historical observations endpoint.
///
/// `observations` is optional so a well-formed body without the series can be
/// reported as a distinct failure rather than a decode error.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoricalResponse {
    #[serde(default)]
    pub observations: Option<ObservationSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_and_accepts_null() -> Result<(), serde_json::Error> {
        let body = r#"{
            "metadata": {"status_code": 200},
            "observations": [
                {"valid_time_gmt": 1451606400, "temp": 24, "dewPt": 21, "wspd": null, "pressure": 1011.2, "precip_total": 0.5, "wx_phrase": "Fair"},
                {"temp": 26, "dewPt": null},
                {}
            ]
        }"#;
        let response: HistoricalResponse = serde_json::from_str(body)?;
        let series = response.observations.expect("series present");

        assert_eq!(series.len(), 3);
        assert_eq!(
            series.readings(TrackedParameter::Temperature).collect::<Vec<_>>(),
            [24.0, 26.0]
        );
        assert_eq!(
            series.readings(TrackedParameter::Humidity).collect::<Vec<_>>(),
            [21.0]
        );
        assert_eq!(series.readings(TrackedParameter::WindSpeed).count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_series_is_none() -> Result<(), serde_json::Error> {
        let response: HistoricalResponse =
            serde_json::from_str(r#"{"errors": [{"error": {"code": "CDN-0001"}}]}"#)?;
        assert!(response.observations.is_none());

        let response: HistoricalResponse = serde_json::from_str(r#"{"observations": null}"#)?;
        assert!(response.observations.is_none());
        Ok(())
    }

    #[test]
    fn test_from_readings() {
        let series =
            ObservationSeries::from_readings(TrackedParameter::Pressure, &[Some(1.0), None]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.0[0].pressure, Some(1.0));
        assert_eq!(series.0[1].pressure, None);
        assert_eq!(series.0[0].temp, None);
    }
}
