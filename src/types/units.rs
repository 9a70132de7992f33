//! Defines the unit systems understood by the historical observations endpoint.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The unit system the remote API reports readings in.
///
/// The API identifies each system by a single-letter code (the `units` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Code `m`: Celsius, millimetres, km/h, millibars.
    #[default]
    Metric,
    /// Code `e`: Fahrenheit, inches, mph, inches of mercury.
    English,
    /// Code `h`: UK hybrid, metric with wind speed in mph.
    Hybrid,
    /// Code `s`: metric SI, wind speed in m/s.
    MetricSi,
}

impl Units {
    /// The one-letter code sent to the API.
    pub fn code(&self) -> &'static str {
        match self {
            Units::Metric => "m",
            Units::English => "e",
            Units::Hybrid => "h",
            Units::MetricSi => "s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string names no known unit system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unit system '{0}', expected one of m, e, h, s")]
pub struct UnknownUnitsError(pub String);

impl FromStr for Units {
    type Err = UnknownUnitsError;

    /// Accepts either the API code or the lowercase name (`metric`, `english`, `imperial`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "metric" => Ok(Units::Metric),
            "e" | "english" | "imperial" => Ok(Units::English),
            "h" | "hybrid" => Ok(Units::Hybrid),
            "s" | "si" | "metric_si" => Ok(Units::MetricSi),
            _ => Err(UnknownUnitsError(s.to_string())),
        }
    }
}

impl Serialize for Units {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Units {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
