//! Construction of historical observation queries.

use crate::types::date_range::DateRange;
use crate::types::units::Units;
use bon::bon;
use std::fmt;

/// Base address of the historical observations API.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.com";

/// API key and unit system shared, read-only, by every query of a run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub units: Units,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, units: Units) -> Self {
        Self {
            api_key: api_key.into(),
            units,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("units", &self.units)
            .finish()
    }
}

/// A fully specified request for the observations of one location over one date range.
///
/// Coordinates are embedded verbatim; no validation is performed.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub base_url: String,
    pub lat: String,
    pub lon: String,
    /// `YYYYMMDD`
    pub start_date: String,
    /// `YYYYMMDD`
    pub end_date: String,
    pub api_key: String,
    pub units: Units,
}

#[bon]
impl WeatherQuery {
    /// Builds a query for `lat`/`lon` over `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_enrich::{resolve_date_range, Credentials, Units, WeatherQuery};
    ///
    /// let range = resolve_date_range("01/05/2016", None, 7).unwrap();
    /// let credentials = Credentials::new("KEY", Units::Metric);
    /// let query = WeatherQuery::builder()
    ///     .lat("-8.05")
    ///     .lon("-34.9")
    ///     .range(range)
    ///     .credentials(&credentials)
    ///     .build();
    ///
    /// assert_eq!(
    ///     query.url(),
    ///     "https://api.weather.com/v1/geocode/-8.05/-34.9/observations/historical.json\
    ///      ?apiKey=KEY&units=m&startDate=20151229&endDate=20160105"
    /// );
    /// ```
    #[builder]
    pub fn new(
        lat: &str,
        lon: &str,
        range: DateRange,
        credentials: &Credentials,
        base_url: Option<&str>,
    ) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
            start_date: range.start_compact(),
            end_date: range.end_compact(),
            api_key: credentials.api_key.clone(),
            units: credentials.units,
        }
    }

    /// The resource address, without query parameters.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/geocode/{}/{}/observations/historical.json",
            self.base_url, self.lat, self.lon
        )
    }

    pub fn query_params(&self) -> [(&'static str, &str); 4] {
        [
            ("apiKey", self.api_key.as_str()),
            ("units", self.units.code()),
            ("startDate", self.start_date.as_str()),
            ("endDate", self.end_date.as_str()),
        ]
    }

    /// The complete request URL, parameters concatenated unescaped.
    pub fn url(&self) -> String {
        let params: Vec<String> = self
            .query_params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}?{}", self.endpoint(), params.join("&"))
    }
}

/// Shows the query with the API key redacted, suitable for logs.
impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}?units={}&startDate={}&endDate={}",
            self.endpoint(),
            self.units,
            self.start_date,
            self.end_date
        )
    }
}

impl fmt::Debug for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherQuery")
            .field("base_url", &self.base_url)
            .field("lat", &self.lat)
            .field("lon", &self.lon)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
