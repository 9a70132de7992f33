//! Per-record enrichment: date range, query, fetch, and statistics for one input row.

use crate::dates::error::InvalidDateError;
use crate::dates::resolve::{resolve_date_range, DEFAULT_LOOKBACK_DAYS};
use crate::types::parameter::{StatKey, STAT_COLUMN_COUNT};
use crate::types::record::{InputRecord, OutputRow, StatValue};
use crate::weather_data::fetcher::ObservationFetcher;
use crate::weather_data::observation::ObservationSeries;
use crate::weather_data::query::{Credentials, WeatherQuery};
use crate::weather_data::stats::{aggregate_all, StatsTable};
use bon::bon;
use log::{debug, warn};

/// Turns one [`InputRecord`] into one [`OutputRow`].
///
/// Credentials and the lookback window are injected at construction and
/// never change afterwards, so one enricher can serve any number of
/// concurrent records.
///
/// # Examples
///
/// ```no_run
/// # use weather_enrich::{Credentials, HttpObservationFetcher, InputRecord, RecordEnricher, Units};
/// # #[tokio::main]
/// # async fn main() -> Result<(), weather_enrich::InvalidDateError> {
/// let enricher = RecordEnricher::builder()
///     .fetcher(HttpObservationFetcher::new())
///     .credentials(Credentials::new("API_KEY", Units::Metric))
///     .build();
///
/// let record = InputRecord::new("01/05/2016", "Recife", "-8.05", "-34.9");
/// let row = enricher.enrich(&record).await?;
/// println!("{:?}", row.to_fields());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RecordEnricher<F> {
    fetcher: F,
    credentials: Credentials,
    lookback_days: i64,
    base_url: Option<String>,
}

#[bon]
impl<F: ObservationFetcher> RecordEnricher<F> {
    /// Creates an enricher.
    ///
    /// * `.fetcher(F)`: **Required.** The observation source.
    /// * `.credentials(Credentials)`: **Required.** API key and unit system.
    /// * `.lookback_days(i64)`: Optional. Days looked back from the report date. Defaults to `7`.
    /// * `.base_url(impl Into<String>)`: Optional. Overrides the API address.
    #[builder]
    pub fn new(
        fetcher: F,
        credentials: Credentials,
        lookback_days: Option<i64>,
        #[builder(into)] base_url: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            credentials,
            lookback_days: lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS),
            base_url,
        }
    }

    pub fn lookback_days(&self) -> i64 {
        self.lookback_days
    }

    /// Builds the query for `record`; fails only if its report date cannot be parsed.
    pub fn query_for(&self, record: &InputRecord) -> Result<WeatherQuery, InvalidDateError> {
        let range = resolve_date_range(&record.report_date, None, self.lookback_days)?;
        Ok(WeatherQuery::builder()
            .lat(&record.lat)
            .lon(&record.lon)
            .range(range)
            .credentials(&self.credentials)
            .maybe_base_url(self.base_url.as_deref())
            .build())
    }

    /// Enriches one record.
    ///
    /// A failed fetch yields a row whose 15 statistics are all zero-filled; the
    /// identity fields are always copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if the report date cannot be parsed. No
    /// other failure escapes this function.
    pub async fn enrich(&self, record: &InputRecord) -> Result<OutputRow, InvalidDateError> {
        let query = self.query_for(record)?;
        match self.fetcher.fetch(&query).await {
            Ok(series) => Ok(row_from_series(record, &series)),
            Err(e) => {
                warn!(
                    "No weather data for '{}' on {}: {}",
                    record.location, record.report_date, e
                );
                Ok(OutputRow::zero_filled(record))
            }
        }
    }
}

/// Aggregates `series` and lays the statistics out in canonical column order.
pub fn row_from_series(record: &InputRecord, series: &ObservationSeries) -> OutputRow {
    row_from_table(record, &aggregate_all(series))
}

/// Lays `table` out in canonical column order; each absent statistic is
/// zero-filled on its own without affecting its siblings.
pub fn row_from_table(record: &InputRecord, table: &StatsTable) -> OutputRow {
    let mut stats = [StatValue::ZeroFilled; STAT_COLUMN_COUNT];
    for (slot, key) in stats.iter_mut().zip(StatKey::canonical()) {
        *slot = match table.get(key) {
            Ok(value) => StatValue::Computed(value),
            Err(e) => {
                debug!("{} for '{}'", e, record.location);
                StatValue::ZeroFilled
            }
        };
    }
    OutputRow::with_stats(record, stats)
}
