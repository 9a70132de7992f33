//! In-memory observation source for tests.

use crate::weather_data::error::FetchError;
use crate::weather_data::fetcher::ObservationFetcher;
use crate::weather_data::observation::{Observation, ObservationSeries};
use crate::weather_data::query::WeatherQuery;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Series(ObservationSeries),
    Failure,
}

/// Answers queries by latitude, optionally after a delay, and records what it was asked.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, (Scripted, Duration)>,
    queries: Mutex<Vec<WeatherQuery>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_series(self, lat: &str, series: ObservationSeries) -> Self {
        self.with_delayed_series(lat, series, Duration::ZERO)
    }

    pub(crate) fn with_delayed_series(
        mut self,
        lat: &str,
        series: ObservationSeries,
        delay: Duration,
    ) -> Self {
        self.responses
            .insert(lat.to_string(), (Scripted::Series(series), delay));
        self
    }

    pub(crate) fn with_failure(mut self, lat: &str) -> Self {
        self.responses
            .insert(lat.to_string(), (Scripted::Failure, Duration::ZERO));
        self
    }

    pub(crate) fn queries(&self) -> Vec<WeatherQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Highest number of fetches observed running at the same time.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ObservationFetcher for ScriptedFetcher {
    async fn fetch(&self, query: &WeatherQuery) -> Result<ObservationSeries, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let result = match self.responses.get(&query.lat) {
            Some((scripted, delay)) => {
                // yield at least once so concurrent fetches overlap
                tokio::time::sleep(*delay).await;
                tokio::task::yield_now().await;
                match scripted {
                    Scripted::Series(series) => Ok(series.clone()),
                    Scripted::Failure => Err(FetchError::Source("scripted failure".to_string())),
                }
            }
            None => Err(FetchError::Source(format!("no script for lat {}", query.lat))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Seven daily observations for Recife, 2015-12-30 to 2016-01-05.
///
/// temp 20..=32 step 2, dewPt 18..=24, wspd 7..=13, pressure 1009..=1015,
/// precip_total present only on the fourth day (2.5).
pub(crate) fn recife_week() -> ObservationSeries {
    let observations = (0..7)
        .map(|day| {
            let d = day as f64;
            Observation {
                dew_point: Some(18.0 + d),
                precip_total: (day == 3).then_some(2.5),
                pressure: Some(1009.0 + d),
                temp: Some(20.0 + 2.0 * d),
                wspd: Some(7.0 + d),
            }
        })
        .collect();
    ObservationSeries::new(observations)
}
