//! Concurrent, order-preserving enrichment of a whole record set.

use crate::enricher::RecordEnricher;
use crate::error::EnrichError;
use crate::types::record::{InputRecord, OutputRow};
use crate::weather_data::fetcher::ObservationFetcher;
use bon::bon;
use futures_util::{stream, StreamExt};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Number of records enriched concurrently when not configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// What the batch does with a record whose report date cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDatePolicy {
    /// Fail the whole batch; no rows are produced.
    #[default]
    Abort,
    /// Emit the record with all statistics zero-filled.
    ZeroFill,
}

/// Fans [`RecordEnricher::enrich`] out over a record set.
///
/// At most `concurrency` records are in flight at once. Each result is slotted
/// back by its input position, so row `i` of the output always belongs to
/// record `i` of the input regardless of which fetch completes first.
#[derive(Debug)]
pub struct BatchRunner<F> {
    enricher: RecordEnricher<F>,
    concurrency: usize,
    invalid_dates: InvalidDatePolicy,
}

#[bon]
impl<F: ObservationFetcher> BatchRunner<F> {
    /// Creates a runner.
    ///
    /// * `.enricher(RecordEnricher<F>)`: **Required.**
    /// * `.concurrency(usize)`: Optional. Maximum in-flight records. Defaults to `32`; `0` is treated as `1`.
    /// * `.invalid_dates(InvalidDatePolicy)`: Optional. Defaults to [`InvalidDatePolicy::Abort`].
    #[builder]
    pub fn new(
        enricher: RecordEnricher<F>,
        concurrency: Option<usize>,
        invalid_dates: Option<InvalidDatePolicy>,
    ) -> Self {
        Self {
            enricher,
            concurrency: concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1),
            invalid_dates: invalid_dates.unwrap_or_default(),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enriches every record, returning exactly one row per record, in input order.
    ///
    /// Up to `concurrency` records are enriched at once; a worker slot is
    /// released as soon as its record finishes, whatever its position.
    ///
    /// # Errors
    ///
    /// With [`InvalidDatePolicy::Abort`], the first record (in input order)
    /// whose report date does not parse fails the batch with
    /// [`EnrichError::InvalidDate`] before anything is fetched. Fetch failures
    /// never fail the batch.
    pub async fn run(&self, records: &[InputRecord]) -> Result<Vec<OutputRow>, EnrichError> {
        if self.invalid_dates == InvalidDatePolicy::Abort {
            for (index, record) in records.iter().enumerate() {
                self.enricher
                    .query_for(record)
                    .map_err(|source| EnrichError::InvalidDate { index, source })?;
            }
        }

        info!(
            "Enriching {} records with up to {} concurrent requests",
            records.len(),
            self.concurrency
        );
        let started = Instant::now();

        let mut slots: Vec<Option<OutputRow>> = Vec::new();
        slots.resize_with(records.len(), || None);
        let mut first_error: Option<(usize, EnrichError)> = None;

        let mut completed = stream::iter(records.iter().enumerate())
            .map(|(index, record)| async move { (index, self.enrich_at(index, record).await) })
            .buffer_unordered(self.concurrency);
        while let Some((index, result)) = completed.next().await {
            match result {
                Ok(row) => slots[index] = Some(row),
                Err(e) => {
                    let earliest = first_error
                        .as_ref()
                        .map_or(true, |(earlier, _)| index < *earlier);
                    if earliest {
                        first_error = Some((index, e));
                    }
                }
            }
        }
        if let Some((_, e)) = first_error {
            return Err(e);
        }

        let rows: Vec<OutputRow> = slots.into_iter().flatten().collect();
        let zero_filled = rows.iter().filter(|r| r.is_zero_filled()).count();
        info!(
            "Enriched {} records in {:?} ({} without weather data)",
            rows.len(),
            started.elapsed(),
            zero_filled
        );
        Ok(rows)
    }

    async fn enrich_at(
        &self,
        index: usize,
        record: &InputRecord,
    ) -> Result<OutputRow, EnrichError> {
        match self.enricher.enrich(record).await {
            Ok(row) => Ok(row),
            Err(source) => match self.invalid_dates {
                InvalidDatePolicy::Abort => Err(EnrichError::InvalidDate { index, source }),
                InvalidDatePolicy::ZeroFill => {
                    warn!("Record {} skipped: {}", index, source);
                    Ok(OutputRow::zero_filled(record))
                }
            },
        }
    }
}
