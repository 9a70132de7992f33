//! File-to-file enrichment: read the input CSV, run the batch, write the output CSV.

use crate::batch::BatchRunner;
use crate::error::EnrichError;
use crate::io::csv_records::{read_records_from_path, write_rows_to_path};
use crate::weather_data::fetcher::ObservationFetcher;
use std::path::Path;
use tokio::task;

/// Enriches every record of `input` and writes the rows to `output`.
///
/// Nothing is written unless the whole batch succeeds. Returns the number of
/// rows written.
pub async fn enrich_file<F: ObservationFetcher>(
    runner: &BatchRunner<F>,
    input: &Path,
    output: &Path,
) -> Result<usize, EnrichError> {
    let input = input.to_path_buf();
    let records = task::spawn_blocking(move || read_records_from_path(&input)).await??;

    let rows = runner.run(&records).await?;
    let count = rows.len();

    let output = output.to_path_buf();
    task::spawn_blocking(move || write_rows_to_path(&output, &rows)).await??;
    Ok(count)
}
