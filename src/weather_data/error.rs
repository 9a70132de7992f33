use crate::types::parameter::StatKey;
use thiserror::Error;

/// Failure to obtain an observation series for a query.
///
/// The enricher treats every variant the same way (the row is zero-filled);
/// the variants exist so logs and tests can tell the causes apart.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode observations response from {0}")]
    Decode(String, #[source] reqwest::Error),

    #[error("Response from {0} has no 'observations' series")]
    MissingObservations(String),

    // Used by non-HTTP fetchers (fixtures, replays) to report a failure in their own terms
    #[error("Observation source failed: {0}")]
    Source(String),
}

/// A statistic expected in an aggregated result was not present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Statistic '{key}' missing from aggregated result")]
pub struct FieldMissingError {
    pub key: StatKey,
}
