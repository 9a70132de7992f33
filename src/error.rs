use crate::config::ConfigError;
use crate::dates::error::InvalidDateError;
use crate::io::error::RecordIoError;
use crate::weather_data::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Invalid report date in record {index}")]
    InvalidDate {
        index: usize,
        #[source]
        source: InvalidDateError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    RecordIo(#[from] RecordIoError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
