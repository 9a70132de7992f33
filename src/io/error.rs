use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordIoError {
    #[error("Failed to open input file '{0}'")]
    Open(PathBuf, #[source] csv::Error),

    #[error("Failed to create output file '{0}'")]
    Create(PathBuf, #[source] csv::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush output: {0}")]
    Flush(#[from] std::io::Error),

    #[error("Required column '{0}' not found in input header")]
    MissingColumn(&'static str),
}
