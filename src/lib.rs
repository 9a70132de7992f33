mod batch;
mod config;
mod dates;
mod enricher;
mod error;
mod io;
mod pipeline;
mod types;
mod weather_data;

#[cfg(test)]
mod test_utils;

pub use batch::*;
pub use config::*;
pub use enricher::*;
pub use error::EnrichError;
pub use pipeline::enrich_file;

pub use dates::error::InvalidDateError;
pub use dates::parse::parse_date;
pub use dates::resolve::{resolve_date_range, DEFAULT_LOOKBACK_DAYS};

pub use io::csv_records::*;
pub use io::error::RecordIoError;

pub use types::date_range::DateRange;
pub use types::parameter::*;
pub use types::record::*;
pub use types::units::*;

pub use weather_data::error::{FetchError, FieldMissingError};
pub use weather_data::fetcher::*;
pub use weather_data::observation::{Observation, ObservationSeries};
pub use weather_data::query::*;
pub use weather_data::stats::*;
