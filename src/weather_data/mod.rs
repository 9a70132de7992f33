pub mod error;
pub mod fetcher;
pub mod observation;
pub mod query;
pub mod stats;
