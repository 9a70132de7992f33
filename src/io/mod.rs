pub mod csv_records;
pub mod error;
