pub mod date_range;
pub mod parameter;
pub mod record;
pub mod units;
