use thiserror::Error;

/// A date string could not be parsed by any of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date format: '{input}'")]
pub struct InvalidDateError {
    pub input: String,
}

impl InvalidDateError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
