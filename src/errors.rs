//! Errors
//!
//! Custom error types used throughout the `fisher` crate.
use thiserror::Error;

/// Errors that can occur when running the exact test.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FisherError {
    /// The table cannot be tested: a negative count, an empty table, or totals too large to represent.
    #[error("Invalid contingency table: {0}")]
    InvalidInput(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Columnar input where the columns have different lengths.
    #[error("Cell columns must have equal lengths, found a={0}, b={1}, c={2}, d={3}.")]
    MismatchedLengths(usize, usize, usize, usize),
    /// Unable to serialize to json.
    #[error("Unable to write json: {0}")]
    UnableToWrite(String),
    /// Unable to deserialize from json.
    #[error("Unable to read json: {0}")]
    UnableToRead(String),
}
