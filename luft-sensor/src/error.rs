/// Error types for the luft-sensor library
use thiserror::Error;

/// Main error type for sensor fetch and merge operations
#[derive(Error, Debug)]
pub enum SensorError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// A reading carried a timestamp that does not match the API format
    #[error("Failed to parse timestamp {value:?}: {source}")]
    TimestampParse {
        value: String,
        source: chrono::ParseError,
    },

    /// A reading is missing a sub-value kind it is required to report
    #[error("Reading at {timestamp} is missing required value kind {kind:?}")]
    MissingValue {
        timestamp: String,
        kind: &'static str,
    },

    /// A sub-value could not be parsed as a number
    #[error("Value {value:?} of kind {kind:?} is not numeric")]
    NonNumericValue { kind: String, value: String },
}

/// Type alias for Results using SensorError
pub type Result<T> = std::result::Result<T, SensorError>;
