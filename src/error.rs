//! Error types for the series_forecast crate

use thiserror::Error;

/// Custom error types for the series_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A timestamp could not be parsed into a calendar date
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// An observed value was not a finite number
    #[error("Invalid value {value:?}: observations must be finite numbers")]
    InvalidValue { value: String },

    /// The series is too short to fit a model
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A forecasting method outside the supported set was requested
    #[error("Unsupported forecast method {0:?}, expected one of: linear_trend, moving_average, exponential_smoothing, prophet")]
    UnsupportedMethod(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data loading or shape
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
