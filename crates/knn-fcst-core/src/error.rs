//! Error types for k-NN forecasting operations.

use thiserror::Error;

/// Result type for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Error types for forecasting and hyperparameter selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Null pointer argument: {0}")]
    NullPointer(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Forecast horizon too large relative to series length: horizon {horizon}, length {length}"
    )]
    InvalidHorizon { horizon: usize, length: usize },

    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid parameter '{param}' = '{value}': {reason}")]
    InvalidParameter {
        param: String,
        value: String,
        reason: String,
    },

    #[error("Index out of bounds: continuation index {index} beyond {available} known values")]
    IndexOutOfBounds { index: usize, available: usize },

    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl ForecastError {
    /// Convert to an error code for FFI.
    pub fn to_code(&self) -> i32 {
        match self {
            ForecastError::NullPointer(_) => 1,
            ForecastError::InvalidInput(_) => 2,
            ForecastError::InvalidHorizon { .. } => 3,
            ForecastError::InsufficientData { .. } => 4,
            ForecastError::InvalidParameter { .. } => 5,
            ForecastError::IndexOutOfBounds { .. } => 6,
            ForecastError::ComputationError(_) => 7,
        }
    }

    pub(crate) fn invalid_parameter(
        param: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ForecastError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
