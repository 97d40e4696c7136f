//! C-compatible type definitions for the FFI boundary.

use knn_fcst_core::ForecastError;
use libc::{c_char, c_double, size_t};

/// Error codes for FFI boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    NullPointer = 1,
    InvalidInput = 2,
    InvalidHorizon = 3,
    InsufficientData = 4,
    InvalidParameter = 5,
    IndexOutOfBounds = 6,
    ComputationError = 7,
    AllocationError = 8,
    PanicCaught = 9,
}

impl From<&ForecastError> for ErrorCode {
    fn from(err: &ForecastError) -> Self {
        match err {
            ForecastError::NullPointer(_) => ErrorCode::NullPointer,
            ForecastError::InvalidInput(_) => ErrorCode::InvalidInput,
            ForecastError::InvalidHorizon { .. } => ErrorCode::InvalidHorizon,
            ForecastError::InsufficientData { .. } => ErrorCode::InsufficientData,
            ForecastError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            ForecastError::IndexOutOfBounds { .. } => ErrorCode::IndexOutOfBounds,
            ForecastError::ComputationError(_) => ErrorCode::ComputationError,
        }
    }
}

/// Error structure with message buffer for FFI.
#[repr(C)]
pub struct KnnError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl KnnError {
    /// Create a success error (no error).
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    /// Set an error with code and message.
    pub fn set_error(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0; // Null terminator
    }
}

impl Default for KnnError {
    fn default() -> Self {
        Self::success()
    }
}

/// Selected hyperparameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnHyperparameters {
    /// Number of neighbors
    pub k: size_t,
    /// Segment length
    pub l: size_t,
    /// Summed cross-validation RMSPE of this pair
    pub score: c_double,
}

impl Default for KnnHyperparameters {
    fn default() -> Self {
        Self {
            k: 0,
            l: 0,
            score: f64::NAN,
        }
    }
}

/// Forecast result structure.
///
/// Arrays are allocated with `malloc` and released by
/// `knn_fcst_free_forecast_result`.
#[repr(C)]
pub struct KnnForecastResult {
    /// Point forecasts, one per horizon step
    pub forecasts: *mut c_double,
    /// True values for the same steps
    pub true_values: *mut c_double,
    /// Number of horizon steps
    pub horizon: size_t,
    /// Root mean squared error
    pub rmse: c_double,
    /// Root mean squared percentage error (fraction)
    pub rmspe: c_double,
}

impl Default for KnnForecastResult {
    fn default() -> Self {
        Self {
            forecasts: std::ptr::null_mut(),
            true_values: std::ptr::null_mut(),
            horizon: 0,
            rmse: f64::NAN,
            rmspe: f64::NAN,
        }
    }
}
