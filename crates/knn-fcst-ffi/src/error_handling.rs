//! Standardized error handling utilities for FFI functions.

use crate::types::{ErrorCode, KnnError};
use knn_fcst_core::ForecastError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Initialize error output to success state.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn init_error(out_error: *mut KnnError) {
    if !out_error.is_null() {
        *out_error = KnnError::success();
    }
}

/// Set an error on the output error pointer.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn set_error(out_error: *mut KnnError, code: ErrorCode, message: &str) {
    if !out_error.is_null() {
        (*out_error).set_error(code, message);
    }
}

/// Check if any of the given pointers are null, and set an error if so.
///
/// # Safety
/// The error pointer must be valid if non-null.
#[inline]
pub unsafe fn check_null_pointers(
    out_error: *mut KnnError,
    ptrs: &[*const core::ffi::c_void],
) -> bool {
    match ptrs.iter().position(|ptr| ptr.is_null()) {
        Some(pos) => {
            let err = ForecastError::NullPointer(format!("argument {}", pos));
            set_error(out_error, ErrorCode::from(&err), &err.to_string());
            true
        }
        None => false,
    }
}

/// Execute an FFI function body with standardized error handling.
///
/// Initializes the error output, catches panics, and converts core errors
/// to their matching [`ErrorCode`].
///
/// # Safety
/// The error pointer must be valid if non-null.
///
/// # Returns
/// `Some(value)` on success, `None` on error
pub unsafe fn ffi_try<F, T>(out_error: *mut KnnError, f: F) -> Option<T>
where
    F: FnOnce() -> Result<T, ForecastError>,
{
    init_error(out_error);

    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            set_error(out_error, ErrorCode::from(&e), &e.to_string());
            None
        }
        Err(_) => {
            set_error(out_error, ErrorCode::PanicCaught, "Panic in Rust code");
            None
        }
    }
}
