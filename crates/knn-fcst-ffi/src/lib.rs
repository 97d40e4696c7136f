//! FFI boundary layer for the knn-fcst forecasting core.
//!
//! This crate provides C-compatible functions that can be called from a C or
//! C++ host. Every function reports failure through a `KnnError`
//! out-parameter and returns `false`; panics never cross the boundary.

pub mod allocation;
pub mod error_handling;
pub mod types;

use libc::{c_double, size_t};
use std::ptr;

use allocation::vec_to_c_double_array;
use error_handling::{check_null_pointers, ffi_try, init_error, set_error};
use knn_fcst_core::{ForecastResult, Selection};

pub use types::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// View raw input as a slice.
///
/// # Safety
/// `data` must be non-null and valid for `length` reads.
unsafe fn build_values<'a>(data: *const c_double, length: size_t) -> &'a [f64] {
    std::slice::from_raw_parts(data, length)
}

/// Copy a core forecast result into its C representation.
///
/// # Safety
/// `out_result` must be valid; `out_error` must be valid if non-null.
unsafe fn write_forecast_result(
    result: &ForecastResult,
    out_result: *mut KnnForecastResult,
    out_error: *mut KnnError,
) -> bool {
    let forecasts = vec_to_c_double_array(result.forecast());
    let true_values = vec_to_c_double_array(result.true_value());

    let mut c_result = KnnForecastResult {
        forecasts,
        true_values,
        horizon: result.horizon(),
        rmse: result.rmse(),
        rmspe: result.rmspe(),
    };

    if c_result.horizon > 0 && (forecasts.is_null() || true_values.is_null()) {
        free_fields!(c_result, forecasts, true_values);
        set_error(
            out_error,
            ErrorCode::AllocationError,
            "Memory allocation failed",
        );
        return false;
    }

    *out_result = c_result;
    true
}

fn to_c_params(selection: &Selection) -> KnnHyperparameters {
    KnnHyperparameters {
        k: selection.best.k,
        l: selection.best.l,
        score: selection.score,
    }
}

// ============================================================================
// Forecasting Functions
// ============================================================================

/// Find the `k` segments of length `l` nearest to the final segment.
///
/// Writes `k` start indices, nearest first, into `out_indices`.
///
/// # Safety
/// `values` must point to `length` doubles and `out_indices` to room for `k`
/// indices. `out_error` must be valid if non-null.
#[no_mangle]
pub unsafe extern "C" fn knn_fcst_nearest_neighbors(
    values: *const c_double,
    length: size_t,
    k: size_t,
    l: size_t,
    out_indices: *mut size_t,
    out_error: *mut KnnError,
) -> bool {
    init_error(out_error);
    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            out_indices as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    let found = ffi_try(out_error, || {
        knn_fcst_core::nearest_neighbors(build_values(values, length), k, l)
    });

    match found {
        Some(indices) => {
            ptr::copy_nonoverlapping(indices.as_ptr(), out_indices, indices.len());
            true
        }
        None => false,
    }
}

/// Forecast `horizon` steps with fixed `(k, l)` and score against `true_values`.
///
/// # Safety
/// `values` must point to `length` doubles, `true_values` to `horizon`
/// doubles. `out_result` must be valid and later released with
/// [`knn_fcst_free_forecast_result`].
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn knn_fcst_forecast(
    values: *const c_double,
    length: size_t,
    k: size_t,
    l: size_t,
    true_values: *const c_double,
    horizon: size_t,
    out_result: *mut KnnForecastResult,
    out_error: *mut KnnError,
) -> bool {
    init_error(out_error);
    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            true_values as *const core::ffi::c_void,
            out_result as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    let result = ffi_try(out_error, || {
        knn_fcst_core::knn_forecast(
            build_values(values, length),
            k,
            l,
            build_values(true_values, horizon),
        )
    });

    match result {
        Some(forecast) => write_forecast_result(&forecast, out_result, out_error),
        None => false,
    }
}

/// Select `(k, l)` by cross-validation on the whole input series.
///
/// # Safety
/// `values` must point to `length` doubles; `out_params` must be valid.
#[no_mangle]
pub unsafe extern "C" fn knn_fcst_select_hyperparameters(
    values: *const c_double,
    length: size_t,
    horizon: size_t,
    out_params: *mut KnnHyperparameters,
    out_error: *mut KnnError,
) -> bool {
    init_error(out_error);
    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            out_params as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    let selection = ffi_try(out_error, || {
        knn_fcst_core::select_hyperparameters(build_values(values, length), horizon)
    });

    match selection {
        Some(selection) => {
            *out_params = to_c_params(&selection);
            true
        }
        None => false,
    }
}

/// Hold out the last `horizon` values, select `(k, l)` on the rest and
/// forecast the holdout.
///
/// # Safety
/// `values` must point to `length` doubles; `out_params` and `out_result`
/// must be valid. Release `out_result` with [`knn_fcst_free_forecast_result`].
#[no_mangle]
pub unsafe extern "C" fn knn_fcst_forecast_holdout(
    values: *const c_double,
    length: size_t,
    horizon: size_t,
    out_params: *mut KnnHyperparameters,
    out_result: *mut KnnForecastResult,
    out_error: *mut KnnError,
) -> bool {
    init_error(out_error);
    if check_null_pointers(
        out_error,
        &[
            values as *const core::ffi::c_void,
            out_params as *const core::ffi::c_void,
            out_result as *const core::ffi::c_void,
        ],
    ) {
        return false;
    }

    let holdout = ffi_try(out_error, || {
        knn_fcst_core::forecast_holdout(build_values(values, length), horizon)
    });

    match holdout {
        Some(holdout) => {
            *out_params = to_c_params(&holdout.selection);
            write_forecast_result(&holdout.result, out_result, out_error)
        }
        None => false,
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a KnnForecastResult.
///
/// # Safety
/// `result` must be null or point to a result filled by this library.
#[no_mangle]
pub unsafe extern "C" fn knn_fcst_free_forecast_result(result: *mut KnnForecastResult) {
    if result.is_null() {
        return;
    }
    let r = &mut *result;
    free_fields!(r, forecasts, true_values);
    r.horizon = 0;
}
