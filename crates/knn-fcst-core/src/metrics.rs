//! Forecast accuracy metrics.
//!
//! | Metric | Use When |
//! |--------|----------|
//! | RMSE | Error in the original units, large misses penalized |
//! | RMSPE | Scale-free error, comparable across windows and series |
//!
//! RMSPE is the score minimized by hyperparameter selection.

use statrs::statistics::Statistics;

use crate::error::{ForecastError, Result};

/// Calculates Root Mean Squared Error between actual and predicted values.
///
/// # Formula
/// RMSE = √[(1/n) * Σ(forecast_i - actual_i)²]
///
/// # Example
/// ```
/// use knn_fcst_core::metrics::rmse;
/// let actual = vec![8.0];
/// let forecast = vec![5.0];
/// assert!((rmse(&actual, &forecast).unwrap() - 3.0).abs() < 1e-12);
/// ```
pub fn rmse(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    validate_inputs(actual, forecast)?;
    let mse = actual
        .iter()
        .zip(forecast.iter())
        .map(|(a, f)| (f - a).powi(2))
        .mean();
    Ok(mse.sqrt())
}

/// Calculates Root Mean Squared Percentage Error as a fraction.
///
/// A zero actual value makes the ratio undefined; the result is then
/// non-finite (NaN or infinity) and is returned as-is rather than masked.
///
/// # Formula
/// RMSPE = √[(1/n) * Σ(forecast_i / actual_i - 1)²]
pub fn rmspe(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    validate_inputs(actual, forecast)?;
    let mspe = actual
        .iter()
        .zip(forecast.iter())
        .map(|(a, f)| (f / a - 1.0).powi(2))
        .mean();
    Ok(mspe.sqrt())
}

fn validate_inputs(actual: &[f64], forecast: &[f64]) -> Result<()> {
    if actual.is_empty() || forecast.is_empty() {
        return Err(ForecastError::InvalidInput(
            "Arrays must not be empty".to_string(),
        ));
    }
    if actual.len() != forecast.len() {
        return Err(ForecastError::InvalidInput(format!(
            "Arrays must have the same length: {} vs {}",
            actual.len(),
            forecast.len()
        )));
    }
    Ok(())
}
