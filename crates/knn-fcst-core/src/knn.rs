//! k-NN analog forecaster.
//!
//! The forecast for horizon step `j` is the mean of the values that followed
//! each of the `k` nearest historical segments, `j` steps after the segment
//! ended. When the forecaster runs on a truncated history during
//! cross-validation, some of those continuations lie beyond the history; they
//! are read from the caller-supplied true values through a single
//! [`Continuation`] lookup so both cases share one indexing rule.

use statrs::statistics::Statistics;

use crate::error::{ForecastError, Result};
use crate::metrics::{rmse, rmspe};
use crate::neighbors::nearest_neighbors;
use crate::series::Continuation;

/// Forecasts for horizons `1..=h` scored against the true values.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    forecast: Vec<f64>,
    true_value: Vec<f64>,
    rmse: f64,
    rmspe: f64,
}

impl ForecastResult {
    /// Build a result, deriving both error scores from the two sequences.
    pub fn new(forecast: Vec<f64>, true_value: Vec<f64>) -> Result<Self> {
        let rmse = rmse(&true_value, &forecast)?;
        let rmspe = rmspe(&true_value, &forecast)?;
        Ok(Self {
            forecast,
            true_value,
            rmse,
            rmspe,
        })
    }

    /// Point forecasts, one per horizon step.
    pub fn forecast(&self) -> &[f64] {
        &self.forecast
    }

    /// True values for the same horizon steps.
    pub fn true_value(&self) -> &[f64] {
        &self.true_value
    }

    /// Root mean squared error.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Root mean squared percentage error, as a fraction.
    pub fn rmspe(&self) -> f64 {
        self.rmspe
    }

    /// RMSPE scaled to a percentage for display.
    pub fn rmspe_percent(&self) -> f64 {
        self.rmspe * 100.0
    }

    /// Forecast horizon.
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }
}

/// Forecast the `true_value.len()` steps after `series` with parameters `(k, l)`.
///
/// # Errors
/// * `InvalidHorizon` if `true_value` is empty
/// * errors from [`nearest_neighbors`] for invalid `k`/`l`
/// * `IndexOutOfBounds` if a continuation lies beyond `series` and `true_value`
pub fn knn_forecast(
    series: &[f64],
    k: usize,
    l: usize,
    true_value: &[f64],
) -> Result<ForecastResult> {
    let horizon = true_value.len();
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon {
            horizon,
            length: series.len(),
        });
    }

    let neighbors = nearest_neighbors(series, k, l)?;
    let continuation = Continuation::new(series, true_value);

    let forecast = (0..horizon)
        .map(|step| {
            let values = neighbors
                .iter()
                .map(|&nn| continuation.get(nn + l + step))
                .collect::<Result<Vec<f64>>>()?;
            Ok(values.mean())
        })
        .collect::<Result<Vec<f64>>>()?;

    ForecastResult::new(forecast, true_value.to_vec())
}
