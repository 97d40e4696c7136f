//! End-to-end holdout evaluation.
//!
//! The last `h` observations of the input are held out. Hyperparameters are
//! selected on the remaining training series only, then a single forecast of
//! the held-out steps is made from the full training series and scored
//! against them.

use log::debug;

use crate::error::{ForecastError, Result};
use crate::knn::{knn_forecast, ForecastResult};
use crate::selection::{select_hyperparameters_with, Selection, SelectionConfig};
use crate::series::Series;

/// Selected hyperparameters and the resulting holdout forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutForecast {
    pub selection: Selection,
    pub result: ForecastResult,
}

/// Hold out the last `horizon` values, select `(k, l)` on the rest and
/// forecast the holdout with the default search grid.
pub fn forecast_holdout(values: &[f64], horizon: usize) -> Result<HoldoutForecast> {
    forecast_holdout_with(values, horizon, &SelectionConfig::default())
}

/// Same as [`forecast_holdout`] with explicit search constants.
pub fn forecast_holdout_with(
    values: &[f64],
    horizon: usize,
    config: &SelectionConfig,
) -> Result<HoldoutForecast> {
    let series = Series::from_slice(values)?;
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon {
            horizon,
            length: series.len(),
        });
    }
    let (train, holdout) = series
        .split_holdout(horizon)
        .ok_or(ForecastError::InvalidHorizon {
            horizon,
            length: series.len(),
        })?;

    let selection = select_hyperparameters_with(train, horizon, config)?;
    let best = selection.best;
    let result = knn_forecast(train, best.k, best.l, holdout)?;

    debug!(
        "holdout forecast: k={} l={} rmse={} rmspe={}",
        best.k,
        best.l,
        result.rmse(),
        result.rmspe()
    );

    Ok(HoldoutForecast { selection, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::select_hyperparameters;
    use approx::assert_relative_eq;

    fn seasonal_data(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let trend = 50.0 + 0.1 * i as f64;
                let season = 6.0 * (2.0 * std::f64::consts::PI * i as f64 / 7.0).sin();
                trend + season
            })
            .collect()
    }

    #[test]
    fn test_holdout_is_the_last_horizon_values() {
        let values = seasonal_data(160);
        let horizon = 4;
        let out = forecast_holdout(&values, horizon).unwrap();

        assert_eq!(out.result.true_value(), &values[156..]);
        assert_eq!(out.result.forecast().len(), horizon);
    }

    #[test]
    fn test_selection_uses_training_series_only() {
        let values = seasonal_data(160);
        let out = forecast_holdout(&values, 4).unwrap();
        let expected = select_hyperparameters(&values[..156], 4).unwrap();
        assert_eq!(out.selection, expected);
    }

    #[test]
    fn test_final_forecast_matches_direct_call() {
        let values = seasonal_data(160);
        let out = forecast_holdout(&values, 3).unwrap();
        let best = out.selection.best;
        let direct = knn_forecast(&values[..157], best.k, best.l, &values[157..]).unwrap();
        assert_eq!(out.result, direct);
        assert_relative_eq!(out.result.rmspe_percent(), direct.rmspe() * 100.0);
    }

    #[test]
    fn test_periodic_series_is_forecast_well() {
        // A pure period-7 signal repeats exactly, so matched segments continue
        // exactly like the holdout.
        let values: Vec<f64> = (0..210)
            .map(|i| 20.0 + 5.0 * (2.0 * std::f64::consts::PI * i as f64 / 7.0).sin())
            .collect();
        let out = forecast_holdout(&values, 3).unwrap();
        assert!(out.result.rmspe() < 1e-6);
    }

    #[test]
    fn test_invalid_horizons() {
        let values = seasonal_data(40);
        assert!(matches!(
            forecast_holdout(&values, 0),
            Err(ForecastError::InvalidHorizon { .. })
        ));
        assert!(matches!(
            forecast_holdout(&values, 40),
            Err(ForecastError::InvalidHorizon { .. })
        ));
        assert!(matches!(
            forecast_holdout(&values, 10),
            Err(ForecastError::InvalidHorizon { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            forecast_holdout(&[], 1),
            Err(ForecastError::InsufficientData { .. })
        ));
    }
}
