//! k-nearest-neighbor time series forecasting.
//!
//! Forecasts a univariate series by averaging what followed the historical
//! segments most similar to its most recent segment, and picks the neighbor
//! count `k` and segment length `l` by backtesting a grid of candidates on
//! the tail of the series.
//!
//! # Example
//! ```
//! use knn_fcst_core::{forecast_holdout, knn_forecast};
//!
//! let values: Vec<f64> = (0..200)
//!     .map(|i| 100.0 + 10.0 * (i as f64 * 0.4).sin())
//!     .collect();
//!
//! let out = forecast_holdout(&values, 5).unwrap();
//! assert_eq!(out.result.forecast().len(), 5);
//!
//! let best = out.selection.best;
//! let direct = knn_forecast(&values[..195], best.k, best.l, &values[195..]).unwrap();
//! assert_eq!(direct, out.result);
//! ```

pub mod distance;
pub mod error;
pub mod knn;
pub mod metrics;
pub mod neighbors;
pub mod pipeline;
pub mod selection;
pub mod series;

// Re-exports for convenience
pub use distance::squared_euclidean;
pub use error::{ForecastError, Result};
pub use knn::{knn_forecast, ForecastResult};
pub use metrics::{rmse, rmspe};
pub use neighbors::{nearest_neighbors, ranked_neighbors, Neighbor};
pub use pipeline::{forecast_holdout, forecast_holdout_with, HoldoutForecast};
pub use selection::{
    select_hyperparameters, select_hyperparameters_with, CandidateGrid, CandidateScore,
    CutoffWindow, Hyperparameters, Selection, SelectionConfig,
};
pub use series::{validate_values, Continuation, Series};
