//! Cross-validated selection of the k-NN hyperparameters `(k, l)`.
//!
//! Every candidate pair on a fixed grid is backtested on a set of training
//! cutoffs near the end of the series. For each cutoff `i` the forecaster runs
//! on `series[..=i]` and is scored against `series[i+1..=i+h]`; the RMSPE of
//! all cutoffs is summed per pair and the pair with the smallest sum wins.
//!
//! # Grid
//!
//! * `k`: odd values in `[1, ceil(k_fraction * n))`, step `k_step`
//! * `l`: values in `[1, ceil(l_fraction * n))`, step `l_step`
//!
//! # Cutoffs
//!
//! From `n - 1 - max(ceil(excluded_tail_fraction * n), h)` down to
//! `ceil(min_train_fraction * n)` inclusive. Short training prefixes are never
//! used because the best `k` grows with sample size, and the most recent slice
//! of the series is never a training cutoff.
//!
//! # Determinism
//!
//! Candidates are scored independently (in parallel with the `parallel`
//! feature) and collected in grid order. The winner is then picked by a
//! sequential strict less-than scan starting from +∞, so the first pair in
//! `(k ascending, l ascending)` order wins ties regardless of scheduling.

use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{ForecastError, Result};
use crate::knn::knn_forecast;
use crate::series::Series;

/// Search constants for hyperparameter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Upper bound (exclusive) of the `k` grid as a fraction of the series length.
    pub k_fraction: f64,
    /// Upper bound (exclusive) of the `l` grid as a fraction of the series length.
    pub l_fraction: f64,
    /// Step between `k` candidates. The default of 2 keeps `k` odd.
    pub k_step: usize,
    /// Step between `l` candidates.
    pub l_step: usize,
    /// Smallest training cutoff as a fraction of the series length.
    pub min_train_fraction: f64,
    /// Fraction of the most recent observations never used as a cutoff.
    pub excluded_tail_fraction: f64,
    /// Score candidates on the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            k_fraction: 0.035,
            l_fraction: 0.05,
            k_step: 2,
            l_step: 3,
            min_train_fraction: 0.80,
            excluded_tail_fraction: 0.05,
            parallel: true,
        }
    }
}

impl SelectionConfig {
    /// Reject fractions outside `(0, 1]` and zero steps.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("k_fraction", self.k_fraction),
            ("l_fraction", self.l_fraction),
            ("min_train_fraction", self.min_train_fraction),
            ("excluded_tail_fraction", self.excluded_tail_fraction),
        ];
        for (param, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ForecastError::invalid_parameter(
                    param,
                    value,
                    "must be in (0, 1]",
                ));
            }
        }
        if self.k_step == 0 {
            return Err(ForecastError::invalid_parameter(
                "k_step",
                self.k_step,
                "must be positive",
            ));
        }
        if self.l_step == 0 {
            return Err(ForecastError::invalid_parameter(
                "l_step",
                self.l_step,
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// `ceil(fraction * n)`.
fn ceil_fraction(n: usize, fraction: f64) -> usize {
    // Absorb representation error in the fraction (0.8 * 40 must be 32, not 33).
    ((fraction * n as f64) - 1e-9).ceil().max(0.0) as usize
}

/// Neighbor count and segment length of the k-NN forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hyperparameters {
    /// Number of neighbors averaged.
    pub k: usize,
    /// Length of the matched segments.
    pub l: usize,
}

/// Candidate `(k, l)` pairs for a series of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGrid {
    k_end: usize,
    k_step: usize,
    l_end: usize,
    l_step: usize,
}

impl CandidateGrid {
    pub fn for_length(n: usize, config: &SelectionConfig) -> Self {
        Self {
            k_end: ceil_fraction(n, config.k_fraction),
            k_step: config.k_step.max(1),
            l_end: ceil_fraction(n, config.l_fraction),
            l_step: config.l_step.max(1),
        }
    }

    pub fn k_values(&self) -> impl Iterator<Item = usize> + Clone {
        (1..self.k_end).step_by(self.k_step)
    }

    pub fn l_values(&self) -> impl Iterator<Item = usize> + Clone {
        (1..self.l_end).step_by(self.l_step)
    }

    /// All pairs, `k` in the outer loop and `l` in the inner loop.
    pub fn iter(&self) -> impl Iterator<Item = Hyperparameters> + '_ {
        self.k_values()
            .flat_map(move |k| self.l_values().map(move |l| Hyperparameters { k, l }))
    }

    pub fn len(&self) -> usize {
        self.k_values().count() * self.l_values().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Training cutoffs used to backtest each candidate, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffWindow {
    first: usize,
    last: usize,
    horizon: usize,
}

impl CutoffWindow {
    /// The cutoff range for a series of length `n` and horizon `horizon`, or
    /// `None` when it is empty.
    pub fn for_length(n: usize, horizon: usize, config: &SelectionConfig) -> Option<Self> {
        let excluded = ceil_fraction(n, config.excluded_tail_fraction).max(horizon);
        let first = n.checked_sub(1)?.checked_sub(excluded)?;
        let last = ceil_fraction(n, config.min_train_fraction);
        (first >= last).then_some(Self {
            first,
            last,
            horizon,
        })
    }

    /// Highest cutoff.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Lowest cutoff.
    pub fn last(&self) -> usize {
        self.last
    }

    /// Cutoffs in descending order.
    pub fn cutoffs(&self) -> impl Iterator<Item = usize> {
        (self.last..=self.first).rev()
    }

    pub fn len(&self) -> usize {
        self.first - self.last + 1
    }

    /// A constructed window holds at least one cutoff.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Summed RMSPE of `params` over every cutoff.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if the window does not fit inside `series`.
    pub fn score(&self, series: &Series, params: Hyperparameters) -> Result<f64> {
        self.cutoffs().try_fold(0.0, |sum, cutoff| {
            let out_of_bounds = || ForecastError::IndexOutOfBounds {
                index: cutoff + self.horizon,
                available: series.len(),
            };
            let train = series.prefix(cutoff).ok_or_else(out_of_bounds)?;
            let truth = series
                .following(cutoff, self.horizon)
                .ok_or_else(out_of_bounds)?;
            let result = knn_forecast(train, params.k, params.l, truth)?;
            Ok(sum + result.rmspe())
        })
    }
}

/// Accumulated cross-validation score of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub params: Hyperparameters,
    /// Sum of RMSPE over all cutoffs.
    pub score: f64,
}

/// Outcome of hyperparameter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Winning pair.
    pub best: Hyperparameters,
    /// Summed RMSPE of the winning pair.
    pub score: f64,
    /// Number of cutoffs each candidate was scored on.
    pub n_cutoffs: usize,
    /// Every candidate's score, in grid order.
    pub scores: Vec<CandidateScore>,
}

/// Select `(k, l)` for `series` and horizon `horizon` with the default grid.
///
/// # Example
/// ```
/// use knn_fcst_core::select_hyperparameters;
/// let series: Vec<f64> = (0..120).map(|i| 50.0 + 10.0 * (i as f64 * 0.3).sin()).collect();
/// let selection = select_hyperparameters(&series, 3).unwrap();
/// assert_eq!(selection.best.k % 2, 1);
/// ```
pub fn select_hyperparameters(series: &[f64], horizon: usize) -> Result<Selection> {
    select_hyperparameters_with(series, horizon, &SelectionConfig::default())
}

/// Select `(k, l)` with explicit search constants.
///
/// # Errors
/// * `InvalidHorizon` if `horizon` is 0 or no training cutoff exists
/// * `InsufficientData` if the series is too short for any grid candidate
/// * `InvalidParameter` if the largest grid `k` or `l` does not fit the
///   shortest training prefix
/// * `ComputationError` if no candidate has a finite score
pub fn select_hyperparameters_with(
    series: &[f64],
    horizon: usize,
    config: &SelectionConfig,
) -> Result<Selection> {
    select_with(series, horizon, config, |series, window, params| {
        window.score(series, params)
    })
}

fn min_length_for(fraction: f64) -> usize {
    (1.0 / fraction).floor() as usize + 1
}

/// Reject grids whose largest `l` or `k` cannot run on the shortest training
/// prefix (`l < m` and `k <= m - l` for a prefix of length `m`).
fn check_grid_fits(
    grid: &CandidateGrid,
    window: &CutoffWindow,
    config: &SelectionConfig,
) -> Result<()> {
    let shortest = window.last() + 1;
    let k_max = grid.k_values().last().unwrap_or(0);
    let l_max = grid.l_values().last().unwrap_or(0);
    if l_max >= shortest {
        return Err(ForecastError::invalid_parameter(
            "l_fraction",
            config.l_fraction,
            format!(
                "largest segment length {} does not fit the shortest prefix of {}",
                l_max, shortest
            ),
        ));
    }
    if k_max > shortest - l_max {
        return Err(ForecastError::invalid_parameter(
            "k_fraction",
            config.k_fraction,
            format!(
                "largest neighbor count {} exceeds the {} candidates of the shortest prefix",
                k_max,
                shortest - l_max
            ),
        ));
    }
    Ok(())
}

fn select_with<F>(
    series: &[f64],
    horizon: usize,
    config: &SelectionConfig,
    evaluate: F,
) -> Result<Selection>
where
    F: Fn(&Series, &CutoffWindow, Hyperparameters) -> Result<f64> + Sync,
{
    config.validate()?;
    let series = Series::from_slice(series)?;

    let n = series.len();
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon { horizon, length: n });
    }

    let window = CutoffWindow::for_length(n, horizon, config)
        .ok_or(ForecastError::InvalidHorizon { horizon, length: n })?;

    let grid = CandidateGrid::for_length(n, config);
    if grid.is_empty() {
        return Err(ForecastError::InsufficientData {
            needed: min_length_for(config.k_fraction).max(min_length_for(config.l_fraction)),
            got: n,
        });
    }
    check_grid_fits(&grid, &window, config)?;

    debug!(
        "selecting hyperparameters: n={}, horizon={}, {} candidates, cutoffs {}..={}",
        n,
        horizon,
        grid.len(),
        window.last(),
        window.first()
    );

    let candidates: Vec<Hyperparameters> = grid.iter().collect();
    let score_one = |&params: &Hyperparameters| -> Result<CandidateScore> {
        let score = evaluate(&series, &window, params)?;
        trace!("k={} l={} score={}", params.k, params.l, score);
        Ok(CandidateScore { params, score })
    };

    #[cfg(feature = "parallel")]
    let scores: Vec<CandidateScore> = if config.parallel {
        candidates.par_iter().map(score_one).collect::<Result<_>>()?
    } else {
        candidates.iter().map(score_one).collect::<Result<_>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let scores: Vec<CandidateScore> = candidates.iter().map(score_one).collect::<Result<_>>()?;

    let mut best: Option<CandidateScore> = None;
    let mut best_score = f64::INFINITY;
    for candidate in &scores {
        if candidate.score < best_score {
            best_score = candidate.score;
            best = Some(*candidate);
        }
    }

    let best = best.ok_or_else(|| {
        ForecastError::ComputationError(
            "no candidate (k, l) produced a finite cross-validation score".to_string(),
        )
    })?;

    debug!(
        "selected k={} l={} (score {})",
        best.params.k, best.params.l, best.score
    );

    Ok(Selection {
        best: best.params,
        score: best.score,
        n_cutoffs: window.len(),
        scores,
    })
}
