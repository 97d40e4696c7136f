//! Nearest-neighbor search over historical segments.
//!
//! The query is always the final segment of length `l`. Every earlier start
//! position `i` in `[0, len - l)` is a candidate; candidates are ranked by
//! squared Euclidean distance to the query with a stable sort, so equal
//! distances keep ascending index order.

use crate::distance::squared_euclidean;
use crate::error::{ForecastError, Result};

/// A candidate segment and its distance to the final segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Start index of the segment.
    pub index: usize,
    /// Squared Euclidean distance to the final segment.
    pub distance: f64,
}

/// Rank every candidate segment of length `l` by distance to the final one.
///
/// Returns `len - l` neighbors ordered by ascending distance, ties broken by
/// smaller start index.
pub fn ranked_neighbors(series: &[f64], l: usize) -> Result<Vec<Neighbor>> {
    if l == 0 {
        return Err(ForecastError::invalid_parameter(
            "l",
            l,
            "segment length must be at least 1",
        ));
    }
    if l >= series.len() {
        return Err(ForecastError::InsufficientData {
            needed: l + 1,
            got: series.len(),
        });
    }

    let n_candidates = series.len() - l;
    let query = &series[n_candidates..];

    let mut ranked: Vec<Neighbor> = (0..n_candidates)
        .map(|i| Neighbor {
            index: i,
            distance: squared_euclidean(&series[i..i + l], query),
        })
        .collect();

    // `sort_by` is stable: equal distances stay in index order.
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Ok(ranked)
}

/// Start indices of the `k` segments of length `l` nearest to the final one.
///
/// Fails with `InsufficientData` when fewer than `k` candidates exist rather
/// than returning a shorter list.
pub fn nearest_neighbors(series: &[f64], k: usize, l: usize) -> Result<Vec<usize>> {
    if k == 0 {
        return Err(ForecastError::invalid_parameter(
            "k",
            k,
            "neighbor count must be at least 1",
        ));
    }

    let ranked = ranked_neighbors(series, l)?;
    if k > ranked.len() {
        return Err(ForecastError::InsufficientData {
            needed: k + l,
            got: series.len(),
        });
    }

    Ok(ranked.into_iter().take(k).map(|n| n.index).collect())
}
