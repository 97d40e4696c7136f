//! Validated series storage and read-only views over it.
//!
//! Cross-validation works on many truncated copies of the same history. Those
//! are expressed here as borrowed prefixes of one immutable backing buffer, so
//! no sub-series is ever allocated. The [`Continuation`] view joins a history
//! with the values known to follow it, which is how neighbor continuations are
//! resolved when they run past the end of a truncated history.

use crate::error::{ForecastError, Result};

/// Check that a slice is usable as a time series.
///
/// The series must be non-empty and contain only finite values.
pub fn validate_values(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(ForecastError::InvalidInput(format!(
            "Series contains a non-finite value at index {}",
            pos
        )));
    }
    Ok(())
}

/// An immutable, validated univariate time series (oldest observation first).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Build a series, rejecting empty input and non-finite values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        validate_values(&values)?;
        Ok(Self { values })
    }

    /// Build a series by copying a slice.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    /// All observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The sub-series of observations `0..=cutoff`, or `None` if `cutoff` is
    /// past the end.
    pub fn prefix(&self, cutoff: usize) -> Option<&[f64]> {
        self.values.get(..=cutoff)
    }

    /// The `len` observations immediately following `cutoff`, or `None` if
    /// the series does not extend that far.
    pub fn following(&self, cutoff: usize, len: usize) -> Option<&[f64]> {
        let start = cutoff.checked_add(1)?;
        self.values.get(start..start.checked_add(len)?)
    }

    /// Split into a training part and the last `horizon` observations.
    ///
    /// Returns `None` unless at least one observation remains for training.
    pub fn split_holdout(&self, horizon: usize) -> Option<(&[f64], &[f64])> {
        if horizon >= self.values.len() {
            return None;
        }
        Some(self.values.split_at(self.values.len() - horizon))
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = ForecastError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

/// Logical concatenation of a history and the values known to follow it.
///
/// Index `i < history.len()` reads the history; larger indices read `future`
/// at offset `i - history.len()`. Anything beyond both is an error.
#[derive(Debug, Clone, Copy)]
pub struct Continuation<'a> {
    history: &'a [f64],
    future: &'a [f64],
}

impl<'a> Continuation<'a> {
    pub fn new(history: &'a [f64], future: &'a [f64]) -> Self {
        Self { history, future }
    }

    /// Total number of addressable values.
    pub fn len(&self) -> usize {
        self.history.len() + self.future.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.future.is_empty()
    }

    /// Value at a logical index.
    #[inline]
    pub fn get(&self, index: usize) -> Result<f64> {
        match index.checked_sub(self.history.len()) {
            None => Ok(self.history[index]),
            Some(offset) => {
                self.future
                    .get(offset)
                    .copied()
                    .ok_or(ForecastError::IndexOutOfBounds {
                        index,
                        available: self.len(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rejects_empty() {
        let err = Series::new(vec![]).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { needed: 1, got: 0 });
    }

    #[test]
    fn test_series_rejects_non_finite() {
        assert!(matches!(
            Series::new(vec![1.0, f64::NAN, 3.0]),
            Err(ForecastError::InvalidInput(_))
        ));
        assert!(matches!(
            Series::from_slice(&[1.0, f64::INFINITY]),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_prefix_and_following() {
        let s = Series::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.prefix(2), Some(&[0.0, 1.0, 2.0][..]));
        assert_eq!(s.following(2, 2), Some(&[3.0, 4.0][..]));
        assert_eq!(s.following(2, 3), Some(&[3.0, 4.0, 5.0][..]));
        assert_eq!(s.following(2, 4), None);
        assert_eq!(s.prefix(6), None);
    }

    #[test]
    fn test_split_holdout() {
        let s = Series::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let (train, holdout) = s.split_holdout(2).unwrap();
        assert_eq!(train, &[1.0, 2.0, 3.0]);
        assert_eq!(holdout, &[4.0, 5.0]);

        assert!(s.split_holdout(5).is_none());
    }

    #[test]
    fn test_continuation_crosses_boundary() {
        let history = [1.0, 2.0, 3.0];
        let future = [10.0, 20.0];
        let c = Continuation::new(&history, &future);

        assert_eq!(c.len(), 5);
        assert_eq!(c.get(2).unwrap(), 3.0);
        assert_eq!(c.get(3).unwrap(), 10.0);
        assert_eq!(c.get(4).unwrap(), 20.0);
        assert_eq!(
            c.get(5).unwrap_err(),
            ForecastError::IndexOutOfBounds {
                index: 5,
                available: 5
            }
        );
    }
}
