//! Segment distance metric.

/// Squared Euclidean distance between two equal-length segments.
///
/// Returns Σ(aᵢ - bᵢ)² without the square root. The value is only a ranking
/// key for neighbor search and is never reported as an error metric.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "segments must have equal length");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_segments() {
        let a = [1.5, -2.0, 3.25];
        assert_relative_eq!(squared_euclidean(&a, &a), 0.0);
    }

    #[test]
    fn test_no_square_root() {
        // (1-4)² + (3-7)² = 9 + 16 = 25, not 5
        assert_relative_eq!(squared_euclidean(&[1.0, 3.0], &[4.0, 7.0]), 25.0);
    }

    #[test]
    fn test_symmetric() {
        let a = [0.3, 1.7, -4.0, 2.0];
        let b = [1.1, 0.2, 0.0, 2.5];
        assert_relative_eq!(squared_euclidean(&a, &b), squared_euclidean(&b, &a));
    }

    #[test]
    fn test_empty_segments() {
        assert_relative_eq!(squared_euclidean(&[], &[]), 0.0);
    }
}
