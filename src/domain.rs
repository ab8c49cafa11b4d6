//! Rectangular input domain.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{MorrisError, Result};

/// Per-axis lower and upper bounds of the screened inputs.
///
/// Immutable once constructed; `lower[j] <= upper[j]` holds for every axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedDomain {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl BoundedDomain {
    /// Create a domain from explicit bounds.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the bounds have different lengths.
    /// - `EmptySample` if the bounds are empty.
    /// - `InvalidDomain` if a bound is not finite or `lower > upper`.
    pub fn new(lower: impl Into<Vec<f64>>, upper: impl Into<Vec<f64>>) -> Result<Self> {
        let lower = lower.into();
        let upper = upper.into();
        if lower.len() != upper.len() {
            return Err(MorrisError::DimensionMismatch {
                context: "domain bounds",
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(MorrisError::EmptySample);
        }
        for (axis, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(MorrisError::InvalidDomain {
                    axis,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self {
            lower: DVector::from_vec(lower),
            upper: DVector::from_vec(upper),
        })
    }

    /// The unit hypercube `[0, 1]^dimension`.
    pub fn unit(dimension: usize) -> Self {
        Self {
            lower: DVector::zeros(dimension),
            upper: DVector::from_element(dimension, 1.0),
        }
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    pub fn lower(&self) -> &DVector<f64> {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &DVector<f64> {
        &self.upper
    }

    /// Width of every axis, `upper - lower`.
    ///
    /// # Errors
    ///
    /// `DegenerateDomain` naming the first zero-width axis.
    pub fn diff_bounds(&self) -> Result<DVector<f64>> {
        let diff = &self.upper - &self.lower;
        match diff.iter().position(|&w| w == 0.0) {
            Some(axis) => Err(MorrisError::DegenerateDomain { axis }),
            None => Ok(diff),
        }
    }

    /// Whether `value` lies within the bounds of `axis` (inclusive).
    #[inline]
    pub fn contains_coordinate(&self, axis: usize, value: f64) -> bool {
        self.lower[axis] <= value && value <= self.upper[axis]
    }

    /// Whether every coordinate of `point` lies within the bounds.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && point
                .iter()
                .enumerate()
                .all(|(axis, &v)| self.contains_coordinate(axis, v))
    }

    /// Map a point of this domain into `[0, 1]^d` via `(x - lower) / diffBounds`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for a wrongly sized point, `DegenerateDomain` for a
    /// zero-width axis.
    pub fn to_unit(&self, point: &[f64]) -> Result<Vec<f64>> {
        if point.len() != self.dimension() {
            return Err(MorrisError::DimensionMismatch {
                context: "point to rescale",
                expected: self.dimension(),
                actual: point.len(),
            });
        }
        let diff = self.diff_bounds()?;
        Ok(point
            .iter()
            .enumerate()
            .map(|(j, &x)| (x - self.lower[j]) / diff[j])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = BoundedDomain::new(vec![0.0, 2.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, MorrisError::InvalidDomain { axis: 1, .. }));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = BoundedDomain::new(vec![0.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, MorrisError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_diff_bounds_degenerate() {
        let domain = BoundedDomain::new(vec![0.0, 3.0], vec![1.0, 3.0]).unwrap();
        assert!(matches!(
            domain.diff_bounds(),
            Err(MorrisError::DegenerateDomain { axis: 1 })
        ));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let domain = BoundedDomain::unit(2);
        assert!(domain.contains(&[0.0, 1.0]));
        assert!(!domain.contains(&[-1e-12, 0.5]));
        assert!(!domain.contains(&[0.5]));
    }

    #[test]
    fn test_to_unit() {
        let domain = BoundedDomain::new(vec![-1.0, 10.0], vec![1.0, 20.0]).unwrap();
        let unit = domain.to_unit(&[0.0, 12.5]).unwrap();
        assert!((unit[0] - 0.5).abs() < 1e-12);
        assert!((unit[1] - 0.25).abs() < 1e-12);
    }
}
