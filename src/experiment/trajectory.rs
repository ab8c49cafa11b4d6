//! Single-trajectory generation with boundary reflection.

use nalgebra::{DMatrix, DVector};
use rand::seq::index;
use rand::Rng;

use super::Trajectory;
use crate::domain::BoundedDomain;
use crate::error::{MorrisError, Result};

/// Check that a step vector matches `dimension` and is positive and finite.
pub fn validate_step(step: &DVector<f64>, dimension: usize) -> Result<()> {
    if step.len() != dimension {
        return Err(MorrisError::DimensionMismatch {
            context: "step vector",
            expected: dimension,
            actual: step.len(),
        });
    }
    match step.iter().position(|&s| !(s.is_finite() && s > 0.0)) {
        Some(axis) => Err(MorrisError::InvalidStep {
            axis,
            value: step[axis],
        }),
        None => Ok(()),
    }
}

/// Generate one one-at-a-time trajectory starting at `base`.
///
/// Draws a random permutation of the `d` axes, then `d` random directions.
/// Step `i` moves axis `permutation[i]` by `direction[i] * step[axis]`; when
/// that leaves the domain the opposite direction is used instead.
///
/// # Arguments
///
/// * `base` - Starting point, must lie in `domain`
/// * `domain` - Bounds every point must respect
/// * `step` - Positive perturbation per axis
/// * `rng` - Source of the permutation and direction draws
///
/// # Returns
///
/// A trajectory of `d + 1` points where every axis is moved exactly once.
///
/// # Errors
///
/// - `DimensionMismatch` or `InvalidStep` for malformed inputs
/// - `OutsideDomain` if `base` is not in `domain`
/// - `InfeasibleTrajectory` if neither direction fits for some step
pub fn generate_trajectory<R: Rng + ?Sized>(
    base: &[f64],
    domain: &BoundedDomain,
    step: &DVector<f64>,
    rng: &mut R,
) -> Result<Trajectory> {
    let dimension = domain.dimension();
    if base.len() != dimension {
        return Err(MorrisError::DimensionMismatch {
            context: "base point",
            expected: dimension,
            actual: base.len(),
        });
    }
    validate_step(step, dimension)?;
    if let Some(axis) = (0..dimension).find(|&j| !domain.contains_coordinate(j, base[j])) {
        return Err(MorrisError::OutsideDomain {
            axis,
            value: base[axis],
        });
    }

    let permutation = index::sample(rng, dimension, dimension).into_vec();
    let directions: Vec<f64> = (0..dimension)
        .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
        .collect();

    let mut points = DMatrix::zeros(dimension + 1, dimension);
    let mut current = base.to_vec();
    points.row_mut(0).iter_mut().zip(&current).for_each(|(p, &x)| *p = x);

    for (i, (&axis, &direction)) in permutation.iter().zip(&directions).enumerate() {
        let delta = step[axis] * direction;
        let value = current[axis];
        current[axis] = if domain.contains_coordinate(axis, value + delta) {
            value + delta
        } else if domain.contains_coordinate(axis, value - delta) {
            value - delta
        } else {
            return Err(MorrisError::InfeasibleTrajectory {
                step: i,
                axis,
                value,
                delta: step[axis],
            });
        };
        points
            .row_mut(i + 1)
            .iter_mut()
            .zip(&current)
            .for_each(|(p, &x)| *p = x);
    }

    Ok(Trajectory::from_points(points))
}
