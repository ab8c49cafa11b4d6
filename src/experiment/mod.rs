//! One-at-a-time experiment designs.
//!
//! A design is a vertical stack of trajectories. Each trajectory holds `d + 1`
//! points, and consecutive points differ in exactly one coordinate.
//!
//! - [`generate_trajectory`] builds a single trajectory from a base point
//! - [`LhsExperiment`] draws `N` trajectories from a Latin hypercube base design
//! - [`latin_hypercube`] draws the base design itself

mod lhs;
mod sampling;
mod trajectory;

pub use lhs::{build_design, LhsExperiment, DEFAULT_MAX_PADDING_ATTEMPTS};
pub use sampling::latin_hypercube;
pub use trajectory::{generate_trajectory, validate_step};

use nalgebra::DMatrix;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Sample;

/// A design strategy producing stacked trajectories.
///
/// Randomness is supplied by the caller so that seeding stays explicit.
pub trait MorrisExperiment {
    /// Input dimension `d` of the produced design.
    fn dimension(&self) -> usize;

    /// Number of trajectories `N` the design will contain.
    fn trajectory_count(&self) -> usize;

    /// Generate the design: `N * (d + 1)` rows in `d` columns, trajectory
    /// blocks contiguous and in finalization order.
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Sample>;
}

/// An ordered sequence of `d + 1` points, one per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Sample,
}

impl Trajectory {
    pub(crate) fn from_points(points: Sample) -> Self {
        debug_assert_eq!(points.nrows(), points.ncols() + 1);
        Self { points }
    }

    /// Input dimension `d`.
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    /// The `(d + 1) x d` point matrix.
    pub fn points(&self) -> &Sample {
        &self.points
    }

    /// Consume the trajectory, returning its point matrix.
    pub fn into_points(self) -> Sample {
        self.points
    }

    /// Exact-equality key over every coordinate of every point.
    ///
    /// `-0.0` and `0.0` map to the same key.
    pub(crate) fn key(&self) -> Vec<u64> {
        // Column-major order is fine: keys are only compared with each other.
        self.points.iter().map(|&v| (v + 0.0).to_bits()).collect()
    }
}

/// Stack trajectories vertically into one design.
///
/// Returns an empty `0 x dimension` matrix when `trajectories` is empty.
pub fn stack_trajectories(trajectories: &[Trajectory], dimension: usize) -> Sample {
    let rows = dimension + 1;
    DMatrix::from_fn(trajectories.len() * rows, dimension, |r, c| {
        trajectories[r / rows].points[(r % rows, c)]
    })
}
