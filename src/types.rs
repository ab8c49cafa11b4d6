//! Type aliases and common types.

use nalgebra::DMatrix;

/// A stack of points, one per row. Designs and model outputs share this type.
pub type Sample = DMatrix<f64>;

/// Copy row `r` of a sample into an owned vector.
pub(crate) fn row_to_vec(sample: &Sample, r: usize) -> Vec<f64> {
    sample.row(r).iter().copied().collect()
}
