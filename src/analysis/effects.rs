//! Elementary effects from matched input/output designs.
//!
//! For trajectory `k` with `d + 1` rows, the scaled input increments form a
//! `d x d` matrix `DX` and the output increments a `d x q` matrix `DY`. The
//! elementary effects are the solution `EE` of
//!
//! ```text
//! DX * EE = DY
//! ```
//!
//! Each row of `DX` has a single non-zero entry, so the system is invertible
//! for any well-formed trajectory.

use nalgebra::DMatrix;

use crate::domain::BoundedDomain;
use crate::error::{MorrisError, Result};
use crate::result::SensitivityStatistics;
use crate::statistics::WelfordColumns;
use crate::types::Sample;

/// Check that a design pair can be cut into whole trajectories.
///
/// # Errors
///
/// - `EmptySample` if the input design has no rows or columns
/// - `DimensionMismatch` if row counts differ, the output has no columns,
///   the row count is not a multiple of `d + 1`, or the domain dimension
///   differs from `d`
pub fn validate_designs(input: &Sample, output: &Sample, domain: &BoundedDomain) -> Result<()> {
    if input.nrows() == 0 || input.ncols() == 0 {
        return Err(MorrisError::EmptySample);
    }
    if output.nrows() != input.nrows() {
        return Err(MorrisError::DimensionMismatch {
            context: "output design rows",
            expected: input.nrows(),
            actual: output.nrows(),
        });
    }
    if output.ncols() == 0 {
        return Err(MorrisError::EmptySample);
    }
    let block = input.ncols() + 1;
    if input.nrows() % block != 0 {
        return Err(MorrisError::DimensionMismatch {
            context: "design rows per trajectory",
            expected: block,
            actual: input.nrows() % block,
        });
    }
    if domain.dimension() != input.ncols() {
        return Err(MorrisError::DimensionMismatch {
            context: "domain dimension",
            expected: input.ncols(),
            actual: domain.dimension(),
        });
    }
    Ok(())
}

/// Compute the `N x (d*q)` table of elementary effects.
///
/// Row `k` is the flattened `d x q` solution for trajectory `k`; column
/// `j*q + q'` holds the effect of input `j` on output `q'`.
///
/// # Arguments
///
/// * `input` - Stacked trajectories, `N*(d+1) x d`
/// * `output` - Model evaluations aligned row for row with `input`
/// * `domain` - Supplies the per-axis widths used to scale input increments
///
/// # Errors
///
/// Everything [`validate_designs`] reports, `DegenerateDomain` for a
/// zero-width axis, and `LinearSolve` when a trajectory's increments are
/// singular.
pub fn compute_elementary_effects(
    input: &Sample,
    output: &Sample,
    domain: &BoundedDomain,
) -> Result<DMatrix<f64>> {
    validate_designs(input, output, domain)?;
    let diff_bounds = domain.diff_bounds()?;

    let d = input.ncols();
    let q = output.ncols();
    let n = input.nrows() / (d + 1);
    let mut effects = DMatrix::zeros(n, d * q);

    for k in 0..n {
        let start = k * (d + 1);
        let dx = DMatrix::from_fn(d, d, |i, j| {
            (input[(start + i + 1, j)] - input[(start + i, j)]) / diff_bounds[j]
        });
        let dy = DMatrix::from_fn(d, q, |i, c| output[(start + i + 1, c)] - output[(start + i, c)]);

        let ee = dx
            .lu()
            .solve(&dy)
            .ok_or(MorrisError::LinearSolve { trajectory: k })?;
        if ee.iter().any(|v| !v.is_finite()) {
            return Err(MorrisError::LinearSolve { trajectory: k });
        }

        for j in 0..d {
            for c in 0..q {
                effects[(k, j * q + c)] = ee[(j, c)];
            }
        }
    }

    Ok(effects)
}

/// Reduce a matched design pair to elementary-effect statistics.
///
/// Rows are never reordered: row `r` of `output` is taken as the evaluation
/// of row `r` of `input`.
///
/// # Errors
///
/// See [`compute_elementary_effects`].
pub fn reduce(input: &Sample, output: &Sample, domain: &BoundedDomain) -> Result<SensitivityStatistics> {
    let effects = compute_elementary_effects(input, output, domain)?;
    let absolute = effects.abs();
    let d = input.ncols();
    let q = output.ncols();

    let mut signed_moments = WelfordColumns::new(d * q);
    let mut absolute_moments = WelfordColumns::new(d * q);
    for k in 0..effects.nrows() {
        let row: Vec<f64> = effects.row(k).iter().copied().collect();
        signed_moments.update(&row);
        let row: Vec<f64> = absolute.row(k).iter().copied().collect();
        absolute_moments.update(&row);
    }

    let signed_mean = signed_moments.mean();
    let signed_std = signed_moments.population_std();
    let absolute_mean = absolute_moments.mean();

    Ok(SensitivityStatistics {
        input_dimension: d,
        output_dimension: q,
        mean: DMatrix::from_fn(q, d, |c, j| signed_mean[j * q + c]),
        mean_absolute: DMatrix::from_fn(q, d, |c, j| absolute_mean[j * q + c]),
        standard_deviation: DMatrix::from_fn(q, d, |c, j| signed_std[j * q + c]),
        elementary_effects: effects,
        absolute_elementary_effects: absolute,
    })
}
