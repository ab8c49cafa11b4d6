//! Morris designs seeded from a Latin hypercube base design.

use std::collections::HashSet;

use nalgebra::DVector;
use rand::seq::index;
use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use super::sampling::latin_hypercube;
use super::trajectory::{generate_trajectory, validate_step};
use super::{stack_trajectories, MorrisExperiment, Trajectory};
use crate::domain::BoundedDomain;
use crate::error::{MorrisError, Result};
use crate::types::{row_to_vec, Sample};

/// Default bound on padding attempts after de-duplication.
pub const DEFAULT_MAX_PADDING_ATTEMPTS: usize = 10_000;

/// Draw `n` trajectories from the rows of `base`.
///
/// When `n <= base.nrows()` the base points are a random `n`-permutation of
/// the rows, so no row is reused. Otherwise every row is used once plus
/// `n - size` rows drawn with replacement. In both cases identical
/// trajectories are then collapsed and new ones are appended until `n`
/// unique trajectories exist.
///
/// # Arguments
///
/// * `base` - Candidate base points, one per row, inside `domain`
/// * `n` - Number of trajectories requested
/// * `domain` - Bounds of every trajectory point
/// * `step` - Per-axis perturbation
/// * `max_padding_attempts` - Bound on trajectories generated while padding
/// * `rng` - Source of every random draw
///
/// # Returns
///
/// Exactly `n` trajectories in finalization order.
///
/// # Errors
///
/// - `EmptySample` if `base` has no rows or `n == 0`
/// - `DimensionMismatch` / `InvalidStep` for inconsistent inputs
/// - any error from [`generate_trajectory`]
/// - `TooManyRetries` if padding cannot reach `n` unique trajectories
pub fn build_design<R: Rng + ?Sized>(
    base: &Sample,
    n: usize,
    domain: &BoundedDomain,
    step: &DVector<f64>,
    max_padding_attempts: usize,
    rng: &mut R,
) -> Result<Vec<Trajectory>> {
    let size = base.nrows();
    if size == 0 || n == 0 {
        return Err(MorrisError::EmptySample);
    }
    if base.ncols() != domain.dimension() {
        return Err(MorrisError::DimensionMismatch {
            context: "base design columns",
            expected: domain.dimension(),
            actual: base.ncols(),
        });
    }
    validate_step(step, domain.dimension())?;

    let indices: Vec<usize> = if n <= size {
        info!(n, size, "trajectory count within base design size, drawing independent paths");
        index::sample(rng, size, n).into_vec()
    } else {
        info!(n, size, "trajectory count exceeds base design size, some paths share a base point");
        let mut indices: Vec<usize> = (0..n - size).map(|_| rng.random_range(0..size)).collect();
        indices.extend(index::sample(rng, size, size).into_iter());
        indices
    };

    // Repeated base rows can collide even without replacement.
    let mut seen = HashSet::with_capacity(n);
    let mut unique = Vec::with_capacity(n);
    for (k, &idx) in indices.iter().enumerate() {
        debug!(trajectory = k, index = idx, "generating trajectory");
        let trajectory = generate_trajectory(&row_to_vec(base, idx), domain, step, rng)?;
        if seen.insert(trajectory.key()) {
            unique.push(trajectory);
        }
    }

    if unique.len() < n {
        warn!(
            duplicates = n - unique.len(),
            "dropped duplicate trajectories, padding with extra draws"
        );
    }

    let mut attempts = 0;
    while unique.len() < n {
        if attempts >= max_padding_attempts {
            return Err(MorrisError::TooManyRetries {
                requested: n,
                unique: unique.len(),
                attempts,
            });
        }
        attempts += 1;
        let idx = rng.random_range(0..size);
        let trajectory = generate_trajectory(&row_to_vec(base, idx), domain, step, rng)?;
        if seen.insert(trajectory.key()) {
            unique.push(trajectory);
        }
    }

    Ok(unique)
}

/// Morris experiment whose trajectories start from Latin hypercube points.
///
/// Trajectories are built in the unit hypercube with a step of `1 / size`
/// per axis by default, then mapped affinely onto the target domain.
#[derive(Debug, Clone)]
pub struct LhsExperiment {
    unit_base: Sample,
    domain: BoundedDomain,
    step: DVector<f64>,
    trajectories: usize,
    max_padding_attempts: usize,
}

impl LhsExperiment {
    /// Experiment over `[0, 1]^d` from a base design already in the unit cube.
    ///
    /// # Errors
    ///
    /// `EmptySample` for an empty base design, `OutsideDomain` if a base
    /// point is outside `[0, 1]^d`.
    pub fn new(unit_base: Sample, trajectories: usize) -> Result<Self> {
        let domain = BoundedDomain::unit(unit_base.ncols());
        Self::from_unit(unit_base, domain, trajectories)
    }

    /// Experiment over `domain` from a base design expressed in `domain`.
    ///
    /// Base points are rescaled with `(x - lower) / (upper - lower)`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the base design and domain disagree,
    /// `DegenerateDomain` for a zero-width axis, `OutsideDomain` for a base
    /// point outside the domain.
    pub fn with_bounds(base: &Sample, domain: BoundedDomain, trajectories: usize) -> Result<Self> {
        if base.ncols() != domain.dimension() {
            return Err(MorrisError::DimensionMismatch {
                context: "base design columns",
                expected: domain.dimension(),
                actual: base.ncols(),
            });
        }
        let mut unit_base = Sample::zeros(base.nrows(), base.ncols());
        for r in 0..base.nrows() {
            let unit = domain.to_unit(&row_to_vec(base, r))?;
            unit_base
                .row_mut(r)
                .iter_mut()
                .zip(unit)
                .for_each(|(dst, u)| *dst = u);
        }
        Self::from_unit(unit_base, domain, trajectories)
    }

    /// Experiment over `domain` from a base design already in the unit cube.
    ///
    /// # Errors
    ///
    /// Same as [`LhsExperiment::with_bounds`].
    pub fn from_unit(unit_base: Sample, domain: BoundedDomain, trajectories: usize) -> Result<Self> {
        if unit_base.nrows() == 0 || unit_base.ncols() == 0 {
            return Err(MorrisError::EmptySample);
        }
        if unit_base.ncols() != domain.dimension() {
            return Err(MorrisError::DimensionMismatch {
                context: "base design columns",
                expected: domain.dimension(),
                actual: unit_base.ncols(),
            });
        }
        domain.diff_bounds()?;
        let unit = BoundedDomain::unit(unit_base.ncols());
        for r in 0..unit_base.nrows() {
            for (axis, &value) in unit_base.row(r).iter().enumerate() {
                if !unit.contains_coordinate(axis, value) {
                    return Err(MorrisError::OutsideDomain { axis, value });
                }
            }
        }
        let step = DVector::from_element(unit_base.ncols(), 1.0 / unit_base.nrows() as f64);
        Ok(Self {
            unit_base,
            domain,
            step,
            trajectories,
            max_padding_attempts: DEFAULT_MAX_PADDING_ATTEMPTS,
        })
    }

    /// Experiment from a freshly drawn Latin hypercube of `size` points.
    ///
    /// # Errors
    ///
    /// `EmptySample` if `size` or the domain dimension is zero.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        domain: BoundedDomain,
        trajectories: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let unit_base = latin_hypercube(size, domain.dimension(), rng)?;
        Self::from_unit(unit_base, domain, trajectories)
    }

    /// Override the step vector, expressed in unit-cube coordinates.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` or `InvalidStep` for a malformed step.
    pub fn with_step(mut self, step: DVector<f64>) -> Result<Self> {
        validate_step(&step, self.dimension())?;
        self.step = step;
        Ok(self)
    }

    /// Use a regular `levels`-level step, `1 / levels` on every axis.
    ///
    /// # Errors
    ///
    /// `InvalidStep` if `levels == 0`.
    pub fn with_levels(self, levels: usize) -> Result<Self> {
        if levels == 0 {
            return Err(MorrisError::InvalidStep {
                axis: 0,
                value: 0.0,
            });
        }
        let step = DVector::from_element(self.dimension(), 1.0 / levels as f64);
        self.with_step(step)
    }

    /// Bound the padding loop used after de-duplication.
    pub fn max_padding_attempts(mut self, attempts: usize) -> Self {
        self.max_padding_attempts = attempts;
        self
    }

    /// Target domain of the generated design.
    pub fn domain(&self) -> &BoundedDomain {
        &self.domain
    }

    /// Step vector in unit-cube coordinates.
    pub fn step(&self) -> &DVector<f64> {
        &self.step
    }

    /// Number of candidate base points.
    pub fn base_size(&self) -> usize {
        self.unit_base.nrows()
    }

    /// Generate the trajectories in unit-cube coordinates.
    ///
    /// # Errors
    ///
    /// See [`build_design`].
    pub fn generate_unit_trajectories<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Trajectory>> {
        build_design(
            &self.unit_base,
            self.trajectories,
            &BoundedDomain::unit(self.dimension()),
            &self.step,
            self.max_padding_attempts,
            rng,
        )
    }

    /// Map a stacked unit-cube design onto the domain.
    ///
    /// Fails when a move collapses to zero width after rounding, which
    /// happens for narrow domains far from the origin.
    fn to_domain(&self, unit_design: &Sample) -> Result<Sample> {
        let lower = self.domain.lower();
        let upper = self.domain.upper();
        let width = upper - lower;
        let mut design = unit_design.clone();
        for (c, mut column) in design.column_iter_mut().enumerate() {
            column
                .iter_mut()
                .for_each(|v| *v = (lower[c] + *v * width[c]).clamp(lower[c], upper[c]));
        }

        let rows = self.dimension() + 1;
        for r in 0..design.nrows() {
            if r % rows == 0 {
                continue;
            }
            for c in 0..design.ncols() {
                if unit_design[(r, c)] != unit_design[(r - 1, c)] && design[(r, c)] == design[(r - 1, c)] {
                    return Err(MorrisError::InfeasibleTrajectory {
                        step: r % rows - 1,
                        axis: c,
                        value: design[(r - 1, c)],
                        delta: self.step[c] * width[c],
                    });
                }
            }
        }
        Ok(design)
    }
}

impl MorrisExperiment for LhsExperiment {
    fn dimension(&self) -> usize {
        self.unit_base.ncols()
    }

    fn trajectory_count(&self) -> usize {
        self.trajectories
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Result<Sample> {
        let trajectories = self.generate_unit_trajectories(rng)?;
        let unit_design = stack_trajectories(&trajectories, self.dimension());
        self.to_domain(&unit_design)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_base(size: usize, dimension: usize) -> Sample {
        Sample::from_fn(size, dimension, |r, c| ((r + c) % size) as f64 / size as f64 + 0.5 / size as f64)
    }

    fn assert_unique(trajectories: &[Trajectory]) {
        let keys: HashSet<Vec<u64>> = trajectories.iter().map(Trajectory::key).collect();
        assert_eq!(keys.len(), trajectories.len());
    }

    #[test]
    fn test_independent_branch_uses_distinct_base_points() {
        let base = grid_base(20, 3);
        let domain = BoundedDomain::unit(3);
        let step = DVector::from_element(3, 0.05);
        let mut rng = StdRng::seed_from_u64(42);

        let trajectories = build_design(&base, 8, &domain, &step, 100, &mut rng).unwrap();
        assert_eq!(trajectories.len(), 8);

        let starts: HashSet<Vec<u64>> = trajectories
            .iter()
            .map(|t| t.points().row(0).iter().map(|v| v.to_bits()).collect())
            .collect();
        assert_eq!(starts.len(), 8);
    }

    #[test]
    fn test_replacement_branch_reaches_requested_count() {
        let base = grid_base(4, 3);
        let domain = BoundedDomain::unit(3);
        let step = DVector::from_element(3, 0.25);
        let mut rng = StdRng::seed_from_u64(5);

        let trajectories = build_design(&base, 30, &domain, &step, 10_000, &mut rng).unwrap();
        assert_eq!(trajectories.len(), 30);
        assert_unique(&trajectories);
    }

    #[test]
    fn test_padding_bound_surfaces_error() {
        // One base point in 1-d at 0.0 with step 1.0 has a single reachable trajectory.
        let base = Sample::from_row_slice(1, 1, &[0.0]);
        let domain = BoundedDomain::unit(1);
        let step = DVector::from_element(1, 1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let err = build_design(&base, 3, &domain, &step, 50, &mut rng).unwrap_err();
        match err {
            MorrisError::TooManyRetries {
                requested,
                unique,
                attempts,
            } => {
                assert_eq!(requested, 3);
                assert_eq!(unique, 1);
                assert_eq!(attempts, 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_base_rows_without_replacement() {
        // Three copies of a point with a single reachable trajectory.
        let base = Sample::from_row_slice(3, 1, &[0.0, 0.0, 0.0]);
        let domain = BoundedDomain::unit(1);
        let step = DVector::from_element(1, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let err = build_design(&base, 3, &domain, &step, 20, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            MorrisError::TooManyRetries { requested: 3, unique: 1, attempts: 20 }
        ));
    }

    #[test]
    fn test_repeated_base_rows_are_padded() {
        let base = Sample::from_row_slice(4, 2, &[0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let domain = BoundedDomain::unit(2);
        let step = DVector::from_element(2, 0.25);
        let mut rng = StdRng::seed_from_u64(4);

        let trajectories = build_design(&base, 4, &domain, &step, 10_000, &mut rng).unwrap();
        assert_eq!(trajectories.len(), 4);
        assert_unique(&trajectories);
    }

    #[test]
    fn test_replacement_branch_uses_every_base_point() {
        let base = grid_base(5, 3);
        let domain = BoundedDomain::unit(3);
        let step = DVector::from_element(3, 0.2);
        let mut rng = StdRng::seed_from_u64(9);

        let trajectories = build_design(&base, 12, &domain, &step, 10_000, &mut rng).unwrap();
        let starts: HashSet<Vec<u64>> = trajectories
            .iter()
            .map(|t| t.points().row(0).iter().map(|v| v.to_bits()).collect())
            .collect();
        for r in 0..base.nrows() {
            let row: Vec<u64> = base.row(r).iter().map(|v| v.to_bits()).collect();
            assert!(starts.contains(&row), "base row {r} never starts a trajectory");
        }
    }

    #[test]
    fn test_replacement_branch_draw_order() {
        let base = grid_base(4, 3);
        let domain = BoundedDomain::unit(3);
        let step = DVector::from_element(3, 0.25);
        let n = 7;
        let rng = StdRng::seed_from_u64(21);

        // Replay: extra indices with replacement, then a full permutation,
        // then one trajectory per index in that order.
        let mut replay = rng.clone();
        let mut indices: Vec<usize> = (0..n - 4).map(|_| replay.random_range(0..4)).collect();
        indices.extend(index::sample(&mut replay, 4, 4).into_iter());
        let mut seen = HashSet::new();
        let expected: Vec<Trajectory> = indices
            .iter()
            .map(|&idx| generate_trajectory(&row_to_vec(&base, idx), &domain, &step, &mut replay).unwrap())
            .filter(|t| seen.insert(t.key()))
            .collect();

        let mut rng = rng;
        let trajectories = build_design(&base, n, &domain, &step, 10_000, &mut rng).unwrap();
        assert_eq!(trajectories.len(), n);
        assert_eq!(&trajectories[..expected.len()], &expected[..]);
    }

    #[test]
    fn test_collapsed_step_after_mapping() {
        // Offsets below half an ulp of 1e16 vanish when added to the lower bound.
        let domain = BoundedDomain::new(vec![1e16], vec![1e16 + 4.0]).unwrap();
        let unit_base = Sample::from_row_slice(1, 1, &[0.1]);
        let experiment = LhsExperiment::from_unit(unit_base, domain, 1)
            .unwrap()
            .with_step(DVector::from_element(1, 0.1))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        assert!(matches!(
            experiment.generate(&mut rng),
            Err(MorrisError::InfeasibleTrajectory { step: 0, axis: 0, .. })
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let domain = BoundedDomain::unit(2);
        let step = DVector::from_element(2, 0.1);
        let mut rng = StdRng::seed_from_u64(1);

        let empty = Sample::zeros(0, 2);
        assert!(matches!(
            build_design(&empty, 3, &domain, &step, 10, &mut rng),
            Err(MorrisError::EmptySample)
        ));
        let base = grid_base(5, 2);
        assert!(matches!(
            build_design(&base, 0, &domain, &step, 10, &mut rng),
            Err(MorrisError::EmptySample)
        ));
    }

    #[test]
    fn test_default_step_is_inverse_size() {
        let experiment = LhsExperiment::new(grid_base(8, 2), 4).unwrap();
        assert!(experiment.step().iter().all(|&s| (s - 0.125).abs() < 1e-15));
        assert_eq!(experiment.base_size(), 8);
    }

    #[test]
    fn test_with_bounds_maps_design_into_domain() {
        let domain = BoundedDomain::new(vec![10.0, -2.0], vec![20.0, 2.0]).unwrap();
        let base = Sample::from_fn(10, 2, |r, c| {
            let u = (r as f64 + 0.5) / 10.0;
            domain.lower()[c] + u * (domain.upper()[c] - domain.lower()[c])
        });
        let experiment = LhsExperiment::with_bounds(&base, domain.clone(), 5).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let design = experiment.generate(&mut rng).unwrap();
        assert_eq!(design.nrows(), 15);
        for r in 0..design.nrows() {
            assert!(domain.contains(&row_to_vec(&design, r)));
        }
    }

    #[test]
    fn test_rejects_base_outside_unit_cube() {
        let base = Sample::from_row_slice(2, 1, &[0.5, 1.5]);
        assert!(matches!(
            LhsExperiment::new(base, 1),
            Err(MorrisError::OutsideDomain { axis: 0, .. })
        ));
    }

    #[test]
    fn test_with_levels() {
        let experiment = LhsExperiment::new(grid_base(8, 2), 4)
            .unwrap()
            .with_levels(4)
            .unwrap();
        assert!(experiment.step().iter().all(|&s| s == 0.25));
        assert!(LhsExperiment::new(grid_base(8, 2), 4)
            .unwrap()
            .with_levels(0)
            .is_err());
    }
}
