//! Screening result types.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::domain::BoundedDomain;
use crate::error::{MorrisError, Result};
use crate::types::Sample;

/// Elementary-effect statistics for every (output, input) pair.
///
/// The three summary tables are `q x d`: row `q'` holds the statistics of
/// output marginal `q'` against each input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityStatistics {
    /// Input dimension `d`.
    pub input_dimension: usize,
    /// Output dimension `q`.
    pub output_dimension: usize,
    /// Elementary effects, `N x (d*q)`; column `j*q + q'` is input `j`, output `q'`.
    pub elementary_effects: DMatrix<f64>,
    /// Element-wise absolute value of `elementary_effects`.
    pub absolute_elementary_effects: DMatrix<f64>,
    /// Mean elementary effect, `q x d`.
    pub mean: DMatrix<f64>,
    /// Mean absolute elementary effect (μ*), `q x d`.
    pub mean_absolute: DMatrix<f64>,
    /// Population standard deviation of the elementary effects (σ), `q x d`.
    pub standard_deviation: DMatrix<f64>,
}

impl SensitivityStatistics {
    /// Number of trajectories the statistics were computed from.
    pub fn trajectory_count(&self) -> usize {
        self.elementary_effects.nrows()
    }

    /// Mean elementary effect of each input on output `marginal`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `marginal >= q`.
    pub fn mean_elementary_effects(&self, marginal: usize) -> Result<DVector<f64>> {
        self.marginal_row(&self.mean, marginal)
    }

    /// Mean absolute elementary effect (μ*) of each input on output `marginal`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `marginal >= q`.
    pub fn mean_absolute_elementary_effects(&self, marginal: usize) -> Result<DVector<f64>> {
        self.marginal_row(&self.mean_absolute, marginal)
    }

    /// Standard deviation (σ) of the elementary effects on output `marginal`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `marginal >= q`.
    pub fn standard_deviation_elementary_effects(&self, marginal: usize) -> Result<DVector<f64>> {
        self.marginal_row(&self.standard_deviation, marginal)
    }

    /// Per-trajectory effects of each input on output `marginal`, `N x d`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `marginal >= q`.
    pub fn marginal_elementary_effects(&self, marginal: usize) -> Result<DMatrix<f64>> {
        self.check_marginal(marginal)?;
        let q = self.output_dimension;
        Ok(DMatrix::from_fn(
            self.trajectory_count(),
            self.input_dimension,
            |k, j| self.elementary_effects[(k, j * q + marginal)],
        ))
    }

    /// Inputs of output `marginal` ordered by decreasing μ*.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `marginal >= q`.
    pub fn ranking(&self, marginal: usize) -> Result<Vec<usize>> {
        let mu_star = self.mean_absolute_elementary_effects(marginal)?;
        let mut order: Vec<usize> = (0..self.input_dimension).collect();
        order.sort_by(|&a, &b| mu_star[b].total_cmp(&mu_star[a]));
        Ok(order)
    }

    /// Classify input `input` for output `marginal` from its (μ*, σ) pair.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if either index is out of range.
    pub fn pattern(&self, marginal: usize, input: usize) -> Result<EffectPattern> {
        self.check_marginal(marginal)?;
        if input >= self.input_dimension {
            return Err(MorrisError::IndexOutOfRange {
                index: input,
                len: self.input_dimension,
            });
        }
        let scale = self.mean_absolute.row(marginal).max();
        Ok(EffectPattern::classify(
            self.mean_absolute[(marginal, input)],
            self.standard_deviation[(marginal, input)],
            scale,
        ))
    }

    fn check_marginal(&self, marginal: usize) -> Result<()> {
        if marginal >= self.output_dimension {
            return Err(MorrisError::IndexOutOfRange {
                index: marginal,
                len: self.output_dimension,
            });
        }
        Ok(())
    }

    fn marginal_row(&self, table: &DMatrix<f64>, marginal: usize) -> Result<DVector<f64>> {
        self.check_marginal(marginal)?;
        Ok(table.row(marginal).transpose())
    }
}

/// Qualitative reading of an input's (μ*, σ) position.
///
/// Thresholds on σ/μ* follow Garcia Sanchez et al. (2014).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EffectPattern {
    /// μ* is below 1% of the largest μ* for this output.
    Negligible,
    /// σ/μ* < 0.1: effect is close to linear.
    Linear,
    /// 0.1 <= σ/μ* < 0.5: monotonic.
    Monotonic,
    /// 0.5 <= σ/μ* < 1: almost monotonic.
    AlmostMonotonic,
    /// σ/μ* >= 1: non-linear or interacting.
    NonLinear,
}

impl EffectPattern {
    /// Relative μ* below which an input is considered negligible.
    pub const NEGLIGIBLE_FRACTION: f64 = 0.01;

    /// Classify from μ*, σ and the largest μ* among inputs of the same output.
    pub fn classify(mu_star: f64, sigma: f64, max_mu_star: f64) -> Self {
        if max_mu_star <= 0.0 || mu_star <= Self::NEGLIGIBLE_FRACTION * max_mu_star {
            return EffectPattern::Negligible;
        }
        let ratio = sigma / mu_star;
        if ratio < 0.1 {
            EffectPattern::Linear
        } else if ratio < 0.5 {
            EffectPattern::Monotonic
        } else if ratio < 1.0 {
            EffectPattern::AlmostMonotonic
        } else {
            EffectPattern::NonLinear
        }
    }
}

/// Metadata about a screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of trajectories in the design.
    pub trajectories: usize,
    /// Number of candidate base points.
    pub base_size: usize,
    /// Step vector in unit-cube coordinates.
    pub step: Vec<f64>,
    /// Seed of the run, when one was set.
    pub seed: Option<u64>,
    /// Wall-clock runtime in seconds.
    pub runtime_secs: f64,
}

/// Complete record of a screening run.
///
/// Row `r` of `output_design` is the evaluation of row `r` of `input_design`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Input domain.
    pub domain: BoundedDomain,
    /// Stacked trajectories, `N*(d+1) x d`.
    pub input_design: Sample,
    /// Model evaluations, `N*(d+1) x q`.
    pub output_design: Sample,
    /// Elementary-effect statistics.
    pub statistics: SensitivityStatistics,
    /// Run metadata.
    pub metadata: Metadata,
}
