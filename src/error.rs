//! Error types for trajectory generation and effects reduction.
//!
//! Every failure is fatal for the current screening run: a structural
//! violation anywhere invalidates the statistical interpretation of the
//! whole design, so nothing here is retried.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MorrisError>;

/// Errors raised while building designs or reducing elementary effects.
#[derive(Debug, Error)]
pub enum MorrisError {
    /// Two collaborating objects disagree on a dimension or row count.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being checked.
        context: &'static str,
        /// Expected size.
        expected: usize,
        /// Observed size.
        actual: usize,
    },

    /// A non-empty sample was required.
    #[error("sample is empty")]
    EmptySample,

    /// Neither direction of a step stays within the domain, or the step
    /// vanishes once mapped onto it.
    #[error(
        "cannot perturb axis {axis} at step {step}: {value} +/- {delta} does not fit the domain"
    )]
    InfeasibleTrajectory {
        /// Step index within the trajectory.
        step: usize,
        /// Axis being perturbed.
        axis: usize,
        /// Coordinate before the perturbation.
        value: f64,
        /// Step size on that axis.
        delta: f64,
    },

    /// An axis has zero width, so differences cannot be scaled.
    #[error("domain has zero width on axis {axis}")]
    DegenerateDomain {
        /// Offending axis.
        axis: usize,
    },

    /// Bounds are not finite or lower exceeds upper.
    #[error("invalid bounds on axis {axis}: [{lower}, {upper}]")]
    InvalidDomain {
        /// Offending axis.
        axis: usize,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// A step size is not a positive finite number.
    #[error("step on axis {axis} must be positive and finite, got {value}")]
    InvalidStep {
        /// Offending axis.
        axis: usize,
        /// Step value.
        value: f64,
    },

    /// A base point lies outside the domain it should start from.
    #[error("point coordinate {value} on axis {axis} lies outside the domain")]
    OutsideDomain {
        /// Offending axis.
        axis: usize,
        /// Coordinate value.
        value: f64,
    },

    /// The input increments of a trajectory form a singular system.
    #[error("singular input increments in trajectory {trajectory}")]
    LinearSolve {
        /// Trajectory index within the design.
        trajectory: usize,
    },

    /// A statistic accessor was given an out-of-range marginal.
    #[error("index {index} out of range for {len} marginals")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available marginals.
        len: usize,
    },

    /// The de-duplication padding loop hit its attempt bound.
    #[error(
        "only {unique} unique trajectories out of {requested} after {attempts} padding attempts"
    )]
    TooManyRetries {
        /// Requested trajectory count.
        requested: usize,
        /// Unique trajectories reached.
        unique: usize,
        /// Padding attempts spent.
        attempts: usize,
    },

    /// JSON persistence failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a persisted result failed.
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
