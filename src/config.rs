//! Configuration for screening runs.

use crate::experiment::DEFAULT_MAX_PADDING_ATTEMPTS;

/// Configuration options for `MorrisScreening`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of trajectories `N` (default: 10).
    pub trajectories: usize,

    /// Optional number of grid levels `p`.
    ///
    /// When set, the step is `1 / p` on every axis of the unit cube.
    /// Otherwise it is `1 / base_size`, the width of one Latin hypercube stratum.
    pub levels: Option<usize>,

    /// Size of the Latin hypercube drawn when no base design is supplied
    /// (default: 50).
    pub base_size: usize,

    /// Bound on extra trajectories generated to replace duplicates
    /// (default: 10,000).
    pub max_padding_attempts: usize,

    /// Optional deterministic seed for every random draw.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trajectories: 10,
            levels: None,
            base_size: 50,
            max_padding_attempts: DEFAULT_MAX_PADDING_ATTEMPTS,
            seed: None,
        }
    }
}
