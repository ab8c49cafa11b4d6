//! # morris-screening
//!
//! One-at-a-time (Morris) screening of model inputs.
//!
//! This crate builds randomized one-at-a-time experiment designs and reduces
//! the matching model evaluations to elementary-effect statistics, giving for
//! every (output, input) pair:
//! - Mean elementary effect (μ)
//! - Mean absolute elementary effect (μ*)
//! - Standard deviation of the elementary effects (σ)
//!
//! Inputs with small μ* barely move the output and can usually be fixed
//! before a more expensive variance-based analysis.
//!
//! ## Designs
//!
//! A design stacks `N` trajectories of `d + 1` points. Consecutive points of
//! a trajectory differ in exactly one coordinate, so the model is evaluated
//! `N * (d + 1)` times in total. Trajectory base points are drawn from a
//! Latin hypercube, and duplicate trajectories are replaced so that every
//! trajectory of the design is distinct.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morris_screening::{BoundedDomain, MorrisFunction, MorrisScreening};
//!
//! let model = MorrisFunction::new(0);
//! let domain = BoundedDomain::unit(20);
//!
//! let result = MorrisScreening::new()
//!     .trajectories(20)
//!     .seed(42)
//!     .run(&model, &domain)?;
//!
//! for input in result.statistics.ranking(0)? {
//!     println!("x{input}: mu* = {:.3}", result.statistics.mean_absolute[(0, input)]);
//! }
//! ```
//!
//! The lower-level pieces are public too: [`experiment::LhsExperiment`]
//! produces a design, any [`Model`] (or an external simulator) evaluates it,
//! and [`analysis::reduce`] turns the pair into [`SensitivityStatistics`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;
mod screening;
mod thread_pool;
mod types;

// Functional modules
pub mod analysis;
pub mod domain;
pub mod experiment;
pub mod functions;
pub mod model;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use domain::BoundedDomain;
pub use error::{MorrisError, Result};
pub use experiment::{LhsExperiment, MorrisExperiment, Trajectory};
pub use functions::MorrisFunction;
pub use model::{FnModel, LinearModel, Model};
pub use result::{EffectPattern, Metadata, ScreeningResult, SensitivityStatistics};
pub use screening::MorrisScreening;
pub use types::Sample;

/// Convenience function for screening with default configuration.
///
/// Draws a fresh Latin hypercube base design, builds ten trajectories on it,
/// evaluates `model` once over the design, and reduces the result.
///
/// # Arguments
///
/// * `model` - The model under screening
/// * `domain` - Bounds of the model inputs
///
/// # Returns
///
/// A `ScreeningResult` holding the design, the evaluations, and the
/// elementary-effect statistics.
///
/// # Errors
///
/// Any error from design construction, model evaluation, or reduction.
pub fn screen<M: Model + ?Sized>(model: &M, domain: &BoundedDomain) -> Result<ScreeningResult> {
    MorrisScreening::new().run(model, domain)
}
