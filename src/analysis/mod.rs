//! Elementary-effects analysis.
//!
//! Turns a matched (input design, output design) pair into per-trajectory
//! finite-difference sensitivities and aggregates them into
//! mean, mean absolute and standard deviation tables.

mod effects;

pub use effects::{compute_elementary_effects, reduce, validate_designs};
