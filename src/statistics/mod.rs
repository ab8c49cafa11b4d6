//! Statistical building blocks for effect aggregation.
//!
//! - Column-wise running mean and population variance (Welford)

mod moments;

pub use moments::WelfordColumns;
