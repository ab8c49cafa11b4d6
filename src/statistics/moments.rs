//! Column-wise running moments.
//!
//! Elementary-effect tables are reduced column by column to a mean and a
//! population standard deviation. Rows are accumulated in a single pass so
//! the full table never has to be revisited.

use nalgebra::DVector;

/// Online per-column mean and variance using Welford's algorithm.
///
/// Each column is an independent scalar series; `update` consumes one row.
#[derive(Debug, Clone)]
pub struct WelfordColumns {
    /// Count of rows accumulated so far.
    n: usize,
    /// Running mean of each column.
    mean: DVector<f64>,
    /// Sum of squared deviations of each column: Σ(x - μ)²
    m2: DVector<f64>,
}

impl WelfordColumns {
    /// Create an accumulator for rows of `width` values.
    pub fn new(width: usize) -> Self {
        Self {
            n: 0,
            mean: DVector::zeros(width),
            m2: DVector::zeros(width),
        }
    }

    /// Accumulate one row.
    ///
    /// ```text
    /// δ = x - μₙ₋₁
    /// μₙ = μₙ₋₁ + δ/n
    /// M2ₙ = M2ₙ₋₁ + δ·(x - μₙ)
    /// ```
    ///
    /// A column that only ever sees the same value keeps `μ` equal to that
    /// value and `M2` at exactly zero.
    pub fn update(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.mean.len());
        self.n += 1;
        let n = self.n as f64;

        for (j, &x) in row.iter().enumerate() {
            let delta = x - self.mean[j];
            self.mean[j] += delta / n;
            self.m2[j] += delta * (x - self.mean[j]);
        }
    }

    /// Number of rows accumulated.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Column means.
    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    /// Population variance, M2/n. Zero before any update.
    pub fn population_variance(&self) -> DVector<f64> {
        if self.n == 0 {
            return DVector::zeros(self.mean.len());
        }
        // Rounding can leave M2 a hair below zero.
        self.m2.map(|m2| (m2 / self.n as f64).max(0.0))
    }

    /// Population standard deviation.
    pub fn population_std(&self) -> DVector<f64> {
        self.population_variance().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_two_pass() {
        let rows = [[1.0, -2.0], [4.0, 0.5], [2.5, 3.0], [-1.0, 1.0]];
        let mut acc = WelfordColumns::new(2);
        for row in &rows {
            acc.update(row);
        }

        for j in 0..2 {
            let values: Vec<f64> = rows.iter().map(|r| r[j]).collect();
            let mean = values.iter().sum::<f64>() / 4.0;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
            assert!((acc.mean()[j] - mean).abs() < 1e-12);
            assert!((acc.population_variance()[j] - var).abs() < 1e-12);
        }
        assert_eq!(acc.count(), 4);
    }

    #[test]
    fn test_constant_column_has_zero_spread() {
        let mut acc = WelfordColumns::new(1);
        for _ in 0..7 {
            acc.update(&[0.3]);
        }
        assert_eq!(acc.mean()[0], 0.3);
        assert_eq!(acc.population_std()[0], 0.0);
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = WelfordColumns::new(3);
        assert_eq!(acc.population_std(), DVector::zeros(3));
    }
}
