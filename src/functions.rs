//! Reference test functions for screening.

use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{MorrisError, Result};
use crate::model::{check_input_columns, Model};
use crate::types::Sample;

/// Number of inputs of the Morris function.
pub const MORRIS_DIMENSION: usize = 20;

/// Inputs whose transform is `2 (1.1 x / (x + 0.1) - 0.5)` instead of `2 (x - 0.5)`.
const CURVED_INPUTS: [usize; 3] = [2, 4, 6];

/// The 20-input test function of Morris (1991).
///
/// ```text
/// y = b0 + Σ a_i w_i + Σ_{i<j} b_ij w_i w_j
///        - 10 Σ_{i<j<l<5} w_i w_j w_l + 5 Σ_{i<j<l<s<4} w_i w_j w_l w_s
/// ```
///
/// with `a_i = 20` for `i < 10` and `b_ij = -15` for `i, j < 6`. The other
/// first and second order coefficients are free; `b0` is zero unless set
/// through [`MorrisFunction::with_coefficients`].
#[derive(Debug, Clone)]
pub struct MorrisFunction {
    b0: f64,
    alpha: DVector<f64>,
    beta: DMatrix<f64>,
}

impl MorrisFunction {
    /// Draw the free coefficients from a standard normal with a seeded RNG.
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let b0 = 0.0;

        let mut alpha = DVector::from_element(MORRIS_DIMENSION, 20.0);
        for a in alpha.iter_mut().skip(10) {
            *a = StandardNormal.sample(&mut rng);
        }

        let mut beta = DMatrix::zeros(MORRIS_DIMENSION, MORRIS_DIMENSION);
        for i in 0..MORRIS_DIMENSION {
            for j in (i + 1)..MORRIS_DIMENSION {
                beta[(i, j)] = if j < 6 {
                    -15.0
                } else {
                    StandardNormal.sample(&mut rng)
                };
            }
        }

        Self { b0, alpha, beta }
    }

    /// Use explicit free coefficients.
    ///
    /// Only the strict upper triangle of `beta` is read. The fixed
    /// coefficients (`a_i`, `i < 10`, and `b_ij`, `i, j < 6`) are overwritten.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `alpha` is not of length 20 or `beta` not 20 x 20.
    pub fn with_coefficients(b0: f64, alpha: DVector<f64>, beta: DMatrix<f64>) -> Result<Self> {
        if alpha.len() != MORRIS_DIMENSION {
            return Err(MorrisError::DimensionMismatch {
                context: "first order coefficients",
                expected: MORRIS_DIMENSION,
                actual: alpha.len(),
            });
        }
        if beta.shape() != (MORRIS_DIMENSION, MORRIS_DIMENSION) {
            return Err(MorrisError::DimensionMismatch {
                context: "second order coefficients",
                expected: MORRIS_DIMENSION,
                actual: beta.nrows().max(beta.ncols()),
            });
        }
        let mut alpha = alpha;
        let mut beta = beta;
        alpha.rows_mut(0, 10).fill(20.0);
        for i in 0..6 {
            for j in (i + 1)..6 {
                beta[(i, j)] = -15.0;
            }
        }
        Ok(Self { b0, alpha, beta })
    }

    /// Constant term `b0`.
    pub fn b0(&self) -> f64 {
        self.b0
    }

    /// Evaluate a single point.
    pub fn value(&self, x: &[f64]) -> f64 {
        let w: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &xi)| {
                if CURVED_INPUTS.contains(&i) {
                    2.0 * (1.1 * xi / (xi + 0.1) - 0.5)
                } else {
                    2.0 * (xi - 0.5)
                }
            })
            .collect();

        let mut y = self.b0;
        for i in 0..MORRIS_DIMENSION {
            y += self.alpha[i] * w[i];
            for j in (i + 1)..MORRIS_DIMENSION {
                y += self.beta[(i, j)] * w[i] * w[j];
            }
        }
        for i in 0..5 {
            for j in (i + 1)..5 {
                for l in (j + 1)..5 {
                    y -= 10.0 * w[i] * w[j] * w[l];
                }
            }
        }
        // With four inputs there is a single fourth order term.
        y += 5.0 * w[0] * w[1] * w[2] * w[3];
        y
    }
}

impl Model for MorrisFunction {
    fn input_dimension(&self) -> usize {
        MORRIS_DIMENSION
    }

    fn output_dimension(&self) -> usize {
        1
    }

    fn evaluate(&self, design: &Sample) -> Result<Sample> {
        check_input_columns(self, design)?;
        Ok(Sample::from_fn(design.nrows(), 1, |r, _| {
            let x: Vec<f64> = design.row(r).iter().copied().collect();
            self.value(&x)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Point where every transformed input `w_i` is zero.
    fn neutral_point() -> Vec<f64> {
        (0..MORRIS_DIMENSION)
            .map(|i| if CURVED_INPUTS.contains(&i) { 1.0 / 12.0 } else { 0.5 })
            .collect()
    }

    #[test]
    fn test_neutral_point_returns_constant() {
        let f = MorrisFunction::new(0);
        assert!((f.value(&neutral_point()) - f.b0()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_term_is_zero() {
        let f = MorrisFunction::new(5);
        assert_eq!(f.b0(), 0.0);
        assert!(f.value(&neutral_point()).abs() < 1e-12);
    }

    #[test]
    fn test_first_order_coefficient() {
        // Only w_0 = 1 non-zero: y = b0 + 20
        let f = MorrisFunction::new(1);
        let mut x = neutral_point();
        x[0] = 1.0;
        assert!((f.value(&x) - (f.b0() + 20.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_interaction() {
        // w_0 = w_1 = 1: y = b0 + 20 + 20 - 15
        let f = MorrisFunction::with_coefficients(
            0.0,
            DVector::zeros(MORRIS_DIMENSION),
            DMatrix::zeros(MORRIS_DIMENSION, MORRIS_DIMENSION),
        )
        .unwrap();
        let mut x = neutral_point();
        x[0] = 1.0;
        x[1] = 1.0;
        assert!((f.value(&x) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = MorrisFunction::new(42);
        let b = MorrisFunction::new(42);
        let x = vec![0.3; MORRIS_DIMENSION];
        assert_eq!(a.value(&x), b.value(&x));
    }

    #[test]
    fn test_rejects_wrong_coefficient_shape() {
        assert!(MorrisFunction::with_coefficients(0.0, DVector::zeros(3), DMatrix::zeros(20, 20)).is_err());
    }
}
