//! Models under screening.
//!
//! A model is evaluated once, as a batch, over the whole input design. The
//! returned output design must keep the row order of the input design.

use nalgebra::{DMatrix, DVector};

use crate::error::{MorrisError, Result};
use crate::thread_pool;
use crate::types::{row_to_vec, Sample};

/// A vector-valued function with fixed input and output dimensions.
pub trait Model {
    /// Number of inputs `d`.
    fn input_dimension(&self) -> usize;

    /// Number of outputs `q`.
    fn output_dimension(&self) -> usize;

    /// Evaluate every row of `design` (`M x d`), returning `M x q`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `design` does not have `d` columns or an
    /// evaluation does not return `q` values.
    fn evaluate(&self, design: &Sample) -> Result<Sample>;
}

pub(crate) fn check_input_columns(model: &(impl Model + ?Sized), design: &Sample) -> Result<()> {
    if design.ncols() != model.input_dimension() {
        return Err(MorrisError::DimensionMismatch {
            context: "model input dimension",
            expected: model.input_dimension(),
            actual: design.ncols(),
        });
    }
    Ok(())
}

/// Model backed by a point-wise closure.
///
/// Rows are evaluated on the shared thread pool when the `parallel` feature
/// is enabled.
pub struct FnModel<F> {
    input_dimension: usize,
    output_dimension: usize,
    function: F,
}

impl<F> FnModel<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    /// Wrap `function`, declaring its input and output dimensions.
    pub fn new(input_dimension: usize, output_dimension: usize, function: F) -> Self {
        Self {
            input_dimension,
            output_dimension,
            function,
        }
    }
}

impl<F> Model for FnModel<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    fn evaluate(&self, design: &Sample) -> Result<Sample> {
        check_input_columns(self, design)?;
        let rows = thread_pool::map_indexed(design.nrows(), |r| {
            (self.function)(&row_to_vec(design, r))
        });

        let q = self.output_dimension;
        let mut output = Sample::zeros(design.nrows(), q);
        for (r, values) in rows.into_iter().enumerate() {
            if values.len() != q {
                return Err(MorrisError::DimensionMismatch {
                    context: "model output dimension",
                    expected: q,
                    actual: values.len(),
                });
            }
            output
                .row_mut(r)
                .iter_mut()
                .zip(values)
                .for_each(|(dst, v)| *dst = v);
        }
        Ok(output)
    }
}

impl<F> std::fmt::Debug for FnModel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnModel")
            .field("input_dimension", &self.input_dimension)
            .field("output_dimension", &self.output_dimension)
            .finish_non_exhaustive()
    }
}

/// Affine model `y = A x + b`.
///
/// Its elementary effects equal the columns of `A` scaled by the domain
/// widths, whatever the trajectory.
#[derive(Debug, Clone)]
pub struct LinearModel {
    matrix: DMatrix<f64>,
    intercept: DVector<f64>,
}

impl LinearModel {
    /// Create from a `q x d` matrix and zero intercept.
    pub fn new(matrix: DMatrix<f64>) -> Self {
        let intercept = DVector::zeros(matrix.nrows());
        Self { matrix, intercept }
    }

    /// Set the intercept `b`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `intercept` does not have `q` entries.
    pub fn with_intercept(mut self, intercept: DVector<f64>) -> Result<Self> {
        if intercept.len() != self.matrix.nrows() {
            return Err(MorrisError::DimensionMismatch {
                context: "intercept length",
                expected: self.matrix.nrows(),
                actual: intercept.len(),
            });
        }
        self.intercept = intercept;
        Ok(self)
    }

    /// The `q x d` coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl Model for LinearModel {
    fn input_dimension(&self) -> usize {
        self.matrix.ncols()
    }

    fn output_dimension(&self) -> usize {
        self.matrix.nrows()
    }

    fn evaluate(&self, design: &Sample) -> Result<Sample> {
        check_input_columns(self, design)?;
        let mut output = design * self.matrix.transpose();
        for mut row in output.row_iter_mut() {
            row += self.intercept.transpose();
        }
        Ok(output)
    }
}
