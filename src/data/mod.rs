//! Training data
//!
//! This module provides the validated `(X, y)` pair handed through the
//! system and the holdout split used by the population driver.

pub mod split;

use nalgebra::{DMatrix, DVector};

use crate::error::{LcsError, LcsResult};

/// Feature matrix paired with its regression targets
///
/// Rows of `x` are samples; `y` holds one target per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    x: DMatrix<f64>,
    y: DVector<f64>,
}

impl Dataset {
    /// Create a dataset, checking that rows and targets line up
    pub fn new(x: DMatrix<f64>, y: DVector<f64>) -> LcsResult<Self> {
        if x.nrows() != y.len() {
            return Err(LcsError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Empty dataset with the given number of columns
    pub fn empty(dimension: usize) -> Self {
        Self {
            x: DMatrix::zeros(0, dimension),
            y: DVector::zeros(0),
        }
    }

    /// Feature matrix
    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// Targets
    pub fn y(&self) -> &DVector<f64> {
        &self.y
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Check if there are no samples
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of input dimensions
    pub fn dimension(&self) -> usize {
        self.x.ncols()
    }

    /// Rows at the given indices, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select_rows(indices.iter()),
            y: self.y.select_rows(indices.iter()),
        }
    }

    /// Rows whose mask entry is true
    pub fn select_mask(&self, mask: &[bool]) -> Self {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.select(&indices)
    }
}
