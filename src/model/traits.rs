//! Regression model trait
//!
//! This module defines the capability a classifier's local model must offer.

use std::fmt::Debug;

use nalgebra::{DMatrix, DVector};

use crate::error::{LcsError, LcsResult};
use crate::model::metrics::r2_score;

/// Local regression model owned by a classifier
///
/// Any algorithm satisfying this contract can be plugged into a classifier.
/// Rows of `x` are samples, columns are input dimensions.
pub trait RegressionModel: Clone + Debug + Send + Sync {
    /// Fit the model to the given samples
    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> LcsResult<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &DMatrix<f64>) -> LcsResult<DVector<f64>>;

    /// Predict a single point
    fn predict_one(&self, x: &[f64]) -> LcsResult<f64> {
        let row = DMatrix::from_row_slice(1, x.len(), x);
        let prediction = self.predict(&row)?;
        prediction.get(0).copied().ok_or(LcsError::EmptyData)
    }

    /// Goodness of fit (coefficient of determination by default)
    fn score(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> LcsResult<f64> {
        let predicted = self.predict(x)?;
        Ok(r2_score(y, &predicted))
    }
}
