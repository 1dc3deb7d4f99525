//! Ordinary least squares regression
//!
//! The default local model attached to randomly generated classifiers.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{LcsError, LcsResult};
use crate::model::traits::RegressionModel;

/// Linear regression with intercept, fitted by least squares
///
/// Inputs are centered before solving, and the solve goes through an SVD so
/// rank-deficient designs (duplicated points, constant columns, fewer samples
/// than dimensions) yield the minimum-norm solution instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Option<DVector<f64>>,
    intercept: f64,
}

impl LinearRegression {
    /// Create an unfitted model
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted slope coefficients, one per input dimension
    pub fn coefficients(&self) -> Option<&DVector<f64>> {
        self.coefficients.as_ref()
    }

    /// Fitted intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Check if the model has been fitted
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

impl RegressionModel for LinearRegression {
    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> LcsResult<()> {
        if x.nrows() != y.len() {
            return Err(LcsError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(LcsError::EmptyData);
        }

        let (n, d) = x.shape();
        let y_mean = y.mean();

        if d == 0 {
            self.coefficients = Some(DVector::zeros(0));
            self.intercept = y_mean;
            return Ok(());
        }

        let x_mean = DVector::from_iterator(d, x.column_iter().map(|c| c.mean()));
        let mut centered = x.clone();
        for (j, mut column) in centered.column_iter_mut().enumerate() {
            for v in column.iter_mut() {
                *v -= x_mean[j];
            }
        }
        let y_centered = y.add_scalar(-y_mean);

        let svd = centered.svd(true, true);
        let tolerance = svd.singular_values.max() * n.max(d) as f64 * f64::EPSILON;
        let beta = svd
            .solve(&y_centered, tolerance)
            .map_err(|e| LcsError::Numerical(e.to_string()))?;

        if beta.iter().any(|b| !b.is_finite()) {
            return Err(LcsError::Numerical(
                "least squares produced non-finite coefficients".to_string(),
            ));
        }

        self.intercept = y_mean - x_mean.dot(&beta);
        self.coefficients = Some(beta);
        Ok(())
    }

    fn predict(&self, x: &DMatrix<f64>) -> LcsResult<DVector<f64>> {
        let coefficients = self.coefficients.as_ref().ok_or(LcsError::NotFitted)?;
        if x.ncols() != coefficients.len() {
            return Err(LcsError::DimensionMismatch {
                expected: coefficients.len(),
                actual: x.ncols(),
            });
        }
        let mut out = x * coefficients;
        out.add_scalar_mut(self.intercept);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_line() {
        let x = DMatrix::from_row_slice(3, 1, &[0.0, 0.5, -0.5]);
        let y = DVector::from_vec(vec![0.0, 1.0, -1.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients().unwrap()[0] - 2.0).abs() < 1e-10);
        assert!(model.intercept().abs() < 1e-10);
        assert!((model.predict_one(&[0.2]).unwrap() - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_fit_two_dimensions_with_intercept() {
        // y = 1 + 2a - 3b
        let x = DMatrix::from_row_slice(
            4,
            2,
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        );
        let y = DVector::from_vec(vec![1.0, 3.0, -2.0, 0.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coefficients = model.coefficients().unwrap();
        assert!((coefficients[0] - 2.0).abs() < 1e-10);
        assert!((coefficients[1] + 3.0).abs() < 1e-10);
        assert!((model.intercept() - 1.0).abs() < 1e-10);
        assert!((model.score(&x, &y).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_duplicated_points() {
        let x = DMatrix::from_row_slice(2, 1, &[0.3, 0.3]);
        let y = DVector::from_vec(vec![1.0, 3.0]);

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        // Minimum-norm solution predicts the mean everywhere
        assert!(model.coefficients().unwrap()[0].abs() < 1e-10);
        assert!((model.predict_one(&[-0.7]).unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegression::new();
        let x = DMatrix::from_row_slice(1, 1, &[0.0]);
        assert_eq!(model.predict(&x), Err(LcsError::NotFitted));
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let x = DMatrix::from_row_slice(3, 1, &[0.0, 0.5, -0.5]);
        let y = DVector::from_vec(vec![0.0, 1.0, -1.0]);
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let wide = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
        assert!(matches!(
            model.predict(&wide),
            Err(LcsError::DimensionMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_fit_length_mismatch() {
        let x = DMatrix::from_row_slice(2, 1, &[0.0, 0.5]);
        let y = DVector::from_vec(vec![0.0]);
        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y),
            Err(LcsError::LengthMismatch { rows: 2, targets: 1 })
        ));
    }
}
