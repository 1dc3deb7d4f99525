//! Regression metrics
//!
//! Error and goodness-of-fit measures used by classifiers and fitness functions.

use nalgebra::DVector;

/// Signature of a metric `(y_true, y_pred) -> error`
pub type Metric = fn(&DVector<f64>, &DVector<f64>) -> f64;

/// Arithmetic mean (0.0 for an empty vector)
pub fn mean(values: &DVector<f64>) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.sum() / values.len() as f64
    }
}

/// Population variance (divides by `n`)
pub fn variance(values: &DVector<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean squared error between targets and predictions
pub fn mean_squared_error(y_true: &DVector<f64>, y_pred: &DVector<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    (y_true - y_pred).norm_squared() / y_true.len() as f64
}

/// Coefficient of determination
///
/// A constant target scores 1.0 when predicted perfectly and 0.0 otherwise.
pub fn r2_score(y_true: &DVector<f64>, y_pred: &DVector<f64>) -> f64 {
    let m = mean(y_true);
    let ss_res = (y_true - y_pred).norm_squared();
    let ss_tot: f64 = y_true.iter().map(|v| (v - m).powi(2)).sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}
