//! Error types for lcs-regression
//!
//! This module defines the error type shared by models, classifiers,
//! individuals and the population driver.

use thiserror::Error;

/// Error type for fitting, prediction and evolution operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LcsError {
    /// An extension point that has no implementation yet
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// Prediction requested before an elitist individual exists
    #[error("Not ready: no elitist individual, call fit with at least one generation")]
    NotReady,

    /// A model or classifier was used before being fitted
    #[error("Not fitted: model must be fitted before prediction")]
    NotFitted,

    /// Column count does not match the configured dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Number of rows does not match the number of targets
    #[error("Length mismatch: {rows} rows but {targets} targets")]
    LengthMismatch { rows: usize, targets: usize },

    /// No samples were supplied
    #[error("Empty data: at least one sample is required")]
    EmptyData,

    /// A bound pair violates `lower < upper`
    #[error("Invalid bounds in dimension {dimension}: lower ({lower}) must be < upper ({upper})")]
    InvalidBounds {
        dimension: usize,
        lower: f64,
        upper: f64,
    },

    /// Mixing weight undefined because `experience - dimension <= 0`
    #[error("Degenerate mixing: experience {experience} does not exceed dimension {dimension}")]
    DegenerateMixing { experience: usize, dimension: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Numerical failure inside a regression model
    #[error("Numerical error: {0}")]
    Numerical(String),
}

impl LcsError {
    /// Returns true if this error marks a missing feature rather than a defect
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

/// Result type alias for lcs-regression operations
pub type LcsResult<T> = Result<T, LcsError>;
