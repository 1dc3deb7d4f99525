//! # lcs-regression
//!
//! A learning classifier system for regression.
//!
//! A population of individuals is evolved, each an ensemble of classifiers.
//! Every classifier owns an axis-aligned hyper-rectangle of the input space
//! and a local linear model trained on the samples inside it. Predictions for
//! a point mix the classifiers that match it, weighted by their precision.
//!
//! ## Core Concepts
//!
//! - **Classifier**: open-interval matching region plus a local model, with a
//!   constant fallback when it matched too few samples
//! - **Individual**: an ensemble of classifiers combined by a mixing rule
//! - **Lcs**: the population driver, keeping the best individual as elitist
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lcs_regression::prelude::*;
//! use nalgebra::{DMatrix, DVector};
//!
//! let x = DMatrix::from_column_slice(4, 1, &[-0.6, -0.2, 0.2, 0.6]);
//! let y = DVector::from_vec(vec![-1.2, -0.4, 0.4, 1.2]);
//!
//! let mut lcs = Lcs::builder(1)
//!     .population_size(10)
//!     .individual_size(5)
//!     .generations(5)
//!     .seed(42)
//!     .build()?;
//! lcs.fit(&x, &y)?;
//! let predictions = lcs.predict(&x)?;
//! ```

pub mod algorithms;
pub mod classifier;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod model;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::classifier::prelude::*;
    pub use crate::config::*;
    pub use crate::data::split::*;
    pub use crate::data::Dataset;
    pub use crate::diagnostics::GenerationStats;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::model::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
