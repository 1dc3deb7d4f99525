//! Classifiers and their matching regions
//!
//! This module provides the `Classifier` type and the interval bounds it
//! matches against.

pub mod bounds;
#[allow(clippy::module_inception)]
pub mod classifier;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::classifier::*;
}
