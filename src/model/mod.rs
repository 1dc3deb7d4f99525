//! Local regression models
//!
//! This module provides the `RegressionModel` trait, the default least
//! squares model and the metrics used to score them.

pub mod linear;
pub mod metrics;
pub mod traits;

pub mod prelude {
    pub use super::linear::*;
    pub use super::metrics::*;
    pub use super::traits::*;
}
