//! Fitness evaluation
//!
//! This module provides the fitness abstraction and the default
//! complexity-penalized error.

pub mod penalized;
pub mod traits;

pub mod prelude {
    pub use super::penalized::*;
    pub use super::traits::*;
}
