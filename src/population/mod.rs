//! Individuals and mixing
//!
//! This module provides the Individual type and the rule that combines its
//! matching classifiers into one prediction.

pub mod individual;
pub mod mixing;

pub mod prelude {
    pub use super::individual::*;
    pub use super::mixing::*;
}
