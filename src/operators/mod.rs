//! Evolutionary search operators
//!
//! This module provides the generation step abstraction, parent selection
//! and the steps shipped with the crate.

pub mod selection;
pub mod steps;
pub mod traits;

pub mod prelude {
    pub use super::selection::*;
    pub use super::steps::*;
    pub use super::traits::*;
}
