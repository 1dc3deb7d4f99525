//! Population drivers
//!
//! This module provides the learning classifier system driver and its builder.

pub mod lcs;

pub mod prelude {
    pub use super::lcs::*;
}
