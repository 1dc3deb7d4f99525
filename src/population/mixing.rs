//! Mixing of matching classifiers
//!
//! Classifiers are weighted by an estimate of their precision,
//! `1 / ((experience - dimension) * error)`.

use serde::{Deserialize, Serialize};

use crate::error::{LcsError, LcsResult};

/// Smallest error used when computing a precision weight
///
/// A classifier that fits its training data perfectly would otherwise get an
/// infinite weight.
pub const ERROR_FLOOR: f64 = f64::EPSILON;

/// Rule combining the predictions of matching classifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixingRule {
    /// `Σ w_c p_c / Σ w_c`
    #[default]
    PrecisionWeighted,
    /// `Σ p_c / Σ w_c`, the unweighted-numerator form of earlier releases
    RawSum,
}

/// Policy for classifiers whose `experience - dimension` is not positive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Leave the classifier out of the mixture
    #[default]
    Exclude,
    /// Use 1 as the denominator
    Clamp,
    /// Fail with `LcsError::DegenerateMixing`
    Fail,
}

/// Mixing settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixingConfig {
    /// Combination rule
    pub rule: MixingRule,
    /// Handling of degenerate precision weights
    pub degenerate: DegeneratePolicy,
}

/// Precision weight of one classifier, or `None` if it is excluded
pub fn mixing_weight(
    experience: usize,
    error: f64,
    dimension: usize,
    policy: DegeneratePolicy,
) -> LcsResult<Option<f64>> {
    let denominator = if experience > dimension {
        (experience - dimension) as f64
    } else {
        match policy {
            DegeneratePolicy::Exclude => return Ok(None),
            DegeneratePolicy::Clamp => 1.0,
            DegeneratePolicy::Fail => {
                return Err(LcsError::DegenerateMixing {
                    experience,
                    dimension,
                })
            }
        }
    };
    Ok(Some(1.0 / (denominator * error.max(ERROR_FLOOR))))
}

/// Combine `(prediction, weight)` pairs into one value
///
/// Returns `None` when nothing contributes or the numerator sums to exactly
/// zero; the caller substitutes the domain default prediction. Under
/// `PrecisionWeighted` a single term returns its prediction exactly, except
/// a prediction of exactly `0.0`, which zeroes the numerator and so yields
/// `None`.
pub fn mix(terms: &[(f64, f64)], rule: MixingRule) -> Option<f64> {
    if terms.is_empty() {
        return None;
    }
    let total_weight: f64 = terms.iter().map(|(_, w)| w).sum();

    let (numerator, out) = match rule {
        MixingRule::PrecisionWeighted => {
            let numerator: f64 = terms.iter().map(|(p, w)| w * p).sum();
            let out: f64 = terms.iter().map(|(p, w)| (w / total_weight) * p).sum();
            (numerator, out)
        }
        MixingRule::RawSum => {
            let numerator: f64 = terms.iter().map(|(p, _)| p).sum();
            (numerator, numerator / total_weight)
        }
    };

    if numerator == 0.0 {
        None
    } else {
        Some(out)
    }
}
