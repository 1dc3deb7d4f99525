//! Run configuration
//!
//! `LcsConfig` is owned by the population driver and passed by reference into
//! individuals and classifiers, so independent populations never share state.

use serde::{Deserialize, Serialize};

use crate::classifier::bounds::Interval;
use crate::error::{LcsError, LcsResult};
use crate::population::mixing::MixingConfig;

/// Fallback values derived from the most recent training target
///
/// Used when a classifier sees too few samples to fit its model and when no
/// classifier matches a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainDefaults {
    /// Mean of the target seen during the last fit
    pub prediction: f64,
    /// Population variance of the target seen during the last fit
    pub variance: f64,
}

impl Default for DomainDefaults {
    fn default() -> Self {
        Self {
            prediction: 0.0,
            variance: 1.0,
        }
    }
}

/// Configuration for a learning classifier system run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LcsConfig {
    /// Number of input dimensions
    pub dimension: usize,
    /// Number of individuals in the population
    pub population_size: usize,
    /// Number of classifiers per individual
    pub individual_size: usize,
    /// Number of generation steps run by `fit`
    pub generations: usize,
    /// Widen randomly drawn intervals by half their width on each side
    pub min_range: bool,
    /// Domain classifier bounds are drawn from and clipped to
    pub domain: Interval,
    /// Complexity assigned to randomly generated classifiers
    pub complexity: usize,
    /// Fraction of samples held out for fitness evaluation
    pub validation_fraction: f64,
    /// How matching classifiers are combined into one prediction
    pub mixing: MixingConfig,
    /// Fallback prediction and variance, written by each fit
    pub defaults: DomainDefaults,
}

impl LcsConfig {
    /// Create a configuration with default sizes for the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Check every field for consistency
    pub fn validate(&self) -> LcsResult<()> {
        if self.dimension == 0 {
            return Err(LcsError::Configuration(
                "dimension must be at least 1".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(LcsError::Configuration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.individual_size == 0 {
            return Err(LcsError::Configuration(
                "individual_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(LcsError::Configuration(format!(
                "validation_fraction must be in [0, 1), got {}",
                self.validation_fraction
            )));
        }
        if !(self.domain.lower.is_finite()
            && self.domain.upper.is_finite()
            && self.domain.lower < self.domain.upper)
        {
            return Err(LcsError::Configuration(format!(
                "domain must satisfy lower < upper, got [{}, {}]",
                self.domain.lower, self.domain.upper
            )));
        }
        if !self.domain.width().is_finite() {
            return Err(LcsError::Configuration(format!(
                "domain width must be finite, got [{}, {}]",
                self.domain.lower, self.domain.upper
            )));
        }
        Ok(())
    }
}

impl Default for LcsConfig {
    fn default() -> Self {
        Self {
            dimension: 1,
            population_size: 30,
            individual_size: 50,
            generations: 50,
            min_range: false,
            domain: Interval::default(),
            complexity: 2,
            validation_fraction: 0.25,
            mixing: MixingConfig::default(),
            defaults: DomainDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LcsConfig::new(3);
        assert_eq!(config.dimension, 3);
        assert_eq!(config.population_size, 30);
        assert_eq!(config.individual_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = LcsConfig::new(0);
        assert!(config.validate().is_err());

        config.dimension = 2;
        config.population_size = 0;
        assert!(config.validate().is_err());

        config.population_size = 5;
        config.individual_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("individual_size"));
    }

    #[test]
    fn test_validate_rejects_bad_fraction() {
        let mut config = LcsConfig::new(1);
        config.validation_fraction = 1.0;
        assert!(config.validate().is_err());
        config.validation_fraction = -0.1;
        assert!(config.validate().is_err());
        config.validation_fraction = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_domain() {
        let mut config = LcsConfig::new(1);
        config.domain = Interval::new(-f64::MAX, f64::MAX).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("domain width"));

        config.domain = Interval::new(-1e300, 1e300).unwrap();
        assert!(config.validate().is_ok());
    }
}
