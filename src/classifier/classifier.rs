//! Classifier: an interval rule paired with a local model
//!
//! A classifier is responsible for the points strictly inside its region and
//! predicts them either with its fitted local model or, when it saw too few
//! samples to fit one, with a constant.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::trace;

use crate::classifier::bounds::Region;
use crate::config::LcsConfig;
use crate::error::{LcsError, LcsResult};
use crate::model::linear::LinearRegression;
use crate::model::metrics::{mean_squared_error, r2_score, Metric};
use crate::model::traits::RegressionModel;

/// How a classifier produces its predictions
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionStrategy<M> {
    /// Same value for every input
    Constant(f64),
    /// Delegate to the local model
    Model(M),
}

/// A rule matching a hyper-rectangular region, paired with a local model
#[derive(Clone, Debug)]
pub struct Classifier<M = LinearRegression>
where
    M: RegressionModel,
{
    region: Region,
    strategy: PredictionStrategy<M>,
    /// Unfitted model each non-degenerate fit starts from
    prototype: M,
    complexity: usize,
    error: Option<f64>,
    experience: Option<usize>,
}

impl<M: RegressionModel> Classifier<M> {
    /// Create an unfitted classifier
    pub fn new(region: Region, model: M, complexity: usize) -> Self {
        Self {
            region,
            strategy: PredictionStrategy::Model(model.clone()),
            prototype: model,
            complexity,
            error: None,
            experience: None,
        }
    }

    /// Create an unfitted classifier from explicit bound vectors
    pub fn with_bounds(
        lowers: &[f64],
        uppers: &[f64],
        model: M,
        complexity: usize,
    ) -> LcsResult<Self> {
        let region = Region::from_bounds(lowers, uppers)?;
        Ok(Self::new(region, model, complexity))
    }

    /// Generate a classifier with random bounds inside the configured domain
    pub fn random<R: Rng>(rng: &mut R, config: &LcsConfig) -> Self
    where
        M: Default,
    {
        let region = Region::random(rng, config.dimension, &config.domain, config.min_range);
        Self::new(region, M::default(), config.complexity)
    }

    /// The matching region
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Lower bounds, one per dimension
    pub fn lower_bounds(&self) -> Vec<f64> {
        self.region.lowers()
    }

    /// Upper bounds, one per dimension
    pub fn upper_bounds(&self) -> Vec<f64> {
        self.region.uppers()
    }

    /// Number of input dimensions
    pub fn dimension(&self) -> usize {
        self.region.dimension()
    }

    /// Current prediction strategy
    pub fn strategy(&self) -> &PredictionStrategy<M> {
        &self.strategy
    }

    /// The constant overriding the local model, if any
    pub fn prediction_override(&self) -> Option<f64> {
        match self.strategy {
            PredictionStrategy::Constant(value) => Some(value),
            PredictionStrategy::Model(_) => None,
        }
    }

    /// The local model, unless the classifier is in constant mode
    pub fn model(&self) -> Option<&M> {
        match &self.strategy {
            PredictionStrategy::Model(model) => Some(model),
            PredictionStrategy::Constant(_) => None,
        }
    }

    /// Model complexity proxy
    pub fn complexity(&self) -> usize {
        self.complexity
    }

    /// Error measured by the last fit
    pub fn error(&self) -> Option<f64> {
        self.error
    }

    /// Number of samples used by the last fit
    pub fn experience(&self) -> Option<usize> {
        self.experience
    }

    /// Check if the classifier has been fitted
    pub fn is_fitted(&self) -> bool {
        self.experience.is_some()
    }

    fn check_dimension(&self, actual: usize) -> LcsResult<()> {
        if actual != self.dimension() {
            return Err(LcsError::DimensionMismatch {
                expected: self.dimension(),
                actual,
            });
        }
        Ok(())
    }

    /// One flag per row: true iff the row lies strictly inside every bound pair
    pub fn matches(&self, x: &DMatrix<f64>) -> LcsResult<Vec<bool>> {
        self.check_dimension(x.ncols())?;
        Ok(x
            .row_iter()
            .map(|row| self.region.contains_iter(row.iter()))
            .collect())
    }

    /// Check whether a single point lies strictly inside the region
    pub fn matches_point(&self, x: &[f64]) -> LcsResult<bool> {
        self.check_dimension(x.len())?;
        Ok(self.region.contains(x))
    }

    /// Predict one value per row of `x`
    pub fn predict(&self, x: &DMatrix<f64>) -> LcsResult<DVector<f64>> {
        self.check_dimension(x.ncols())?;
        match &self.strategy {
            PredictionStrategy::Constant(value) => Ok(DVector::from_element(x.nrows(), *value)),
            PredictionStrategy::Model(model) => model.predict(x),
        }
    }

    /// Predict a single point
    pub fn predict_one(&self, x: &[f64]) -> LcsResult<f64> {
        self.check_dimension(x.len())?;
        match &self.strategy {
            PredictionStrategy::Constant(value) => Ok(*value),
            PredictionStrategy::Model(model) => model.predict_one(x),
        }
    }

    /// Fit to the samples this classifier matches
    ///
    /// The caller filters `x` and `y` down to the match set. With fewer than
    /// two samples the classifier switches to a constant: the domain default
    /// prediction for none, the single target for one. Both cases take the
    /// domain default variance as their error.
    ///
    /// Otherwise the local model is fitted and the error is the mean squared
    /// error on the same samples. This in-sample estimate is optimistic for
    /// flexible models; mixing only uses it to rank classifiers against each
    /// other.
    pub fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>, config: &LcsConfig) -> LcsResult<()> {
        if x.nrows() != y.len() {
            return Err(LcsError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        self.check_dimension(x.ncols())?;

        match y.len() {
            0 => {
                trace!("no matched samples, using domain default prediction");
                self.strategy = PredictionStrategy::Constant(config.defaults.prediction);
                self.error = Some(config.defaults.variance);
                self.experience = Some(0);
            }
            1 => {
                trace!(value = y[0], "single matched sample, using it as constant");
                self.strategy = PredictionStrategy::Constant(y[0]);
                self.error = Some(config.defaults.variance);
                self.experience = Some(1);
            }
            n => {
                let mut model = self.prototype.clone();
                model.fit(x, y)?;
                let error = mean_squared_error(y, &model.predict(x)?);
                trace!(samples = n, error, "fitted local model");
                self.strategy = PredictionStrategy::Model(model);
                self.error = Some(error);
                self.experience = Some(n);
            }
        }
        Ok(())
    }

    /// Score predictions on `x` against `y`
    ///
    /// Without a metric this is the model's own goodness of fit (R² for a
    /// constant); with one it is `metric(y, predict(x))`.
    pub fn score(
        &self,
        x: &DMatrix<f64>,
        y: &DVector<f64>,
        metric: Option<Metric>,
    ) -> LcsResult<f64> {
        if x.nrows() != y.len() {
            return Err(LcsError::LengthMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }
        match (metric, &self.strategy) {
            (Some(metric), _) => Ok(metric(y, &self.predict(x)?)),
            (None, PredictionStrategy::Model(model)) => {
                self.check_dimension(x.ncols())?;
                model.score(x, y)
            }
            (None, PredictionStrategy::Constant(_)) => Ok(r2_score(y, &self.predict(x)?)),
        }
    }

    /// Mutate the region (and possibly the model)
    ///
    /// An implementation must keep `lower < upper` in every dimension and
    /// reset error, experience and strategy, since the match set changes.
    pub fn mutate<R: Rng>(&mut self, _rng: &mut R, _config: &LcsConfig) -> LcsResult<()> {
        Err(LcsError::NotImplemented("classifier mutation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DomainDefaults;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(dimension: usize) -> LcsConfig {
        let mut config = LcsConfig::new(dimension);
        config.defaults = DomainDefaults {
            prediction: 0.75,
            variance: 2.5,
        };
        config
    }

    fn unit_classifier(dimension: usize) -> Classifier {
        Classifier::with_bounds(
            &vec![-1.0; dimension],
            &vec![1.0; dimension],
            LinearRegression::new(),
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_matches_is_strict() {
        let cl = Classifier::with_bounds(&[-0.5, 0.0], &[0.5, 1.0], LinearRegression::new(), 2)
            .unwrap();
        let x = DMatrix::from_row_slice(
            5,
            2,
            &[
                0.0, 0.5, // inside
                -0.5, 0.5, // on lower bound
                0.5, 0.5, // on upper bound
                0.0, 1.0, // on upper bound, second dimension
                0.0, 1.5, // outside
            ],
        );
        assert_eq!(cl.matches(&x).unwrap(), vec![true, false, false, false, false]);
        assert!(cl.matches_point(&[0.1, 0.1]).unwrap());
        assert!(!cl.matches_point(&[0.1, 0.0]).unwrap());
    }

    #[test]
    fn test_matches_dimension_mismatch() {
        let cl = unit_classifier(2);
        let x = DMatrix::from_row_slice(1, 3, &[0.0, 0.0, 0.0]);
        assert!(matches!(
            cl.matches(&x),
            Err(LcsError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_fit_empty_uses_domain_defaults() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        cl.fit(&DMatrix::zeros(0, 1), &DVector::zeros(0), &config)
            .unwrap();

        assert_eq!(cl.prediction_override(), Some(0.75));
        assert_eq!(cl.error(), Some(2.5));
        assert_eq!(cl.experience(), Some(0));

        let x = DMatrix::from_row_slice(3, 1, &[-0.9, 0.0, 5.0]);
        assert_eq!(cl.predict(&x).unwrap(), DVector::from_element(3, 0.75));
        assert_eq!(cl.predict_one(&[0.3]).unwrap(), 0.75);
    }

    #[test]
    fn test_fit_single_sample_uses_target() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        let x = DMatrix::from_row_slice(1, 1, &[0.2]);
        let y = DVector::from_vec(vec![-3.0]);
        cl.fit(&x, &y, &config).unwrap();

        assert_eq!(cl.prediction_override(), Some(-3.0));
        assert_eq!(cl.error(), Some(2.5));
        assert_eq!(cl.experience(), Some(1));
        assert_eq!(cl.predict_one(&[0.9]).unwrap(), -3.0);
    }

    #[test]
    fn test_fit_many_samples_uses_model() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        let x = DMatrix::from_row_slice(4, 1, &[-0.5, 0.0, 0.25, 0.5]);
        let y = DVector::from_vec(vec![0.1, 0.4, 0.2, 0.9]);
        cl.fit(&x, &y, &config).unwrap();

        assert_eq!(cl.prediction_override(), None);
        assert!(cl.model().is_some());
        assert_eq!(cl.experience(), Some(4));

        let expected = mean_squared_error(&y, &cl.predict(&x).unwrap());
        assert!((cl.error().unwrap() - expected).abs() < 1e-12);
        assert!(cl.error().unwrap() > 0.0);
    }

    #[test]
    fn test_refit_clears_constant() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        cl.fit(&DMatrix::zeros(0, 1), &DVector::zeros(0), &config)
            .unwrap();
        assert!(cl.prediction_override().is_some());

        let x = DMatrix::from_row_slice(3, 1, &[0.0, 0.5, -0.5]);
        let y = DVector::from_vec(vec![0.0, 1.0, -1.0]);
        cl.fit(&x, &y, &config).unwrap();
        assert_eq!(cl.prediction_override(), None);
        assert!((cl.predict_one(&[0.25]).unwrap() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_fit_length_mismatch() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        let x = DMatrix::from_row_slice(2, 1, &[0.0, 0.5]);
        let y = DVector::from_vec(vec![0.0]);
        assert!(matches!(
            cl.fit(&x, &y, &config),
            Err(LcsError::LengthMismatch { rows: 2, targets: 1 })
        ));
        assert!(!cl.is_fitted());
    }

    #[test]
    fn test_score_with_and_without_metric() {
        let config = config(1);
        let mut cl = unit_classifier(1);
        let x = DMatrix::from_row_slice(3, 1, &[0.0, 0.5, -0.5]);
        let y = DVector::from_vec(vec![0.0, 1.0, -1.0]);
        cl.fit(&x, &y, &config).unwrap();

        assert!((cl.score(&x, &y, None).unwrap() - 1.0).abs() < 1e-10);
        assert!(cl.score(&x, &y, Some(mean_squared_error)).unwrap() < 1e-20);
    }

    #[test]
    fn test_random_classifier_within_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = LcsConfig::new(3);
        for _ in 0..100 {
            let cl: Classifier = Classifier::random(&mut rng, &config);
            assert_eq!(cl.dimension(), 3);
            assert_eq!(cl.complexity(), 2);
            assert!(!cl.is_fitted());
            for (l, u) in cl.lower_bounds().iter().zip(cl.upper_bounds()) {
                assert!(*l < u);
                assert!(*l >= -1.0 && u <= 1.0);
            }
        }
    }

    #[test]
    fn test_mutate_not_implemented() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut cl = unit_classifier(1);
        let err = cl.mutate(&mut rng, &LcsConfig::new(1)).unwrap_err();
        assert!(err.is_not_implemented());
    }
}
