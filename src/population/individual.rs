//! Individual: an ensemble of classifiers
//!
//! An individual fits every classifier on the samples it matches and predicts
//! each point by mixing the classifiers that match it.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::trace;

use crate::classifier::classifier::Classifier;
use crate::config::LcsConfig;
use crate::data::Dataset;
use crate::error::{LcsError, LcsResult};
use crate::model::linear::LinearRegression;
use crate::model::traits::RegressionModel;
use crate::population::mixing::{mix, mixing_weight};

/// An individual in the population
///
/// Wraps an ordered set of classifiers with its fitness.
#[derive(Clone, Debug)]
pub struct Individual<M = LinearRegression>
where
    M: RegressionModel,
{
    classifiers: Vec<Classifier<M>>,
    /// The fitness value (None if not yet evaluated); higher is better
    pub fitness: Option<f64>,
}

impl<M: RegressionModel> Individual<M> {
    /// Create an unevaluated individual from its classifiers
    pub fn new(classifiers: Vec<Classifier<M>>) -> Self {
        Self {
            classifiers,
            fitness: None,
        }
    }

    /// Generate an individual of `size` random classifiers
    pub fn random<R: Rng>(size: usize, rng: &mut R, config: &LcsConfig) -> Self
    where
        M: Default,
    {
        let classifiers = (0..size)
            .map(|_| Classifier::random(rng, config))
            .collect();
        Self::new(classifiers)
    }

    /// The classifiers, in creation order
    pub fn classifiers(&self) -> &[Classifier<M>] {
        &self.classifiers
    }

    /// Mutable access to the classifiers
    pub fn classifiers_mut(&mut self) -> &mut [Classifier<M>] {
        &mut self.classifiers
    }

    /// Number of classifiers
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    /// Check if the individual has no classifiers
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Check if this individual is better than another
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => f1 > f2,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Total complexity of all classifiers
    pub fn parameters(&self) -> usize {
        self.classifiers.iter().map(|cl| cl.complexity()).sum()
    }

    /// Fit every classifier's local model on the samples it matches
    ///
    /// Only the local models change; classifier regions stay where they are.
    /// The fitness is cleared since predictions change.
    pub fn fit(&mut self, data: &Dataset, config: &LcsConfig) -> LcsResult<()> {
        for classifier in &mut self.classifiers {
            let mask = classifier.matches(data.x())?;
            let matched = data.select_mask(&mask);
            classifier.fit(matched.x(), matched.y(), config)?;
        }
        self.fitness = None;
        Ok(())
    }

    /// Predict one value per row of `x` by mixing matching classifiers
    pub fn predict(&self, x: &DMatrix<f64>, config: &LcsConfig) -> LcsResult<DVector<f64>> {
        if x.ncols() != config.dimension {
            return Err(LcsError::DimensionMismatch {
                expected: config.dimension,
                actual: x.ncols(),
            });
        }
        let mut out = DVector::zeros(x.nrows());
        for (i, row) in x.row_iter().enumerate() {
            let point: Vec<f64> = row.iter().copied().collect();
            out[i] = self.predict_one(&point, config)?;
        }
        Ok(out)
    }

    /// Predict a single point
    ///
    /// Falls back to the domain default prediction when no classifier
    /// contributes, or when the mixture's numerator is exactly zero.
    pub fn predict_one(&self, point: &[f64], config: &LcsConfig) -> LcsResult<f64> {
        let mut terms = Vec::new();
        for classifier in &self.classifiers {
            if !classifier.matches_point(point)? {
                continue;
            }
            let (Some(experience), Some(error)) = (classifier.experience(), classifier.error())
            else {
                return Err(LcsError::NotFitted);
            };
            match mixing_weight(experience, error, config.dimension, config.mixing.degenerate)? {
                Some(weight) => terms.push((classifier.predict_one(point)?, weight)),
                None => trace!(experience, "excluded classifier from mixing"),
            }
        }
        Ok(mix(&terms, config.mixing.rule).unwrap_or(config.defaults.prediction))
    }

    /// Mutate the individual
    ///
    /// An implementation must support adding, removing and mutating
    /// classifiers, and must clear the fitness.
    pub fn mutate<R: Rng>(&mut self, _rng: &mut R, _config: &LcsConfig) -> LcsResult<()> {
        Err(LcsError::NotImplemented("individual mutation"))
    }
}
