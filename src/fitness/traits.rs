//! Fitness traits
//!
//! This module defines how an individual is scored during the generation loop.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::LcsConfig;
use crate::data::Dataset;
use crate::error::LcsResult;
use crate::model::traits::RegressionModel;
use crate::population::individual::Individual;

/// Fitness evaluation trait
///
/// Scores a locally fitted individual on held-out data. Higher is better.
pub trait FitnessFunction<M: RegressionModel>: Send + Sync {
    /// Evaluate the fitness of `individual` on `data`
    fn evaluate(
        &self,
        individual: &Individual<M>,
        data: &Dataset,
        config: &LcsConfig,
    ) -> LcsResult<f64>;
}

/// A simple function wrapper for fitness evaluation
pub struct FnFitness<F> {
    f: F,
}

impl<F> FnFitness<F> {
    /// Create a new function-based fitness evaluator
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<M, F> FitnessFunction<M> for FnFitness<F>
where
    M: RegressionModel,
    F: Fn(&Individual<M>, &Dataset, &LcsConfig) -> LcsResult<f64> + Send + Sync,
{
    fn evaluate(
        &self,
        individual: &Individual<M>,
        data: &Dataset,
        config: &LcsConfig,
    ) -> LcsResult<f64> {
        (self.f)(individual, data, config)
    }
}

/// Evaluate every unevaluated individual (sequential)
#[cfg(not(feature = "parallel"))]
pub fn evaluate_population<M, F>(
    fitness: &F,
    population: &mut [Individual<M>],
    data: &Dataset,
    config: &LcsConfig,
) -> LcsResult<()>
where
    M: RegressionModel,
    F: FitnessFunction<M>,
{
    for individual in population.iter_mut().filter(|i| !i.is_evaluated()) {
        let f = fitness.evaluate(individual, data, config)?;
        individual.set_fitness(f);
    }
    Ok(())
}

/// Evaluate every unevaluated individual (parallel)
#[cfg(feature = "parallel")]
pub fn evaluate_population<M, F>(
    fitness: &F,
    population: &mut [Individual<M>],
    data: &Dataset,
    config: &LcsConfig,
) -> LcsResult<()>
where
    M: RegressionModel,
    F: FitnessFunction<M>,
{
    population
        .par_iter_mut()
        .filter(|i| !i.is_evaluated())
        .try_for_each(|individual| {
            let f = fitness.evaluate(individual, data, config)?;
            individual.set_fitness(f);
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classifier::Classifier;
    use crate::model::linear::LinearRegression;
    use nalgebra::{DMatrix, DVector};

    fn individual(size: usize) -> Individual {
        let classifiers = (0..size)
            .map(|_| Classifier::with_bounds(&[-1.0], &[1.0], LinearRegression::new(), 2).unwrap())
            .collect();
        Individual::new(classifiers)
    }

    #[test]
    fn test_fn_fitness() {
        let fitness = FnFitness::new(
            |ind: &Individual, _: &Dataset, _: &LcsConfig| -> LcsResult<f64> {
                Ok(-(ind.parameters() as f64))
            },
        );
        let data = Dataset::new(DMatrix::zeros(1, 1), DVector::zeros(1)).unwrap();
        let value = fitness
            .evaluate(&individual(3), &data, &LcsConfig::new(1))
            .unwrap();
        assert_eq!(value, -6.0);
    }

    #[test]
    fn test_evaluate_population_skips_evaluated() {
        let fitness = FnFitness::new(
            |ind: &Individual, _: &Dataset, _: &LcsConfig| -> LcsResult<f64> {
                Ok(ind.len() as f64)
            },
        );
        let data = Dataset::empty(1);
        let mut population = vec![individual(1), individual(2), individual(3)];
        population[1].set_fitness(100.0);

        evaluate_population(&fitness, &mut population, &data, &LcsConfig::new(1)).unwrap();

        let values: Vec<_> = population.iter().map(|i| i.fitness).collect();
        assert_eq!(values, vec![Some(1.0), Some(100.0), Some(3.0)]);
    }
}
