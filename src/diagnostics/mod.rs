//! Diagnostics and statistics
//!
//! This module provides per-generation statistics for a run.

use serde::{Deserialize, Serialize};

use crate::model::traits::RegressionModel;
use crate::population::individual::Individual;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Best fitness in this generation
    pub best_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Worst fitness in this generation
    pub worst_fitness: f64,
    /// Mean total classifier complexity
    pub mean_parameters: f64,
}

impl GenerationStats {
    /// Compute statistics from a population
    ///
    /// Unevaluated individuals are ignored for the fitness figures.
    pub fn from_population<M: RegressionModel>(
        population: &[Individual<M>],
        generation: usize,
    ) -> Self {
        let fitnesses: Vec<f64> = population.iter().filter_map(|i| i.fitness).collect();

        let mean_parameters = if population.is_empty() {
            0.0
        } else {
            population.iter().map(|i| i.parameters() as f64).sum::<f64>()
                / population.len() as f64
        };

        if fitnesses.is_empty() {
            return Self {
                generation,
                best_fitness: f64::NEG_INFINITY,
                mean_fitness: 0.0,
                worst_fitness: f64::INFINITY,
                mean_parameters,
            };
        }

        let best = fitnesses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitnesses.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;

        Self {
            generation,
            best_fitness: best,
            mean_fitness: mean,
            worst_fitness: worst,
            mean_parameters,
        }
    }
}
