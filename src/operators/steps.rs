//! Provided generation steps

use rand::Rng;

use crate::error::LcsResult;
use crate::fitness::penalized::PenalizedError;
use crate::fitness::traits::{evaluate_population, FitnessFunction};
use crate::model::traits::RegressionModel;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{GenerationContext, GenerationStep};
use crate::population::individual::Individual;

/// Scores the population and leaves it unchanged
///
/// The driver still tracks the elitist, so a run with this step ends ready
/// to predict with the best locally fitted individual.
#[derive(Clone, Debug, Default)]
pub struct EvaluateOnly<F = PenalizedError> {
    /// Fitness function
    pub fitness: F,
}

impl<F> EvaluateOnly<F> {
    /// Create with the given fitness function
    pub fn new(fitness: F) -> Self {
        Self { fitness }
    }
}

impl<M, F> GenerationStep<M> for EvaluateOnly<F>
where
    M: RegressionModel,
    F: FitnessFunction<M>,
{
    fn score(
        &self,
        population: &mut [Individual<M>],
        ctx: &GenerationContext<'_>,
    ) -> LcsResult<()> {
        evaluate_population(&self.fitness, population, ctx.evaluation_data(), ctx.config)
    }

    fn select<R: Rng>(&self, _population: &[Individual<M>], _rng: &mut R) -> Vec<usize> {
        Vec::new()
    }

    fn vary<R: Rng>(
        &self,
        _population: &[Individual<M>],
        _parents: &[usize],
        _ctx: &GenerationContext<'_>,
        _rng: &mut R,
    ) -> LcsResult<Vec<Individual<M>>> {
        Ok(Vec::new())
    }

    fn replace(
        &self,
        _population: &mut Vec<Individual<M>>,
        _offspring: Vec<Individual<M>>,
        _ctx: &GenerationContext<'_>,
    ) {
    }
}

/// Generational replacement with tournament selection and elitism
///
/// Every parent is copied and passed through `Individual::mutate`, so this
/// step fails with `LcsError::NotImplemented` until a mutation operator
/// exists.
#[derive(Clone, Debug)]
pub struct Generational<F = PenalizedError> {
    /// Fitness function
    pub fitness: F,
    /// Parent selection
    pub selection: TournamentSelection,
    /// Number of best individuals carried over unchanged
    pub elite_count: usize,
}

impl<F> Generational<F> {
    /// Create with the given fitness function, binary tournaments and one elite
    pub fn new(fitness: F) -> Self {
        Self {
            fitness,
            selection: TournamentSelection::binary(),
            elite_count: 1,
        }
    }

    /// Set the tournament selection
    pub fn with_selection(mut self, selection: TournamentSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the number of elites
    pub fn with_elite_count(mut self, elite_count: usize) -> Self {
        self.elite_count = elite_count;
        self
    }
}

impl Default for Generational<PenalizedError> {
    fn default() -> Self {
        Self::new(PenalizedError::default())
    }
}

impl<M, F> GenerationStep<M> for Generational<F>
where
    M: RegressionModel,
    F: FitnessFunction<M>,
{
    fn score(
        &self,
        population: &mut [Individual<M>],
        ctx: &GenerationContext<'_>,
    ) -> LcsResult<()> {
        evaluate_population(&self.fitness, population, ctx.evaluation_data(), ctx.config)
    }

    fn select<R: Rng>(&self, population: &[Individual<M>], rng: &mut R) -> Vec<usize> {
        let fitness: Vec<Option<f64>> = population.iter().map(|i| i.fitness).collect();
        self.selection.select_many(&fitness, population.len(), rng)
    }

    fn vary<R: Rng>(
        &self,
        population: &[Individual<M>],
        parents: &[usize],
        ctx: &GenerationContext<'_>,
        rng: &mut R,
    ) -> LcsResult<Vec<Individual<M>>> {
        parents
            .iter()
            .map(|&i| {
                let mut child = population[i].clone();
                child.fitness = None;
                child.mutate(rng, ctx.config)?;
                Ok(child)
            })
            .collect()
    }

    fn replace(
        &self,
        population: &mut Vec<Individual<M>>,
        offspring: Vec<Individual<M>>,
        _ctx: &GenerationContext<'_>,
    ) {
        let size = population.len();
        sort_by_fitness(population);
        population.truncate(self.elite_count.min(size));
        population.extend(offspring);
        population.truncate(size);
    }
}

/// Sort best first; unevaluated individuals go last
pub fn sort_by_fitness<M: RegressionModel>(population: &mut [Individual<M>]) {
    population.sort_by(|a, b| {
        let fa = a.fitness.unwrap_or(f64::NEG_INFINITY);
        let fb = b.fitness.unwrap_or(f64::NEG_INFINITY);
        fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
    });
}
