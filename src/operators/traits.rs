//! Generation step trait
//!
//! One generation of evolutionary search is split into four stages run by
//! the population driver: score, select, vary and replace. Fitting the
//! offspring's local models happens between vary and replace and is done by
//! the driver, so steps never touch the training data directly.

use rand::Rng;

use crate::config::LcsConfig;
use crate::data::Dataset;
use crate::error::LcsResult;
use crate::model::traits::RegressionModel;
use crate::population::individual::Individual;

/// Data and settings visible to a generation step
#[derive(Clone, Copy, Debug)]
pub struct GenerationContext<'a> {
    /// Run configuration
    pub config: &'a LcsConfig,
    /// Samples local models are fitted on
    pub train: &'a Dataset,
    /// Samples held out for fitness evaluation
    pub validation: &'a Dataset,
    /// Zero-based index of the running generation
    pub generation: usize,
}

impl<'a> GenerationContext<'a> {
    /// Data fitness is measured on: the validation subset, or the training
    /// subset if nothing was held out
    pub fn evaluation_data(&self) -> &'a Dataset {
        if self.validation.is_empty() {
            self.train
        } else {
            self.validation
        }
    }
}

/// Pluggable body of the generation loop
pub trait GenerationStep<M: RegressionModel> {
    /// Assign a fitness to every unevaluated individual
    fn score(&self, population: &mut [Individual<M>], ctx: &GenerationContext<'_>)
        -> LcsResult<()>;

    /// Pick parent indices into `population`
    fn select<R: Rng>(&self, population: &[Individual<M>], rng: &mut R) -> Vec<usize>;

    /// Produce offspring from the selected parents
    fn vary<R: Rng>(
        &self,
        population: &[Individual<M>],
        parents: &[usize],
        ctx: &GenerationContext<'_>,
        rng: &mut R,
    ) -> LcsResult<Vec<Individual<M>>>;

    /// Merge scored offspring into the population
    fn replace(
        &self,
        population: &mut Vec<Individual<M>>,
        offspring: Vec<Individual<M>>,
        ctx: &GenerationContext<'_>,
    );
}
