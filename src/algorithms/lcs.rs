//! Learning classifier system driver
//!
//! This module owns the population of individuals and runs the generation
//! loop: fit local models on the training subset, score on the validation
//! subset, evolve, and keep the best individual seen as the elitist.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classifier::bounds::Interval;
use crate::config::{DomainDefaults, LcsConfig};
use crate::data::split::{train_validation_split, Split};
use crate::data::Dataset;
use crate::diagnostics::GenerationStats;
use crate::error::{LcsError, LcsResult};
use crate::fitness::penalized::PenalizedError;
use crate::model::linear::LinearRegression;
use crate::model::metrics::{mean, variance};
use crate::model::traits::RegressionModel;
use crate::operators::steps::EvaluateOnly;
use crate::operators::traits::{GenerationContext, GenerationStep};
use crate::population::individual::Individual;
use crate::population::mixing::{DegeneratePolicy, MixingConfig, MixingRule};

/// Lifecycle of an `Lcs`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcsState {
    /// Random population generated, nothing fitted yet
    PopulationReady,
    /// Every individual's local models are fitted
    LocallyFitted,
    /// The generation loop has run
    Evolved,
    /// An elitist exists and `predict` can be called
    PredictionReady,
}

/// Builder for `Lcs`
pub struct LcsBuilder<M = LinearRegression, S = EvaluateOnly<PenalizedError>>
where
    M: RegressionModel,
{
    config: LcsConfig,
    seed: Option<u64>,
    step: S,
    population: Option<Vec<Individual<M>>>,
}

impl LcsBuilder {
    /// Create a builder with default settings for `dimension` inputs
    pub fn new(dimension: usize) -> Self {
        Self {
            config: LcsConfig::new(dimension),
            seed: None,
            step: EvaluateOnly::default(),
            population: None,
        }
    }
}

impl<M, S> LcsBuilder<M, S>
where
    M: RegressionModel,
{
    /// Replace the whole configuration
    pub fn config(mut self, config: LcsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of individuals
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of classifiers per individual
    pub fn individual_size(mut self, size: usize) -> Self {
        self.config.individual_size = size;
        self
    }

    /// Set the number of generations run by `fit`
    pub fn generations(mut self, generations: usize) -> Self {
        self.config.generations = generations;
        self
    }

    /// Enable or disable minimum-range widening of random classifiers
    pub fn min_range(mut self, enabled: bool) -> Self {
        self.config.min_range = enabled;
        self
    }

    /// Set the domain classifier bounds are drawn from
    pub fn domain(mut self, domain: Interval) -> Self {
        self.config.domain = domain;
        self
    }

    /// Set the complexity of random classifiers
    pub fn complexity(mut self, complexity: usize) -> Self {
        self.config.complexity = complexity;
        self
    }

    /// Set the fraction of samples held out for fitness evaluation
    pub fn validation_fraction(mut self, fraction: f64) -> Self {
        self.config.validation_fraction = fraction;
        self
    }

    /// Set the mixing configuration
    pub fn mixing(mut self, mixing: MixingConfig) -> Self {
        self.config.mixing = mixing;
        self
    }

    /// Set the mixing rule
    pub fn mixing_rule(mut self, rule: MixingRule) -> Self {
        self.config.mixing.rule = rule;
        self
    }

    /// Set the policy for classifiers with too little experience
    pub fn degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.config.mixing.degenerate = policy;
        self
    }

    /// Set the fallback prediction and variance used before the first fit
    pub fn defaults(mut self, defaults: DomainDefaults) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// Seed the random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a caller-supplied population instead of a random one
    pub fn population(mut self, population: Vec<Individual<M>>) -> Self {
        self.population = Some(population);
        self
    }

    /// Set the generation step
    pub fn step<NewS>(self, step: NewS) -> LcsBuilder<M, NewS>
    where
        NewS: GenerationStep<M>,
    {
        LcsBuilder {
            config: self.config,
            seed: self.seed,
            step,
            population: self.population,
        }
    }

    /// Use another local model type
    ///
    /// Any previously supplied population is discarded.
    pub fn model<NewM>(self) -> LcsBuilder<NewM, S>
    where
        NewM: RegressionModel,
    {
        LcsBuilder {
            config: self.config,
            seed: self.seed,
            step: self.step,
            population: None,
        }
    }
}

impl<M, S> LcsBuilder<M, S>
where
    M: RegressionModel + Default,
    S: GenerationStep<M>,
{
    /// Build the `Lcs` instance
    pub fn build(self) -> LcsResult<Lcs<M, S>> {
        let mut config = self.config;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = match self.population {
            Some(population) => {
                if population.is_empty() {
                    return Err(LcsError::Configuration(
                        "supplied population is empty".to_string(),
                    ));
                }
                for classifier in population.iter().flat_map(|i| i.classifiers()) {
                    if classifier.dimension() != config.dimension {
                        return Err(LcsError::DimensionMismatch {
                            expected: config.dimension,
                            actual: classifier.dimension(),
                        });
                    }
                }
                config.population_size = population.len();
                config.validate()?;
                population
            }
            None => {
                config.validate()?;
                (0..config.population_size)
                    .map(|_| Individual::random(config.individual_size, &mut rng, &config))
                    .collect()
            }
        };

        debug!(
            population_size = config.population_size,
            dimension = config.dimension,
            "built population"
        );

        Ok(Lcs {
            config,
            population,
            elitist: None,
            step: self.step,
            rng,
            state: LcsState::PopulationReady,
            history: Vec::new(),
        })
    }
}

/// Learning classifier system for regression
///
/// Holds a fixed-size population of individuals and predicts with the best
/// one found by `fit`.
pub struct Lcs<M = LinearRegression, S = EvaluateOnly<PenalizedError>>
where
    M: RegressionModel,
{
    config: LcsConfig,
    population: Vec<Individual<M>>,
    elitist: Option<Individual<M>>,
    step: S,
    rng: StdRng,
    state: LcsState,
    history: Vec<GenerationStats>,
}

impl Lcs {
    /// Create a builder for `dimension` inputs
    pub fn builder(dimension: usize) -> LcsBuilder {
        LcsBuilder::new(dimension)
    }
}

impl<M, S> Lcs<M, S>
where
    M: RegressionModel,
    S: GenerationStep<M>,
{
    /// Fit the population to `(x, y)` and run the generation loop
    ///
    /// Every call starts a new run: domain defaults, elitist and history are
    /// reset from the new data. If fitting the local models fails, the
    /// previous run is left untouched. If the generation loop fails, the
    /// population stays locally fitted and no elitist is kept.
    pub fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> LcsResult<()> {
        if x.ncols() != self.config.dimension {
            return Err(LcsError::DimensionMismatch {
                expected: self.config.dimension,
                actual: x.ncols(),
            });
        }
        let data = Dataset::new(x.clone(), y.clone())?;
        if data.is_empty() {
            return Err(LcsError::EmptyData);
        }

        let mut config = self.config.clone();
        config.defaults = DomainDefaults {
            prediction: mean(y),
            variance: variance(y),
        };

        let Split { train, validation } =
            train_validation_split(&data, config.validation_fraction, &mut self.rng)?;
        if validation.is_empty() {
            warn!(
                samples = data.len(),
                "validation subset is empty; scoring on training data"
            );
        }

        info!(
            train = train.len(),
            validation = validation.len(),
            generations = config.generations,
            "starting fit"
        );

        let mut population = self.population.clone();
        fit_population(&mut population, &train, &config)?;

        self.config = config;
        self.population = population;
        self.elitist = None;
        self.history.clear();
        self.state = LcsState::LocallyFitted;

        if let Err(err) = self.evolve(&train, &validation) {
            warn!(error = %err, "generation loop failed, discarding elitist");
            self.elitist = None;
            self.state = LcsState::LocallyFitted;
            return Err(err);
        }

        if self.elitist.is_some() {
            self.state = LcsState::PredictionReady;
        }

        info!(
            state = ?self.state,
            elitist_fitness = ?self.elitist.as_ref().and_then(|e| e.fitness),
            "fit finished"
        );
        Ok(())
    }

    fn evolve(&mut self, train: &Dataset, validation: &Dataset) -> LcsResult<()> {
        for generation in 0..self.config.generations {
            let ctx = GenerationContext {
                config: &self.config,
                train,
                validation,
                generation,
            };

            self.step.score(&mut self.population, &ctx)?;
            update_elitist(&mut self.elitist, &self.population);

            let parents = self.step.select(&self.population, &mut self.rng);
            let mut offspring = self
                .step
                .vary(&self.population, &parents, &ctx, &mut self.rng)?;
            fit_population(&mut offspring, train, &self.config)?;
            self.step.score(&mut offspring, &ctx)?;
            self.step.replace(&mut self.population, offspring, &ctx);
            update_elitist(&mut self.elitist, &self.population);

            let stats = GenerationStats::from_population(&self.population, generation);
            info!(
                generation,
                best = stats.best_fitness,
                mean = stats.mean_fitness,
                "generation complete"
            );
            self.history.push(stats);
            self.state = LcsState::Evolved;
        }
        Ok(())
    }

    /// Predict with the elitist
    pub fn predict(&self, x: &DMatrix<f64>) -> LcsResult<DVector<f64>> {
        let elitist = self.elitist.as_ref().ok_or(LcsError::NotReady)?;
        elitist.predict(x, &self.config)
    }

    /// The current population
    pub fn population(&self) -> &[Individual<M>] {
        &self.population
    }

    /// The best individual seen during the last fit
    pub fn elitist(&self) -> Option<&Individual<M>> {
        self.elitist.as_ref()
    }

    /// The run configuration, including the defaults of the last fit
    pub fn config(&self) -> &LcsConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> LcsState {
        self.state
    }

    /// Per-generation statistics of the last fit
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}

#[cfg(not(feature = "parallel"))]
fn fit_population<M: RegressionModel>(
    population: &mut [Individual<M>],
    data: &Dataset,
    config: &LcsConfig,
) -> LcsResult<()> {
    population
        .iter_mut()
        .try_for_each(|individual| individual.fit(data, config))
}

#[cfg(feature = "parallel")]
fn fit_population<M: RegressionModel>(
    population: &mut [Individual<M>],
    data: &Dataset,
    config: &LcsConfig,
) -> LcsResult<()> {
    population
        .par_iter_mut()
        .try_for_each(|individual| individual.fit(data, config))
}

/// Replace the elitist with the best scored individual if it is better
fn update_elitist<M: RegressionModel>(
    elitist: &mut Option<Individual<M>>,
    population: &[Individual<M>],
) {
    let best = population
        .iter()
        .filter(|i| i.is_evaluated())
        .fold(None::<&Individual<M>>, |best, candidate| match best {
            Some(b) if !candidate.is_better_than(b) => Some(b),
            _ => Some(candidate),
        });

    if let Some(best) = best {
        let improved = elitist.as_ref().map_or(true, |e| best.is_better_than(e));
        if improved {
            *elitist = Some(best.clone());
        }
    }
}
