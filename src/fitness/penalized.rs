//! Complexity-penalized error fitness

use serde::{Deserialize, Serialize};

use crate::config::LcsConfig;
use crate::data::Dataset;
use crate::error::LcsResult;
use crate::fitness::traits::FitnessFunction;
use crate::model::metrics::mean_squared_error;
use crate::model::traits::RegressionModel;
use crate::population::individual::Individual;

/// Negated mean squared error plus a complexity penalty
///
/// `fitness = -(mse + complexity_weight * parameters)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenalizedError {
    /// Cost of one unit of classifier complexity
    pub complexity_weight: f64,
}

impl PenalizedError {
    /// Create with the given complexity weight
    pub fn new(complexity_weight: f64) -> Self {
        Self { complexity_weight }
    }
}

impl Default for PenalizedError {
    fn default() -> Self {
        Self::new(1e-3)
    }
}

impl<M: RegressionModel> FitnessFunction<M> for PenalizedError {
    fn evaluate(
        &self,
        individual: &Individual<M>,
        data: &Dataset,
        config: &LcsConfig,
    ) -> LcsResult<f64> {
        let error = mean_squared_error(data.y(), &individual.predict(data.x(), config)?);
        Ok(-(error + self.complexity_weight * individual.parameters() as f64))
    }
}
