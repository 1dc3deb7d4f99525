//! Selection operators
//!
//! This module provides parent selection over individual fitness values.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LcsError, LcsResult};

/// Tournament selection operator
///
/// Selects the best individual from a random subset of the population.
/// Unevaluated individuals compete with negative infinite fitness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSelection {
    /// Tournament size (number of individuals competing)
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> LcsResult<Self> {
        if tournament_size == 0 {
            return Err(LcsError::Configuration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    /// Binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self { tournament_size: 2 }
    }

    /// Select the index of one tournament winner
    ///
    /// Returns `None` for an empty population.
    pub fn select<R: Rng>(&self, fitness: &[Option<f64>], rng: &mut R) -> Option<usize> {
        let size = self.tournament_size.min(fitness.len());
        let indices: Vec<usize> = (0..fitness.len()).collect();
        indices
            .choose_multiple(rng, size)
            .copied()
            .max_by(|&a, &b| {
                let fa = fitness[a].unwrap_or(f64::NEG_INFINITY);
                let fb = fitness[b].unwrap_or(f64::NEG_INFINITY);
                fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Select `count` winners
    pub fn select_many<R: Rng>(
        &self,
        fitness: &[Option<f64>],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        (0..count)
            .filter_map(|_| self.select(fitness, rng))
            .collect()
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::binary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tournament_rejects_zero() {
        assert!(TournamentSelection::new(0).is_err());
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let mut rng = StdRng::seed_from_u64(1);
        let fitness = vec![Some(-3.0), Some(-0.5), None, Some(-1.0)];
        let selection = TournamentSelection::new(4).unwrap();
        for _ in 0..20 {
            assert_eq!(selection.select(&fitness, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_select_many_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let fitness: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let picked = TournamentSelection::binary().select_many(&fitness, 25, &mut rng);
        assert_eq!(picked.len(), 25);
        assert!(picked.iter().all(|&i| i < 10));
    }

    #[test]
    fn test_select_empty_population() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(TournamentSelection::binary().select(&[], &mut rng), None);
    }
}
