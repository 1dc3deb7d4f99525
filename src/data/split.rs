//! Train/validation holdout split

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::Dataset;
use crate::error::{LcsError, LcsResult};

/// Training and validation subsets of one dataset
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    /// Samples the local models are fitted on
    pub train: Dataset,
    /// Samples held out for fitness evaluation
    pub validation: Dataset,
}

/// Shuffle the samples and hold out `validation_fraction` of them
///
/// The validation size is rounded up but always leaves at least one training
/// sample, so tiny datasets end up with an empty validation subset.
pub fn train_validation_split<R: Rng>(
    data: &Dataset,
    validation_fraction: f64,
    rng: &mut R,
) -> LcsResult<Split> {
    if data.is_empty() {
        return Err(LcsError::EmptyData);
    }
    if !(0.0..1.0).contains(&validation_fraction) {
        return Err(LcsError::Configuration(format!(
            "validation_fraction must be in [0, 1), got {validation_fraction}"
        )));
    }

    let n = data.len();
    let held_out = ((validation_fraction * n as f64).ceil() as usize).min(n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let (validation, train) = indices.split_at(held_out);

    Ok(Split {
        train: data.select(train),
        validation: data.select(validation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(n: usize) -> Dataset {
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let x = DMatrix::from_column_slice(n, 1, &xs);
        let y = DVector::from_iterator(n, xs.iter().map(|v| 2.0 * v));
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn test_split_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let split = train_validation_split(&line(20), 0.25, &mut rng).unwrap();
        assert_eq!(split.validation.len(), 5);
        assert_eq!(split.train.len(), 15);

        let split = train_validation_split(&line(10), 0.25, &mut rng).unwrap();
        assert_eq!(split.validation.len(), 3);
        assert_eq!(split.train.len(), 7);
    }

    #[test]
    fn test_split_keeps_pairs_together() {
        let mut rng = StdRng::seed_from_u64(2);
        let split = train_validation_split(&line(12), 0.5, &mut rng).unwrap();
        for part in [&split.train, &split.validation] {
            for i in 0..part.len() {
                assert_eq!(part.y()[i], 2.0 * part.x()[(i, 0)]);
            }
        }
    }

    #[test]
    fn test_split_partitions_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        let split = train_validation_split(&line(9), 0.3, &mut rng).unwrap();
        let mut seen: Vec<f64> = split
            .train
            .x()
            .iter()
            .chain(split.validation.x().iter())
            .copied()
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..9).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_tiny_dataset_keeps_training_sample() {
        let mut rng = StdRng::seed_from_u64(4);
        let split = train_validation_split(&line(1), 0.25, &mut rng).unwrap();
        assert_eq!(split.train.len(), 1);
        assert!(split.validation.is_empty());
    }

    #[test]
    fn test_split_zero_fraction() {
        let mut rng = StdRng::seed_from_u64(5);
        let split = train_validation_split(&line(8), 0.0, &mut rng).unwrap();
        assert_eq!(split.train.len(), 8);
        assert!(split.validation.is_empty());
    }

    #[test]
    fn test_split_rejects_empty_and_bad_fraction() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(
            train_validation_split(&Dataset::empty(1), 0.25, &mut rng),
            Err(LcsError::EmptyData)
        );
        assert!(train_validation_split(&line(4), 1.0, &mut rng).is_err());
    }
}
