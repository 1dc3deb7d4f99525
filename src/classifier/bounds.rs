//! Matching region bounds
//!
//! This module provides the open interval and hyper-rectangle types that
//! define where a classifier is responsible for predicting.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LcsError, LcsResult};

/// Open interval for a single dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound (exclusive)
    pub lower: f64,
    /// Upper bound (exclusive)
    pub upper: f64,
}

impl Interval {
    /// Create a new interval
    ///
    /// Fails unless `lower < upper` and both ends are finite.
    pub fn new(lower: f64, upper: f64) -> LcsResult<Self> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(LcsError::InvalidBounds {
                dimension: 0,
                lower,
                upper,
            });
        }
        Ok(Self { lower, upper })
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> LcsResult<Self> {
        Self::new(-half_width, half_width)
    }

    /// Get the width (upper - lower)
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Get the center point
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Check if a value lies strictly inside the interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }

    /// Clamp a value into the closed interval
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// Widen by half the width on each side, then clip to `domain`
    pub fn widened_within(&self, domain: &Interval) -> Self {
        let half = self.width() / 2.0;
        Self {
            lower: domain.clamp(self.lower - half),
            upper: domain.clamp(self.upper + half),
        }
    }

    /// Draw an interval from two uniform samples over `domain`
    pub fn random<R: Rng>(rng: &mut R, domain: &Interval) -> Self {
        loop {
            let a = rng.gen_range(domain.lower..domain.upper);
            let b = rng.gen_range(domain.lower..domain.upper);
            if a < b {
                return Self { lower: a, upper: b };
            }
            if b < a {
                return Self { lower: b, upper: a };
            }
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

/// Hyper-rectangle made of one open interval per input dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    intervals: Vec<Interval>,
}

impl Region {
    /// Create a region from per-dimension intervals
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Create a region from lower and upper bound vectors
    pub fn from_bounds(lowers: &[f64], uppers: &[f64]) -> LcsResult<Self> {
        if lowers.len() != uppers.len() {
            return Err(LcsError::DimensionMismatch {
                expected: lowers.len(),
                actual: uppers.len(),
            });
        }
        lowers
            .iter()
            .zip(uppers)
            .enumerate()
            .map(|(dimension, (&lower, &upper))| {
                Interval::new(lower, upper).map_err(|_| LcsError::InvalidBounds {
                    dimension,
                    lower,
                    upper,
                })
            })
            .collect()
    }

    /// Draw a random region inside `domain`
    ///
    /// With `min_range` every interval is widened by half its width on each
    /// side and clipped to the domain.
    pub fn random<R: Rng>(
        rng: &mut R,
        dimension: usize,
        domain: &Interval,
        min_range: bool,
    ) -> Self {
        let intervals = (0..dimension)
            .map(|_| Interval::random(rng, domain))
            .collect::<Vec<_>>();
        let mut region = Self { intervals };
        if min_range {
            region.widen_within(domain);
        }
        region
    }

    /// Widen every interval by half its width on each side, clipped to `domain`
    pub fn widen_within(&mut self, domain: &Interval) {
        for interval in &mut self.intervals {
            *interval = interval.widened_within(domain);
        }
    }

    /// Get number of dimensions
    pub fn dimension(&self) -> usize {
        self.intervals.len()
    }

    /// Get the interval for a specific dimension
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Get all intervals
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Lower bounds, one per dimension
    pub fn lowers(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.lower).collect()
    }

    /// Upper bounds, one per dimension
    pub fn uppers(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.upper).collect()
    }

    /// Check if a point lies strictly inside every interval
    ///
    /// A point with the wrong number of coordinates is never contained.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension() && self.contains_iter(point)
    }

    /// Check containment for a sequence of exactly `dimension()` coordinates
    pub(crate) fn contains_iter<'a, I>(&self, point: I) -> bool
    where
        I: IntoIterator<Item = &'a f64>,
    {
        self.intervals
            .iter()
            .zip(point)
            .all(|(interval, &v)| interval.contains(v))
    }

    /// Check that every interval lies inside `domain` (closed)
    pub fn within(&self, domain: &Interval) -> bool {
        self.intervals
            .iter()
            .all(|i| i.lower >= domain.lower && i.upper <= domain.upper)
    }
}

impl FromIterator<Interval> for Region {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}
