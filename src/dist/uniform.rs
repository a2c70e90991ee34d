//! Independent uniform distribution over a discrete space.

use super::Distribution;
use crate::error::Result;
use crate::instance::{validate_ranges, Instance};
use rand::Rng;

/// Samples each position independently and uniformly in `[0, range_i)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteUniform {
    ranges: Vec<usize>,
}

impl DiscreteUniform {
    /// Creates the distribution.
    ///
    /// Fails if `ranges` is empty or contains a zero.
    pub fn new(ranges: Vec<usize>) -> Result<Self> {
        validate_ranges(&ranges)?;
        Ok(Self { ranges })
    }

    /// Per-position ranges.
    pub fn ranges(&self) -> &[usize] {
        &self.ranges
    }
}

impl Distribution for DiscreteUniform {
    fn sample<R: Rng>(&self, rng: &mut R) -> Instance {
        let values: Vec<usize> = self
            .ranges
            .iter()
            .map(|&r| rng.random_range(0..r))
            .collect();
        Instance::discrete(&values)
    }
}
