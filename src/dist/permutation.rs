//! Uniform distribution over permutations.

use super::Distribution;
use crate::error::{Result, SearchError};
use crate::instance::Instance;
use crate::random::permutation;
use rand::Rng;

/// Samples a uniformly random permutation of `0..n`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscretePermutation {
    n: usize,
}

impl DiscretePermutation {
    /// Creates the distribution. `n` must be positive.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SearchError::InvalidConfig(
                "permutation size must be positive".into(),
            ));
        }
        Ok(Self { n })
    }

    /// Permutation length.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the permutation is empty. Never true for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl Distribution for DiscretePermutation {
    fn sample<R: Rng>(&self, rng: &mut R) -> Instance {
        Instance::discrete(&permutation(self.n, rng))
    }
}
