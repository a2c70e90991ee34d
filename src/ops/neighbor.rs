//! Neighbor functions.

use super::{change_one, swap_two, NeighborFunction};
use crate::error::{Result, SearchError};
use crate::instance::{validate_ranges, Instance};
use rand::Rng;

/// Changes one random position to a different value within its range.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteChangeOneNeighbor {
    ranges: Vec<usize>,
}

impl DiscreteChangeOneNeighbor {
    /// Creates the operator for the space described by `ranges`.
    pub fn new(ranges: Vec<usize>) -> Result<Self> {
        validate_ranges(&ranges)?;
        Ok(Self { ranges })
    }
}

impl NeighborFunction for DiscreteChangeOneNeighbor {
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        debug_assert_eq!(instance.len(), self.ranges.len());
        let mut next = instance.clone();
        let i = rng.random_range(0..self.ranges.len());
        change_one(&mut next, i, self.ranges[i], rng);
        next
    }
}

/// Swaps two random positions. Preserves permutations.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapNeighbor;

impl NeighborFunction for SwapNeighbor {
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        let mut next = instance.clone();
        swap_two(&mut next, rng);
        next
    }
}

/// Adds a value drawn uniformly from `[-amount / 2, amount / 2)` to one
/// random position. Used for continuous vectors such as network weights.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousAddOneNeighbor {
    amount: f64,
}

impl ContinuousAddOneNeighbor {
    /// Creates the operator. `amount` must be positive and finite.
    pub fn new(amount: f64) -> Result<Self> {
        if !(amount > 0.0 && amount.is_finite()) {
            return Err(SearchError::InvalidConfig(format!(
                "perturbation amount must be positive, got {amount}"
            )));
        }
        Ok(Self { amount })
    }
}

impl Default for ContinuousAddOneNeighbor {
    fn default() -> Self {
        Self { amount: 1.0 }
    }
}

impl NeighborFunction for ContinuousAddOneNeighbor {
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        let mut next = instance.clone();
        if next.is_empty() {
            return next;
        }
        let i = rng.random_range(0..next.len());
        let half = self.amount / 2.0;
        next.set(i, next.get(i) + rng.random_range(-half..half));
        next
    }
}
