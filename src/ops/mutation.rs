//! Mutation functions for the genetic algorithm.

use super::{change_one, swap_two, MutationFunction};
use crate::error::{Result, SearchError};
use crate::instance::{validate_ranges, Instance};
use rand::Rng;

/// Changes one random position to a different value within its range.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteChangeOneMutation {
    ranges: Vec<usize>,
}

impl DiscreteChangeOneMutation {
    /// Creates the operator for the space described by `ranges`.
    pub fn new(ranges: Vec<usize>) -> Result<Self> {
        validate_ranges(&ranges)?;
        Ok(Self { ranges })
    }
}

impl MutationFunction for DiscreteChangeOneMutation {
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        debug_assert_eq!(instance.len(), self.ranges.len());
        let mut next = instance.clone();
        let i = rng.random_range(0..self.ranges.len());
        change_one(&mut next, i, self.ranges[i], rng);
        next
    }
}

/// Swap mutation: exchange two random positions.
///
/// # Complexity
/// O(n) for the copy, O(1) for the move.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapMutation;

impl MutationFunction for SwapMutation {
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        let mut next = instance.clone();
        swap_two(&mut next, rng);
        next
    }
}

/// Adds a value from `[-amount / 2, amount / 2)` to one random position.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousAddOneMutation {
    amount: f64,
}

impl ContinuousAddOneMutation {
    /// Creates the operator. `amount` must be positive and finite.
    pub fn new(amount: f64) -> Result<Self> {
        if !(amount > 0.0 && amount.is_finite()) {
            return Err(SearchError::InvalidConfig(format!(
                "mutation amount must be positive, got {amount}"
            )));
        }
        Ok(Self { amount })
    }
}

impl Default for ContinuousAddOneMutation {
    fn default() -> Self {
        Self { amount: 1.0 }
    }
}

impl MutationFunction for ContinuousAddOneMutation {
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
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
