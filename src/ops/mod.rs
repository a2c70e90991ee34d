//! Neighbor, mutation, and crossover operators.
//!
//! Operators never modify their inputs: each call returns a new
//! [`Instance`].
//!
//! # Neighbor functions (hill climbing, annealing)
//!
//! - [`DiscreteChangeOneNeighbor`]: one position takes a different value
//! - [`SwapNeighbor`]: two positions swap (permutation-safe)
//! - [`ContinuousAddOneNeighbor`]: one position moves by a small amount
//!
//! # Mutation functions (genetic algorithm)
//!
//! - [`DiscreteChangeOneMutation`], [`SwapMutation`], [`ContinuousAddOneMutation`]
//!
//! # Crossover functions (genetic algorithm)
//!
//! - [`SingleCrossOver`]: single cut point
//! - [`UniformCrossOver`]: per-position coin flip
//! - [`OrderCrossOver`]: Davis (1985) order crossover, permutation-safe

mod crossover;
mod mutation;
mod neighbor;

pub use crossover::{OrderCrossOver, SingleCrossOver, UniformCrossOver};
pub use mutation::{ContinuousAddOneMutation, DiscreteChangeOneMutation, SwapMutation};
pub use neighbor::{ContinuousAddOneNeighbor, DiscreteChangeOneNeighbor, SwapNeighbor};

use crate::instance::Instance;
use rand::Rng;

/// Produces a single-step local perturbation of an instance.
pub trait NeighborFunction: Send + Sync {
    /// Returns a neighbor of `instance`.
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance;
}

/// Perturbs an offspring during genetic reproduction.
///
/// How many offspring are mutated is decided by the algorithm, not the
/// operator.
pub trait MutationFunction: Send + Sync {
    /// Returns a mutated copy of `instance`.
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance;
}

/// Recombines two parents into one child.
pub trait CrossoverFunction: Send + Sync {
    /// Returns a child of `a` and `b`. Parents must have equal length.
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance;
}

/// Replaces position `i` with a uniformly random different value in
/// `[0, range)`. A position with range 1 is left unchanged.
fn change_one<R: Rng>(instance: &mut Instance, i: usize, range: usize, rng: &mut R) {
    if range < 2 {
        return;
    }
    let current = instance.discrete_at(i).min(range - 1);
    let mut value = rng.random_range(0..range - 1);
    if value >= current {
        value += 1;
    }
    instance.set(i, value as f64);
}

/// Swaps two distinct random positions. Instances shorter than 2 are
/// left unchanged.
fn swap_two<R: Rng>(instance: &mut Instance, rng: &mut R) {
    let n = instance.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    instance.swap(i, j);
}
