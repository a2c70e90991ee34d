//! Random number generation helpers.
//!
//! Every algorithm owns one [`SearchRng`], seeded from its configuration,
//! so independent runs never share a random source.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The random source owned by each search algorithm.
pub type SearchRng = StdRng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from an optional seed, drawing a fresh seed when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns a uniformly random permutation of `0..n`.
pub fn permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    shuffle(&mut perm, rng);
    perm
}

/// Samples an index from a discrete distribution given as probabilities.
///
/// The probabilities are expected to sum to one; any rounding shortfall
/// falls on the last index.
pub fn sample_categorical<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    debug_assert!(!probabilities.is_empty());
    let threshold: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if threshold < cumulative {
            return i;
        }
    }
    probabilities.len() - 1
}
