//! Crossover functions.
//!
//! # Operators
//!
//! - [`SingleCrossOver`]: prefix from one parent, suffix from the other
//! - [`UniformCrossOver`]: each position from either parent
//! - [`OrderCrossOver`] (OX): Davis (1985), preserves relative order and
//!   the permutation property
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::CrossoverFunction;
use crate::instance::Instance;
use rand::Rng;

/// Single-point crossover.
///
/// Picks a cut `c` uniformly in `[0, n)`; the child takes positions `< c`
/// from `a` and the rest from `b`.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleCrossOver;

impl CrossoverFunction for SingleCrossOver {
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        let n = a.len();
        debug_assert_eq!(n, b.len(), "parents must have equal length");
        if n == 0 {
            return a.clone();
        }
        let cut = rng.random_range(0..n);
        let mut values = Vec::with_capacity(n);
        values.extend_from_slice(&a.values()[..cut]);
        values.extend_from_slice(&b.values()[cut..]);
        Instance::new(values)
    }
}

/// Uniform crossover: each position comes from either parent with
/// probability 1/2.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformCrossOver;

impl CrossoverFunction for UniformCrossOver {
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        debug_assert_eq!(a.len(), b.len(), "parents must have equal length");
        let values = a
            .values()
            .iter()
            .zip(b.values())
            .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
            .collect();
        Instance::new(values)
    }
}

/// Order Crossover (OX) for permutations of `0..n`.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy the segment from parent `a` to the child at the same positions
/// 3. Fill the remaining positions from parent `b`, in `b`'s order starting
///    after the segment end and wrapping around, skipping values already
///    present in the child
///
/// The child is always a permutation of the same value set as the parents.
///
/// # Complexity
/// O(n) time, O(n) space
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderCrossOver;

impl CrossoverFunction for OrderCrossOver {
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        let n = a.len();
        debug_assert_eq!(n, b.len(), "parents must have equal length");
        if n < 2 {
            return a.clone();
        }
        let (start, end) = random_segment(n, rng);
        Instance::discrete(&ox_build_child(
            &a.to_discrete(),
            &b.to_discrete(),
            start,
            end,
        ))
    }
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
