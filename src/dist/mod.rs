//! Probability distributions over the representation space.
//!
//! Every search algorithm draws fresh candidates from a [`Distribution`].
//! MIMIC additionally needs a [`FittableDistribution`] that can be
//! re-estimated from a weighted population.
//!
//! # Models
//!
//! - [`DiscreteUniform`]: independent uniform value per position
//! - [`DiscretePermutation`]: uniformly random permutation of `0..n`
//! - [`DiscreteDependencyTree`]: tree-structured model built from pairwise
//!   mutual information (Chow & Liu)
//!
//! # References
//!
//! - Chow & Liu (1968), "Approximating Discrete Probability Distributions
//!   with Dependence Trees"
//! - De Bonet, Isbell & Viola (1997), "MIMIC: Finding Optima by Estimating
//!   Probability Densities"

mod dependency_tree;
mod permutation;
mod uniform;

pub use dependency_tree::DiscreteDependencyTree;
pub use permutation::DiscretePermutation;
pub use uniform::DiscreteUniform;

use crate::error::Result;
use crate::instance::Instance;
use rand::Rng;

/// A generator of fresh instances.
pub trait Distribution: Send + Sync {
    /// Draws one instance.
    fn sample<R: Rng>(&self, rng: &mut R) -> Instance;
}

/// A distribution that can be re-estimated from data.
pub trait FittableDistribution: Distribution {
    /// Rebuilds the model from a weighted population.
    ///
    /// `weights[k]` is the weight of `population[k]`. Weights need not be
    /// normalised. The previous model state is discarded.
    fn estimate(&mut self, population: &[Instance], weights: &[f64]) -> Result<()>;
}

impl<D: Distribution + ?Sized> Distribution for &D {
    fn sample<R: Rng>(&self, rng: &mut R) -> Instance {
        (**self).sample(rng)
    }
}
