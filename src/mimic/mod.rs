//! MIMIC: Mutual-Information-Maximizing Input Clustering.
//!
//! An estimation-of-distribution algorithm. Each step samples a population
//! from the current model, keeps the fittest members, and re-fits the
//! problem's [`FittableDistribution`] on them. With a
//! [`DiscreteDependencyTree`] model the search captures pairwise structure
//! between positions that mutation and crossover cannot see.
//!
//! # References
//!
//! - De Bonet, Isbell & Viola (1997), "MIMIC: Finding Optima by Estimating
//!   Probability Densities"
//!
//! [`FittableDistribution`]: crate::dist::FittableDistribution
//! [`DiscreteDependencyTree`]: crate::dist::DiscreteDependencyTree

mod config;
mod runner;

pub use config::{Elite, MimicConfig};
pub use runner::Mimic;
