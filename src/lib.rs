//! Randomized search optimization engine.
//!
//! Four black-box maximizers over a shared problem model:
//!
//! - **Randomized Hill Climbing (RHC)**: probe one random neighbor per step,
//!   restart from a fresh sample when stuck.
//! - **Simulated Annealing (SA)**: Metropolis acceptance of worse neighbors
//!   under a cooling temperature.
//! - **Genetic Algorithm (GA)**: selection, crossover and mutation over a
//!   fixed-size population with elitist survivors.
//! - **MIMIC**: sample from a fitted distribution, keep the elite, re-fit.
//!   Paired with a [`DiscreteDependencyTree`](dist::DiscreteDependencyTree)
//!   it learns pairwise structure between positions.
//!
//! # Architecture
//!
//! A candidate is an [`Instance`] (a numeric vector). The caller supplies
//! an [`EvaluationFunction`](problem::EvaluationFunction), a starting
//! [`Distribution`](dist::Distribution) and the operators from [`ops`],
//! bundles them into the problem shape an algorithm family needs (see
//! [`problem`]), and drives the algorithm through
//! [`OptimizationAlgorithm::step`], directly or with a [`trainer`].
//! [`suite`] runs several families against the same budget.
//!
//! Every algorithm maximizes fitness and owns its own seedable RNG.

mod algorithm;
pub mod dist;
pub mod error;
pub mod ga;
mod instance;
pub mod mimic;
pub mod ops;
pub mod problem;
pub mod problems;
pub mod random;
pub mod rhc;
pub mod sa;
pub mod suite;
pub mod trainer;

pub use algorithm::OptimizationAlgorithm;
pub use error::{Result, SearchError};
pub use instance::{check_ranges, Instance, Scored};
