//! Genetic Algorithm (GA).
//!
//! A steady-state GA over any [`GeneticAlgorithmProblem`]. Each step the
//! best `population_size - offspring_per_step` members survive and the rest
//! of the population is replaced by freshly mated (and partly mutated)
//! children.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, offspring and mutation counts, selection
//! - [`GeneticAlgorithm`]: Executes one generation per step
//! - [`Selection`]: Parent selection strategy
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//!
//! [`GeneticAlgorithmProblem`]: crate::problem::GeneticAlgorithmProblem

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::GeneticAlgorithm;
pub use selection::Selection;
