//! Randomized Hill Climbing (RHC).
//!
//! Single-solution local search: probe one random neighbor per step and
//! move if it is at least as good. When probes keep failing the climber
//! restarts from a fresh random sample instead of idling on a local
//! optimum.
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, §4.1

mod config;
mod runner;

pub use config::RhcConfig;
pub use runner::RandomizedHillClimbing;
