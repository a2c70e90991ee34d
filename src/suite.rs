//! Running several algorithms on the same problem with one budget.
//!
//! [`SuiteConfig`] names the algorithms to run and holds a configuration
//! for each; [`Suite::run`] builds them around the matching problem from
//! [`SuiteProblems`] and drives each with a [`FixedIterationTrainer`].

use crate::algorithm::OptimizationAlgorithm;
use crate::error::{Result, SearchError};
use crate::ga::{GaConfig, GeneticAlgorithm};
use crate::instance::Scored;
use crate::mimic::{Mimic, MimicConfig};
use crate::problem::{
    GeneticAlgorithmProblem, HillClimbingProblem, ProbabilisticOptimizationProblem,
};
use crate::rhc::{RandomizedHillClimbing, RhcConfig};
use crate::sa::{SaConfig, SimulatedAnnealing};
use crate::trainer::{FixedIterationTrainer, Trainer};
use std::fmt;

/// Algorithm families the suite can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Randomized hill climbing.
    Rhc,
    /// Simulated annealing.
    Sa,
    /// Genetic algorithm.
    Ga,
    /// MIMIC.
    Mimic,
}

impl Algorithm {
    /// All four families, in the order they are usually reported.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Rhc,
        Algorithm::Sa,
        Algorithm::Ga,
        Algorithm::Mimic,
    ];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Rhc => "RHC",
            Algorithm::Sa => "SA",
            Algorithm::Ga => "GA",
            Algorithm::Mimic => "MIMIC",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which algorithms to run, for how long, and how each is configured.
///
/// Per-algorithm seeds: an explicit `seed` on an algorithm's own config
/// wins; otherwise the suite seed plus the algorithm's position in
/// `algorithms` is used; with neither, the run is unseeded.
///
/// ```
/// use u_randopt::suite::{Algorithm, SuiteConfig};
///
/// let config = SuiteConfig::default()
///     .with_algorithms(vec![Algorithm::Rhc, Algorithm::Sa])
///     .with_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed_for(1), Some(43));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuiteConfig {
    /// Algorithms to run, in order. Duplicates run twice.
    pub algorithms: Vec<Algorithm>,
    /// Steps given to every algorithm.
    pub iterations: usize,
    /// Base seed.
    pub seed: Option<u64>,
    pub rhc: RhcConfig,
    pub sa: SaConfig,
    pub ga: GaConfig,
    pub mimic: MimicConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            iterations: 1000,
            seed: None,
            rhc: RhcConfig::default(),
            sa: SaConfig::default(),
            ga: GaConfig::default(),
            mimic: MimicConfig::default(),
        }
    }
}

impl SuiteConfig {
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rhc(mut self, rhc: RhcConfig) -> Self {
        self.rhc = rhc;
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_mimic(mut self, mimic: MimicConfig) -> Self {
        self.mimic = mimic;
        self
    }

    /// Seed derived from the suite seed for the algorithm at `index`.
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }

    /// Validates the suite and the config of every selected algorithm.
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(SearchError::InvalidConfig(
                "suite must name at least one algorithm".into(),
            ));
        }
        for algorithm in &self.algorithms {
            match algorithm {
                Algorithm::Rhc => self.rhc.validate()?,
                Algorithm::Sa => self.sa.validate()?,
                Algorithm::Ga => self.ga.validate()?,
                Algorithm::Mimic => self.mimic.validate()?,
            }
        }
        Ok(())
    }
}

/// The problem each algorithm family runs on.
///
/// A field only needs to be set when its family is selected.
#[derive(Debug, Clone)]
pub struct SuiteProblems<H, G, Q> {
    /// Used by RHC and SA.
    pub hill_climbing: Option<H>,
    /// Used by the GA.
    pub genetic: Option<G>,
    /// Used by MIMIC.
    pub probabilistic: Option<Q>,
}

/// Result of one algorithm's run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuiteOutcome {
    pub algorithm: Algorithm,
    /// Best candidate the algorithm found.
    pub best: Scored,
    /// Sum of the per-step signals.
    pub signal_sum: f64,
}

/// Runs a [`SuiteConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Suite;

impl Suite {
    /// Runs every selected algorithm for `config.iterations` steps.
    ///
    /// Outcomes come back in the order of `config.algorithms`. The first
    /// configuration or evaluation error aborts the whole suite.
    pub fn run<H, G, Q>(
        config: &SuiteConfig,
        problems: &SuiteProblems<H, G, Q>,
    ) -> Result<Vec<SuiteOutcome>>
    where
        H: HillClimbingProblem,
        G: GeneticAlgorithmProblem,
        Q: ProbabilisticOptimizationProblem,
    {
        config.validate()?;
        tracing::debug!(
            algorithms = config.algorithms.len(),
            iterations = config.iterations,
            seed = ?config.seed,
            "suite started"
        );

        let mut outcomes = Vec::with_capacity(config.algorithms.len());
        for (index, &algorithm) in config.algorithms.iter().enumerate() {
            let seed = |own: Option<u64>| own.or_else(|| config.seed_for(index));
            let mut trainer = FixedIterationTrainer::new(config.iterations);

            let (best, signal_sum) = match algorithm {
                Algorithm::Rhc => {
                    let problem = require(&problems.hill_climbing, algorithm)?;
                    let mut rhc_config = config.rhc.clone();
                    rhc_config.seed = seed(rhc_config.seed);
                    let mut rhc = RandomizedHillClimbing::new(problem, rhc_config)?;
                    drive(&mut trainer, &mut rhc)?
                }
                Algorithm::Sa => {
                    let problem = require(&problems.hill_climbing, algorithm)?;
                    let mut sa_config = config.sa.clone();
                    sa_config.seed = seed(sa_config.seed);
                    let mut sa = SimulatedAnnealing::new(problem, sa_config)?;
                    drive(&mut trainer, &mut sa)?
                }
                Algorithm::Ga => {
                    let problem = require(&problems.genetic, algorithm)?;
                    let mut ga_config = config.ga.clone();
                    ga_config.seed = seed(ga_config.seed);
                    let mut ga = GeneticAlgorithm::new(problem, ga_config)?;
                    drive(&mut trainer, &mut ga)?
                }
                Algorithm::Mimic => {
                    let problem = require(&problems.probabilistic, algorithm)?;
                    let mut mimic_config = config.mimic.clone();
                    mimic_config.seed = seed(mimic_config.seed);
                    let mut mimic = Mimic::new(problem, mimic_config)?;
                    drive(&mut trainer, &mut mimic)?
                }
            };

            tracing::debug!(
                algorithm = algorithm.name(),
                best = best.fitness,
                signal_sum,
                "suite algorithm finished"
            );
            outcomes.push(SuiteOutcome {
                algorithm,
                best,
                signal_sum,
            });
        }
        Ok(outcomes)
    }
}

fn require<T>(problem: &Option<T>, algorithm: Algorithm) -> Result<&T> {
    problem.as_ref().ok_or_else(|| {
        SearchError::InvalidConfig(format!("{algorithm} selected but no matching problem given"))
    })
}

fn drive<A: OptimizationAlgorithm>(
    trainer: &mut FixedIterationTrainer,
    algorithm: &mut A,
) -> Result<(Scored, f64)> {
    let signal_sum = trainer.train(algorithm)?;
    Ok((algorithm.current_best().clone(), signal_sum))
}
