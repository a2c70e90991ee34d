//! RHC state machine.

use super::config::RhcConfig;
use crate::algorithm::OptimizationAlgorithm;
use crate::error::Result;
use crate::instance::Scored;
use crate::problem::{evaluate, HillClimbingProblem};
use crate::random::{rng_from_seed, SearchRng};

/// Randomized hill climbing over a [`HillClimbingProblem`].
///
/// # Usage
///
/// ```
/// use u_randopt::dist::DiscreteUniform;
/// use u_randopt::ops::DiscreteChangeOneNeighbor;
/// use u_randopt::problem::GenericHillClimbingProblem;
/// use u_randopt::problems::FlipFlop;
/// use u_randopt::rhc::{RandomizedHillClimbing, RhcConfig};
/// use u_randopt::OptimizationAlgorithm;
///
/// let ranges = vec![2; 10];
/// let problem = GenericHillClimbingProblem::new(
///     FlipFlop,
///     DiscreteUniform::new(ranges.clone()).unwrap(),
///     DiscreteChangeOneNeighbor::new(ranges).unwrap(),
/// );
/// let mut rhc = RandomizedHillClimbing::new(problem, RhcConfig::default().with_seed(42)).unwrap();
/// for _ in 0..500 {
///     rhc.step().unwrap();
/// }
/// assert!(rhc.current_best().fitness >= 1.0);
/// ```
#[derive(Debug)]
pub struct RandomizedHillClimbing<P> {
    problem: P,
    config: RhcConfig,
    rng: SearchRng,
    current: Scored,
    best: Scored,
    rejected: usize,
    restarts: usize,
    iterations: usize,
}

impl<P: HillClimbingProblem> RandomizedHillClimbing<P> {
    /// Creates the climber and evaluates a random starting point.
    pub fn new(problem: P, config: RhcConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);
        let start = problem.random(&mut rng);
        let current = evaluate(&problem, start)?;
        tracing::debug!(
            fitness = current.fitness,
            restart_patience = config.restart_patience,
            "randomized hill climbing initialised"
        );
        Ok(Self {
            problem,
            config,
            rng,
            best: current.clone(),
            current,
            rejected: 0,
            restarts: 0,
            iterations: 0,
        })
    }

    /// The current candidate.
    pub fn current(&self) -> &Scored {
        &self.current
    }

    /// Number of random restarts so far.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }
}

impl<P: HillClimbingProblem> OptimizationAlgorithm for RandomizedHillClimbing<P> {
    fn step(&mut self) -> Result<f64> {
        let probe = self.problem.neighbor(&self.current.instance, &mut self.rng);
        let probe = evaluate(&self.problem, probe)?;

        if probe.fitness >= self.current.fitness {
            self.current = probe;
            self.rejected = 0;
        } else {
            self.rejected += 1;
            if self.config.restart_patience > 0 && self.rejected >= self.config.restart_patience {
                let fresh = self.problem.random(&mut self.rng);
                self.current = evaluate(&self.problem, fresh)?;
                self.rejected = 0;
                self.restarts += 1;
                tracing::trace!(
                    iteration = self.iterations,
                    fitness = self.current.fitness,
                    "hill climbing restart"
                );
            }
        }

        if self.current.fitness > self.best.fitness {
            self.best = self.current.clone();
        }
        self.iterations += 1;
        Ok(self.current.fitness)
    }

    fn current_best(&self) -> &Scored {
        &self.best
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}
