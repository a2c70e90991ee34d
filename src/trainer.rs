//! Drivers that run an [`OptimizationAlgorithm`] for a budget.
//!
//! - [`FixedIterationTrainer`]: a fixed number of steps
//! - [`StopRuleTrainer`]: steps until a caller-supplied rule fires
//!
//! Both accept an optional cancellation flag checked before every step.
//! An evaluation failure aborts training and is returned to the caller.

use crate::algorithm::OptimizationAlgorithm;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs an algorithm and reports a single number.
pub trait Trainer {
    /// Drives `algorithm` until this trainer's budget is spent.
    fn train<A: OptimizationAlgorithm + ?Sized>(&mut self, algorithm: &mut A) -> Result<f64>;
}

/// What [`FixedIterationTrainer::train`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainOutput {
    /// Sum of the per-step signals.
    #[default]
    CumulativeSum,
    /// Best fitness seen when training ends.
    FinalBest,
}

fn is_cancelled(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Runs a fixed number of steps.
///
/// # Examples
///
/// ```
/// use u_randopt::dist::DiscreteUniform;
/// use u_randopt::ops::DiscreteChangeOneNeighbor;
/// use u_randopt::problem::GenericHillClimbingProblem;
/// use u_randopt::problems::CountOnes;
/// use u_randopt::rhc::{RandomizedHillClimbing, RhcConfig};
/// use u_randopt::trainer::{FixedIterationTrainer, TrainOutput, Trainer};
///
/// let ranges = vec![2; 16];
/// let problem = GenericHillClimbingProblem::new(
///     CountOnes,
///     DiscreteUniform::new(ranges.clone()).unwrap(),
///     DiscreteChangeOneNeighbor::new(ranges).unwrap(),
/// );
/// let config = RhcConfig::default().with_restart_patience(0).with_seed(1);
/// let mut rhc = RandomizedHillClimbing::new(problem, config).unwrap();
///
/// let mut trainer = FixedIterationTrainer::new(2000).with_output(TrainOutput::FinalBest);
/// let best = trainer.train(&mut rhc).unwrap();
/// assert_eq!(best, 16.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedIterationTrainer {
    iterations: usize,
    output: TrainOutput,
    cancel: Option<Arc<AtomicBool>>,
    signals: Vec<f64>,
    cancelled: bool,
}

impl FixedIterationTrainer {
    /// Creates a trainer running `iterations` steps and returning the
    /// cumulative signal.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Sets what [`train`](Trainer::train) returns.
    pub fn with_output(mut self, output: TrainOutput) -> Self {
        self.output = output;
        self
    }

    /// Stops early once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Step budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Per-step signals of the last run.
    pub fn signals(&self) -> &[f64] {
        &self.signals
    }

    /// Whether the last run was cut short by the cancellation flag.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Trainer for FixedIterationTrainer {
    fn train<A: OptimizationAlgorithm + ?Sized>(&mut self, algorithm: &mut A) -> Result<f64> {
        tracing::debug!(
            iterations = self.iterations,
            output = ?self.output,
            "fixed-iteration training started"
        );
        self.signals.clear();
        self.cancelled = false;

        for _ in 0..self.iterations {
            if is_cancelled(&self.cancel) {
                self.cancelled = true;
                break;
            }
            let signal = algorithm.step()?;
            self.signals.push(signal);
        }

        let result = match self.output {
            TrainOutput::CumulativeSum => self.signals.iter().sum(),
            TrainOutput::FinalBest => algorithm.current_best().fitness,
        };
        tracing::debug!(
            steps = self.signals.len(),
            cancelled = self.cancelled,
            best = algorithm.current_best().fitness,
            result,
            "fixed-iteration training finished"
        );
        Ok(result)
    }
}

/// Snapshot handed to a stopping rule after every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Steps completed so far (1 after the first step).
    pub iteration: usize,
    /// Signal returned by the step just taken.
    pub signal: f64,
    /// Best fitness seen so far.
    pub best: f64,
}

/// Runs until `rule` returns `true` or `max_iterations` steps have run.
///
/// [`train`](Trainer::train) returns the best fitness at the end.
///
/// ```
/// use u_randopt::dist::DiscreteUniform;
/// use u_randopt::ops::DiscreteChangeOneNeighbor;
/// use u_randopt::problem::GenericHillClimbingProblem;
/// use u_randopt::problems::CountOnes;
/// use u_randopt::rhc::{RandomizedHillClimbing, RhcConfig};
/// use u_randopt::trainer::{Progress, StopRuleTrainer, Trainer};
///
/// let ranges = vec![2; 8];
/// let problem = GenericHillClimbingProblem::new(
///     CountOnes,
///     DiscreteUniform::new(ranges.clone()).unwrap(),
///     DiscreteChangeOneNeighbor::new(ranges).unwrap(),
/// );
/// let config = RhcConfig::default().with_restart_patience(0).with_seed(3);
/// let mut rhc = RandomizedHillClimbing::new(problem, config).unwrap();
///
/// let mut trainer = StopRuleTrainer::new(10_000, |p: &Progress| p.best >= 8.0);
/// assert_eq!(trainer.train(&mut rhc).unwrap(), 8.0);
/// assert!(trainer.iterations_run() < 10_000);
/// ```
pub struct StopRuleTrainer<F> {
    max_iterations: usize,
    rule: F,
    cancel: Option<Arc<AtomicBool>>,
    iterations_run: usize,
}

impl<F: FnMut(&Progress) -> bool> StopRuleTrainer<F> {
    /// Creates a trainer with a step cap and a stopping rule.
    pub fn new(max_iterations: usize, rule: F) -> Self {
        Self {
            max_iterations,
            rule,
            cancel: None,
            iterations_run: 0,
        }
    }

    /// Stops early once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Steps taken by the last run.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }
}

impl<F> std::fmt::Debug for StopRuleTrainer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopRuleTrainer")
            .field("max_iterations", &self.max_iterations)
            .field("iterations_run", &self.iterations_run)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut(&Progress) -> bool> Trainer for StopRuleTrainer<F> {
    fn train<A: OptimizationAlgorithm + ?Sized>(&mut self, algorithm: &mut A) -> Result<f64> {
        tracing::debug!(
            max_iterations = self.max_iterations,
            "stop-rule training started"
        );
        self.iterations_run = 0;

        while self.iterations_run < self.max_iterations {
            if is_cancelled(&self.cancel) {
                break;
            }
            let signal = algorithm.step()?;
            self.iterations_run += 1;
            let progress = Progress {
                iteration: self.iterations_run,
                signal,
                best: algorithm.current_best().fitness,
            };
            if (self.rule)(&progress) {
                break;
            }
        }

        let best = algorithm.current_best().fitness;
        tracing::debug!(
            steps = self.iterations_run,
            best,
            "stop-rule training finished"
        );
        Ok(best)
    }
}
