//! MIMIC sampling and re-fitting loop.

use super::config::MimicConfig;
use crate::algorithm::OptimizationAlgorithm;
use crate::dist::{Distribution, FittableDistribution};
use crate::error::Result;
use crate::instance::{Instance, Scored};
use crate::problem::{
    evaluate, evaluate_all, mean_fitness, sort_descending, ProbabilisticOptimizationProblem,
};
use crate::random::{rng_from_seed, SearchRng};

/// MIMIC over a [`ProbabilisticOptimizationProblem`].
///
/// The first step samples from the problem's initial distribution
/// ([`random`](crate::problem::OptimizationProblem::random)); every later
/// step samples from the model fitted on the previous elite set.
///
/// # Usage
///
/// ```
/// use u_randopt::dist::{DiscreteDependencyTree, DiscreteUniform};
/// use u_randopt::mimic::{Elite, Mimic, MimicConfig};
/// use u_randopt::problem::GenericProbabilisticOptimizationProblem;
/// use u_randopt::problems::FlipFlop;
/// use u_randopt::OptimizationAlgorithm;
///
/// let ranges = vec![2; 12];
/// let problem = GenericProbabilisticOptimizationProblem::new(
///     FlipFlop,
///     DiscreteUniform::new(ranges.clone()).unwrap(),
///     DiscreteDependencyTree::new(0.1, ranges).unwrap(),
/// );
/// let config = MimicConfig::new(60, Elite::Fraction(0.2)).with_seed(42);
/// let mut mimic = Mimic::new(problem, config).unwrap();
/// for _ in 0..20 {
///     mimic.step().unwrap();
/// }
/// assert!(mimic.current_best().fitness >= 8.0);
/// ```
#[derive(Debug)]
pub struct Mimic<P: ProbabilisticOptimizationProblem> {
    problem: P,
    config: MimicConfig,
    rng: SearchRng,
    model: Option<P::Model>,
    elite: usize,
    best: Scored,
    iterations: usize,
}

impl<P: ProbabilisticOptimizationProblem> Mimic<P> {
    /// Creates the algorithm. The best-seen candidate starts as one
    /// evaluated sample from the initial distribution.
    pub fn new(problem: P, config: MimicConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);
        let start = problem.random(&mut rng);
        let best = evaluate(&problem, start)?;
        let elite = config.elite_count();

        tracing::debug!(
            population = config.population_size,
            elite,
            fitness = best.fitness,
            "mimic initialised"
        );

        Ok(Self {
            problem,
            config,
            rng,
            model: None,
            elite,
            best,
            iterations: 0,
        })
    }

    /// The model fitted on the last elite set, if any step has run.
    pub fn model(&self) -> Option<&P::Model> {
        self.model.as_ref()
    }

    /// Resolved elite set size.
    pub fn elite_count(&self) -> usize {
        self.elite
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    fn sample_population(&mut self) -> Vec<Instance> {
        let n = self.config.population_size;
        match &self.model {
            Some(model) => (0..n).map(|_| model.sample(&mut self.rng)).collect(),
            None => (0..n).map(|_| self.problem.random(&mut self.rng)).collect(),
        }
    }
}

impl<P: ProbabilisticOptimizationProblem> OptimizationAlgorithm for Mimic<P> {
    fn step(&mut self) -> Result<f64> {
        let samples = self.sample_population();
        let mut population = evaluate_all(&self.problem, samples, self.config.parallel)?;
        let mean = mean_fitness(&population);

        sort_descending(&mut population);
        if population[0].fitness > self.best.fitness {
            self.best = population[0].clone();
        }

        population.truncate(self.elite);
        let elite: Vec<Instance> = population.into_iter().map(|s| s.instance).collect();
        let weights = vec![1.0; elite.len()];

        let mut model = self.problem.model();
        model.estimate(&elite, &weights)?;
        self.model = Some(model);

        tracing::trace!(
            iteration = self.iterations,
            mean,
            best = self.best.fitness,
            "mimic step"
        );

        self.iterations += 1;
        Ok(mean)
    }

    fn current_best(&self) -> &Scored {
        &self.best
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}
