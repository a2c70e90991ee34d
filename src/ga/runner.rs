//! GA generation loop.
//!
//! [`GeneticAlgorithm`] advances one generation per step:
//! selection → crossover → mutation → evaluation → survivor truncation.

use super::config::GaConfig;
use crate::algorithm::OptimizationAlgorithm;
use crate::error::Result;
use crate::instance::{Instance, Scored};
use crate::problem::{
    best_index, evaluate_all, mean_fitness, sort_descending, GeneticAlgorithmProblem,
};
use crate::random::{rng_from_seed, SearchRng};
use rand::Rng;

/// Genetic algorithm over a [`GeneticAlgorithmProblem`].
///
/// # Usage
///
/// ```
/// use u_randopt::dist::DiscretePermutation;
/// use u_randopt::ga::{GaConfig, GeneticAlgorithm};
/// use u_randopt::ops::{OrderCrossOver, SwapMutation};
/// use u_randopt::problem::GenericGeneticAlgorithmProblem;
/// use u_randopt::problems::{Points, TourLength};
/// use u_randopt::random::create_rng;
/// use u_randopt::OptimizationAlgorithm;
///
/// let points = Points::random(12, &mut create_rng(1)).unwrap();
/// let problem = GenericGeneticAlgorithmProblem::new(
///     TourLength::new(points),
///     DiscretePermutation::new(12).unwrap(),
///     SwapMutation,
///     OrderCrossOver,
/// );
/// let config = GaConfig::new(40, 20, 4).with_seed(42);
/// let mut ga = GeneticAlgorithm::new(problem, config).unwrap();
/// for _ in 0..50 {
///     ga.step().unwrap();
/// }
/// println!("best fitness: {}", ga.current_best().fitness);
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm<P> {
    problem: P,
    config: GaConfig,
    rng: SearchRng,
    population: Vec<Scored>,
    best: Scored,
    iterations: usize,
}

impl<P: GeneticAlgorithmProblem> GeneticAlgorithm<P> {
    /// Creates the algorithm and evaluates a random initial population.
    pub fn new(problem: P, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);

        let initial: Vec<Instance> = (0..config.population_size)
            .map(|_| problem.random(&mut rng))
            .collect();
        let population = evaluate_all(&problem, initial, config.parallel)?;
        let best = population[best_index(&population).unwrap_or(0)].clone();

        tracing::debug!(
            population = config.population_size,
            offspring = config.offspring_per_step,
            mutations = config.mutations_per_step,
            best = best.fitness,
            "genetic algorithm initialised"
        );

        Ok(Self {
            problem,
            config,
            rng,
            population,
            best,
            iterations: 0,
        })
    }

    /// The current population, in no particular order.
    pub fn population(&self) -> &[Scored] {
        &self.population
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }
}

impl<P: GeneticAlgorithmProblem> OptimizationAlgorithm for GeneticAlgorithm<P> {
    fn step(&mut self) -> Result<f64> {
        let offspring_count = self.config.offspring_per_step;

        // Selection + crossover
        let mut offspring: Vec<Instance> = Vec::with_capacity(offspring_count);
        for _ in 0..offspring_count {
            let a = self.config.selection.select(&self.population, &mut self.rng);
            let b = self.config.selection.select(&self.population, &mut self.rng);
            let child = self.problem.mate(
                &self.population[a].instance,
                &self.population[b].instance,
                &mut self.rng,
            );
            offspring.push(child);
        }

        // Mutation
        for _ in 0..self.config.mutations_per_step {
            let j = self.rng.random_range(0..offspring.len());
            offspring[j] = self.problem.mutate(&offspring[j], &mut self.rng);
        }

        let offspring = evaluate_all(&self.problem, offspring, self.config.parallel)?;

        // Survivors: the best of the old population
        sort_descending(&mut self.population);
        self.population.truncate(self.config.survivors());
        self.population.extend(offspring);

        if let Some(i) = best_index(&self.population) {
            if self.population[i].fitness > self.best.fitness {
                self.best = self.population[i].clone();
            }
        }

        let mean = mean_fitness(&self.population);
        tracing::trace!(
            generation = self.iterations,
            mean,
            best = self.best.fitness,
            "generation complete"
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

// ============================================================================
// Tests
// ============================================================================
