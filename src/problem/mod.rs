//! Problem contracts consumed by the search algorithms.
//!
//! Each algorithm family depends only on the capability set it needs:
//!
//! | Trait | Used by | Adds |
//! |-------|---------|------|
//! | [`HillClimbingProblem`] | RHC, SA | `neighbor` |
//! | [`GeneticAlgorithmProblem`] | GA | `mutate`, `mate` |
//! | [`ProbabilisticOptimizationProblem`] | MIMIC | fittable `model` |
//!
//! All three extend [`OptimizationProblem`], which evaluates instances
//! and samples fresh ones. The `Generic*` bundles in this module assemble
//! a problem from an [`EvaluationFunction`], a
//! [`Distribution`](crate::dist::Distribution), and operators.
//!
//! # Maximization
//!
//! Every algorithm maximizes. For a cost, return its negation or its
//! reciprocal from the evaluation function.

mod generic;

pub use generic::{
    GenericGeneticAlgorithmProblem, GenericHillClimbingProblem,
    GenericProbabilisticOptimizationProblem,
};

use crate::dist::FittableDistribution;
use crate::error::{Result, SearchError};
use crate::instance::{Instance, Scored};
use rand::Rng;

/// Maps an instance to a scalar fitness. Higher is better.
///
/// Implementations must be pure: evaluating the same instance twice yields
/// the same value. Callers backed by a trainable model (e.g. a network
/// whose weights are the instance) must load the weights and evaluate
/// within one call.
pub trait EvaluationFunction: Send + Sync {
    /// Returns the fitness of `instance`.
    fn value(&self, instance: &Instance) -> Result<f64>;
}

impl<E: EvaluationFunction + ?Sized> EvaluationFunction for &E {
    fn value(&self, instance: &Instance) -> Result<f64> {
        (**self).value(instance)
    }
}

/// Evaluation plus sampling of fresh candidates.
pub trait OptimizationProblem: Send + Sync {
    /// Returns the fitness of `instance`.
    fn value(&self, instance: &Instance) -> Result<f64>;

    /// Draws a fresh random candidate.
    fn random<R: Rng>(&self, rng: &mut R) -> Instance;
}

/// Problem shape for randomized hill climbing and simulated annealing.
pub trait HillClimbingProblem: OptimizationProblem {
    /// Returns a neighbor of `instance`.
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance;
}

/// Problem shape for the genetic algorithm.
pub trait GeneticAlgorithmProblem: OptimizationProblem {
    /// Returns a mutated copy of `instance`.
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance;

    /// Returns a child of two parents.
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance;
}

/// Problem shape for MIMIC.
///
/// [`random`](OptimizationProblem::random) is the initial distribution;
/// [`model`](Self::model) returns an unfitted model that MIMIC estimates
/// from each elite set.
pub trait ProbabilisticOptimizationProblem: OptimizationProblem {
    /// The fittable model type.
    type Model: FittableDistribution + Clone;

    /// Returns a fresh copy of the model to be estimated.
    fn model(&self) -> Self::Model;
}

impl<P: OptimizationProblem + ?Sized> OptimizationProblem for &P {
    fn value(&self, instance: &Instance) -> Result<f64> {
        (**self).value(instance)
    }

    fn random<R: Rng>(&self, rng: &mut R) -> Instance {
        (**self).random(rng)
    }
}

impl<P: HillClimbingProblem + ?Sized> HillClimbingProblem for &P {
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        (**self).neighbor(instance, rng)
    }
}

impl<P: GeneticAlgorithmProblem + ?Sized> GeneticAlgorithmProblem for &P {
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        (**self).mutate(instance, rng)
    }

    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        (**self).mate(a, b, rng)
    }
}

impl<P: ProbabilisticOptimizationProblem + ?Sized> ProbabilisticOptimizationProblem for &P {
    type Model = P::Model;

    fn model(&self) -> Self::Model {
        (**self).model()
    }
}

/// Evaluates `instance`, rejecting NaN fitness.
pub(crate) fn evaluate<P: OptimizationProblem + ?Sized>(
    problem: &P,
    instance: Instance,
) -> Result<Scored> {
    let fitness = problem.value(&instance)?;
    if fitness.is_nan() {
        return Err(SearchError::InvalidFitness {
            len: instance.len(),
        });
    }
    Ok(Scored::new(instance, fitness))
}

/// Evaluates a batch of instances, in parallel when requested and the
/// `parallel` feature is enabled. The first failure aborts the batch.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_all<P: OptimizationProblem>(
    problem: &P,
    instances: Vec<Instance>,
    parallel: bool,
) -> Result<Vec<Scored>> {
    use rayon::prelude::*;

    if parallel {
        instances
            .into_par_iter()
            .map(|instance| evaluate(problem, instance))
            .collect()
    } else {
        instances
            .into_iter()
            .map(|instance| evaluate(problem, instance))
            .collect()
    }
}

/// Evaluates a batch of instances. The first failure aborts the batch.
#[cfg(not(feature = "parallel"))]
pub(crate) fn evaluate_all<P: OptimizationProblem>(
    problem: &P,
    instances: Vec<Instance>,
    _parallel: bool,
) -> Result<Vec<Scored>> {
    instances
        .into_iter()
        .map(|instance| evaluate(problem, instance))
        .collect()
}

/// Index of the highest-fitness member. Ties keep the earliest.
pub(crate) fn best_index(population: &[Scored]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, member) in population.iter().enumerate() {
        match best {
            Some(b) if population[b].fitness >= member.fitness => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Sorts a population best-first.
pub(crate) fn sort_descending(population: &mut [Scored]) {
    population.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Arithmetic mean fitness; 0 for an empty population.
pub(crate) fn mean_fitness(population: &[Scored]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(|s| s.fitness).sum::<f64>() / population.len() as f64
}
