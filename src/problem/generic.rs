//! Problem bundles assembled from parts.

use super::{
    EvaluationFunction, GeneticAlgorithmProblem, HillClimbingProblem, OptimizationProblem,
    ProbabilisticOptimizationProblem,
};
use crate::dist::{Distribution, FittableDistribution};
use crate::error::Result;
use crate::instance::Instance;
use crate::ops::{CrossoverFunction, MutationFunction, NeighborFunction};
use rand::Rng;

/// Hill-climbing problem from an evaluation function, a starting
/// distribution, and a neighbor function.
///
/// # Examples
///
/// ```
/// use u_randopt::dist::DiscreteUniform;
/// use u_randopt::ops::DiscreteChangeOneNeighbor;
/// use u_randopt::problem::GenericHillClimbingProblem;
/// use u_randopt::problems::FlipFlop;
///
/// let ranges = vec![2; 16];
/// let problem = GenericHillClimbingProblem::new(
///     FlipFlop,
///     DiscreteUniform::new(ranges.clone()).unwrap(),
///     DiscreteChangeOneNeighbor::new(ranges).unwrap(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GenericHillClimbingProblem<E, D, N> {
    eval: E,
    dist: D,
    neighbor: N,
}

impl<E, D, N> GenericHillClimbingProblem<E, D, N> {
    /// Bundles the parts.
    pub fn new(eval: E, dist: D, neighbor: N) -> Self {
        Self {
            eval,
            dist,
            neighbor,
        }
    }

    /// The evaluation function.
    pub fn evaluation(&self) -> &E {
        &self.eval
    }
}

impl<E, D, N> OptimizationProblem for GenericHillClimbingProblem<E, D, N>
where
    E: EvaluationFunction,
    D: Distribution,
    N: NeighborFunction,
{
    fn value(&self, instance: &Instance) -> Result<f64> {
        self.eval.value(instance)
    }

    fn random<R: Rng>(&self, rng: &mut R) -> Instance {
        self.dist.sample(rng)
    }
}

impl<E, D, N> HillClimbingProblem for GenericHillClimbingProblem<E, D, N>
where
    E: EvaluationFunction,
    D: Distribution,
    N: NeighborFunction,
{
    fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        self.neighbor.neighbor(instance, rng)
    }
}

/// Genetic-algorithm problem from an evaluation function, a starting
/// distribution, a mutation function, and a crossover function.
#[derive(Debug, Clone)]
pub struct GenericGeneticAlgorithmProblem<E, D, M, C> {
    eval: E,
    dist: D,
    mutation: M,
    crossover: C,
}

impl<E, D, M, C> GenericGeneticAlgorithmProblem<E, D, M, C> {
    /// Bundles the parts.
    pub fn new(eval: E, dist: D, mutation: M, crossover: C) -> Self {
        Self {
            eval,
            dist,
            mutation,
            crossover,
        }
    }

    /// The evaluation function.
    pub fn evaluation(&self) -> &E {
        &self.eval
    }
}

impl<E, D, M, C> OptimizationProblem for GenericGeneticAlgorithmProblem<E, D, M, C>
where
    E: EvaluationFunction,
    D: Distribution,
    M: MutationFunction,
    C: CrossoverFunction,
{
    fn value(&self, instance: &Instance) -> Result<f64> {
        self.eval.value(instance)
    }

    fn random<R: Rng>(&self, rng: &mut R) -> Instance {
        self.dist.sample(rng)
    }
}

impl<E, D, M, C> GeneticAlgorithmProblem for GenericGeneticAlgorithmProblem<E, D, M, C>
where
    E: EvaluationFunction,
    D: Distribution,
    M: MutationFunction,
    C: CrossoverFunction,
{
    fn mutate<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
        self.mutation.mutate(instance, rng)
    }

    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        self.crossover.mate(a, b, rng)
    }
}

/// MIMIC problem from an evaluation function, an initial distribution,
/// and a fittable model.
#[derive(Debug, Clone)]
pub struct GenericProbabilisticOptimizationProblem<E, D, F> {
    eval: E,
    dist: D,
    model: F,
}

impl<E, D, F> GenericProbabilisticOptimizationProblem<E, D, F> {
    /// Bundles the parts. `model` is cloned before every estimation, so
    /// pass it unfitted.
    pub fn new(eval: E, dist: D, model: F) -> Self {
        Self { eval, dist, model }
    }

    /// The evaluation function.
    pub fn evaluation(&self) -> &E {
        &self.eval
    }
}

impl<E, D, F> OptimizationProblem for GenericProbabilisticOptimizationProblem<E, D, F>
where
    E: EvaluationFunction,
    D: Distribution,
    F: FittableDistribution + Clone,
{
    fn value(&self, instance: &Instance) -> Result<f64> {
        self.eval.value(instance)
    }

    fn random<R: Rng>(&self, rng: &mut R) -> Instance {
        self.dist.sample(rng)
    }
}

impl<E, D, F> ProbabilisticOptimizationProblem
    for GenericProbabilisticOptimizationProblem<E, D, F>
where
    E: EvaluationFunction,
    D: Distribution,
    F: FittableDistribution + Clone,
{
    type Model = F;

    fn model(&self) -> F {
        self.model.clone()
    }
}
