//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::instance::Scored;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better) and
/// sample with replacement.
///
/// # Examples
///
/// ```
/// use u_randopt::ga::Selection;
///
/// // Every member equally likely (the default)
/// let sel = Selection::Uniform;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Uniformly random member. No selection pressure; elitism and
    /// survivor truncation provide it instead.
    #[default]
    Uniform,

    /// Tournament selection: pick `k` individuals at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Fitness is shifted by the population minimum so negative values
    /// are handled.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection with linear weights (best rank gets `n`,
    /// worst gets 1).
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Scored], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Uniform => rng.random_range(0..population.len()),
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<R: Rng>(population: &[Scored], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection on min-shifted fitness.
///
/// weight_i = fitness_i - min_fitness + epsilon
fn roulette<R: Rng>(population: &[Scored], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let min_fitness = population
        .iter()
        .map(|s| s.fitness)
        .fold(f64::INFINITY, f64::min);

    let epsilon = 1e-10;
    let weights: Vec<f64> = population
        .iter()
        .map(|s| {
            let w = s.fitness - min_fitness + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking.
fn rank<R: Rng>(population: &[Scored], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Sort by fitness descending (best first)
    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.fitness))
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // weight_i = n - rank_i
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0 // fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Scored> {
        fitnesses
            .iter()
            .map(|&f| Scored::new(Instance::default(), f))
            .collect()
    }

    fn counts(selection: Selection, pop: &[Scored], seed: u64) -> [u32; 4] {
        let mut rng = create_rng(seed);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[selection.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_uniform_is_flat() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        for c in counts(Selection::Uniform, &pop, 42) {
            assert!(c > 2000, "expected uniform selection");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(4), &pop, 42);
        assert!(c[0] > 6000, "expected best to dominate, got {c:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        for c in counts(Selection::Tournament(1), &pop, 42) {
            assert!(c > 1500);
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Roulette, &pop, 42);
        assert!(c[0] > c[1] && c[1] > c[2], "got {c:?}");
    }

    #[test]
    fn test_roulette_negative_fitness() {
        let pop = make_population(&[-1.0, -50.0, -100.0, -20.0]);
        let c = counts(Selection::Roulette, &pop, 7);
        assert!(c[0] > c[2], "got {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Rank, &pop, 42);
        assert!(c[0] > c[2], "got {c:?}");
    }

    #[test]
    fn test_equal_fitness() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        for c in counts(Selection::Tournament(2), &pop, 42) {
            assert!(c > 1500, "expected roughly uniform with equal fitness");
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        for sel in [
            Selection::Uniform,
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Rank,
        ] {
            assert_eq!(sel.select(&pop, &mut rng), 0);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&[], &mut rng);
    }
}
