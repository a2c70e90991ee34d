//! Cross-module scenarios: problem assembly, all four algorithms, trainers
//! and the suite, on the reference problems.

use u_randopt::dist::{DiscreteDependencyTree, DiscretePermutation, DiscreteUniform, Distribution};
use u_randopt::ga::{GaConfig, GeneticAlgorithm};
use u_randopt::mimic::{Elite, Mimic, MimicConfig};
use u_randopt::ops::{DiscreteChangeOneNeighbor, OrderCrossOver, SwapMutation, SwapNeighbor};
use u_randopt::problem::{
    EvaluationFunction, GenericGeneticAlgorithmProblem, GenericHillClimbingProblem,
    GenericProbabilisticOptimizationProblem,
};
use u_randopt::problems::{FlipFlop, Points, SortTourLength, TourCrossOver, TourLength};
use u_randopt::random::create_rng;
use u_randopt::rhc::{RandomizedHillClimbing, RhcConfig};
use u_randopt::sa::{SaConfig, SimulatedAnnealing};
use u_randopt::suite::{Algorithm, Suite, SuiteConfig, SuiteProblems};
use u_randopt::trainer::{
    FixedIterationTrainer, Progress, StopRuleTrainer, TrainOutput, Trainer,
};
use u_randopt::{Instance, OptimizationAlgorithm};

fn flip_flop_hc(
    n: usize,
) -> GenericHillClimbingProblem<FlipFlop, DiscreteUniform, DiscreteChangeOneNeighbor> {
    let ranges = vec![2; n];
    GenericHillClimbingProblem::new(
        FlipFlop,
        DiscreteUniform::new(ranges.clone()).unwrap(),
        DiscreteChangeOneNeighbor::new(ranges).unwrap(),
    )
}

fn flip_flop_mimic(
    n: usize,
) -> GenericProbabilisticOptimizationProblem<FlipFlop, DiscreteUniform, DiscreteDependencyTree> {
    let ranges = vec![2; n];
    GenericProbabilisticOptimizationProblem::new(
        FlipFlop,
        DiscreteUniform::new(ranges.clone()).unwrap(),
        DiscreteDependencyTree::new(0.1, ranges).unwrap(),
    )
}

/// Runs `steps` steps and fails if the best-seen fitness ever drops.
fn assert_best_monotone<A: OptimizationAlgorithm>(algorithm: &mut A, steps: usize) {
    let mut last = algorithm.current_best().fitness;
    let mut trainer = StopRuleTrainer::new(steps, |p: &Progress| {
        assert!(p.best >= last, "best fell from {last} to {}", p.best);
        last = p.best;
        false
    });
    trainer.train(algorithm).unwrap();
}

#[test]
fn rhc_flip_flop_beats_random_sampling() {
    let problem = flip_flop_hc(8);

    let dist = DiscreteUniform::new(vec![2; 8]).unwrap();
    let mut rng = create_rng(2024);
    let random_best = (0..100)
        .map(|_| FlipFlop.value(&dist.sample(&mut rng)).unwrap())
        .fold(f64::NEG_INFINITY, f64::max);

    let mut rhc =
        RandomizedHillClimbing::new(&problem, RhcConfig::default().with_seed(42)).unwrap();
    let best = FixedIterationTrainer::new(1000)
        .with_output(TrainOutput::FinalBest)
        .train(&mut rhc)
        .unwrap();

    assert!(best >= random_best, "rhc {best} < random {random_best}");
    assert_eq!(best, 8.0);
}

#[test]
fn ga_tsp_beats_random_tours() {
    let points = Points::random(10, &mut create_rng(11)).unwrap();
    let ef = TourLength::new(points.clone());
    let perms = DiscretePermutation::new(10).unwrap();

    let mut rng = create_rng(12);
    let random_best = (0..50)
        .map(|_| ef.tour_length(&perms.sample(&mut rng)).unwrap())
        .fold(f64::INFINITY, f64::min);

    let problem = GenericGeneticAlgorithmProblem::new(
        ef.clone(),
        perms,
        SwapMutation,
        TourCrossOver::new(points),
    );
    let mut ga = GeneticAlgorithm::new(problem, GaConfig::new(50, 25, 5).with_seed(42)).unwrap();
    FixedIterationTrainer::new(500).train(&mut ga).unwrap();

    let ga_best = ef.tour_length(&ga.current_best().instance).unwrap();
    assert!(ga_best <= random_best, "ga {ga_best} > random {random_best}");
}

#[test]
fn ga_tsp_with_order_crossover_beats_random_tours() {
    let points = Points::random(10, &mut create_rng(11)).unwrap();
    let ef = TourLength::new(points);
    let perms = DiscretePermutation::new(10).unwrap();

    let mut rng = create_rng(12);
    let random_best = (0..50)
        .map(|_| ef.tour_length(&perms.sample(&mut rng)).unwrap())
        .fold(f64::INFINITY, f64::min);

    let problem =
        GenericGeneticAlgorithmProblem::new(ef.clone(), perms, SwapMutation, OrderCrossOver);
    let mut ga = GeneticAlgorithm::new(problem, GaConfig::new(50, 25, 5).with_seed(42)).unwrap();
    FixedIterationTrainer::new(500).train(&mut ga).unwrap();

    let ga_best = ef.tour_length(&ga.current_best().instance).unwrap();
    assert!(ga_best <= random_best, "ga {ga_best} > random {random_best}");
}

#[test]
fn mimic_mean_fitness_rises() {
    let config = MimicConfig::new(50, Elite::Fraction(0.2)).with_seed(42);
    let mut mimic = Mimic::new(flip_flop_mimic(8), config).unwrap();
    let mut trainer = FixedIterationTrainer::new(10);
    trainer.train(&mut mimic).unwrap();

    let signals = trainer.signals();
    assert_eq!(signals.len(), 10);
    assert!(
        signals[9] > signals[0],
        "mean went from {} to {}",
        signals[0],
        signals[9]
    );
}

#[test]
fn best_fitness_never_decreases() {
    let mut rhc =
        RandomizedHillClimbing::new(flip_flop_hc(30), RhcConfig::default().with_seed(1)).unwrap();
    assert_best_monotone(&mut rhc, 500);

    let mut sa = SimulatedAnnealing::new(
        flip_flop_hc(30),
        SaConfig::default().with_initial_temperature(5.0).with_seed(2),
    )
    .unwrap();
    assert_best_monotone(&mut sa, 500);

    let points = Points::random(12, &mut create_rng(3)).unwrap();
    let problem = GenericGeneticAlgorithmProblem::new(
        TourLength::new(points),
        DiscretePermutation::new(12).unwrap(),
        SwapMutation,
        OrderCrossOver,
    );
    let mut ga = GeneticAlgorithm::new(problem, GaConfig::new(30, 20, 6).with_seed(4)).unwrap();
    assert_best_monotone(&mut ga, 200);

    let config = MimicConfig::new(40, Elite::Count(8)).with_seed(5);
    let mut mimic = Mimic::new(flip_flop_mimic(12), config).unwrap();
    assert_best_monotone(&mut mimic, 20);
}

#[test]
fn evaluation_is_idempotent() {
    let points = Points::random(8, &mut create_rng(6)).unwrap();
    let route = Instance::discrete(&[3, 1, 4, 0, 5, 7, 2, 6]);
    let keys = Instance::discrete(&[2, 2, 0, 7, 1, 5, 5, 3]);

    let tour = TourLength::new(points.clone());
    assert_eq!(tour.value(&route).unwrap(), tour.value(&route).unwrap());

    let sorted = SortTourLength::new(points);
    assert_eq!(sorted.value(&keys).unwrap(), sorted.value(&keys).unwrap());

    assert_eq!(FlipFlop.value(&keys).unwrap(), FlipFlop.value(&keys).unwrap());
}

/// Minimizes the sum of positions by maximizing its negation.
struct NegatedSum;

impl EvaluationFunction for NegatedSum {
    fn value(&self, instance: &Instance) -> u_randopt::Result<f64> {
        Ok(-instance.values().iter().sum::<f64>())
    }
}

#[test]
fn annealing_drives_negated_cost_downhill() {
    let ranges = vec![4; 10];
    let problem = GenericHillClimbingProblem::new(
        NegatedSum,
        DiscreteUniform::new(ranges.clone()).unwrap(),
        DiscreteChangeOneNeighbor::new(ranges).unwrap(),
    );
    let config = SaConfig::default()
        .with_initial_temperature(2.0)
        .with_cooling_rate(0.99)
        .with_seed(8);
    let mut sa = SimulatedAnnealing::new(&problem, config).unwrap();
    let start_cost = -sa.current().fitness;
    FixedIterationTrainer::new(3000).train(&mut sa).unwrap();

    let best_cost = -sa.current_best().fitness;
    assert!(best_cost < start_cost);
    assert!(best_cost <= 1.0, "cost stayed at {best_cost}");
}

#[test]
fn suite_runs_every_family_on_tsp() {
    let n = 8;
    let points = Points::random(n, &mut create_rng(21)).unwrap();
    let perms = DiscretePermutation::new(n).unwrap();
    let key_ranges = vec![n; n];

    let problems = SuiteProblems {
        hill_climbing: Some(GenericHillClimbingProblem::new(
            TourLength::new(points.clone()),
            perms.clone(),
            SwapNeighbor,
        )),
        genetic: Some(GenericGeneticAlgorithmProblem::new(
            TourLength::new(points.clone()),
            perms,
            SwapMutation,
            TourCrossOver::new(points.clone()),
        )),
        probabilistic: Some(GenericProbabilisticOptimizationProblem::new(
            SortTourLength::new(points),
            DiscreteUniform::new(key_ranges.clone()).unwrap(),
            DiscreteDependencyTree::new(0.1, key_ranges).unwrap(),
        )),
    };
    let config = SuiteConfig::default()
        .with_iterations(100)
        .with_seed(42)
        .with_sa(SaConfig::default().with_initial_temperature(1.0))
        .with_ga(GaConfig::new(40, 20, 4))
        .with_mimic(MimicConfig::new(60, Elite::Fraction(0.25)));

    let outcomes = Suite::run(&config, &problems).unwrap();
    assert_eq!(outcomes.len(), 4);
    for (outcome, expected) in outcomes.iter().zip(Algorithm::ALL) {
        assert_eq!(outcome.algorithm, expected);
        assert!(outcome.best.fitness > 0.0);
        assert_eq!(outcome.best.instance.len(), n);
    }
}

#[test]
fn algorithms_run_on_other_threads() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let config = RhcConfig::default().with_seed(seed);
                let mut rhc = RandomizedHillClimbing::new(flip_flop_hc(16), config).unwrap();
                FixedIterationTrainer::new(300)
                    .with_output(TrainOutput::FinalBest)
                    .train(&mut rhc)
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap() >= 1.0);
    }
}
