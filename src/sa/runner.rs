//! SA state machine.

use super::config::SaConfig;
use crate::algorithm::OptimizationAlgorithm;
use crate::error::Result;
use crate::instance::Scored;
use crate::problem::{evaluate, HillClimbingProblem};
use crate::random::{rng_from_seed, SearchRng};
use rand::Rng;

/// Metropolis acceptance probability for a move with fitness change
/// `delta` at temperature `temperature` (maximization).
///
/// - `delta > 0`: 1 (improvements are always accepted)
/// - `temperature <= 0`: 0 (a frozen system never accepts a worse move)
/// - otherwise `exp(delta / temperature)`
///
/// ```
/// use u_randopt::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(1.0, 10.0), 1.0);
/// assert!(acceptance_probability(-1.0, 10.0) > acceptance_probability(-1.0, 1.0));
/// assert_eq!(acceptance_probability(-1.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

/// Simulated annealing over a [`HillClimbingProblem`].
#[derive(Debug)]
pub struct SimulatedAnnealing<P> {
    problem: P,
    config: SaConfig,
    rng: SearchRng,
    current: Scored,
    best: Scored,
    temperature: f64,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<P: HillClimbingProblem> SimulatedAnnealing<P> {
    /// Creates the annealer and evaluates a random starting point.
    pub fn new(problem: P, config: SaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);
        let start = problem.random(&mut rng);
        let current = evaluate(&problem, start)?;
        tracing::debug!(
            fitness = current.fitness,
            temperature = config.initial_temperature,
            cooling = ?config.cooling,
            "simulated annealing initialised"
        );
        Ok(Self {
            problem,
            temperature: config.initial_temperature,
            config,
            rng,
            best: current.clone(),
            current,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    /// The current candidate.
    pub fn current(&self) -> &Scored {
        &self.current
    }

    /// The temperature the next step will use.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of accepted moves (including improvements).
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Number of strictly improving moves.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// The problem being solved.
    pub fn problem(&self) -> &P {
        &self.problem
    }
}

impl<P: HillClimbingProblem> OptimizationAlgorithm for SimulatedAnnealing<P> {
    fn step(&mut self) -> Result<f64> {
        let neighbor = self.problem.neighbor(&self.current.instance, &mut self.rng);
        let neighbor = evaluate(&self.problem, neighbor)?;
        let delta = neighbor.fitness - self.current.fitness;

        // Metropolis acceptance criterion
        let accept = if delta > 0.0 {
            self.improving_moves += 1;
            true
        } else {
            let probability = acceptance_probability(delta, self.temperature);
            probability > 0.0 && self.rng.random_range(0.0..1.0) < probability
        };

        if accept {
            self.current = neighbor;
            self.accepted_moves += 1;
            if self.current.fitness > self.best.fitness {
                self.best = self.current.clone();
            }
        }

        tracing::trace!(
            iteration = self.iterations,
            delta,
            accept,
            temperature = self.temperature,
            "annealing step"
        );

        self.temperature = self
            .config
            .cooling
            .cool(self.temperature)
            .max(self.config.min_temperature);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::DiscreteUniform;
    use crate::error::SearchError;
    use crate::instance::Instance;
    use crate::ops::DiscreteChangeOneNeighbor;
    use crate::problem::{GenericHillClimbingProblem, OptimizationProblem};
    use crate::problems::FlipFlop;
    use crate::sa::CoolingSchedule;

    // ---- Quadratic: maximize -(x - 3)^2, optimum at 3 ----

    struct NegQuadratic;

    impl OptimizationProblem for NegQuadratic {
        fn value(&self, instance: &Instance) -> Result<f64> {
            let x = instance.get(0);
            Ok(-(x - 3.0) * (x - 3.0))
        }

        fn random<R: Rng>(&self, rng: &mut R) -> Instance {
            Instance::new(vec![rng.random_range(-10.0..10.0)])
        }
    }

    impl HillClimbingProblem for NegQuadratic {
        fn neighbor<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Instance {
            Instance::new(vec![instance.get(0) + rng.random_range(-1.0..1.0)])
        }
    }

    fn flip_flop(
        n: usize,
    ) -> GenericHillClimbingProblem<FlipFlop, DiscreteUniform, DiscreteChangeOneNeighbor> {
        let ranges = vec![2; n];
        GenericHillClimbingProblem::new(
            FlipFlop,
            DiscreteUniform::new(ranges.clone()).unwrap(),
            DiscreteChangeOneNeighbor::new(ranges).unwrap(),
        )
    }

    #[test]
    fn test_acceptance_improvement_always() {
        assert_eq!(acceptance_probability(0.5, 1e-300), 1.0);
        assert_eq!(acceptance_probability(0.5, 0.0), 1.0);
    }

    #[test]
    fn test_acceptance_decreases_with_temperature() {
        let delta = -2.0;
        let temps = [1000.0, 100.0, 10.0, 5.0, 1.0, 0.5, 0.1];
        for pair in temps.windows(2) {
            let hot = acceptance_probability(delta, pair[0]);
            let cold = acceptance_probability(delta, pair[1]);
            assert!(cold < hot, "p({}) = {cold} not < p({}) = {hot}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_acceptance_zero_temperature_rejects_worse() {
        assert_eq!(acceptance_probability(-1e-9, 0.0), 0.0);
        assert_eq!(acceptance_probability(-1.0, -5.0), 0.0);
    }

    #[test]
    fn test_acceptance_sign_convention() {
        // A worsening move under maximization is a negative delta; its
        // probability must be below one, never above.
        let p = acceptance_probability(-1.0, 1.0);
        assert!((p - (-1.0f64).exp()).abs() < 1e-12);
        assert!(p < 1.0);
    }

    #[test]
    fn test_sa_maximizes_quadratic() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.99)
            .with_seed(42);
        let mut sa = SimulatedAnnealing::new(NegQuadratic, config).unwrap();
        for _ in 0..3000 {
            sa.step().unwrap();
        }
        let x = sa.current_best().instance.get(0);
        assert!((x - 3.0).abs() < 0.5, "expected x near 3, got {x}");
        assert!(sa.improving_moves() > 0);
        assert!(sa.accepted_moves() > sa.improving_moves());
    }

    #[test]
    fn test_frozen_annealer_never_moves_downhill() {
        // With a tiny temperature the current candidate only climbs.
        let config = SaConfig::default()
            .with_initial_temperature(1e-12)
            .with_seed(5);
        let mut sa = SimulatedAnnealing::new(NegQuadratic, config).unwrap();
        let mut last = sa.current().fitness;
        for _ in 0..500 {
            let now = sa.step().unwrap();
            assert!(now >= last, "moved downhill: {now} < {last}");
            last = now;
        }
    }

    #[test]
    fn test_hot_annealer_accepts_most_moves() {
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_cooling_rate(1.0)
            .with_seed(42);
        let mut sa = SimulatedAnnealing::new(NegQuadratic, config).unwrap();
        for _ in 0..1000 {
            sa.step().unwrap();
        }
        let ratio = sa.accepted_moves() as f64 / sa.iterations() as f64;
        assert!(ratio > 0.9, "expected high acceptance at high temp, got {ratio}");
    }

    #[test]
    fn test_temperature_cools_to_floor() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.25)
            .with_cooling_rate(0.5)
            .with_seed(1);
        let mut sa = SimulatedAnnealing::new(flip_flop(8), config).unwrap();
        sa.step().unwrap();
        assert!((sa.temperature() - 0.5).abs() < 1e-12);
        for _ in 0..10 {
            sa.step().unwrap();
        }
        assert!((sa.temperature() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_temperature_underflow_is_safe() {
        let config = SaConfig::default()
            .with_initial_temperature(1e-300)
            .with_cooling_rate(0.01)
            .with_seed(2);
        let mut sa = SimulatedAnnealing::new(flip_flop(8), config).unwrap();
        for _ in 0..50 {
            sa.step().unwrap();
        }
        assert_eq!(sa.temperature(), 0.0);
    }

    #[test]
    fn test_best_is_monotone_on_flip_flop() {
        let config = SaConfig::default().with_seed(11);
        let mut sa = SimulatedAnnealing::new(flip_flop(40), config).unwrap();
        let mut last = sa.current_best().fitness;
        for _ in 0..2000 {
            sa.step().unwrap();
            let best = sa.current_best().fitness;
            assert!(best >= last);
            last = best;
        }
    }

    #[test]
    fn test_lundy_mees_schedule() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling(CoolingSchedule::LundyMees { beta: 0.01 })
            .with_seed(3);
        let mut sa = SimulatedAnnealing::new(NegQuadratic, config).unwrap();
        for _ in 0..3000 {
            sa.step().unwrap();
        }
        assert!(sa.temperature() < 10.0);
        assert!(sa.current_best().fitness > -1.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(matches!(
            SimulatedAnnealing::new(NegQuadratic, config),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
