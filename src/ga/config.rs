//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control one generation.

use super::selection::Selection;
use crate::error::{Result, SearchError};

/// Configuration for the Genetic Algorithm.
///
/// Each step produces `offspring_per_step` children, mutates
/// `mutations_per_step` of them, and keeps the best
/// `population_size - offspring_per_step` members of the old population.
///
/// # Defaults
///
/// ```
/// use u_randopt::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.offspring_per_step, 100);
/// assert_eq!(config.mutations_per_step, 10);
/// assert_eq!(config.survivors(), 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_randopt::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_offspring_per_step(30)
///     .with_mutations_per_step(5)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Children produced by crossover each step.
    ///
    /// Must be in `1..=population_size`; the remaining slots are kept from
    /// the previous population (elitism).
    pub offspring_per_step: usize,

    /// Number of mutation applications per step, each on an offspring
    /// chosen uniformly at random.
    pub mutations_per_step: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Whether to evaluate offspring in parallel (requires the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            offspring_per_step: 100,
            mutations_per_step: 10,
            selection: Selection::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Creates a configuration from the three classic sizes.
    pub fn new(
        population_size: usize,
        offspring_per_step: usize,
        mutations_per_step: usize,
    ) -> Self {
        Self {
            population_size,
            offspring_per_step,
            mutations_per_step,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of children per step.
    pub fn with_offspring_per_step(mut self, n: usize) -> Self {
        self.offspring_per_step = n;
        self
    }

    /// Sets the number of mutations per step.
    pub fn with_mutations_per_step(mut self, n: usize) -> Self {
        self.mutations_per_step = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Members kept from the previous population each step.
    pub fn survivors(&self) -> usize {
        self.population_size.saturating_sub(self.offspring_per_step)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SearchError::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.offspring_per_step == 0 {
            return Err(SearchError::InvalidConfig(
                "offspring_per_step must be positive (survivors would fill the whole population)"
                    .into(),
            ));
        }
        if self.offspring_per_step > self.population_size {
            return Err(SearchError::InvalidConfig(format!(
                "offspring_per_step ({}) exceeds population_size ({})",
                self.offspring_per_step, self.population_size
            )));
        }
        if let Selection::Tournament(0) = self.selection {
            return Err(SearchError::InvalidConfig(
                "tournament size must be positive".into(),
            ));
        }
        Ok(())
    }
}
