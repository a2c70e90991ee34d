//! MIMIC configuration.

use crate::error::{Result, SearchError};

const FRACTION_TOLERANCE: f64 = 1e-9;

/// Size of the elite set kept from each sampled population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Elite {
    /// A fixed number of members.
    Count(usize),
    /// A fraction of the population, rounded up. Products within `1e-9`
    /// of an integer count as that integer.
    Fraction(f64),
}

impl Elite {
    /// Elite count for a population of `population_size`.
    ///
    /// ```
    /// use u_randopt::mimic::Elite;
    ///
    /// assert_eq!(Elite::Count(5).count(200), 5);
    /// assert_eq!(Elite::Fraction(0.2).count(50), 10);
    /// assert_eq!(Elite::Fraction(0.25).count(10), 3);
    /// ```
    pub fn count(&self, population_size: usize) -> usize {
        match *self {
            Elite::Count(n) => n,
            Elite::Fraction(f) => {
                let exact = population_size as f64 * f;
                ((exact - FRACTION_TOLERANCE).ceil().max(0.0) as usize).min(population_size)
            }
        }
    }
}

/// Configuration for MIMIC.
///
/// # Examples
///
/// ```
/// use u_randopt::mimic::{Elite, MimicConfig};
///
/// let config = MimicConfig::default()
///     .with_population_size(50)
///     .with_elite(Elite::Fraction(0.2))
///     .with_seed(42);
/// assert_eq!(config.elite_count(), 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MimicConfig {
    /// Instances sampled per step.
    pub population_size: usize,

    /// Members kept to fit the next model. Must resolve to `2..=population_size`.
    pub elite: Elite,

    /// Whether to evaluate samples in parallel (requires the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for MimicConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            elite: Elite::Count(100),
            parallel: false,
            seed: None,
        }
    }
}

impl MimicConfig {
    /// Creates a configuration sampling `population_size` instances and
    /// keeping `elite` of them.
    pub fn new(population_size: usize, elite: Elite) -> Self {
        Self {
            population_size,
            elite,
            ..Self::default()
        }
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_elite(mut self, elite: Elite) -> Self {
        self.elite = elite;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolved elite count.
    pub fn elite_count(&self) -> usize {
        self.elite.count(self.population_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Elite::Fraction(f) = self.elite {
            if !(f > 0.0 && f <= 1.0) {
                return Err(SearchError::InvalidConfig(format!(
                    "elite fraction must be in (0, 1], got {f}"
                )));
            }
        }
        let elite = self.elite_count();
        if elite < 2 {
            return Err(SearchError::InvalidConfig(format!(
                "elite set must hold at least 2 members, got {elite}"
            )));
        }
        if elite > self.population_size {
            return Err(SearchError::InvalidConfig(format!(
                "elite set ({elite}) exceeds population_size ({})",
                self.population_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MimicConfig::default();
        assert_eq!(config.population_size, 200);
        assert_eq!(config.elite_count(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fraction_rounds_up() {
        assert_eq!(Elite::Fraction(0.01).count(150), 2);
        assert_eq!(Elite::Fraction(1.0).count(7), 7);
    }

    #[test]
    fn test_fraction_ignores_float_noise() {
        // 100 * 0.07 == 7.000000000000001 in f64
        assert_eq!(Elite::Fraction(0.07).count(100), 7);
        assert_eq!(Elite::Fraction(0.29).count(100), 29);
        assert_eq!(Elite::Fraction(0.07).count(101), 8);
        for p in 1..=1000usize {
            for k in 1..=99usize {
                let expected = (p * k).div_ceil(100);
                assert_eq!(
                    Elite::Fraction(k as f64 / 100.0).count(p),
                    expected,
                    "fraction 0.{k:02} of {p}"
                );
            }
        }
    }

    #[test]
    fn test_validate_elite_bounds() {
        assert!(MimicConfig::new(10, Elite::Count(1)).validate().is_err());
        assert!(MimicConfig::new(10, Elite::Count(11)).validate().is_err());
        assert!(MimicConfig::new(10, Elite::Count(10)).validate().is_ok());
        assert!(MimicConfig::new(10, Elite::Count(2)).validate().is_ok());
        assert!(MimicConfig::new(1, Elite::Count(1)).validate().is_err());
    }

    #[test]
    fn test_validate_fraction() {
        assert!(MimicConfig::new(10, Elite::Fraction(0.0)).validate().is_err());
        assert!(MimicConfig::new(10, Elite::Fraction(1.5)).validate().is_err());
        assert!(MimicConfig::new(10, Elite::Fraction(f64::NAN)).validate().is_err());
        // ceil(10 * 0.1) = 1 member is too few
        assert!(MimicConfig::new(10, Elite::Fraction(0.1)).validate().is_err());
        assert!(MimicConfig::new(10, Elite::Fraction(0.2)).validate().is_ok());
    }
}
