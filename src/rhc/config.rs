//! RHC configuration.

use crate::error::Result;

/// Configuration for randomized hill climbing.
///
/// # Examples
///
/// ```
/// use u_randopt::rhc::RhcConfig;
///
/// let config = RhcConfig::default()
///     .with_restart_patience(20)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RhcConfig {
    /// Consecutive rejected probes before restarting from a random sample.
    ///
    /// `1` restarts as soon as a single probed neighbor is worse.
    /// `0` never restarts.
    pub restart_patience: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RhcConfig {
    fn default() -> Self {
        Self {
            restart_patience: 1,
            seed: None,
        }
    }
}

impl RhcConfig {
    pub fn with_restart_patience(mut self, patience: usize) -> Self {
        self.restart_patience = patience;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration. Every patience value is legal.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
