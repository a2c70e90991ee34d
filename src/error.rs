//! Error type shared by every module of the engine.

use thiserror::Error;

/// Errors reported by problem assembly, model estimation, and search steps.
///
/// Configuration problems are reported when an algorithm is constructed.
/// Evaluation failures are reported by the step that hit them; the run
/// is not resumed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A configuration value is out of its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An instance does not fit the declared search space.
    #[error("invalid representation: {0}")]
    InvalidRepresentation(String),

    /// A distribution model cannot be estimated from the given data.
    #[error("degenerate model: {0}")]
    DegenerateModel(String),

    /// The caller's evaluation function failed.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// The evaluation function returned NaN.
    #[error("evaluation returned NaN for an instance of length {len}")]
    InvalidFitness {
        /// Length of the offending instance.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
