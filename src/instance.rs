//! Candidate representation and evaluation records.
//!
//! An [`Instance`] is a fixed-length numeric vector. Discrete problems
//! store integral values in `[0, range_i)`; continuous problems (e.g. a
//! flattened weight vector) store arbitrary reals. Instances are plain
//! values: operators always build a new instance instead of editing one
//! that another population member could see.

use crate::error::{Result, SearchError};

/// One candidate solution.
///
/// The optional label is carried for callers that build instances from
/// labelled dataset rows. The search algorithms never read it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    values: Vec<f64>,
    label: Option<f64>,
}

impl Instance {
    /// Creates a continuous instance.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            label: None,
        }
    }

    /// Creates an integer-coded instance.
    ///
    /// ```
    /// use u_randopt::Instance;
    ///
    /// let inst = Instance::discrete(&[0, 1, 1, 0]);
    /// assert_eq!(inst.len(), 4);
    /// assert_eq!(inst.discrete_at(2), 1);
    /// ```
    pub fn discrete(values: &[usize]) -> Self {
        Self::new(values.iter().map(|&v| v as f64).collect())
    }

    /// Attaches a label.
    pub fn with_label(mut self, label: f64) -> Self {
        self.label = Some(label);
        self
    }

    /// The label, if any.
    pub fn label(&self) -> Option<f64> {
        self.label
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the instance has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at position `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Value at position `i` read as a discrete symbol.
    ///
    /// Negative values saturate to 0.
    pub fn discrete_at(&self, i: usize) -> usize {
        self.values[i] as usize
    }

    /// All values read as discrete symbols.
    pub fn to_discrete(&self) -> Vec<usize> {
        self.values.iter().map(|&v| v as usize).collect()
    }

    /// Overwrites position `i`.
    pub fn set(&mut self, i: usize, value: f64) {
        self.values[i] = value;
    }

    /// Swaps two positions.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Consumes the instance and returns its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for Instance {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// An instance paired with its fitness. Higher fitness is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scored {
    /// The evaluated candidate.
    pub instance: Instance,

    /// Its fitness.
    pub fitness: f64,
}

impl Scored {
    /// Pairs an instance with its fitness.
    pub fn new(instance: Instance, fitness: f64) -> Self {
        Self { instance, fitness }
    }
}

/// Checks that `instance` lives in the discrete space described by `ranges`.
///
/// Every value must be an integer in `[0, ranges[i])` and the lengths must
/// agree.
pub fn check_ranges(instance: &Instance, ranges: &[usize]) -> Result<()> {
    if instance.len() != ranges.len() {
        return Err(SearchError::InvalidRepresentation(format!(
            "expected {} positions, got {}",
            ranges.len(),
            instance.len()
        )));
    }
    for (i, (&v, &range)) in instance.values().iter().zip(ranges).enumerate() {
        if v.fract() != 0.0 || v < 0.0 || v >= range as f64 {
            return Err(SearchError::InvalidRepresentation(format!(
                "position {i} holds {v}, outside [0, {range})"
            )));
        }
    }
    Ok(())
}

/// Checks that every range admits at least one value.
pub(crate) fn validate_ranges(ranges: &[usize]) -> Result<()> {
    if ranges.is_empty() {
        return Err(SearchError::InvalidConfig(
            "ranges must not be empty".into(),
        ));
    }
    if let Some(i) = ranges.iter().position(|&r| r == 0) {
        return Err(SearchError::InvalidConfig(format!(
            "range at position {i} must be positive"
        )));
    }
    Ok(())
}
