//! Bit-string reward functions.

use crate::error::Result;
use crate::instance::Instance;
use crate::problem::EvaluationFunction;

/// Flip-flop reward: the number of maximal runs of equal adjacent values.
///
/// An alternating string of length `n` scores `n`; a constant string
/// scores 1; the empty string scores 0. The landscape has two global
/// optima and many plateaus.
///
/// ```
/// use u_randopt::problem::EvaluationFunction;
/// use u_randopt::problems::FlipFlop;
/// use u_randopt::Instance;
///
/// let runs = FlipFlop.value(&Instance::discrete(&[0, 0, 1, 0, 0])).unwrap();
/// assert_eq!(runs, 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipFlop;

impl EvaluationFunction for FlipFlop {
    fn value(&self, instance: &Instance) -> Result<f64> {
        let values = instance.values();
        if values.is_empty() {
            return Ok(0.0);
        }
        let changes = values.windows(2).filter(|w| w[0] != w[1]).count();
        Ok((changes + 1) as f64)
    }
}

/// OneMax: the number of positions holding 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountOnes;

impl EvaluationFunction for CountOnes {
    fn value(&self, instance: &Instance) -> Result<f64> {
        Ok(instance.values().iter().filter(|&&v| v == 1.0).count() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_flop_extremes() {
        assert_eq!(FlipFlop.value(&Instance::discrete(&[0; 8])).unwrap(), 1.0);
        let alternating = Instance::discrete(&[0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(FlipFlop.value(&alternating).unwrap(), 8.0);
        assert_eq!(FlipFlop.value(&Instance::default()).unwrap(), 0.0);
    }

    #[test]
    fn test_flip_flop_is_deterministic() {
        let inst = Instance::discrete(&[1, 1, 0, 1, 0, 0, 1, 1]);
        let first = FlipFlop.value(&inst).unwrap();
        for _ in 0..10 {
            assert_eq!(FlipFlop.value(&inst).unwrap(), first);
        }
        assert_eq!(first, 5.0);
    }

    #[test]
    fn test_count_ones() {
        let inst = Instance::discrete(&[1, 0, 1, 1]);
        assert_eq!(CountOnes.value(&inst).unwrap(), 3.0);
    }
}
