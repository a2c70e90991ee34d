//! The step interface shared by all search algorithms.

use crate::error::Result;
use crate::instance::Scored;

/// An iterative search algorithm driven one step at a time.
///
/// Implementations keep the best candidate seen so far; its fitness never
/// decreases from one step to the next.
pub trait OptimizationAlgorithm {
    /// Runs one iteration.
    ///
    /// Returns the fitness signal for this step: the current candidate's
    /// fitness for single-solution algorithms, the population mean for
    /// population-based ones. An evaluation failure aborts the step and
    /// leaves the best candidate unchanged.
    fn step(&mut self) -> Result<f64>;

    /// The best candidate seen so far.
    fn current_best(&self) -> &Scored;

    /// Number of completed steps.
    fn iterations(&self) -> usize;
}

impl<A: OptimizationAlgorithm + ?Sized> OptimizationAlgorithm for &mut A {
    fn step(&mut self) -> Result<f64> {
        (**self).step()
    }

    fn current_best(&self) -> &Scored {
        (**self).current_best()
    }

    fn iterations(&self) -> usize {
        (**self).iterations()
    }
}

impl<A: OptimizationAlgorithm + ?Sized> OptimizationAlgorithm for Box<A> {
    fn step(&mut self) -> Result<f64> {
        (**self).step()
    }

    fn current_best(&self) -> &Scored {
        (**self).current_best()
    }

    fn iterations(&self) -> usize {
        (**self).iterations()
    }
}
