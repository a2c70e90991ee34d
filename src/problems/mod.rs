//! Reference evaluation functions.
//!
//! Small, well-understood fitness landscapes for exercising the engine:
//!
//! - [`FlipFlop`]: rewards alternating bit strings
//! - [`CountOnes`]: rewards ones (OneMax)
//! - [`TourLength`] / [`SortTourLength`]: traveling salesman over 2D points,
//!   as a permutation or as sort keys
//! - [`TourCrossOver`]: distance-aware crossover for route-encoded tours

mod bits;
mod tsp;

pub use bits::{CountOnes, FlipFlop};
pub use tsp::{Points, SortTourLength, TourCrossOver, TourLength};
