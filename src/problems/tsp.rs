//! Traveling salesman evaluation over points in the plane.
//!
//! Two encodings are supported:
//!
//! - **Route** ([`TourLength`]): the instance is a permutation of city
//!   indices, visited in order. Used with permutation operators.
//! - **Sort keys** ([`SortTourLength`]): position `i` holds a key for city
//!   `i`; the tour visits cities by ascending key. Any discrete vector is
//!   a valid tour, which suits MIMIC's per-position models.
//!
//! Both return `1 / length` of the closed tour so that shorter tours score
//! higher. [`TourCrossOver`] recombines route-encoded parents using the
//! city distances.

use crate::error::{Result, SearchError};
use crate::instance::Instance;
use crate::ops::CrossoverFunction;
use crate::problem::EvaluationFunction;
use rand::Rng;

/// A set of cities in the plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Points {
    coords: Vec<[f64; 2]>,
}

impl Points {
    /// Creates the set. At least two cities are required.
    pub fn new(coords: Vec<[f64; 2]>) -> Result<Self> {
        if coords.len() < 2 {
            return Err(SearchError::InvalidConfig(format!(
                "a tour needs at least 2 cities, got {}",
                coords.len()
            )));
        }
        if coords.iter().flatten().any(|c| !c.is_finite()) {
            return Err(SearchError::InvalidConfig(
                "city coordinates must be finite".into(),
            ));
        }
        Ok(Self { coords })
    }

    /// `n` cities drawn uniformly from the unit square.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self> {
        Self::new((0..n).map(|_| [rng.random(), rng.random()]).collect())
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether there are no cities. Never true for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Euclidean distance between two cities.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let [x1, y1] = self.coords[i];
        let [x2, y2] = self.coords[j];
        (x1 - x2).hypot(y1 - y2)
    }

    /// Length of the closed tour visiting `order`.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let open: f64 = order
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum();
        open + self.distance(order[order.len() - 1], order[0])
    }
}

/// Route-encoded tour fitness: `1 / length`.
#[derive(Debug, Clone)]
pub struct TourLength {
    points: Points,
}

impl TourLength {
    /// Creates the evaluation function.
    pub fn new(points: Points) -> Self {
        Self { points }
    }

    /// The cities.
    pub fn points(&self) -> &Points {
        &self.points
    }

    /// Length of the tour encoded by `instance`.
    pub fn tour_length(&self, instance: &Instance) -> Result<f64> {
        let order = self.route(instance)?;
        Ok(self.points.tour_length(&order))
    }

    fn route(&self, instance: &Instance) -> Result<Vec<usize>> {
        let n = self.points.len();
        if instance.len() != n {
            return Err(SearchError::InvalidRepresentation(format!(
                "route has {} stops for {n} cities",
                instance.len()
            )));
        }
        let order = instance.to_discrete();
        let mut seen = vec![false; n];
        for &city in &order {
            if city >= n || seen[city] {
                return Err(SearchError::InvalidRepresentation(format!(
                    "route is not a permutation of 0..{n}"
                )));
            }
            seen[city] = true;
        }
        Ok(order)
    }
}

impl EvaluationFunction for TourLength {
    fn value(&self, instance: &Instance) -> Result<f64> {
        Ok(1.0 / self.tour_length(instance)?)
    }
}

/// Greedy edge crossover for route-encoded tours.
///
/// The child starts at a random city of parent `a`. From the current city
/// it follows whichever parent edge leads to the nearer unvisited city;
/// when both successors are already visited it moves to the nearest
/// unvisited city. The child is always a permutation of `0..n`.
///
/// Parents that are not permutations of the cities are returned unchanged
/// (a copy of `a`).
///
/// ```
/// use u_randopt::ops::CrossoverFunction;
/// use u_randopt::problems::{Points, TourCrossOver};
/// use u_randopt::random::create_rng;
/// use u_randopt::Instance;
///
/// let points = Points::random(6, &mut create_rng(3)).unwrap();
/// let crossover = TourCrossOver::new(points);
/// let a = Instance::discrete(&[0, 1, 2, 3, 4, 5]);
/// let b = Instance::discrete(&[5, 3, 1, 0, 2, 4]);
/// let mut child = crossover.mate(&a, &b, &mut create_rng(4)).to_discrete();
/// child.sort_unstable();
/// assert_eq!(child, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct TourCrossOver {
    points: Points,
}

impl TourCrossOver {
    /// Creates the operator over `points`.
    pub fn new(points: Points) -> Self {
        Self { points }
    }

    /// The cities.
    pub fn points(&self) -> &Points {
        &self.points
    }

    /// `next[c]` is the city visited after `c` in the closed tour `order`.
    fn successors(order: &[usize]) -> Vec<usize> {
        let n = order.len();
        let mut next = vec![0; n];
        for i in 0..n {
            next[order[i]] = order[(i + 1) % n];
        }
        next
    }

    fn is_route(&self, order: &[usize]) -> bool {
        let n = self.points.len();
        let mut seen = vec![false; n];
        order.len() == n
            && order
                .iter()
                .all(|&c| c < n && !std::mem::replace(&mut seen[c], true))
    }

    fn nearest_unvisited(&self, from: usize, visited: &[bool]) -> Option<usize> {
        (0..visited.len())
            .filter(|&c| !visited[c])
            .min_by(|&x, &y| {
                self.points
                    .distance(from, x)
                    .total_cmp(&self.points.distance(from, y))
            })
    }
}

impl CrossoverFunction for TourCrossOver {
    fn mate<R: Rng>(&self, a: &Instance, b: &Instance, rng: &mut R) -> Instance {
        let (route_a, route_b) = (a.to_discrete(), b.to_discrete());
        if !self.is_route(&route_a) || !self.is_route(&route_b) {
            return a.clone();
        }
        let n = route_a.len();
        let next_a = Self::successors(&route_a);
        let next_b = Self::successors(&route_b);

        let mut visited = vec![false; n];
        let mut child = Vec::with_capacity(n);
        let mut current = route_a[rng.random_range(0..n)];
        visited[current] = true;
        child.push(current);

        while child.len() < n {
            let (ca, cb) = (next_a[current], next_b[current]);
            let next = match (visited[ca], visited[cb]) {
                (false, false) => {
                    if self.points.distance(current, cb) < self.points.distance(current, ca) {
                        cb
                    } else {
                        ca
                    }
                }
                (false, true) => ca,
                (true, false) => cb,
                (true, true) => match self.nearest_unvisited(current, &visited) {
                    Some(c) => c,
                    None => break,
                },
            };
            visited[next] = true;
            child.push(next);
            current = next;
        }

        Instance::discrete(&child)
    }
}

/// Sort-key encoded tour fitness: `1 / length`.
///
/// Cities are visited by ascending key; equal keys keep index order.
#[derive(Debug, Clone)]
pub struct SortTourLength {
    points: Points,
}

impl SortTourLength {
    /// Creates the evaluation function.
    pub fn new(points: Points) -> Self {
        Self { points }
    }

    /// The cities.
    pub fn points(&self) -> &Points {
        &self.points
    }

    /// Decodes sort keys into a visiting order.
    pub fn route(&self, instance: &Instance) -> Result<Vec<usize>> {
        if instance.len() != self.points.len() {
            return Err(SearchError::InvalidRepresentation(format!(
                "{} keys for {} cities",
                instance.len(),
                self.points.len()
            )));
        }
        let keys = instance.values();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| {
            keys[a]
                .partial_cmp(&keys[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(order)
    }

    /// Length of the tour encoded by `instance`.
    pub fn tour_length(&self, instance: &Instance) -> Result<f64> {
        Ok(self.points.tour_length(&self.route(instance)?))
    }
}

impl EvaluationFunction for SortTourLength {
    fn value(&self, instance: &Instance) -> Result<f64> {
        Ok(1.0 / self.tour_length(instance)?)
    }
}
