//! Dependency-tree distribution (Chow-Liu tree) used by MIMIC.
//!
//! # Algorithm
//!
//! 1. Estimate the weighted marginal of every position and the pairwise
//!    mutual information `I(X_i; X_j)`.
//! 2. Build a maximum spanning tree over the complete graph weighted by
//!    mutual information (Prim, rooted at position 0).
//! 3. Estimate `P(X_i | X_parent)` for every non-root position and
//!    `P(X_root)` for the root, smoothed with an m-estimate so that no
//!    value ever gets probability zero.
//!
//! Sampling walks the tree from the root, drawing each position
//! conditioned on the value already drawn for its parent.
//!
//! # Complexity
//! `estimate`: O(n² · (s + r²)) for `n` positions, `s` samples and
//! maximum range `r`. `sample`: O(n · r).

use super::{Distribution, FittableDistribution};
use crate::error::{Result, SearchError};
use crate::instance::{check_ranges, validate_ranges, Instance};
use crate::random::sample_categorical;
use rand::Rng;

/// Tree-structured discrete distribution.
///
/// Before the first call to [`estimate`](FittableDistribution::estimate)
/// the tree has no edges and every position is uniform.
///
/// # Examples
///
/// ```
/// use u_randopt::dist::{DiscreteDependencyTree, Distribution, FittableDistribution};
/// use u_randopt::random::create_rng;
/// use u_randopt::Instance;
///
/// let mut tree = DiscreteDependencyTree::new(0.1, vec![2, 2, 2]).unwrap();
/// let population = vec![
///     Instance::discrete(&[0, 1, 0]),
///     Instance::discrete(&[1, 0, 1]),
///     Instance::discrete(&[0, 1, 0]),
/// ];
/// tree.estimate(&population, &[1.0, 1.0, 1.0]).unwrap();
/// assert_eq!(tree.edge_count(), 2);
///
/// let mut rng = create_rng(42);
/// let sample = tree.sample(&mut rng);
/// assert_eq!(sample.len(), 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteDependencyTree {
    /// Smoothing mass spread uniformly over each conditional table.
    m: f64,
    ranges: Vec<usize>,
    /// Parent of each position; `None` for the root (and for every
    /// position while unfitted).
    parents: Vec<Option<usize>>,
    /// Positions in root-to-leaf order.
    order: Vec<usize>,
    /// Per-position probability table. With a parent `p` the table is
    /// row-major `[parent_value * range_i + value]`; without one it is the
    /// marginal over `range_i` values.
    tables: Vec<Vec<f64>>,
    fitted: bool,
}

impl DiscreteDependencyTree {
    /// Creates an unfitted tree.
    ///
    /// `m` is the smoothing mass (the minimum-probability floor is
    /// `m / range_i / (1 + m)`); it must be positive and finite.
    pub fn new(m: f64, ranges: Vec<usize>) -> Result<Self> {
        validate_ranges(&ranges)?;
        if !(m > 0.0 && m.is_finite()) {
            return Err(SearchError::InvalidConfig(format!(
                "smoothing mass m must be positive, got {m}"
            )));
        }
        let n = ranges.len();
        let tables = ranges.iter().map(|&r| vec![1.0 / r as f64; r]).collect();
        Ok(Self {
            m,
            ranges,
            parents: vec![None; n],
            order: (0..n).collect(),
            tables,
            fitted: false,
        })
    }

    /// Smoothing mass.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Per-position ranges.
    pub fn ranges(&self) -> &[usize] {
        &self.ranges
    }

    /// Parent of each position in the current tree.
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Number of edges in the current tree.
    pub fn edge_count(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    /// Whether the model has been estimated at least once.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Probability of `value` at `position` given the parent's value.
    ///
    /// `parent_value` is ignored for the root and for unfitted models.
    ///
    /// # Panics
    /// Panics if `position` is out of bounds or the entry for
    /// `(parent_value, value)` lies outside the position's table.
    pub fn probability(&self, position: usize, parent_value: usize, value: usize) -> f64 {
        let range = self.ranges[position];
        match self.parents[position] {
            Some(_) => self.tables[position][parent_value * range + value],
            None => self.tables[position][value],
        }
    }
}

impl Distribution for DiscreteDependencyTree {
    fn sample<R: Rng>(&self, rng: &mut R) -> Instance {
        let mut values = vec![0usize; self.ranges.len()];
        for &i in &self.order {
            let range = self.ranges[i];
            let row = match self.parents[i] {
                Some(p) => {
                    let start = values[p] * range;
                    &self.tables[i][start..start + range]
                }
                None => &self.tables[i][..],
            };
            values[i] = sample_categorical(row, rng);
        }
        Instance::discrete(&values)
    }
}

impl FittableDistribution for DiscreteDependencyTree {
    fn estimate(&mut self, population: &[Instance], weights: &[f64]) -> Result<()> {
        if population.len() < 2 {
            return Err(SearchError::DegenerateModel(format!(
                "dependency tree needs at least 2 samples, got {}",
                population.len()
            )));
        }
        if population.len() != weights.len() {
            return Err(SearchError::InvalidConfig(format!(
                "{} samples but {} weights",
                population.len(),
                weights.len()
            )));
        }
        if weights.iter().any(|&w| !(w >= 0.0 && w.is_finite())) {
            return Err(SearchError::InvalidConfig(
                "weights must be finite and non-negative".into(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SearchError::DegenerateModel("weights sum to zero".into()));
        }
        for instance in population {
            check_ranges(instance, &self.ranges)?;
        }

        let data: Vec<Vec<usize>> = population.iter().map(Instance::to_discrete).collect();
        let weights: Vec<f64> = weights.iter().map(|w| w / total).collect();

        let marginals = self.marginals(&data, &weights);
        let info = self.mutual_information(&data, &weights, &marginals);
        if info.iter().flatten().all(|&mi| mi == 0.0) {
            tracing::debug!(
                samples = data.len(),
                "elite set carries no pairwise information; tree shape is arbitrary"
            );
        }
        let (parents, order) = maximum_spanning_tree(&info);

        let tables = (0..self.ranges.len())
            .map(|i| match parents[i] {
                Some(p) => self.conditional_table(i, p, &data, &weights, &marginals[p]),
                None => self.smoothed_marginal(&marginals[i], self.ranges[i]),
            })
            .collect();

        tracing::trace!(
            positions = self.ranges.len(),
            samples = data.len(),
            "dependency tree re-estimated"
        );

        self.parents = parents;
        self.order = order;
        self.tables = tables;
        self.fitted = true;
        Ok(())
    }
}

impl DiscreteDependencyTree {
    /// Weighted (unsmoothed) marginal frequencies per position.
    fn marginals(&self, data: &[Vec<usize>], weights: &[f64]) -> Vec<Vec<f64>> {
        let mut marginals: Vec<Vec<f64>> = self.ranges.iter().map(|&r| vec![0.0; r]).collect();
        for (row, &w) in data.iter().zip(weights) {
            for (i, &v) in row.iter().enumerate() {
                marginals[i][v] += w;
            }
        }
        marginals
    }

    /// Symmetric matrix of pairwise mutual information (nats).
    fn mutual_information(
        &self,
        data: &[Vec<usize>],
        weights: &[f64],
        marginals: &[Vec<f64>],
    ) -> Vec<Vec<f64>> {
        let n = self.ranges.len();
        let mut info = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (ri, rj) = (self.ranges[i], self.ranges[j]);
                let mut joint = vec![0.0; ri * rj];
                for (row, &w) in data.iter().zip(weights) {
                    joint[row[i] * rj + row[j]] += w;
                }
                let mut mi = 0.0;
                for a in 0..ri {
                    for b in 0..rj {
                        let p_ab = joint[a * rj + b];
                        if p_ab > 0.0 {
                            mi += p_ab * (p_ab / (marginals[i][a] * marginals[j][b])).ln();
                        }
                    }
                }
                // Rounding can leave tiny negative values.
                let mi = mi.max(0.0);
                info[i][j] = mi;
                info[j][i] = mi;
            }
        }
        info
    }

    fn smoothed_marginal(&self, marginal: &[f64], range: usize) -> Vec<f64> {
        let floor = self.m / range as f64;
        marginal
            .iter()
            .map(|&p| (p + floor) / (1.0 + self.m))
            .collect()
    }

    /// Row-major table of `P(X_i = a | X_p = b)`.
    fn conditional_table(
        &self,
        i: usize,
        p: usize,
        data: &[Vec<usize>],
        weights: &[f64],
        parent_marginal: &[f64],
    ) -> Vec<f64> {
        let (ri, rp) = (self.ranges[i], self.ranges[p]);
        let mut counts = vec![0.0; rp * ri];
        for (row, &w) in data.iter().zip(weights) {
            counts[row[p] * ri + row[i]] += w;
        }
        let floor = self.m / ri as f64;
        for b in 0..rp {
            let denominator = parent_marginal[b] + self.m;
            for a in 0..ri {
                let cell = &mut counts[b * ri + a];
                *cell = (*cell + floor) / denominator;
            }
        }
        counts
    }
}

/// Prim's algorithm on a dense symmetric weight matrix, maximising the
/// total weight. Returns the parent of every vertex (root 0 has none)
/// and the order in which vertices joined the tree.
fn maximum_spanning_tree(weights: &[Vec<f64>]) -> (Vec<Option<usize>>, Vec<usize>) {
    let n = weights.len();
    let mut parents = vec![None; n];
    let mut order = Vec::with_capacity(n);
    if n == 0 {
        return (parents, order);
    }

    let mut in_tree = vec![false; n];
    let mut best_weight = vec![f64::NEG_INFINITY; n];
    let mut best_parent = vec![0usize; n];

    in_tree[0] = true;
    order.push(0);
    for j in 1..n {
        best_weight[j] = weights[0][j];
    }

    for _ in 1..n {
        let mut next = None;
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            match next {
                None => next = Some(j),
                Some(k) if best_weight[j] > best_weight[k] => next = Some(j),
                _ => {}
            }
        }
        let Some(j) = next else { break };

        in_tree[j] = true;
        parents[j] = Some(best_parent[j]);
        order.push(j);

        for k in 0..n {
            if !in_tree[k] && weights[j][k] > best_weight[k] {
                best_weight[k] = weights[j][k];
                best_parent[k] = j;
            }
        }
    }

    (parents, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::Rng;

    /// Every position reaches the root by following parents, within `n` hops.
    fn is_tree(parents: &[Option<usize>]) -> bool {
        let n = parents.len();
        let roots = parents.iter().filter(|p| p.is_none()).count();
        if roots != 1 || parents[0].is_some() {
            return false;
        }
        (0..n).all(|start| {
            let mut node = start;
            for _ in 0..n {
                match parents[node] {
                    Some(p) => node = p,
                    None => return true,
                }
            }
            false
        })
    }

    fn row_sums_to_one(tree: &DiscreteDependencyTree) -> bool {
        (0..tree.ranges().len()).all(|i| {
            let range = tree.ranges()[i];
            tree.tables[i]
                .chunks(range)
                .all(|row| (row.iter().sum::<f64>() - 1.0).abs() < 1e-9)
        })
    }

    #[test]
    fn test_unfitted_is_uniform() {
        let tree = DiscreteDependencyTree::new(0.1, vec![2, 4]).unwrap();
        assert!(!tree.is_fitted());
        assert_eq!(tree.edge_count(), 0);
        assert!((tree.probability(1, 0, 3) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(DiscreteDependencyTree::new(0.0, vec![2]).is_err());
        assert!(DiscreteDependencyTree::new(f64::NAN, vec![2]).is_err());
        assert!(DiscreteDependencyTree::new(0.1, vec![0]).is_err());
    }

    #[test]
    fn test_estimate_needs_two_samples() {
        let mut tree = DiscreteDependencyTree::new(0.1, vec![2, 2]).unwrap();
        let result = tree.estimate(&[Instance::discrete(&[0, 1])], &[1.0]);
        assert!(matches!(result, Err(SearchError::DegenerateModel(_))));
    }

    #[test]
    fn test_estimate_rejects_out_of_range() {
        let mut tree = DiscreteDependencyTree::new(0.1, vec![2, 2]).unwrap();
        let population = vec![Instance::discrete(&[0, 1]), Instance::discrete(&[0, 2])];
        assert!(tree.estimate(&population, &[1.0, 1.0]).is_err());
    }

    #[test]
    fn test_estimate_rejects_bad_weights() {
        let mut tree = DiscreteDependencyTree::new(0.1, vec![2, 2]).unwrap();
        let population = vec![Instance::discrete(&[0, 1]), Instance::discrete(&[1, 0])];
        assert!(tree.estimate(&population, &[1.0]).is_err());
        assert!(tree.estimate(&population, &[1.0, -1.0]).is_err());
        assert!(tree.estimate(&population, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_learns_strong_dependency() {
        // Positions 0 and 2 always agree; position 1 is noise.
        let mut rng = create_rng(42);
        let population: Vec<Instance> = (0..200)
            .map(|_| {
                let a = rng.random_range(0..2);
                Instance::discrete(&[a, rng.random_range(0..2), a])
            })
            .collect();
        let weights = vec![1.0; population.len()];

        let mut tree = DiscreteDependencyTree::new(0.01, vec![2, 2, 2]).unwrap();
        tree.estimate(&population, &weights).unwrap();

        assert_eq!(tree.parents()[2], Some(0));
        assert!(tree.probability(2, 1, 1) > 0.95);
        assert!(tree.probability(2, 1, 0) > 0.0, "smoothing keeps mass on unseen values");

        let agree = (0..1000)
            .filter(|_| {
                let s = tree.sample(&mut rng);
                s.discrete_at(0) == s.discrete_at(2)
            })
            .count();
        assert!(agree > 900, "expected strong agreement, got {agree}/1000");
    }

    #[test]
    fn test_weights_shift_marginals() {
        let mut tree = DiscreteDependencyTree::new(0.01, vec![2, 2]).unwrap();
        let population = vec![Instance::discrete(&[0, 0]), Instance::discrete(&[1, 1])];
        tree.estimate(&population, &[9.0, 1.0]).unwrap();
        assert!(tree.probability(0, 0, 0) > 0.85);
    }

    #[test]
    fn test_reestimate_replaces_model() {
        let mut tree = DiscreteDependencyTree::new(0.01, vec![2, 2]).unwrap();
        let zeros = vec![Instance::discrete(&[0, 0]); 4];
        let ones = vec![Instance::discrete(&[1, 1]); 4];
        tree.estimate(&zeros, &[1.0; 4]).unwrap();
        assert!(tree.probability(0, 0, 0) > 0.99);
        tree.estimate(&ones, &[1.0; 4]).unwrap();
        assert!(tree.probability(0, 0, 1) > 0.99);
    }

    #[test]
    fn test_single_position() {
        let mut tree = DiscreteDependencyTree::new(0.1, vec![3]).unwrap();
        let population = vec![Instance::discrete(&[2]), Instance::discrete(&[2])];
        tree.estimate(&population, &[1.0, 1.0]).unwrap();
        assert_eq!(tree.edge_count(), 0);
        assert!(is_tree(tree.parents()));
        assert!(row_sums_to_one(&tree));
    }

    proptest! {
        #[test]
        fn prop_structure_is_tree(
            n in 2usize..8,
            samples in 2usize..30,
            max_range in 2usize..5,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let ranges: Vec<usize> = (0..n).map(|_| rng.random_range(2..=max_range)).collect();
            let population: Vec<Instance> = (0..samples)
                .map(|_| {
                    let values: Vec<usize> =
                        ranges.iter().map(|&r| rng.random_range(0..r)).collect();
                    Instance::discrete(&values)
                })
                .collect();
            let weights: Vec<f64> = (0..samples).map(|_| rng.random_range(0.1..2.0)).collect();

            let mut tree = DiscreteDependencyTree::new(0.1, ranges.clone()).unwrap();
            tree.estimate(&population, &weights).unwrap();

            prop_assert_eq!(tree.edge_count(), n - 1);
            prop_assert!(is_tree(tree.parents()));
            prop_assert!(row_sums_to_one(&tree));

            let sample = tree.sample(&mut rng);
            prop_assert!(check_ranges(&sample, &ranges).is_ok());
        }
    }
}
