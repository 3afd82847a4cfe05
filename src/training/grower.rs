//! Exact-greedy, depth-wise tree growth.
//!
//! For each node the grower scans every feature over the node's rows, sorts
//! by value, and sweeps prefix gradient/hessian sums to find the split with
//! the highest gain. Squared loss has a unit hessian, so hessian sums equal
//! row counts. Feature scans run in parallel via rayon; the best candidate
//! is selected under a total order (gain, then lowest feature index), which
//! keeps growth deterministic regardless of thread scheduling.

use rayon::prelude::*;

use crate::data::Table;
use crate::repr::{NodeId, Tree};

/// Parameters the grower needs from the trainer.
#[derive(Debug, Clone)]
pub struct GrowerParams {
    /// Maximum tree depth (root is depth 0).
    pub max_depth: u32,
    /// L2 regularization on leaf values.
    pub reg_lambda: f32,
    /// Minimum hessian sum (= row count for squared loss) per child.
    pub min_child_weight: f32,
    /// Minimum gain for a split to be kept.
    pub min_gain: f64,
    /// Shrinkage applied to leaf values.
    pub learning_rate: f32,
}

/// One candidate split found during a feature scan.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: u32,
    threshold: f32,
    gain: f64,
}

/// Grows one tree per call from the current gradients.
pub struct TreeGrower<'a> {
    table: &'a Table,
    params: GrowerParams,
}

impl<'a> TreeGrower<'a> {
    pub fn new(table: &'a Table, params: GrowerParams) -> Self {
        Self { table, params }
    }

    /// Grow a tree on the given rows using per-row gradients.
    ///
    /// `rows` holds indices into the training table; with subsampling it is
    /// a strict subset of all rows.
    pub fn grow(&self, grads: &[f32], rows: Vec<u32>) -> Tree {
        let mut tree = Tree::new();
        self.grow_node(&mut tree, grads, rows, 0);
        tree
    }

    fn grow_node(&self, tree: &mut Tree, grads: &[f32], rows: Vec<u32>, depth: u32) -> NodeId {
        let grad_sum: f64 = rows.iter().map(|&r| grads[r as usize] as f64).sum();
        let hess_sum = rows.len() as f64;

        if depth >= self.params.max_depth
            || hess_sum < 2.0 * self.params.min_child_weight as f64
        {
            return tree.push_leaf(self.leaf_value(grad_sum, hess_sum));
        }

        let Some(split) = self.find_split(grads, &rows, grad_sum, hess_sum) else {
            return tree.push_leaf(self.leaf_value(grad_sum, hess_sum));
        };

        let (left_rows, right_rows): (Vec<u32>, Vec<u32>) = rows
            .into_iter()
            .partition(|&r| self.table.value(split.feature as usize, r as usize) < split.threshold);

        let node = tree.push_split(split.feature, split.threshold);
        let left = self.grow_node(tree, grads, left_rows, depth + 1);
        let right = self.grow_node(tree, grads, right_rows, depth + 1);
        tree.set_children(node, left, right);
        node
    }

    /// Newton step for a leaf, shrunk by the learning rate.
    fn leaf_value(&self, grad_sum: f64, hess_sum: f64) -> f32 {
        let raw = -grad_sum / (hess_sum + self.params.reg_lambda as f64);
        (raw * self.params.learning_rate as f64) as f32
    }

    /// Scan all features in parallel and return the best split, if any.
    fn find_split(
        &self,
        grads: &[f32],
        rows: &[u32],
        grad_sum: f64,
        hess_sum: f64,
    ) -> Option<SplitCandidate> {
        (0..self.table.n_cols() as u32)
            .into_par_iter()
            .filter_map(|feature| {
                self.best_split_for_feature(feature, grads, rows, grad_sum, hess_sum)
            })
            .max_by(|a, b| {
                a.gain
                    .total_cmp(&b.gain)
                    // Equal gains: prefer the lower feature index so results
                    // do not depend on the parallel reduction shape.
                    .then_with(|| b.feature.cmp(&a.feature))
            })
    }

    fn best_split_for_feature(
        &self,
        feature: u32,
        grads: &[f32],
        rows: &[u32],
        grad_sum: f64,
        hess_sum: f64,
    ) -> Option<SplitCandidate> {
        let column = self.table.column(feature as usize);

        let mut sorted: Vec<(f32, f32)> = rows
            .iter()
            .map(|&r| (column[r as usize], grads[r as usize]))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let min_child = self.params.min_child_weight as f64;
        let parent_score = score(grad_sum, hess_sum, self.params.reg_lambda);

        let mut best: Option<SplitCandidate> = None;
        let mut left_grad = 0.0f64;
        let mut left_hess = 0.0f64;

        for i in 1..sorted.len() {
            left_grad += sorted[i - 1].1 as f64;
            left_hess += 1.0;

            // A threshold only separates rows between distinct values.
            if sorted[i].0 <= sorted[i - 1].0 {
                continue;
            }
            let right_hess = hess_sum - left_hess;
            if left_hess < min_child || right_hess < min_child {
                continue;
            }

            let right_grad = grad_sum - left_grad;
            let gain = 0.5
                * (score(left_grad, left_hess, self.params.reg_lambda)
                    + score(right_grad, right_hess, self.params.reg_lambda)
                    - parent_score);

            if gain > self.params.min_gain && best.map_or(true, |b| gain > b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: 0.5 * (sorted[i - 1].0 + sorted[i].0),
                    gain,
                });
            }
        }
        best
    }
}

/// Similarity score G²/(H + λ) used by the split gain.
#[inline]
fn score(grad_sum: f64, hess_sum: f64, reg_lambda: f32) -> f64 {
    (grad_sum * grad_sum) / (hess_sum + reg_lambda as f64)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn params() -> GrowerParams {
        GrowerParams {
            max_depth: 6,
            reg_lambda: 0.0,
            min_child_weight: 1.0,
            min_gain: 0.0,
            learning_rate: 1.0,
        }
    }

    /// One feature that cleanly separates two gradient clusters.
    fn step_table() -> Table {
        Table::new(
            vec!["x0".into()],
            array![[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]],
        )
    }

    #[test]
    fn finds_the_obvious_split() {
        let table = step_table();
        // Gradients of -1 on the low cluster, +1 on the high cluster.
        let grads = vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let grower = TreeGrower::new(&table, params());

        let tree = grower.grow(&grads, (0..6).collect());
        assert!(tree.n_nodes() > 1, "should have split the root");
        assert_eq!(tree.split_feature(0), 0);
        let threshold = tree.split_threshold(0);
        assert!(threshold > 2.0 && threshold < 10.0, "got {threshold}");
    }

    #[test]
    fn leaf_values_are_negative_mean_gradient() {
        let table = step_table();
        let grads = vec![-2.0, -2.0, -2.0, 4.0, 4.0, 4.0];
        let grower = TreeGrower::new(&table, params());

        let tree = grower.grow(&grads, (0..6).collect());
        // Left leaf corrects by +2, right leaf by -4 (lambda = 0).
        assert!((tree.predict(|_| 0.0) - 2.0).abs() < 1e-6);
        assert!((tree.predict(|_| 12.0) + 4.0).abs() < 1e-6);
    }

    #[test]
    fn constant_feature_yields_single_leaf() {
        let table = Table::new(vec!["x0".into()], array![[5.0, 5.0, 5.0, 5.0]]);
        let grads = vec![-1.0, 1.0, -1.0, 1.0];
        let grower = TreeGrower::new(&table, params());

        let tree = grower.grow(&grads, (0..4).collect());
        assert_eq!(tree.n_nodes(), 1);
        assert!(tree.is_leaf(0));
    }

    #[test]
    fn max_depth_zero_is_a_stump_leaf() {
        let table = step_table();
        let grads = vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let grower = TreeGrower::new(
            &table,
            GrowerParams {
                max_depth: 0,
                ..params()
            },
        );

        let tree = grower.grow(&grads, (0..6).collect());
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn min_child_weight_blocks_small_children() {
        let table = step_table();
        let grads = vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let grower = TreeGrower::new(
            &table,
            GrowerParams {
                min_child_weight: 4.0,
                ..params()
            },
        );

        // Any split leaves a child with 3 < 4 rows on one side.
        let tree = grower.grow(&grads, (0..6).collect());
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn learning_rate_shrinks_leaves() {
        let table = step_table();
        let grads = vec![-2.0, -2.0, -2.0, 2.0, 2.0, 2.0];
        let grower = TreeGrower::new(
            &table,
            GrowerParams {
                learning_rate: 0.1,
                ..params()
            },
        );

        let tree = grower.grow(&grads, (0..6).collect());
        assert!((tree.predict(|_| 0.0) - 0.2).abs() < 1e-6);
    }
}
