//! Forest: an additive ensemble of regression trees.

use super::tree::Tree;

/// Trees plus the base score they correct.
///
/// A prediction is `base_score + sum(tree contributions)`; trees are applied
/// in training order.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
}

impl Forest {
    /// Create an empty forest with the given base score.
    pub fn new(base_score: f32) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    /// Add a tree to the ensemble.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Base score (squared loss: the training-target mean).
    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    /// Get a reference to a specific tree.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over trees in training order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Predict one sample by summing all tree contributions.
    #[inline]
    pub fn predict_row<F: Fn(usize) -> f32 + Copy>(&self, feature: F) -> f32 {
        let mut score = self.base_score;
        for tree in &self.trees {
            score += tree.predict(feature);
        }
        score
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: u32, threshold: f32, left: f32, right: f32) -> Tree {
        let mut tree = Tree::new();
        let root = tree.push_split(feature, threshold);
        let l = tree.push_leaf(left);
        let r = tree.push_leaf(right);
        tree.set_children(root, l, r);
        tree
    }

    #[test]
    fn empty_forest_predicts_base_score() {
        let forest = Forest::new(2.5);
        assert_eq!(forest.predict_row(|_| 0.0), 2.5);
    }

    #[test]
    fn contributions_accumulate() {
        let mut forest = Forest::new(1.0);
        forest.push_tree(stump(0, 0.5, -1.0, 1.0));
        forest.push_tree(stump(0, 0.5, -0.5, 0.5));

        // x0 = 0.2 routes left in both stumps: 1.0 - 1.0 - 0.5
        assert_eq!(forest.predict_row(|_| 0.2), -0.5);
        // x0 = 0.8 routes right in both stumps: 1.0 + 1.0 + 0.5
        assert_eq!(forest.predict_row(|_| 0.8), 2.5);
    }

    #[test]
    fn tree_access() {
        let mut forest = Forest::new(0.0);
        forest.push_tree(stump(1, 2.0, 0.0, 1.0));
        assert_eq!(forest.n_trees(), 1);
        assert_eq!(forest.tree(0).split_feature(0), 1);
    }
}
