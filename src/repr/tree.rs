//! Regression tree storage (SoA) and traversal.
//!
//! Nodes are stored in parallel arrays indexed by [`NodeId`]. The root is
//! always node 0. Split nodes route a sample left when
//! `feature_value < threshold`, right otherwise (NaN compares false and
//! therefore goes right).

/// Index of a node within a tree.
pub type NodeId = u32;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// The parallel arrays disagree on node count.
    #[error("node array length mismatch: expected {expected}, found {found}")]
    ArrayLenMismatch { expected: usize, found: usize },

    /// A split node points at a child outside the tree.
    #[error("node {node}: child {child} out of range ({n_nodes} nodes)")]
    ChildOutOfRange { node: NodeId, child: NodeId, n_nodes: usize },

    /// A split node's child does not come after it in the arrays.
    ///
    /// Children at strictly greater indices rule out cycles: every
    /// traversal step moves forward, so it must end at a leaf.
    #[error("node {node}: child {child} does not follow its parent")]
    ChildNotForward { node: NodeId, child: NodeId },

    /// Trees must have at least one node (a leaf).
    #[error("tree has no nodes")]
    NoNodes,
}

/// A single regression tree in structure-of-arrays layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_features: Vec<u32>,
    thresholds: Vec<f32>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
}

impl Tree {
    /// Create an empty tree. Nodes are appended during growth.
    pub fn new() -> Self {
        Self {
            split_features: Vec::new(),
            thresholds: Vec::new(),
            left_children: Vec::new(),
            right_children: Vec::new(),
            is_leaf: Vec::new(),
            leaf_values: Vec::new(),
        }
    }

    /// Rebuild a tree from its parallel arrays, validating structure.
    pub fn from_arrays(
        split_features: Vec<u32>,
        thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
    ) -> Result<Self, TreeValidationError> {
        let n = split_features.len();
        for len in [
            thresholds.len(),
            left_children.len(),
            right_children.len(),
            is_leaf.len(),
            leaf_values.len(),
        ] {
            if len != n {
                return Err(TreeValidationError::ArrayLenMismatch {
                    expected: n,
                    found: len,
                });
            }
        }
        let tree = Self {
            split_features,
            thresholds,
            left_children,
            right_children,
            is_leaf,
            leaf_values,
        };
        tree.validate()?;
        Ok(tree)
    }

    /// Append a leaf node, returning its id.
    pub fn push_leaf(&mut self, value: f32) -> NodeId {
        let id = self.n_nodes() as NodeId;
        self.split_features.push(0);
        self.thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.leaf_values.push(value);
        id
    }

    /// Append a split node with children unset, returning its id.
    ///
    /// Children are attached with [`set_children`](Self::set_children) once
    /// the subtrees have been grown.
    pub fn push_split(&mut self, feature: u32, threshold: f32) -> NodeId {
        let id = self.n_nodes() as NodeId;
        self.split_features.push(feature);
        self.thresholds.push(threshold);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(false);
        self.leaf_values.push(0.0);
        id
    }

    /// Attach children to a previously pushed split node.
    pub fn set_children(&mut self, node: NodeId, left: NodeId, right: NodeId) {
        self.left_children[node as usize] = left;
        self.right_children[node as usize] = right;
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Leaf value at a leaf node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Feature index of a split node.
    #[inline]
    pub fn split_feature(&self, node: NodeId) -> u32 {
        self.split_features[node as usize]
    }

    /// Threshold of a split node.
    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.thresholds[node as usize]
    }

    /// Walk a sample from the root to a leaf.
    ///
    /// `feature` maps a feature index to the sample's value for it.
    #[inline]
    pub fn traverse<F: Fn(usize) -> f32>(&self, feature: F) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf[node as usize] {
            let value = feature(self.split_features[node as usize] as usize);
            node = if value < self.thresholds[node as usize] {
                self.left_children[node as usize]
            } else {
                self.right_children[node as usize]
            };
        }
        node
    }

    /// Predict one sample: the value of the leaf it routes to.
    #[inline]
    pub fn predict<F: Fn(usize) -> f32>(&self, feature: F) -> f32 {
        self.leaf_values[self.traverse(feature) as usize]
    }

    /// Validate structural invariants: non-empty, child indices in range,
    /// and children strictly after their parent.
    ///
    /// The forward-children rule is what growth produces (children are
    /// pushed after their split node) and it guarantees [`traverse`]
    /// terminates: a decoded artifact with a self-referencing or backward
    /// child would otherwise loop forever on the first prediction.
    ///
    /// [`traverse`]: Self::traverse
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::NoNodes);
        }
        for node in 0..n_nodes {
            if self.is_leaf[node] {
                continue;
            }
            for child in [self.left_children[node], self.right_children[node]] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfRange {
                        node: node as NodeId,
                        child,
                        n_nodes,
                    });
                }
                if child as usize <= node {
                    return Err(TreeValidationError::ChildNotForward {
                        node: node as NodeId,
                        child,
                    });
                }
            }
        }
        Ok(())
    }

    // Raw array accessors, used by the persistence payload.

    pub fn split_features(&self) -> &[u32] {
        &self.split_features
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    pub fn left_children(&self) -> &[u32] {
        &self.left_children
    }

    pub fn right_children(&self) -> &[u32] {
        &self.right_children
    }

    pub fn leaf_flags(&self) -> &[bool] {
        &self.is_leaf
    }

    pub fn leaf_values(&self) -> &[f32] {
        &self.leaf_values
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
