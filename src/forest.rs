//! Boosted tree forest representation.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage for efficient traversal
//! - [`Forest`]: Tree list + base score, summing to a raw margin
//! - [`TreeValidationError`]: Structural validation errors
//!
//! Trees are validated once when the artifact is loaded and never mutated
//! afterwards. Splits are numeric only: categorical inputs reach the model
//! as dense label codes and are split on like any other number, exactly as
//! they were during training.

// Allow many constructor arguments for creating trees with all their fields.
#![allow(clippy::too_many_arguments)]

/// Node index within a tree. The root is node 0.
pub type NodeId = u32;

/// Child sentinel: a child of 0 marks a leaf, since the root can never be
/// a child of a valid node.
const NO_CHILD: NodeId = 0;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,

    /// A per-node array is not sized to the node count.
    #[error("{array} has length {len}, expected {n_nodes} nodes")]
    LengthMismatch {
        array: &'static str,
        len: usize,
        n_nodes: usize,
    },

    /// A child pointer references an out-of-bounds node.
    #[error("node {node}: {side} child {child} out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    /// A node has exactly one child sentinel; leaves must have neither child.
    #[error("node {node} has one leaf child and one real child")]
    LeafChildMismatch { node: NodeId },

    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },

    /// A node was reached by more than one path (DAG) or due to a cycle.
    #[error("node {node} reached more than once")]
    DuplicateVisit { node: NodeId },

    /// A node exists in storage but is unreachable from the root.
    #[error("node {node} unreachable from root")]
    UnreachableNode { node: NodeId },

    /// A split references a feature column the model does not have.
    #[error("node {node}: split index {index} out of bounds ({n_features} features)")]
    SplitIndexOutOfBounds {
        node: NodeId,
        index: u32,
        n_features: usize,
    },
}

/// A single decision tree in SoA layout.
///
/// All arrays are indexed by [`NodeId`] and have the same length. Internal
/// nodes carry a split (feature index, threshold, children, default
/// direction for NaN); leaves carry a scalar output value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Vec<u32>,
    thresholds: Vec<f32>,
    children_left: Vec<NodeId>,
    children_right: Vec<NodeId>,
    default_left: Vec<bool>,
    leaf_values: Vec<f32>,
}

impl Tree {
    /// Create a tree from its per-node arrays, validating structure.
    ///
    /// `n_features` bounds the split indices; it is the model's input width,
    /// not a property of the tree itself.
    ///
    /// # Errors
    ///
    /// Returns [`TreeValidationError`] if the arrays disagree on node count,
    /// any child pointer is malformed, the node graph is not a tree rooted
    /// at node 0, or a split references a missing feature column.
    pub fn new(
        split_indices: Vec<u32>,
        thresholds: Vec<f32>,
        children_left: Vec<NodeId>,
        children_right: Vec<NodeId>,
        default_left: Vec<bool>,
        leaf_values: Vec<f32>,
        n_features: usize,
    ) -> Result<Self, TreeValidationError> {
        let tree = Self {
            split_indices,
            thresholds,
            children_left,
            children_right,
            default_left,
            leaf_values,
        };
        tree.validate(n_features)?;
        Ok(tree)
    }

    /// A single-leaf tree producing a constant output.
    pub fn leaf(value: f32) -> Self {
        Self {
            split_indices: vec![0],
            thresholds: vec![0.0],
            children_left: vec![NO_CHILD],
            children_right: vec![NO_CHILD],
            default_left: vec![false],
            leaf_values: vec![value],
        }
    }

    /// Number of nodes (internal + leaves).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.children_left[node as usize] == NO_CHILD
    }

    /// Leaf output value. Meaningful only at leaves.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Traverse from the root to a leaf for one sample.
    ///
    /// NaN feature values follow the node's default direction; otherwise
    /// `value < threshold` goes left.
    #[inline]
    pub fn traverse(&self, features: &[f32]) -> NodeId {
        let mut node = 0u32;

        while !self.is_leaf(node) {
            let i = node as usize;
            let fvalue = features[self.split_indices[i] as usize];

            node = if fvalue.is_nan() {
                if self.default_left[i] {
                    self.children_left[i]
                } else {
                    self.children_right[i]
                }
            } else if fvalue < self.thresholds[i] {
                self.children_left[i]
            } else {
                self.children_right[i]
            };
        }

        node
    }

    /// Tree output for one sample.
    #[inline]
    pub fn value(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.traverse(features))
    }

    fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let arrays: [(&'static str, usize); 5] = [
            ("split_indices", self.split_indices.len()),
            ("thresholds", self.thresholds.len()),
            ("children_right", self.children_right.len()),
            ("default_left", self.default_left.len()),
            ("leaf_values", self.leaf_values.len()),
        ];
        for (array, len) in arrays {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch {
                    array,
                    len,
                    n_nodes,
                });
            }
        }

        // Walk from the root, checking every edge once.
        let mut visited = vec![false; n_nodes];
        let mut stack = vec![0u32];
        while let Some(node) = stack.pop() {
            let i = node as usize;
            if visited[i] {
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            visited[i] = true;

            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == NO_CHILD || right == NO_CHILD {
                if left != right {
                    return Err(TreeValidationError::LeafChildMismatch { node });
                }
                continue; // leaf
            }

            if self.split_indices[i] as usize >= n_features {
                return Err(TreeValidationError::SplitIndexOutOfBounds {
                    node,
                    index: self.split_indices[i],
                    n_features,
                });
            }

            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
                if child == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                stack.push(child);
            }
        }

        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(TreeValidationError::UnreachableNode {
                node: node as NodeId,
            });
        }

        Ok(())
    }
}

/// A validated tree ensemble.
///
/// The forest's raw output for a sample is
/// `base_score + sum(tree.value(sample))`; the output transform that turns
/// this margin into a probability lives in [`crate::model`].
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
    n_features: usize,
}

impl Forest {
    /// Create a forest from validated trees.
    pub fn new(trees: Vec<Tree>, base_score: f32, n_features: usize) -> Self {
        Self {
            trees,
            base_score,
            n_features,
        }
    }

    /// Expected input width.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Base score added to every prediction.
    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    /// Raw margin for one sample. The caller guarantees
    /// `features.len() == n_features()`.
    pub fn margin(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.n_features);
        self.base_score + self.trees.iter().map(|t| t.value(features)).sum::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root split on feature 0 at 5.0: left leaf 1.0, right leaf -1.0.
    fn stump() -> Tree {
        Tree::new(
            vec![0, 0, 0],
            vec![5.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, -1.0],
            4,
        )
        .unwrap()
    }

    #[test]
    fn traverses_numeric_split() {
        let tree = stump();
        assert_eq!(tree.value(&[3.0, 0.0, 0.0, 0.0]), 1.0);
        assert_eq!(tree.value(&[5.0, 0.0, 0.0, 0.0]), -1.0); // >= goes right
        assert_eq!(tree.value(&[7.5, 0.0, 0.0, 0.0]), -1.0);
    }

    #[test]
    fn nan_follows_default_direction() {
        let tree = stump();
        assert_eq!(tree.value(&[f32::NAN, 0.0, 0.0, 0.0]), 1.0); // default_left
    }

    #[test]
    fn single_leaf_tree() {
        let tree = Tree::leaf(0.25);
        assert_eq!(tree.n_nodes(), 1);
        assert!(tree.is_leaf(0));
        assert_eq!(tree.value(&[1.0, 2.0]), 0.25);
    }

    #[test]
    fn forest_sums_base_and_trees() {
        let forest = Forest::new(vec![stump(), Tree::leaf(0.5)], -0.25, 4);
        // 1.0 (left leaf) + 0.5 + base -0.25
        assert_eq!(forest.margin(&[1.0, 0.0, 0.0, 0.0]), 1.25);
        assert_eq!(forest.n_trees(), 2);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn rejects_empty_tree() {
        let err = Tree::new(vec![], vec![], vec![], vec![], vec![], vec![], 4).unwrap_err();
        assert_eq!(err, TreeValidationError::EmptyTree);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Tree::new(
            vec![0, 0, 0],
            vec![5.0, 0.0], // short
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, -1.0],
            4,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TreeValidationError::LengthMismatch {
                array: "thresholds",
                ..
            }
        ));
    }

    #[test]
    fn rejects_child_out_of_bounds() {
        let err = Tree::new(
            vec![0, 0, 0],
            vec![5.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![9, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, -1.0],
            4,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TreeValidationError::ChildOutOfBounds { side: "right", .. }
        ));
    }

    #[test]
    fn rejects_half_leaf_node() {
        // Left child is the leaf sentinel but right is a real node.
        let err = Tree::new(
            vec![0, 0],
            vec![5.0, 0.0],
            vec![0, 0],
            vec![1, 0],
            vec![true, false],
            vec![0.0, 1.0],
            4,
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::LeafChildMismatch { node: 0 });
    }

    #[test]
    fn rejects_shared_child() {
        let err = Tree::new(
            vec![0, 0],
            vec![5.0, 0.0],
            vec![1, 0],
            vec![1, 0],
            vec![true, false],
            vec![0.0, 1.0],
            4,
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::DuplicateVisit { node: 1 });
    }

    #[test]
    fn rejects_self_loop() {
        // Node 1 points back to itself on the left.
        let err = Tree::new(
            vec![0, 1, 0, 0],
            vec![5.0, 2.0, 0.0, 0.0],
            vec![1, 1, 0, 0],
            vec![2, 3, 0, 0],
            vec![true, true, false, false],
            vec![0.0, 0.0, -1.0, 0.5],
            4,
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::SelfLoop { node: 1 });
    }

    #[test]
    fn rejects_unreachable_node() {
        // Node 3 exists but no edge reaches it.
        let err = Tree::new(
            vec![0, 0, 0, 0],
            vec![5.0, 0.0, 0.0, 0.0],
            vec![1, 0, 0, 0],
            vec![2, 0, 0, 0],
            vec![true, false, false, false],
            vec![0.0, 1.0, -1.0, 0.5],
            4,
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::UnreachableNode { node: 3 });
    }

    #[test]
    fn rejects_split_index_out_of_bounds() {
        let err = Tree::new(
            vec![4, 0, 0],
            vec![5.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![true, false, false],
            vec![0.0, 1.0, -1.0],
            4,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TreeValidationError::SplitIndexOutOfBounds { index: 4, .. }
        ));
    }
}
