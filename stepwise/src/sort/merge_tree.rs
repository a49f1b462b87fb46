//! Merge sort as an explicit recursion tree.
//!
//! The tree is an arena: nodes live in a `Vec` and refer to their parent
//! and children by index. Nodes are allocated in pre-order, so the arena
//! order is also the order of the `divide` steps.

use crate::step::{SortStep, Step};
use serde::{Deserialize, Serialize};

/// One subarray of the recursion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// First index covered
    pub lo: usize,
    /// Last index covered (inclusive)
    pub hi: usize,
    /// Distance from the root
    pub depth: usize,
    /// Parent arena index
    pub parent: Option<usize>,
    /// Left child arena index
    pub left: Option<usize>,
    /// Right child arena index
    pub right: Option<usize>,
}

impl TreeNode {
    /// Returns true if the node covers a single position
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Returns the last index of the left half
    pub fn mid(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Arena of [`TreeNode`]s covering `0..len`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTree {
    nodes: Vec<TreeNode>,
}

impl MergeTree {
    /// Builds the recursion tree for an array of `len` values
    pub fn build(len: usize) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::new();
        if len == 0 {
            return Self { nodes };
        }

        let mut stack: Vec<(usize, usize, usize, Option<(usize, Side)>)> = vec![(0, len - 1, 0, None)];
        while let Some((lo, hi, depth, link)) = stack.pop() {
            let index = nodes.len();
            if let Some((parent, side)) = link {
                match side {
                    Side::Left => nodes[parent].left = Some(index),
                    Side::Right => nodes[parent].right = Some(index),
                }
            }
            let node = TreeNode {
                lo,
                hi,
                depth,
                parent: link.map(|(parent, _)| parent),
                left: None,
                right: None,
            };
            if !node.is_leaf() {
                let mid = node.mid();
                stack.push((mid + 1, hi, depth + 1, Some((index, Side::Right))));
                stack.push((lo, mid, depth + 1, Some((index, Side::Left))));
            }
            nodes.push(node);
        }

        Self { nodes }
    }

    /// Returns the number of tree nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`
    pub fn get(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    /// Returns the nodes in pre-order (arena order)
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns arena indices in post-order
    pub fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }

        let mut stack = vec![(0usize, false)];
        while let Some((index, expanded)) = stack.pop() {
            let node = &self.nodes[index];
            if expanded || node.is_leaf() {
                order.push(index);
                continue;
            }
            stack.push((index, true));
            stack.extend(node.right.map(|r| (r, false)));
            stack.extend(node.left.map(|l| (l, false)));
        }
        order
    }
}

/// Returns every merge sort step for `values`
///
/// All `divide` steps come first in pre-order, then one `merge` step per
/// internal node in post-order.
pub fn merge_sort_steps(values: &[u32]) -> Vec<Step> {
    let tree = MergeTree::build(values.len());
    let mut array = values.to_vec();
    let mut steps = Vec::with_capacity(tree.len() * 2 + 1);

    for (index, node) in tree.nodes().iter().enumerate() {
        let explanation = if node.is_leaf() {
            format!("Position {} on its own is already sorted", node.lo)
        } else {
            format!(
                "Split {}..{} into {}..{} and {}..{}",
                node.lo,
                node.hi,
                node.lo,
                node.mid(),
                node.mid() + 1,
                node.hi
            )
        };
        steps.push(Step::new(
            SortStep::Divide {
                node: index,
                parent: node.parent,
                lo: node.lo,
                hi: node.hi,
                depth: node.depth,
            },
            explanation,
        ));
    }

    for index in tree.post_order() {
        let Some(node) = tree.get(index).filter(|n| !n.is_leaf()) else {
            continue;
        };
        let mid = node.mid();
        let merged = merge(&array[node.lo..=mid], &array[mid + 1..=node.hi]);
        array[node.lo..=node.hi].copy_from_slice(&merged);
        steps.push(Step::new(
            SortStep::Merge {
                node: index,
                lo: node.lo,
                hi: node.hi,
                merged,
            },
            format!("Merge the sorted halves of {}..{}", node.lo, node.hi),
        ));
    }

    steps.push(Step::new(SortStep::Complete, "Merge sort complete"));
    steps
}

fn merge(left: &[u32], right: &[u32]) -> Vec<u32> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
