//! Huffman tree construction.
//!
//! Leaves are merged bottom-up through a binary min-heap. Every heap entry is
//! keyed by `(weight, smallest symbol in the subtree)`; subtrees never share
//! symbols, so no two keys compare equal and the merge order is fully
//! determined by the input frequencies.
//!
//! ## Tie-break
//! - Lower weight is extracted first.
//! - Equal weights: the subtree holding the lower symbol value is extracted first.
//! - The first node extracted becomes the left child (bit `0`), the second the
//!   right child (bit `1`).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Binary tree node. Children are exclusively owned by their parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Symbol count for a leaf, sum of the children for an internal node.
    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Depth of the deepest leaf below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Heap candidate: a subtree plus the smallest symbol it contains.
#[derive(Debug)]
struct Candidate {
    weight: u64,
    min_symbol: u8,
    node: Node,
}

impl Candidate {
    fn merge(first: Self, second: Self) -> Result<Self> {
        let weight = first
            .weight
            .checked_add(second.weight)
            .ok_or_else(|| HuffmanError::TreeConstruction("weight overflow".into()))?;

        Ok(Self {
            weight,
            min_symbol: first.min_symbol.min(second.min_symbol),
            node: Node::Internal {
                weight,
                left: Box::new(first.node),
                right: Box::new(second.node),
            },
        })
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.min_symbol).cmp(&(other.weight, other.min_symbol))
    }
}

/// Rooted Huffman tree with one leaf per distinct input symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Runs in O(N log N) for N distinct symbols.
    ///
    /// # Errors
    /// - [`HuffmanError::EmptyAlphabet`] if the table has no symbols
    /// - [`HuffmanError::TreeConstruction`] if the heap is left in an invalid state
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut heap: BinaryHeap<Reverse<Candidate>> = frequencies
            .iter()
            .map(|entry| {
                Reverse(Candidate {
                    weight: entry.count,
                    min_symbol: entry.symbol,
                    node: Node::Leaf {
                        weight: entry.count,
                        symbol: entry.symbol,
                    },
                })
            })
            .collect();

        if heap.is_empty() {
            return Err(HuffmanError::EmptyAlphabet);
        }

        while heap.len() > 1 {
            let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) else {
                return Err(HuffmanError::TreeConstruction(
                    "heap drained during merge".into(),
                ));
            };
            heap.push(Reverse(Candidate::merge(first, second)?));
        }

        let Reverse(root) = heap
            .pop()
            .ok_or_else(|| HuffmanError::TreeConstruction("no root left in heap".into()))?;

        let tree = Self { root: root.node };
        tracing::debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            weight = tree.root.weight(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Root node; a single leaf when the input had one distinct symbol.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of distinct symbols in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
