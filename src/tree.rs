use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;


/// Index of a node inside the arena of a [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {

    pub const fn index(self) -> usize {
        self.0
    }

}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {

    Internal { weight: usize, left: NodeId, right: NodeId },
    Leaf { weight: usize, symbol: T },

}

impl<T> Node<T> {

    pub const fn weight(&self) -> usize {
        match self {
            Node::Internal { weight, .. } |
            Node::Leaf { weight, .. }
                => *weight
        }
    }


    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

}


/// Prefix-code tree built from a frequency table.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Children are
/// stored in the internal nodes, parents in a side table that is written once
/// while merging and only read when deriving codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<T> {

    nodes: Vec<Node<T>>,
    parents: Vec<Option<NodeId>>,
    /// Leaves in ascending symbol order
    leaves: Vec<NodeId>,
    /// `None` only for an empty frequency table
    root: Option<NodeId>

}

impl<T> HuffmanTree<T>
where
    T: Ord + Clone
{

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// The first node taken out of the queue becomes the left child. Nodes of
    /// equal weight leave the queue in the order they entered it, and leaves
    /// enter it in ascending symbol order, so equal tables always yield equal
    /// trees.
    pub fn build(table: &FrequencyTable<T>) -> Self {

        let distinct = table.len();

        let mut tree = Self {
            nodes: Vec::with_capacity((2 * distinct).saturating_sub(1)),
            parents: Vec::with_capacity((2 * distinct).saturating_sub(1)),
            leaves: Vec::with_capacity(distinct),
            root: None
        };

        let mut queue = BinaryHeap::with_capacity(distinct);
        let mut sequence: usize = 0;

        for (symbol, count) in table.iter() {

            let id = tree.push(Node::Leaf { weight: count, symbol: symbol.clone() });
            tree.leaves.push(id);

            queue.push(Reverse((count, sequence, id)));
            sequence += 1;
        }

        loop {

            let Some(Reverse((left_weight, _, left))) = queue.pop() else {
                break;
            };

            let Some(Reverse((right_weight, _, right))) = queue.pop() else {
                // Last node standing
                tree.root = Some(left);
                break;
            };

            let weight = left_weight.saturating_add(right_weight);
            let merged = tree.push(Node::Internal { weight, left, right });

            tree.parents[left.0] = Some(merged);
            tree.parents[right.0] = Some(merged);

            queue.push(Reverse((weight, sequence, merged)));
            sequence += 1;
        }

        tree
    }

}

impl<T> HuffmanTree<T> {

    fn push(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(None);
        id
    }


    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }


    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }


    /// Total number of nodes, leaves included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }


    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }


    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }


    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }


    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn weight(&self, id: NodeId) -> usize {
        self.node(id).weight()
    }


    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }


    /// Follows the edge labelled `bit` out of `id`. Leaves have no edges.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this tree.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
            Node::Leaf { .. } => None
        }
    }


    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {

        let mut depth = 0;
        let mut node = id;

        while let Some(parent) = self.parent(node) {
            node = parent;
            depth += 1;
        }

        depth
    }


    /// Symbols under `id`, left to right.
    pub fn subtree_symbols(&self, id: NodeId) -> Vec<&T> {

        let mut symbols = Vec::new();
        let mut stack = vec![id];

        while let Some(node) = stack.pop() {
            match self.node(node) {
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                },
                Node::Leaf { symbol, .. } => symbols.push(symbol)
            }
        }

        symbols
    }

}
