use std::collections::BTreeMap;
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};


/// Path from the root to a leaf, one bit per edge: `false` for left, `true` for right.
///
/// While no subtree weight saturates, a path of 128 edges would need a total
/// weight beyond `usize::MAX`, so the path fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {

    /// The path, right-aligned. The root-most edge is the highest meaningful bit
    bits: u128,
    /// How many bits have meaning
    len: u8

}

impl Codeword {

    pub const fn new_empty() -> Self {
        Self {
            bits: 0,
            len: 0
        }
    }


    /// Adds the edge just above the current path.
    const fn step_up(self, right: bool) -> Self {
        debug_assert!(self.len < 128, "codeword longer than 128 bits");
        Self {
            bits: self.bits | ((right as u128) << self.len),
            len: self.len + 1
        }
    }


    pub const fn len(&self) -> usize {
        self.len as usize
    }


    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }


    /// Bits in transmission order, root first.
    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len)
            .rev()
            .map(|i| (self.bits & (1_u128 << i)) != 0)
    }


    pub const fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.len <= other.len
            && (self.len == 0 || other.bits >> (other.len - self.len) == self.bits)
    }

}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}


/// Codeword of every leaf of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordTable<T> {

    codewords: BTreeMap<T, Codeword>

}

impl<T> CodewordTable<T>
where
    T: Ord + Clone
{

    /// Walks every leaf up to the root, reading which side of its parent each
    /// node hangs from.
    ///
    /// A lone root leaf has no edges and gets the one-bit codeword `0`, so that
    /// every symbol still costs one bit in the stream.
    pub fn build(tree: &HuffmanTree<T>) -> Self {

        let mut codewords = BTreeMap::new();

        for &leaf in tree.leaves() {

            let mut codeword = Codeword::new_empty();
            let mut node = leaf;

            while let Some(parent) = tree.parent(node) {
                let right = tree.child(parent, true) == Some(node);
                codeword = codeword.step_up(right);
                node = parent;
            }

            if codeword.is_empty() {
                codeword = codeword.step_up(false);
            }

            if let Node::Leaf { symbol, .. } = tree.node(leaf) {
                codewords.insert(symbol.clone(), codeword);
            }
        }

        Self { codewords }
    }

}

impl<T> CodewordTable<T>
where
    T: Ord
{

    pub fn get(&self, symbol: &T) -> Option<&Codeword> {
        self.codewords.get(symbol)
    }


    pub fn len(&self) -> usize {
        self.codewords.len()
    }


    pub fn is_empty(&self) -> bool {
        self.codewords.is_empty()
    }


    pub fn iter(&self) -> impl Iterator<Item = (&T, &Codeword)> + '_ {
        self.codewords.iter()
    }


    /// Whether no codeword is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {

        let codewords: Vec<&Codeword> = self.codewords.values().collect();

        codewords.iter().enumerate().all(|(i, a)| {
            codewords[i + 1..].iter()
                .all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }


    /// Number of bits needed to encode a sequence with the given statistics.
    /// Symbols without a codeword are not counted. Saturates at `usize::MAX`.
    pub fn weighted_length(&self, table: &FrequencyTable<T>) -> usize {
        table.iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|codeword| count.saturating_mul(codeword.len())))
            .fold(0, |acc: usize, bits| acc.saturating_add(bits))
    }

}
