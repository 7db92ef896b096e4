use crate::bitvec::EncodedStream;
use crate::codeword::CodewordTable;
use crate::error::{DecodeError, EncodeError};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node, NodeId};


/// Outcome of feeding one bit to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState<'a, T> {

    /// The cursor moved to an internal node
    Traversing (NodeId),
    /// The cursor reached a leaf and the symbol is complete
    Hit (&'a T)

}


/// Tree and codeword table for one frequency table.
///
/// Nothing is mutated after construction, so a codec can be shared between
/// threads and used for any number of encode and decode calls.
#[derive(Debug, Clone)]
pub struct HuffmanCodec<T> {

    tree: HuffmanTree<T>,
    codewords: CodewordTable<T>

}

impl<T> HuffmanCodec<T>
where
    T: Ord + Clone
{

    pub fn new(table: &FrequencyTable<T>) -> Self {

        let tree = HuffmanTree::build(table);
        let codewords = CodewordTable::build(&tree);

        Self {
            tree,
            codewords
        }
    }


    pub const fn tree(&self) -> &HuffmanTree<T> {
        &self.tree
    }


    pub const fn codewords(&self) -> &CodewordTable<T> {
        &self.codewords
    }


    /// Concatenates the codewords of `data` in order.
    ///
    /// Fails on the first symbol that has no codeword; nothing is returned for
    /// the symbols before it.
    pub fn encode(&self, data: impl IntoIterator<Item = T>) -> Result<EncodedStream, EncodeError> {

        let mut encoded = EncodedStream::new();

        for (position, symbol) in data.into_iter().enumerate() {

            let codeword = self.codewords.get(&symbol)
                .ok_or(EncodeError::MissingSymbol { position })?;

            encoded.extend_from_codeword(codeword);
        }

        Ok(encoded)
    }


    /// Walks the tree from the root, one edge per bit, emitting a symbol and
    /// returning to the root at every leaf.
    ///
    /// The stream must end exactly at a codeword boundary. A codec built from
    /// an empty table has no root and decodes everything to nothing.
    pub fn decode(&self, encoded: &EncodedStream) -> Result<Vec<T>, DecodeError> {

        let Some(root) = self.tree.root() else {
            return Ok(Vec::new());
        };

        let mut decoded = Vec::new();
        let mut cursor = root;

        for bit in encoded.iter_bits() {
            match self.step(cursor, bit) {

                DecodeState::Traversing(next) => {
                    cursor = next;
                },

                DecodeState::Hit(symbol) => {
                    decoded.push(symbol.clone());
                    cursor = root;
                },
            }
        }

        if cursor != root {
            return Err(DecodeError::StreamTruncated {
                consumed: encoded.len(),
                decoded: decoded.len()
            });
        }

        Ok(decoded)
    }


    fn step(&self, cursor: NodeId, bit: bool) -> DecodeState<'_, T> {

        match self.tree.node(cursor) {

            Node::Internal { left, right, .. } => {

                let next = if bit { *right } else { *left };

                match self.tree.node(next) {
                    Node::Internal { .. } => DecodeState::Traversing(next),
                    Node::Leaf { symbol, .. } => DecodeState::Hit(symbol)
                }
            },

            // Only a lone root leaf is ever the cursor: each bit is a whole codeword
            Node::Leaf { symbol, .. } => DecodeState::Hit(symbol)
        }
    }

}


#[cfg(test)]
mod tests {

    use std::thread;

    use super::*;
    use crate::frequency::statistics;


    #[test]
    fn small_coherency() {

        let text = "He";

        let codec = HuffmanCodec::new(&statistics(text.chars()));

        let compressed = codec.encode(text.chars()).unwrap();
        assert_eq!(compressed.len(), 2);

        let decoded: String = codec.decode(&compressed)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(text, decoded);
    }


    #[test]
    fn abracadabra_stream() {

        let codec = HuffmanCodec::new(&statistics("abracadabra".chars()));

        let encoded = codec.encode("abracadabra".chars()).unwrap();

        // a=0 b=110 r=111 c=100 d=101
        assert_eq!(encoded.to_string(), "01101110100010101101110");
        assert_eq!(encoded.len(), 23);
    }


    #[test]
    fn missing_symbol() {

        let codec = HuffmanCodec::new(&statistics("abc".chars()));

        assert_eq!(
            codec.encode("abxcy".chars()),
            Err(EncodeError::MissingSymbol { position: 2 })
        );
    }


    #[test]
    fn empty_table() {

        let codec = HuffmanCodec::<char>::new(&FrequencyTable::new());

        assert_eq!(codec.encode("".chars()), Ok(EncodedStream::new()));
        assert_eq!(codec.encode("a".chars()), Err(EncodeError::MissingSymbol { position: 0 }));
        assert_eq!(codec.decode(&"0110".parse().unwrap()), Ok(Vec::new()));
    }


    #[test]
    fn truncated_stream() {

        let codec = HuffmanCodec::new(&statistics("abracadabra".chars()));

        // "0" is a whole 'a', "1" and "11" stop inside the tree
        assert_eq!(codec.decode(&"0".parse().unwrap()), Ok(vec!['a']));
        assert_eq!(
            codec.decode(&"1".parse().unwrap()),
            Err(DecodeError::StreamTruncated { consumed: 1, decoded: 0 })
        );
        assert_eq!(
            codec.decode(&"011".parse().unwrap()),
            Err(DecodeError::StreamTruncated { consumed: 3, decoded: 1 })
        );
    }


    #[test]
    fn lone_symbol_reads_one_bit_per_symbol() {

        let codec = HuffmanCodec::new(&statistics("aaaaa".chars()));

        let encoded = codec.encode("aaaaa".chars()).unwrap();
        assert_eq!(encoded.to_string(), "00000");

        assert_eq!(codec.decode(&encoded).unwrap(), vec!['a'; 5]);
    }


    #[test]
    fn shared_between_threads() {

        let text = "the quick brown fox jumps over the lazy dog";
        let codec = HuffmanCodec::new(&statistics(text.chars()));
        let expected = codec.encode(text.chars()).unwrap();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let encoded = codec.encode(text.chars()).unwrap();
                    assert_eq!(encoded, expected);
                    assert_eq!(codec.decode(&encoded).unwrap().into_iter().collect::<String>(), text);
                });
            }
        });
    }

}
