//! Huffman coding over arbitrary ordered symbols.
//!
//! A [`FrequencyTable`] fully determines the coding tree, so the encoder and
//! the decoder only need to share the table, never the tree itself.
//!
//! ```
//! use huffman_codes::{decode, encode, statistics};
//!
//! let text = "abracadabra";
//! let table = statistics(text.chars());
//!
//! let encoded = encode(text.chars(), &table)?;
//! assert_eq!(encoded.len(), 23);
//!
//! let decoded: String = decode(&encoded, &table)?.into_iter().collect();
//! assert_eq!(decoded, text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bitvec;
mod codec;
mod codeword;
mod error;
mod frequency;
mod tree;

pub use bitvec::{least_bytes_repr_for_bits, BitIterator, EncodedStream};
pub use codec::HuffmanCodec;
pub use codeword::{Codeword, CodewordTable};
pub use error::{DecodeError, EncodeError, StreamParseError};
pub use frequency::{statistics, FrequencyTable};
pub use tree::{HuffmanTree, Node, NodeId};


/// Encodes `data` with a tree freshly built from `table`.
///
/// Every symbol of `data` must have an entry in `table`.
pub fn encode<T>(data: impl IntoIterator<Item = T>, table: &FrequencyTable<T>) -> Result<EncodedStream, EncodeError>
where
    T: Ord + Clone
{

    let mut data = data.into_iter().peekable();

    if data.peek().is_none() {
        return Ok(EncodedStream::new());
    }

    HuffmanCodec::new(table).encode(data)
}


/// Decodes `encoded` with a tree freshly built from `table`, which must be the
/// table the stream was encoded with.
pub fn decode<T>(encoded: &EncodedStream, table: &FrequencyTable<T>) -> Result<Vec<T>, DecodeError>
where
    T: Ord + Clone
{

    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    HuffmanCodec::new(table).decode(encoded)
}
