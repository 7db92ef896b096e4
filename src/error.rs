use thiserror::Error;


/// Failure while mapping symbols to codewords.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {

    /// The symbol at `position` of the input has no entry in the frequency table.
    /// No partial output is returned.
    #[error("symbol at position {position} has no entry in the frequency table")]
    MissingSymbol { position: usize }

}


/// Failure while walking the tree with an encoded stream.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {

    /// The stream ran out of bits in the middle of a codeword.
    #[error("encoded stream ends mid-codeword after {consumed} bits ({decoded} symbols decoded)")]
    StreamTruncated { consumed: usize, decoded: usize }

}


/// Failure while reading an encoded stream from its text or byte rendering.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamParseError {

    #[error("invalid bit {found:?} at position {position}, expected '0' or '1'")]
    InvalidBit { position: usize, found: char },

    #[error("padded byte buffer is empty, expected a leading padding byte")]
    MissingPadding,

    #[error("invalid padding of {0} bits")]
    InvalidPadding (u8)

}
