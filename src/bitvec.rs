use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codeword::Codeword;
use crate::error::StreamParseError;


/// Concatenated codewords of an encoded sequence.
///
/// Bits are packed most significant first. The stream carries no framing: its
/// length in bits is all that is known about where it ends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct EncodedStream {

    /// The actual raw bits
    raw_data: Vec<u8>,
    /// How many bits of padding the last byte contains.
    /// Padding bits are always zero and have no meaning
    last_byte_padding: u8

}

impl EncodedStream {

    pub const fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            last_byte_padding: 0
        }
    }


    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(bit_capacity)),
            last_byte_padding: 0
        }
    }


    /// Length in bits.
    pub fn len(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    /// Number of bytes the packed bits occupy.
    pub fn least_len_bytes(&self) -> usize {
        self.raw_data.len()
    }


    pub fn push_bit(&mut self, bit: bool) {

        if self.last_byte_padding == 0 {

            self.raw_data.push((bit as u8) << 7);
            self.last_byte_padding = 7;

        } else if let Some(last_byte) = self.raw_data.last_mut() {

            // Padding implies a last byte
            *last_byte |= (bit as u8) << (self.last_byte_padding - 1);
            self.last_byte_padding -= 1;
        }
    }


    pub fn extend_from_codeword(&mut self, codeword: &Codeword) {
        for bit in codeword.iter_bits() {
            self.push_bit(bit);
        }
    }


    pub fn iter_bits(&self) -> BitIterator<'_> {
        BitIterator {
            stream: self,
            i: 0
        }
    }


    pub fn from_bools(bools: &[bool]) -> Self {

        let mut res = Self::with_capacity(bools.len());

        for &b in bools {
            res.push_bit(b)
        }

        res
    }


    pub fn to_bools(&self) -> Box<[bool]> {
        self.iter_bits()
            .collect()
    }


    /// Packed bytes preceded by one byte holding the number of padding bits.
    pub fn to_padded_bytes(&self) -> Box<[u8]> {

        let mut buf = Vec::with_capacity(1 + self.least_len_bytes());

        buf.push(self.last_byte_padding);

        buf.extend_from_slice(&self.raw_data);

        buf.into_boxed_slice()
    }


    pub fn from_padded_bytes(input: &[u8]) -> Result<Self, StreamParseError> {

        let (&last_byte_padding, raw_data) = input.split_first()
            .ok_or(StreamParseError::MissingPadding)?;

        let padding_mask = ((1_u16 << last_byte_padding.min(8)) - 1) as u8;

        let valid = match raw_data.last() {
            Some(last_byte) => last_byte_padding < 8 && last_byte & padding_mask == 0,
            None => last_byte_padding == 0
        };

        if !valid {
            return Err(StreamParseError::InvalidPadding(last_byte_padding));
        }

        Ok(Self {
            raw_data: raw_data.to_vec(),
            last_byte_padding
        })
    }

}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for EncodedStream {
    type Err = StreamParseError;

    /// Reads a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {

        let mut res = Self::with_capacity(s.len());

        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => res.push_bit(false),
                '1' => res.push_bit(true),
                _ => return Err(StreamParseError::InvalidBit { position, found })
            }
        }

        Ok(res)
    }
}

impl From<EncodedStream> for Vec<u8> {
    fn from(stream: EncodedStream) -> Self {
        stream.to_padded_bytes().into_vec()
    }
}

impl TryFrom<Vec<u8>> for EncodedStream {
    type Error = StreamParseError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_padded_bytes(&bytes)
    }
}


pub struct BitIterator<'a> {

    stream: &'a EncodedStream,
    i: usize

}

impl<'a> Iterator for BitIterator<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {

        if self.i >= self.stream.len() {
            return None;
        }

        let byte = self.stream.raw_data[self.i / 8];
        let bit_in_byte_i = (self.i % 8) as u8;

        self.i += 1;

        Some(
            (byte & (1_u8 << (7 - bit_in_byte_i))) != 0
        )
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stream.len() - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn check_coherency() {

        let bools = [false, true, false, true, false, true];

        let v = EncodedStream::from_bools(&bools);

        assert_eq!(bools.len(), v.len());
        assert_eq!(v.least_len_bytes(), 1);

        assert_eq!(*v.to_bools(), bools);
    }


    #[test]
    fn check_byte_boundary() {

        let bools = [true, true, false, true, false, true, false, true, true];

        let v = EncodedStream::from_bools(&bools);

        assert_eq!(v.len(), 9);
        assert_eq!(v.least_len_bytes(), 2);
        assert_eq!(v.iter_bits().len(), 9);
        assert_eq!(*v.to_bools(), bools);
        assert_eq!(*v.to_padded_bytes(), [7, 0b1101_0101, 0b1000_0000]);
    }


    #[test]
    fn check_text() {

        let text = "10010100001";

        let v: EncodedStream = text.parse().unwrap();

        assert_eq!(v.len(), text.len());
        assert_eq!(v.to_string(), text);

        assert_eq!("".parse::<EncodedStream>().unwrap(), EncodedStream::new());
        assert_eq!(
            "01x1".parse::<EncodedStream>(),
            Err(StreamParseError::InvalidBit { position: 2, found: 'x' })
        );
    }


    #[test]
    fn check_padded_bytes() {

        let bools = [true, false, false, true, false, true, false, false, false, false, true];

        let v = EncodedStream::from_bools(&bools);

        let ser = v.to_padded_bytes();

        let des = EncodedStream::from_padded_bytes(&ser).unwrap();

        assert_eq!(v, des);

        let empty = EncodedStream::new();
        assert_eq!(EncodedStream::from_padded_bytes(&empty.to_padded_bytes()).unwrap(), empty);
    }


    #[test]
    fn rejects_bad_padding() {

        assert_eq!(EncodedStream::from_padded_bytes(&[]), Err(StreamParseError::MissingPadding));
        assert_eq!(EncodedStream::from_padded_bytes(&[3]), Err(StreamParseError::InvalidPadding(3)));
        assert_eq!(EncodedStream::from_padded_bytes(&[8, 0]), Err(StreamParseError::InvalidPadding(8)));
        assert_eq!(EncodedStream::from_padded_bytes(&[200, 0]), Err(StreamParseError::InvalidPadding(200)));
        assert_eq!(EncodedStream::from_padded_bytes(&[2, 0b1000_0001]), Err(StreamParseError::InvalidPadding(2)));
        assert!(EncodedStream::from_padded_bytes(&[2, 0b1000_0100]).is_ok());
    }


    #[test]
    fn check_serde() {

        let v: EncodedStream = "1101100".parse().unwrap();

        let json = serde_json::to_string(&v).unwrap();

        assert_eq!(json, "[1,216]");
        assert_eq!(serde_json::from_str::<EncodedStream>(&json).unwrap(), v);
        assert!(serde_json::from_str::<EncodedStream>("[9,0]").is_err());
    }

}
