//! Fixed-width binary header prepended to a persisted bit array.
//!
//! Layout, big endian throughout:
//!
//! ```text
//! offset 0 : 4 bytes  ASCII magic ("SCBF")
//! offset 4 : 2 bytes  format version
//! offset 6 : 2 bytes  hash function count
//! offset 8 : 4 bytes  bit array length in bits
//! ```
//!
//! The codec only validates the magic; version compatibility is the
//! caller's responsibility.

use thiserror::Error;

/// Identifier marking a persisted artifact as ours.
pub const MAGIC: [u8; 4] = *b"SCBF";

/// Version written by this build of the codec. Passed explicitly at encode
/// call sites rather than kept as mutable process state.
pub const FORMAT_VERSION: u16 = 1;

/// Encoded header size in bytes.
pub const HEADER_SIZE: usize = 12;

/// Decoded form of the 12-byte artifact header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterHeader {
    pub version: u16,
    pub hash_count: u16,
    pub bit_count: u32,
}

/// Errors that can occur while decoding the header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header too short: got {0} bytes, need {HEADER_SIZE}")]
    TooShort(usize),
    #[error("magic mismatch: not a filter artifact")]
    BadMagic,
}

impl FilterHeader {
    pub fn new(version: u16, hash_count: u16, bit_count: u32) -> Self {
        Self {
            version,
            hash_count,
            bit_count,
        }
    }

    /// Number of payload bytes the header claims follow it.
    pub fn payload_len(&self) -> usize {
        (self.bit_count as usize).div_ceil(8)
    }

    /// Encode into the fixed 12-byte big-endian layout.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..6].copy_from_slice(&self.version.to_be_bytes());
        out[6..8].copy_from_slice(&self.hash_count.to_be_bytes());
        out[8..12].copy_from_slice(&self.bit_count.to_be_bytes());
        out
    }

    /// Decode a header from the first 12 bytes of `data`.
    ///
    /// Never returns a partially populated header: truncated input or a
    /// foreign magic is rejected outright.
    pub fn decode(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < HEADER_SIZE {
            return Err(HeaderError::TooShort(data.len()));
        }
        if data[0..4] != MAGIC {
            return Err(HeaderError::BadMagic);
        }
        let version = u16::from_be_bytes([data[4], data[5]]);
        let hash_count = u16::from_be_bytes([data[6], data[7]]);
        let bit_count = u32::from_be_bytes([data[8], data[9], data[10], data[11]]);
        Ok(Self {
            version,
            hash_count,
            bit_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout_is_big_endian() {
        let h = FilterHeader::new(1, 7, 95851);
        let enc = h.encode();
        assert_eq!(&enc[0..4], b"SCBF");
        assert_eq!(enc[4..6], [0x00, 0x01]);
        assert_eq!(enc[6..8], [0x00, 0x07]);
        assert_eq!(enc[8..12], 95851u32.to_be_bytes());
    }

    #[test]
    fn decode_rejects_short_input() {
        let h = FilterHeader::new(1, 7, 64);
        let enc = h.encode();
        assert_eq!(
            FilterHeader::decode(&enc[..11]),
            Err(HeaderError::TooShort(11))
        );
        assert_eq!(FilterHeader::decode(&[]), Err(HeaderError::TooShort(0)));
    }

    #[test]
    fn decode_rejects_foreign_magic() {
        let mut enc = FilterHeader::new(1, 7, 64).encode();
        enc[0] = b'X';
        assert_eq!(FilterHeader::decode(&enc), Err(HeaderError::BadMagic));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let h = FilterHeader::new(3, 11, 1024);
        let mut buf = h.encode().to_vec();
        buf.extend_from_slice(&[0xFF; 16]);
        assert_eq!(FilterHeader::decode(&buf), Ok(h));
    }

    #[test]
    fn payload_len_rounds_up() {
        assert_eq!(FilterHeader::new(1, 1, 0).payload_len(), 0);
        assert_eq!(FilterHeader::new(1, 1, 1).payload_len(), 1);
        assert_eq!(FilterHeader::new(1, 1, 8).payload_len(), 1);
        assert_eq!(FilterHeader::new(1, 1, 9).payload_len(), 2);
    }
}
