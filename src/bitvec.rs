//! Packed bit array backing the filter.
//!
//! Bits are stored least-significant-bit first within each byte, which is
//! also the on-disk ordering of the persisted payload.

use crate::error::SieveError;

#[derive(Clone, PartialEq, Eq)]
pub struct BitVec {
    bytes: Vec<u8>,
    nbits: usize,
}

impl BitVec {
    /// Allocate a zeroed bit array of `nbits` bits. Allocation failure is
    /// reported rather than aborting so callers can retry smaller.
    pub fn try_new(nbits: usize) -> Result<Self, SieveError> {
        let nbytes = nbits.div_ceil(8);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(nbytes)
            .map_err(|_| SieveError::Allocation(nbytes))?;
        bytes.resize(nbytes, 0);
        Ok(Self { bytes, nbits })
    }

    /// Reconstruct a bit array from persisted bytes with an authoritative
    /// logical length. The length comes from the artifact header, never
    /// from the byte count, so a padded final byte does not widen the
    /// index space.
    pub fn from_parts(bytes: Vec<u8>, nbits: usize) -> Result<Self, SieveError> {
        if bytes.len() < nbits.div_ceil(8) {
            return Err(SieveError::Corrupt(format!(
                "payload holds {} bytes, {} bits need {}",
                bytes.len(),
                nbits,
                nbits.div_ceil(8)
            )));
        }
        Ok(Self { bytes, nbits })
    }

    /// Length in bits.
    pub fn len(&self) -> usize {
        self.nbits
    }

    pub fn is_empty(&self) -> bool {
        self.nbits == 0
    }

    /// Set the bit at `index` to 1. Bits only ever flip 0 to 1.
    ///
    /// # Panics
    /// Panics when `index >= len()`; the filter derives indices with a
    /// modulo so this is unreachable from its call sites.
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.nbits,
            "bit index out of bounds: len {} index {}",
            self.nbits,
            index
        );
        self.bytes[index / 8] |= 1 << (index % 8);
    }

    /// Whether the bit at `index` is set.
    pub fn is_set(&self, index: usize) -> bool {
        assert!(
            index < self.nbits,
            "bit index out of bounds: len {} index {}",
            self.nbits,
            index
        );
        self.bytes[index / 8] & (1 << (index % 8)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// The packed backing bytes, as written to disk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitVec {{ nbits: {}, ones: {} }}",
            self.nbits,
            self.count_ones()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_rounds_bytes_up() {
        assert_eq!(BitVec::try_new(1).unwrap().as_bytes().len(), 1);
        assert_eq!(BitVec::try_new(8).unwrap().as_bytes().len(), 1);
        assert_eq!(BitVec::try_new(9).unwrap().as_bytes().len(), 2);
        assert!(BitVec::try_new(0).unwrap().is_empty());
    }

    #[test]
    fn set_is_lsb_first() {
        let mut bits = BitVec::try_new(16).unwrap();
        bits.set(0);
        bits.set(9);
        assert_eq!(bits.as_bytes(), &[0b0000_0001, 0b0000_0010]);
        assert!(bits.is_set(0));
        assert!(!bits.is_set(1));
        assert!(bits.is_set(9));
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    fn set_is_monotonic() {
        let mut bits = BitVec::try_new(8).unwrap();
        bits.set(3);
        bits.set(3);
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_past_end_panics() {
        BitVec::try_new(5).unwrap().set(5);
    }

    #[test]
    fn from_parts_trusts_declared_length() {
        // Two bytes carry 16 bit positions, but only 12 are live.
        let bits = BitVec::from_parts(vec![0xFF, 0x0F], 12).unwrap();
        assert_eq!(bits.len(), 12);
        assert!(bits.is_set(11));
    }

    #[test]
    fn from_parts_rejects_short_payload() {
        assert!(BitVec::from_parts(vec![0u8; 2], 17).is_err());
    }
}
