//! The Bloom filter core.
//!
//! A filter starts unbuilt: the rate, seed list and hash engine are fixed
//! at construction but no bit array exists yet. `build` allocates one
//! sized from the rate, `adopt` takes one restored from disk. There is no
//! way back to the unbuilt state and the array length never changes after
//! either transition.

use crate::bitvec::BitVec;
use crate::error::SieveError;
use crate::hash::{Fnv1a64, QuickHash};
use crate::sizing;

/// Default false-positive probability, 1%.
pub const DEFAULT_RATE: f64 = 0.01;

/// Mask clearing the top bit so the hash is a non-negative 63-bit value
/// before the modulo.
const INDEX_MASK: u64 = 0x7FFF_FFFF_FFFF_FFFF;

pub struct BloomFilter<H = Fnv1a64> {
    rate: f64,
    seeds: Vec<i32>,
    bits: Option<BitVec>,
    hasher: H,
}

impl BloomFilter<Fnv1a64> {
    /// Filter with the default FNV-1a engine and the conventional seed
    /// list `1..=k`.
    pub fn with_rate(rate: f64, hash_count: u16) -> Result<Self, SieveError> {
        let seeds = (1..=hash_count as i32).collect();
        Self::new(rate, Fnv1a64, seeds)
    }
}

impl<H: QuickHash> BloomFilter<H> {
    /// Construct an unbuilt filter. The seed list length fixes k.
    pub fn new(rate: f64, hasher: H, seeds: Vec<i32>) -> Result<Self, SieveError> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(SieveError::InvalidArgument(format!(
                "false positive rate must be in (0, 1), got {rate}"
            )));
        }
        if seeds.is_empty() {
            return Err(SieveError::InvalidArgument(
                "seed list must not be empty".into(),
            ));
        }
        Ok(Self {
            rate,
            seeds,
            bits: None,
            hasher,
        })
    }

    /// Allocate a zeroed bit array sized for `expected_elements` at the
    /// configured rate. Fails without changing state if the filter is
    /// already built or the allocation is refused.
    pub fn build(&mut self, expected_elements: u64) -> Result<(), SieveError> {
        if self.bits.is_some() {
            return Err(SieveError::InvalidArgument(
                "filter is already built; the bit array length is fixed".into(),
            ));
        }
        let nbits = sizing::bit_array_size(self.rate, expected_elements)?;
        self.bits = Some(BitVec::try_new(nbits as usize)?);
        Ok(())
    }

    /// Adopt a pre-existing bit array verbatim, the restore path. No size
    /// validation against the configured rate; the caller vouches for
    /// consistency.
    pub fn adopt(&mut self, bits: BitVec) -> Result<(), SieveError> {
        if self.bits.is_some() {
            return Err(SieveError::InvalidArgument(
                "filter is already built; the bit array length is fixed".into(),
            ));
        }
        if bits.is_empty() {
            return Err(SieveError::InvalidArgument(
                "cannot adopt an empty bit array".into(),
            ));
        }
        self.bits = Some(bits);
        Ok(())
    }

    /// Add a member. Idempotent; bits only ever flip 0 to 1.
    pub fn add(&mut self, element: &str) -> Result<(), SieveError> {
        let hashes = self.hasher.hash_k_times(element.as_bytes(), &self.seeds);
        let bits = self.bits.as_mut().ok_or(SieveError::FilterUnbuilt)?;
        for hash in hashes {
            bits.set(index_from_hash(hash, bits.len()));
        }
        Ok(())
    }

    /// Whether `element` is possibly a member. False positives occur with
    /// probability approaching the configured rate; false negatives never.
    pub fn contains(&self, element: &str) -> Result<bool, SieveError> {
        let bits = self.bits.as_ref().ok_or(SieveError::FilterUnbuilt)?;
        for hash in self.hasher.hash_k_times(element.as_bytes(), &self.seeds) {
            if !bits.is_set(index_from_hash(hash, bits.len())) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Replace the seed list before building. Rejected once built, since
    /// queries would no longer agree with insertions.
    pub fn set_seeds(&mut self, seeds: Vec<i32>) -> Result<(), SieveError> {
        if seeds.is_empty() {
            return Err(SieveError::InvalidArgument(
                "seed list must not be empty".into(),
            ));
        }
        if self.bits.is_some() {
            return Err(SieveError::InvalidArgument(
                "cannot change seeds on a built filter".into(),
            ));
        }
        self.seeds = seeds;
        Ok(())
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn seeds(&self) -> &[i32] {
        &self.seeds
    }

    /// k, the number of hash functions.
    pub fn hash_count(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_built(&self) -> bool {
        self.bits.is_some()
    }

    /// Bit array length, zero while unbuilt.
    pub fn bit_count(&self) -> usize {
        self.bits.as_ref().map_or(0, BitVec::len)
    }

    /// Packed bit array bytes for persistence.
    pub fn as_bytes(&self) -> Result<&[u8], SieveError> {
        self.bits
            .as_ref()
            .map(BitVec::as_bytes)
            .ok_or(SieveError::FilterUnbuilt)
    }
}

/// Map a 64-bit hash onto a valid bit index. The top bit is masked off
/// first so the value stays non-negative even if it transits a signed
/// representation.
fn index_from_hash(hash: u64, nbits: usize) -> usize {
    ((hash & INDEX_MASK) % nbits as u64) as usize
}
