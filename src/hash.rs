//! FNV-1a hashing and the seeded derivation used by the filter.
//!
//! FNV-1a itself has no seed slot. To get k decorrelated values from one
//! base hash the engine XORs the seed into a first pass, serializes the
//! result as 8 big-endian bytes and hashes those again. Two filters built
//! with the same seed list therefore agree bit for bit.

const FNV_OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME_64: u64 = 0x100_0000_01b3;

/// Plain FNV-1a over `data`, left to right. Empty input hashes to the
/// offset basis.
pub fn fnv1a_64(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS_64;
    for &b in data {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME_64);
    }
    hash
}

/// Capability interface for the filter's hash engine. Implementations must
/// be deterministic; distinct seeds should produce decorrelated values.
pub trait QuickHash {
    /// One seeded 64-bit hash of `data`.
    fn hash(&self, data: &[u8], seed: i32) -> u64;

    /// One hash per seed, output order matching seed order.
    fn hash_k_times(&self, data: &[u8], seeds: &[i32]) -> Vec<u64> {
        seeds.iter().map(|&seed| self.hash(data, seed)).collect()
    }
}

/// Default engine: two-pass seeded FNV-1a.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a64;

impl QuickHash for Fnv1a64 {
    fn hash(&self, data: &[u8], seed: i32) -> u64 {
        // Sign-extending cast keeps negative seeds meaningful.
        let first = fnv1a_64(data) ^ (seed as u64);
        fnv1a_64(&first.to_be_bytes())
    }
}
