//! A Bloom-filter based dictionary: build a compact membership structure
//! from a word list, persist it with a small versioned header and query it
//! later with a bounded false-positive rate and no false negatives.

pub mod bitvec;
pub mod dict;
pub mod error;
pub mod filter;
pub mod hash;
pub mod header;
pub mod sizing;

pub use bitvec::BitVec;
pub use error::SieveError;
pub use filter::{BloomFilter, DEFAULT_RATE};
pub use hash::{fnv1a_64, Fnv1a64, QuickHash};
pub use header::{FilterHeader, HeaderError, FORMAT_VERSION, HEADER_SIZE, MAGIC};
pub use sizing::{bit_array_size, num_hash_functions, Requirements};
