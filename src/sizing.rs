//! Bloom filter sizing math.
//!
//! Pure functions mapping a desired false-positive rate and an expected
//! element count to a bit array size and hash function count. Both round
//! up: undercounting hash functions inflates the false-positive rate past
//! the target.

use serde::Serialize;
use std::f64::consts::LN_2;
use std::fmt;

use crate::error::SieveError;

/// `ln(2)` squared, the denominator of the sizing formula.
const LN_2_SQR: f64 = LN_2 * LN_2;

/// Bit array size `m = ceil(-n * ln(p) / (ln 2)^2)` for a target rate `p`
/// and `n` expected elements.
pub fn bit_array_size(p: f64, n: u64) -> Result<u64, SieveError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(SieveError::InvalidArgument(format!(
            "false positive rate must be in (0, 1), got {p}"
        )));
    }
    if n == 0 {
        return Err(SieveError::InvalidArgument(
            "expected element count must be positive".into(),
        ));
    }
    let m = -(n as f64) * p.ln() / LN_2_SQR;
    Ok(m.ceil() as u64)
}

/// Optimal hash function count `k = ceil(m / n * ln 2)`.
pub fn num_hash_functions(m: u64, n: u64) -> Result<u32, SieveError> {
    if m == 0 {
        return Err(SieveError::InvalidArgument(
            "bit array size must be positive".into(),
        ));
    }
    if n == 0 {
        return Err(SieveError::InvalidArgument(
            "expected element count must be positive".into(),
        ));
    }
    let k = m as f64 / n as f64 * LN_2;
    Ok(k.ceil() as u32)
}

/// Memory requirements report for a prospective filter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Requirements {
    pub elements: u64,
    pub rate: f64,
    pub hash_functions: u32,
    pub bits: u64,
    pub bytes: u64,
    pub kilobytes: u64,
}

impl Requirements {
    pub fn compute(rate: f64, elements: u64) -> Result<Self, SieveError> {
        let bits = bit_array_size(rate, elements)?;
        let hash_functions = num_hash_functions(bits, elements)?;
        let bytes = bits.div_ceil(8);
        Ok(Self {
            elements,
            rate,
            hash_functions,
            bits,
            bytes,
            kilobytes: bytes.div_ceil(1024),
        })
    }
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filter requirements")?;
        writeln!(f, "  elements inserted:  {}", self.elements)?;
        writeln!(f, "  false positive p:   {:.4}", self.rate)?;
        writeln!(f, "  hash functions:     {}", self.hash_functions)?;
        writeln!(f, "  bits required:      {}", self.bits)?;
        writeln!(f, "    ... {} bytes", self.bytes)?;
        write!(f, "    ... {} KB", self.kilobytes)
    }
}
