use thiserror::Error;

use crate::header::HeaderError;

#[derive(Error, Debug)]
pub enum SieveError {
    /// Out-of-range rate, zero element count, empty seed list and the like.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `add`/`contains` called before the bit array was built.
    #[error("bloom filter not built; call build() or adopt() first")]
    FilterUnbuilt,

    /// Header codec failure while decoding a persisted artifact.
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Artifact payload inconsistent with its header.
    #[error("corrupt artifact: {0}")]
    Corrupt(String),

    /// Bit array allocation failure; the requested size in bytes.
    #[error("could not allocate bit array of {0} bytes")]
    Allocation(usize),

    /// Malformed seed file.
    #[error("seed file error: {0}")]
    Seeds(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated CSV error from the seed file adapter.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
