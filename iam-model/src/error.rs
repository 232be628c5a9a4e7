//! Error types for IAM container decoding

use std::io;
use thiserror::Error;

/// Failures raised while decoding an IAM structure.
///
/// Every decode error surfaces at the construction boundary of a container
/// (`Listing`, `Mapping`, `Index`); once construction succeeds, reads are
/// infallible and out-of-range access degrades to safe defaults.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A count, mask, or structural cardinality is outside its allowed range.
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    /// A size or range prefix table violates monotonicity, or its total does
    /// not match the declared entry count.
    #[error("Invalid offset: {0}")]
    InvalidOffset(&'static str),

    /// The byte region is too small for the encoded structure, or the
    /// structure does not consume it exactly.
    #[error("Invalid length: {0}")]
    InvalidLength(&'static str),

    /// Magic word mismatch or an unknown type tag - corrupt input.
    #[error("Invalid header: {0}")]
    InvalidHeader(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
