//! Error types for XelisHash

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Errors returned by the hash entry points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// v1 consumes a fixed 200-byte Keccak state
    #[error("input too short: got {len} bytes, need at least {min}")]
    InputTooShort {
        /// Length of the rejected input
        len: usize,
        /// Minimum accepted length
        min: usize,
    },

    /// v2 stage 1 needs at least one chunk to fill the scratchpad
    #[error("input must not be empty")]
    EmptyInput,

    /// Algorithm tag not in `xel/0`, `xel/1`
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, Error>;
