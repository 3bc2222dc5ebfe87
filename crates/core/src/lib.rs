//! # XelisHash Core Algorithm
//!
//! Memory-hard, ASIC/GPU-resistant proof-of-work hash in two generations.
//!
//! ## Generations
//!
//! - **v1** (`xel/0`): Keccak-p fill of a 256 KB pad, randomized 32-bit
//!   resort, then a 5000-step AES driven walk whose last four results form
//!   the digest. Consumes exactly the first 200 bytes of input.
//! - **v2** (`xel/1`): chained BLAKE3 + ChaCha8 fill of a ~440 KB pad, a
//!   sequential AES + 128-bit arithmetic walk over the two pad halves, then
//!   BLAKE3 over the whole pad. Consumes any non-empty input.
//!
//! Both constructions branch on data on purpose; they are not constant time.
//!
//! ## Example
//!
//! ```rust
//! use xelishash_core::{Hasher, hash_v2, meets_difficulty};
//!
//! // Single-shot hashing (allocates a pad)
//! let result = hash_v2(&[0u8; 112]).unwrap();
//!
//! // Reusable hasher (one pad, no re-allocation)
//! let mut hasher = Hasher::new();
//! assert_eq!(hasher.hash_v2(&[0u8; 112]).unwrap(), result);
//! let v1 = hasher.hash_v1(&[0u8; 200]).unwrap();
//!
//! if meets_difficulty(&v1, 16) {
//!     println!("Found hash with 16+ leading zero bits!");
//! }
//! ```
//!
//! ## Concurrency
//!
//! With the `std` feature, [`ScratchPool`] lends pre-allocated pads to
//! concurrent callers and blocks when all of them are in use.
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! xelishash-core = { version = "0.2", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use alloc::string::ToString;

mod error;
mod params;
mod primitives;
mod scratchpad;

pub mod v1;
pub mod v2;

#[cfg(feature = "std")]
mod ffi;
#[cfg(feature = "std")]
mod pool;

pub use error::{Error, Result};
pub use params::*;
pub use scratchpad::{ScratchPad, ScratchPadV2};

#[cfg(feature = "std")]
pub use pool::{ScratchLease, ScratchPool};

/// Hash generation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// XelisHash v1, tag `xel/0`
    #[default]
    V1,
    /// XelisHash v2, tag `xel/1`
    V2,
}

impl Algorithm {
    /// Resolve a tag, falling back to v1 for anything but `xel/1`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Algorithm::V1)
    }

    /// Canonical tag
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::V1 => "xel/0",
            Algorithm::V2 => "xel/1",
        }
    }

    /// Shortest input the generation accepts
    pub fn minimum_input_len(self) -> usize {
        match self {
            Algorithm::V1 => BYTES_ARRAY_INPUT,
            Algorithm::V2 => 1,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xel/0" => Ok(Algorithm::V1),
            "xel/1" => Ok(Algorithm::V2),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reusable hasher owning one v2-sized pad
///
/// The pad serves both generations, so alternating v1 and v2 calls never
/// re-allocate.
pub struct Hasher {
    scratch_pad: ScratchPadV2,
}

impl Hasher {
    /// Allocate a hasher (~440 KB)
    pub fn new() -> Self {
        Self {
            scratch_pad: ScratchPadV2::new(),
        }
    }

    /// XelisHash v1 of `input` (at least 200 bytes)
    pub fn hash_v1(&mut self, input: &[u8]) -> Result<Hash> {
        v1::compute(input, self.scratch_pad.v1_bytes_mut())
    }

    /// XelisHash v2 of `input` (non-empty)
    pub fn hash_v2(&mut self, input: &[u8]) -> Result<Hash> {
        v2::xelis_hash(input, &mut self.scratch_pad)
    }

    /// Hash with the given generation
    pub fn hash(&mut self, algorithm: Algorithm, input: &[u8]) -> Result<Hash> {
        match algorithm {
            Algorithm::V1 => self.hash_v1(input),
            Algorithm::V2 => self.hash_v2(input),
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot XelisHash v1
///
/// Allocates a pad per call; prefer [`Hasher`] or [`ScratchPool`] in loops.
pub fn hash_v1(input: &[u8]) -> Result<Hash> {
    v1::xelis_hash(input, &mut ScratchPad::new())
}

/// One-shot XelisHash v2
pub fn hash_v2(input: &[u8]) -> Result<Hash> {
    v2::xelis_hash(input, &mut ScratchPadV2::new())
}

/// One-shot hash selected by tag (`xel/0`, `xel/1`); unknown tags run v1
pub fn select(algorithm: &str, input: &[u8]) -> Result<Hash> {
    Hasher::new().hash(Algorithm::from_name(algorithm), input)
}

/// Check if a hash meets the required difficulty
///
/// Difficulty is the number of leading zero bits required.
///
/// ```rust
/// use xelishash_core::meets_difficulty;
///
/// let mut hash = [0xFFu8; 32];
/// hash[0] = 0x00;
/// hash[1] = 0x0F;
/// assert!(meets_difficulty(&hash, 12));
/// assert!(!meets_difficulty(&hash, 13));
/// ```
#[inline(always)]
pub fn meets_difficulty(hash: &Hash, difficulty: u32) -> bool {
    let mut zero_bits = 0u32;

    for byte in hash.iter() {
        if *byte == 0 {
            zero_bits += 8;
        } else {
            zero_bits += byte.leading_zeros();
            break;
        }
    }

    zero_bits >= difficulty
}
