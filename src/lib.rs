//! XelisHash Library
//!
//! Proof-of-work hashing for the Xelis network in two generations.
//!
//! # Overview
//!
//! XelisHash is memory-hard and branches on data so that fixed-function
//! hardware gains little over a CPU. This crate re-exports the core
//! algorithm and adds helpers for input decoding used by the CLI.
//!
//! # Example
//!
//! ```rust
//! use xelishash::{ScratchPool, meets_difficulty};
//!
//! // One pad per worker thread
//! let pool = ScratchPool::new(2);
//! let result = pool.hash_named("xel/1", b"block header bytes").unwrap();
//!
//! if meets_difficulty(&result, 16) {
//!     println!("Valid proof found!");
//! }
//! ```

// Re-export the core algorithm
pub use xelishash_core as algorithm;

pub mod input;
pub mod vectors;

// Convenience re-exports
pub use algorithm::{
    hash_v1, hash_v2, meets_difficulty, select, Algorithm, Hash, Hasher, ScratchPool,
};
