//! Scratchpad memory for both generations
//!
//! Pads are plain heap byte buffers. Every 64-bit or 32-bit word access goes
//! through an explicit little-endian conversion, so the result is identical
//! on any host byte order.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec};

use crate::params::{SCRATCHPAD_BYTES, SCRATCHPAD_BYTES_V2};

/// Little-endian word views over a byte buffer
pub(crate) trait LeWords {
    /// u64 word at `index` (byte offset `index * 8`)
    fn word(&self, index: usize) -> u64;

    /// Store a u64 word at `index`
    fn set_word(&mut self, index: usize, value: u64);

    /// u32 word at `index` (byte offset `index * 4`)
    fn half(&self, index: usize) -> u32;

    /// Store a u32 word at `index`
    fn set_half(&mut self, index: usize, value: u32);
}

impl LeWords for [u8] {
    #[inline(always)]
    fn word(&self, index: usize) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self[index * 8..index * 8 + 8]);
        u64::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn set_word(&mut self, index: usize, value: u64) {
        self[index * 8..index * 8 + 8].copy_from_slice(&value.to_le_bytes());
    }

    #[inline(always)]
    fn half(&self, index: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self[index * 4..index * 4 + 4]);
        u32::from_le_bytes(bytes)
    }

    #[inline(always)]
    fn set_half(&mut self, index: usize, value: u32) {
        self[index * 4..index * 4 + 4].copy_from_slice(&value.to_le_bytes());
    }
}

/// v1 scratchpad: `MEMORY_SIZE` u64 words (256 KB)
///
/// Stage 1 rewrites every word, so a pad can be reused across unrelated
/// inputs without clearing it.
pub struct ScratchPad {
    bytes: Box<[u8]>,
}

impl ScratchPad {
    /// Allocate a zeroed pad
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; SCRATCHPAD_BYTES].into_boxed_slice(),
        }
    }

    /// Raw little-endian content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Default for ScratchPad {
    fn default() -> Self {
        Self::new()
    }
}

/// v2 scratchpad: `MEMORY_SIZE_V2` u64 words (~440 KB)
///
/// Large enough to host a v1 pad in its first `SCRATCHPAD_BYTES` bytes, which
/// lets one pooled buffer serve both generations.
pub struct ScratchPadV2 {
    bytes: Box<[u8]>,
}

impl ScratchPadV2 {
    /// Allocate a zeroed pad
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; SCRATCHPAD_BYTES_V2].into_boxed_slice(),
        }
    }

    /// Raw little-endian content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The leading v1-sized region
    pub(crate) fn v1_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..SCRATCHPAD_BYTES]
    }
}

impl Default for ScratchPadV2 {
    fn default() -> Self {
        Self::new()
    }
}
