//! XelisHash Algorithm Parameters
//!
//! v1 constants first, then v2. The "untweakable" ones are fixed by the
//! primitives (Keccak state width, digest size).

/// Scratchpad size of v1 in u64 words (256 KB)
pub const MEMORY_SIZE: usize = 32768;

/// Number of stage 3 iterations in v1
pub const SCRATCHPAD_ITERS: usize = 5000;

/// Number of passes over the small pad in v1 stage 2
pub const ITERS: usize = 1;

/// Width of the v1 stage 3 rolling buffers
pub const BUFFER_SIZE: usize = 42;

/// Number of u32 slots resorted per block in v1 stage 2
pub const SLOT_LENGTH: usize = 256;

/// Keccak-f[1600] state width in u64 words
pub const KECCAK_WORDS: usize = 25;

/// Bytes of input consumed by v1
pub const BYTES_ARRAY_INPUT: usize = KECCAK_WORDS * 8;

/// Digest size in bytes
pub const HASH_SIZE: usize = 32;

/// Number of full Keccak rows written by v1 stage 1
pub const STAGE_1_MAX: usize = MEMORY_SIZE / KECCAK_WORDS;

/// v1 scratchpad size in bytes
pub const SCRATCHPAD_BYTES: usize = MEMORY_SIZE * 8;

/// Scratchpad size of v2 in u64 words (~440 KB)
pub const MEMORY_SIZE_V2: usize = 429 * 128;

/// Number of stage 3 iterations in v2
pub const SCRATCHPAD_ITERS_V2: usize = 3;

/// Half of the v2 scratchpad, also the inner loop length of stage 3
pub const BUFFER_SIZE_V2: usize = MEMORY_SIZE_V2 / 2;

/// Input chunk size for v2 stage 1
pub const CHUNK_SIZE_V2: usize = 32;

/// ChaCha8 nonce size
pub const NONCE_SIZE_V2: usize = 12;

/// Bytes produced by v2 stage 1 (the whole scratchpad)
pub const OUTPUT_SIZE_V2: usize = MEMORY_SIZE_V2 * 8;

/// v2 scratchpad size in bytes
pub const SCRATCHPAD_BYTES_V2: usize = OUTPUT_SIZE_V2;

/// AES round key of v2 stage 3
pub const AES_KEY_V2: [u8; 16] = *b"xelishash-pow-v2";

/// AES round key of v1 stage 3
pub const AES_KEY_V1: [u8; 16] = [0u8; 16];

/// 32-byte digest produced by both generations
pub type Hash = [u8; HASH_SIZE];
