//! XelisHash v2
//!
//! Stage 1 expands the input with chained BLAKE3 + ChaCha8 into the whole
//! ~440 KB pad, stage 3 walks the two pad halves with AES and 128-bit
//! arithmetic, stage 4 is BLAKE3 over the final pad. Stage 2 of v1 has no
//! counterpart here.
//!
//! Stage 3 is strictly sequential: every word written depends on the
//! previous `result`.

use crate::error::{Error, Result};
use crate::params::*;
use crate::primitives::{aes_round, chacha8_keystream, hash256};
use crate::scratchpad::{LeWords, ScratchPadV2};

/// Hash `input` using `scratch_pad` as working memory
///
/// NOTE: the pad is completely overwritten in stage 1 and can be reused
/// across unrelated inputs without clearing.
pub fn xelis_hash(input: &[u8], scratch_pad: &mut ScratchPadV2) -> Result<Hash> {
    if input.is_empty() {
        tracing::debug!("rejecting empty v2 input");
        return Err(Error::EmptyInput);
    }

    let pad = scratch_pad.bytes_mut();

    stage_1(input, pad);
    stage_3(pad);

    Ok(hash256(pad))
}

/// Fill the pad with keystream, one segment per 32-byte input chunk
///
/// Each segment is keyed by the running chunk hash and uses the tail of the
/// previous segment as nonce.
fn stage_1(input: &[u8], pad: &mut [u8]) {
    let mut input_hash = hash256(input);
    let mut nonce = [0u8; NONCE_SIZE_V2];
    nonce.copy_from_slice(&input_hash[..NONCE_SIZE_V2]);

    let num_chunks = input.len().div_ceil(CHUNK_SIZE_V2);
    let mut output_offset = 0;

    for (chunk_index, chunk) in input.chunks(CHUNK_SIZE_V2).enumerate() {
        // Short final chunk is zero padded
        let mut tmp = [0u8; HASH_SIZE * 2];
        tmp[..HASH_SIZE].copy_from_slice(&input_hash);
        tmp[HASH_SIZE..HASH_SIZE + chunk.len()].copy_from_slice(chunk);
        input_hash = hash256(&tmp);

        let remaining = OUTPUT_SIZE_V2 - output_offset;
        let chunks_left = num_chunks - chunk_index;
        let part_size = remaining / chunks_left;

        let part = &mut pad[output_offset..output_offset + part_size];
        chacha8_keystream(&input_hash, &nonce, part);
        output_offset += part_size;

        let tail = &part[part_size.saturating_sub(NONCE_SIZE_V2)..];
        nonce[..tail.len()].copy_from_slice(tail);
    }
}

/// Chaotic walk over the two pad halves, in place
fn stage_3(pad: &mut [u8]) {
    const SIZE: u64 = BUFFER_SIZE_V2 as u64;

    let (mem_buffer_a, mem_buffer_b) = pad.split_at_mut(BUFFER_SIZE_V2 * 8);

    let mut addr_a = mem_buffer_b.word(BUFFER_SIZE_V2 - 1);
    let mut addr_b = mem_buffer_a.word(BUFFER_SIZE_V2 - 1) >> 32;
    let mut r = 0usize;
    let mut block = [0u8; 16];

    for i in 0..SCRATCHPAD_ITERS_V2 {
        let mem_a = mem_buffer_a.word((addr_a % SIZE) as usize);
        let mem_b = mem_buffer_b.word((addr_b % SIZE) as usize);

        block[..8].copy_from_slice(&mem_b.to_le_bytes());
        block[8..].copy_from_slice(&mem_a.to_le_bytes());
        aes_round(&mut block, &AES_KEY_V2);

        let hash1 = block.word(0);
        let hash2 = mem_a ^ mem_b;
        let mut result = !(hash1 ^ hash2);

        for j in 0..BUFFER_SIZE_V2 {
            let a = mem_buffer_a.word((result % SIZE) as usize);
            let b = mem_buffer_b.word((!result.rotate_right(r as u32) % SIZE) as usize);
            let c = if r < BUFFER_SIZE_V2 {
                mem_buffer_a.word(r)
            } else {
                mem_buffer_b.word(r - BUFFER_SIZE_V2)
            };
            r = if r < MEMORY_SIZE_V2 - 1 { r + 1 } else { 0 };

            let v = mix(result, a, b, c, (i * j) as u32, r as u32);
            result = v.rotate_left(1);

            let idx = BUFFER_SIZE_V2 - j - 1;
            let t = mem_buffer_a.word(idx) ^ result;
            mem_buffer_a.set_word(idx, t);
            let rotated = mem_buffer_b.word(j) ^ t.rotate_right(result as u32);
            mem_buffer_b.set_word(j, rotated);
        }

        addr_a = result;
        addr_b = isqrt(result);
    }
}

/// Join two u64 halves into a u128
#[inline(always)]
fn combine(hi: u64, lo: u64) -> u128 {
    ((hi as u128) << 64) | lo as u128
}

/// One of 16 operations selected by `rotl(result, c) & 0xf`
///
/// `ij` is the product of the outer and inner loop counters, `r` the cursor
/// after it advanced. All arithmetic wraps; divisors are forced non-zero.
#[inline(always)]
fn mix(result: u64, a: u64, b: u64, c: u64, ij: u32, r: u32) -> u64 {
    match result.rotate_left(c as u32) & 0xf {
        0 => result ^ c.rotate_left(ij) ^ b,
        1 => result ^ c.rotate_right(ij) ^ a,
        2 => result ^ a ^ b ^ c,
        3 => result ^ a.wrapping_add(b).wrapping_mul(c),
        4 => result ^ b.wrapping_sub(c).wrapping_mul(a),
        5 => result ^ c.wrapping_sub(a).wrapping_add(b),
        6 => result ^ a.wrapping_sub(b).wrapping_add(c),
        7 => result ^ b.wrapping_mul(c).wrapping_add(a),
        8 => result ^ c.wrapping_mul(a).wrapping_add(b),
        9 => result ^ a.wrapping_mul(b).wrapping_mul(c),
        10 => result ^ (combine(a, b) % (c | 1) as u128) as u64,
        11 => {
            let t1 = combine(b, c);
            let t2 = combine(result.rotate_left(r), a | 2);
            result ^ (t1 % t2) as u64
        }
        12 => result ^ (combine(c, a) / (b | 4) as u128) as u64,
        13 => {
            let t1 = combine(result.rotate_left(r), b);
            let t2 = combine(a, c | 8);
            if t1 > t2 {
                result ^ (t1 / t2) as u64
            } else {
                result ^ a ^ b
            }
        }
        14 => result ^ (combine(b, a).wrapping_mul(c as u128) >> 64) as u64,
        _ => {
            let t1 = combine(a, c);
            let t2 = combine(result.rotate_right(r), b);
            result ^ (t1.wrapping_mul(t2) >> 64) as u64
        }
    }
}

/// Floor of the square root, Newton iteration from `n` downwards
pub(crate) fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }

    let mut x = n;
    // ceil(n / 2) without overflowing at u64::MAX
    let mut y = (x >> 1) + (x & 1);

    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }

    x
}
