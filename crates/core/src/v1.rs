//! XelisHash v1
//!
//! Three stages over a 256 KB pad:
//! 1. Keccak-p driven fill with data-dependent branching
//! 2. Randomized accumulate-and-resort over 32-bit slots
//! 3. AES driven chaotic walk over two rolling 42-word buffers
//!
//! Only the first `BYTES_ARRAY_INPUT` bytes of the input are consumed.

use crate::error::{Error, Result};
use crate::params::*;
use crate::primitives::{aes_round, keccak_p};
use crate::scratchpad::{LeWords, ScratchPad};

/// Hash `input` using `scratch_pad` as working memory
///
/// The pad content on entry is irrelevant: stage 1 rewrites all of it.
pub fn xelis_hash(input: &[u8], scratch_pad: &mut ScratchPad) -> Result<Hash> {
    compute(input, scratch_pad.bytes_mut())
}

/// Run the pipeline over the first `SCRATCHPAD_BYTES` bytes of `pad`
pub(crate) fn compute(input: &[u8], pad: &mut [u8]) -> Result<Hash> {
    if input.len() < BYTES_ARRAY_INPUT {
        tracing::debug!(len = input.len(), "rejecting short v1 input");
        return Err(Error::InputTooShort {
            len: input.len(),
            min: BYTES_ARRAY_INPUT,
        });
    }

    let pad = &mut pad[..SCRATCHPAD_BYTES];

    let mut state = [0u64; KECCAK_WORDS];
    for (word, bytes) in state
        .iter_mut()
        .zip(input[..BYTES_ARRAY_INPUT].chunks_exact(8))
    {
        *word = bytes.word(0);
    }

    // 1310 full rows of 25 words, then 18 words to reach exactly MEMORY_SIZE
    stage_1(&mut state, pad, (0, STAGE_1_MAX - 1), (0, KECCAK_WORDS - 1));
    stage_1(&mut state, pad, (STAGE_1_MAX, STAGE_1_MAX), (0, 17));

    stage_2(pad);

    Ok(stage_3(pad))
}

/// Fill rows `rows.0..=rows.1`, words `words.0..=words.1` of each row
fn stage_1(
    state: &mut [u64; KECCAK_WORDS],
    pad: &mut [u8],
    rows: (usize, usize),
    words: (usize, usize),
) {
    for i in rows.0..=rows.1 {
        keccak_p(state);

        let mut rand_int = 0u64;
        for j in words.0..=words.1 {
            let left = state[(j + 1) % KECCAK_WORDS];
            let right = state[(j + 2) % KECCAK_WORDS];
            let xor = left ^ right;

            let v = match xor & 0x3 {
                0 => left & right,
                1 => !(left & right),
                2 => !xor,
                _ => xor,
            };

            let b = state[j] ^ rand_int ^ v;
            rand_int = b;
            pad.set_word(i * KECCAK_WORDS + j, b);
        }
    }
}

/// Resort the pad viewed as `MEMORY_SIZE * 2` u32 words
///
/// All sums wrap at 32 bits.
fn stage_2(pad: &mut [u8]) {
    const SMALL_PAD_LEN: usize = MEMORY_SIZE * 2;
    const SLOTS_START: usize = SMALL_PAD_LEN - SLOT_LENGTH;

    let mut slots = [0u32; SLOT_LENGTH];
    for (k, slot) in slots.iter_mut().enumerate() {
        *slot = pad.half(SLOTS_START + k);
    }

    let mut indices = [0u16; SLOT_LENGTH];

    for _ in 0..ITERS {
        for block in 0..SMALL_PAD_LEN / SLOT_LENGTH {
            let base = block * SLOT_LENGTH;

            let mut total_sum = 0u32;
            for (k, index) in indices.iter_mut().enumerate() {
                *index = k as u16;
                let value = pad.half(base + k);
                total_sum = if slots[k] >> 31 == 0 {
                    total_sum.wrapping_add(value)
                } else {
                    total_sum.wrapping_sub(value)
                };
            }

            for slot_idx in (0..SLOT_LENGTH).rev() {
                let index_in_indices = (pad.half(base + slot_idx) % (slot_idx as u32 + 1)) as usize;
                let index = indices[index_in_indices] as usize;
                indices[index_in_indices] = indices[slot_idx];

                let pad_value = pad.half(base + index);
                let s1 = slots[index] >> 31;
                let local_sum = if s1 == 0 {
                    total_sum.wrapping_sub(pad_value)
                } else {
                    total_sum.wrapping_add(pad_value)
                };

                slots[index] = slots[index].wrapping_add(local_sum);

                // s2 - s1 is -1, 0 or 1; -1 wraps to u32::MAX
                let s2 = slots[index] >> 31;
                let flip = s2.wrapping_sub(s1);
                total_sum =
                    total_sum.wrapping_sub(2u32.wrapping_mul(pad_value).wrapping_mul(flip));
            }
        }
    }

    for (k, slot) in slots.iter().enumerate() {
        pad.set_half(SLOTS_START + k, *slot);
    }
}

/// Chaotic walk; the last four results form the digest
fn stage_3(pad: &mut [u8]) -> Hash {
    let last = pad.word(MEMORY_SIZE - 1);
    let mut addr_a = ((last >> 15) & 0x7FFF) as usize;
    let mut addr_b = (last & 0x7FFF) as usize;

    let mut mem_buffer_a = [0u64; BUFFER_SIZE];
    let mut mem_buffer_b = [0u64; BUFFER_SIZE];
    for i in 0..BUFFER_SIZE {
        mem_buffer_a[i] = pad.word((addr_a + i) % MEMORY_SIZE);
        mem_buffer_b[i] = pad.word((addr_b + i) % MEMORY_SIZE);
    }

    let mut final_result = [0u8; HASH_SIZE];
    let mut block = [0u8; 16];

    for i in 0..SCRATCHPAD_ITERS {
        let mem_a = mem_buffer_a[i % BUFFER_SIZE];
        let mem_b = mem_buffer_b[i % BUFFER_SIZE];

        block[..8].copy_from_slice(&mem_b.to_le_bytes());
        block[8..].copy_from_slice(&mem_a.to_le_bytes());
        aes_round(&mut block, &AES_KEY_V1);

        let hash1 = block.word(0);
        let hash2 = mem_a ^ mem_b;
        let mut result = !(hash1 ^ hash2);

        for j in 0..HASH_SIZE {
            let a = mem_buffer_a[(j + i) % BUFFER_SIZE];
            let b = mem_buffer_b[(j + i) % BUFFER_SIZE];

            result = match (result >> (j * 2)) & 0xf {
                0 => result.rotate_left(j as u32) ^ b,
                1 => !(result.rotate_left(j as u32) ^ a),
                2 => !(result ^ a),
                3 => result ^ b,
                4 => result ^ a.wrapping_add(b),
                5 => result ^ a.wrapping_sub(b),
                6 => result ^ b.wrapping_sub(a),
                7 => result ^ a.wrapping_mul(b),
                8 => result ^ (a & b),
                9 => result ^ (a | b),
                10 => result ^ (a ^ b),
                11 => result ^ a.wrapping_sub(result),
                12 => result ^ b.wrapping_sub(result),
                13 => result ^ a.wrapping_add(result),
                14 => result ^ result.wrapping_sub(a),
                _ => result ^ result.wrapping_sub(b),
            };
        }

        addr_b = (result & 0x7FFF) as usize;
        mem_buffer_a[i % BUFFER_SIZE] = result;
        mem_buffer_b[i % BUFFER_SIZE] = pad.word(addr_b);

        addr_a = ((result >> 15) & 0x7FFF) as usize;
        pad.set_word(addr_a, result);

        // Final iteration lands in the first slot
        let index = SCRATCHPAD_ITERS - i - 1;
        if index < 4 {
            final_result[index * 8..(index + 1) * 8].copy_from_slice(&result.to_be_bytes());
        }
    }

    final_result
}
