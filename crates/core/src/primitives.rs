//! Primitive layer for XelisHash
//!
//! Thin wrappers over the standard primitives both generations build on:
//! Keccak-p[1600, 12], a single AESENC-style round, BLAKE3 and ChaCha8.

use aes::Block;
use chacha20::ChaCha8;
use cipher::{KeyIvInit, StreamCipher};

use crate::params::{HASH_SIZE, KECCAK_WORDS, NONCE_SIZE_V2};

/// Keccak-p[1600, 12]: the last 12 rounds of Keccak-f[1600]
#[inline(always)]
pub fn keccak_p(state: &mut [u64; KECCAK_WORDS]) {
    tiny_keccak::keccakp(state);
}

/// Single AES encryption round: SubBytes + ShiftRows + MixColumns + AddRoundKey
///
/// Same semantics as the x86 `AESENC` instruction. The `aes` crate picks the
/// hardware path at runtime when the CPU supports it.
#[inline(always)]
pub fn aes_round(block: &mut [u8; 16], key: &[u8; 16]) {
    let mut state = Block::from(*block);
    aes::hazmat::cipher_round(&mut state, &Block::from(*key));
    block.copy_from_slice(state.as_slice());
}

/// 256-bit BLAKE3 digest
#[inline(always)]
pub fn hash256(data: &[u8]) -> [u8; HASH_SIZE] {
    blake3::hash(data).into()
}

/// Overwrite `out` with ChaCha8 keystream for (key, nonce), counter starting at 0
///
/// The region is zeroed first so its previous content never influences the
/// result.
#[inline(always)]
pub fn chacha8_keystream(key: &[u8; 32], nonce: &[u8; NONCE_SIZE_V2], out: &mut [u8]) {
    let mut stream = ChaCha8::new(key.into(), nonce.into());
    out.fill(0);
    stream.apply_keystream(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// AES S-box for the reference round
    const SBOX: [u8; 256] = [
        0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab,
        0x76, 0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4,
        0x72, 0xc0, 0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71,
        0xd8, 0x31, 0x15, 0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2,
        0xeb, 0x27, 0xb2, 0x75, 0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6,
        0xb3, 0x29, 0xe3, 0x2f, 0x84, 0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb,
        0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf, 0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45,
        0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8, 0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5,
        0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2, 0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44,
        0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73, 0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a,
        0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb, 0xe0, 0x32, 0x3a, 0x0a, 0x49,
        0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79, 0xe7, 0xc8, 0x37, 0x6d,
        0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08, 0xba, 0x78, 0x25,
        0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a, 0x70, 0x3e,
        0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e, 0xe1,
        0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
        0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb,
        0x16,
    ];

    fn gf_mul2(x: u8) -> u8 {
        (x << 1) ^ ((x >> 7) * 0x1b)
    }

    fn gf_mul3(x: u8) -> u8 {
        gf_mul2(x) ^ x
    }

    /// Table-driven AESENC round used as the reference
    fn ref_aes_round(state: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
        let mut s = [0u8; 16];
        for i in 0..16 {
            s[i] = SBOX[state[i] as usize];
        }

        let t = s;
        for col in 0..4 {
            for row in 1..4 {
                s[col * 4 + row] = t[((col + row) % 4) * 4 + row];
            }
        }

        let mut out = [0u8; 16];
        for col in 0..4 {
            let i = col * 4;
            out[i] = gf_mul2(s[i]) ^ gf_mul3(s[i + 1]) ^ s[i + 2] ^ s[i + 3];
            out[i + 1] = s[i] ^ gf_mul2(s[i + 1]) ^ gf_mul3(s[i + 2]) ^ s[i + 3];
            out[i + 2] = s[i] ^ s[i + 1] ^ gf_mul2(s[i + 2]) ^ gf_mul3(s[i + 3]);
            out[i + 3] = gf_mul3(s[i]) ^ s[i + 1] ^ s[i + 2] ^ gf_mul2(s[i + 3]);
        }

        for i in 0..16 {
            out[i] ^= round_key[i];
        }
        out
    }

    #[test]
    fn test_aes_round_matches_reference() {
        let cases: [([u8; 16], [u8; 16]); 4] = [
            ([0u8; 16], [0u8; 16]),
            ([0xFF; 16], [0xFF; 16]),
            (
                [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
                crate::params::AES_KEY_V2,
            ),
            (
                [
                    0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE, 0xBA, 0xBE, 0x01, 0x23, 0x45, 0x67, 0x89,
                    0xAB, 0xCD, 0xEF,
                ],
                [
                    0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32, 0x10, 0x0F, 0x1E, 0x2D, 0x3C, 0x4B,
                    0x5A, 0x69, 0x78,
                ],
            ),
        ];

        for (i, (state, key)) in cases.iter().enumerate() {
            let mut block = *state;
            aes_round(&mut block, key);
            assert_eq!(
                block,
                ref_aes_round(state, key),
                "aes_round mismatch on test case {}",
                i
            );
        }
    }

    #[test]
    fn test_aes_round_zero_block() {
        // SubBytes(0) = 0x63 everywhere, MixColumns of a constant column is the identity
        let mut block = [0u8; 16];
        aes_round(&mut block, &[0u8; 16]);
        assert_eq!(block, [0x63; 16]);
    }

    #[test]
    fn test_keccak_p_changes_state() {
        let mut state = [0u64; KECCAK_WORDS];
        keccak_p(&mut state);
        assert_ne!(state, [0u64; KECCAK_WORDS]);

        let mut again = [0u64; KECCAK_WORDS];
        keccak_p(&mut again);
        assert_eq!(state, again);
    }

    #[test]
    fn test_chacha8_keystream_overwrites() {
        let key = [7u8; 32];
        let nonce = [3u8; NONCE_SIZE_V2];

        let mut clean = [0u8; 96];
        chacha8_keystream(&key, &nonce, &mut clean);

        let mut dirty = [0xA5u8; 96];
        chacha8_keystream(&key, &nonce, &mut dirty);

        assert_eq!(clean, dirty);
        assert_ne!(clean, [0u8; 96]);
    }

    #[test]
    fn test_hash256_is_blake3() {
        assert_eq!(
            hex::encode(hash256(b"")),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }
}
