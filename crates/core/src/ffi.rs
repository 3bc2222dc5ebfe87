//! C FFI bindings for native miners

use crate::{Algorithm, Error, Hasher};
use core::slice;

/// Success
pub const XELISHASH_OK: i32 = 0;
/// A pointer argument was null
pub const XELISHASH_ERR_NULL: i32 = -1;
/// Algorithm id is not 0 (v1) or 1 (v2)
pub const XELISHASH_ERR_ALGORITHM: i32 = -2;
/// Input shorter than the generation accepts
pub const XELISHASH_ERR_INPUT: i32 = -3;

/// Opaque hasher handle for FFI
pub struct XHasher {
    inner: Hasher,
}

/// Create a new hasher instance
/// Returns a pointer to the hasher (caller must free with xelishash_free)
#[unsafe(no_mangle)]
pub extern "C" fn xelishash_new() -> *mut XHasher {
    let hasher = Box::new(XHasher {
        inner: Hasher::new(),
    });
    Box::into_raw(hasher)
}

/// Free a hasher instance
#[unsafe(no_mangle)]
pub extern "C" fn xelishash_free(hasher: *mut XHasher) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Compute hash of input data
/// - hasher: pointer from xelishash_new()
/// - algorithm: 0 for v1, 1 for v2
/// - input: pointer to input bytes
/// - input_len: length of input
/// - output: pointer to 32-byte buffer for result
///
/// Returns `XELISHASH_OK` or one of the negative error codes; `output` is
/// left untouched on error.
#[unsafe(no_mangle)]
pub extern "C" fn xelishash_hash(
    hasher: *mut XHasher,
    algorithm: u32,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
) -> i32 {
    if hasher.is_null() || input.is_null() || output.is_null() {
        return XELISHASH_ERR_NULL;
    }

    let algorithm = match algorithm {
        0 => Algorithm::V1,
        1 => Algorithm::V2,
        _ => return XELISHASH_ERR_ALGORITHM,
    };

    unsafe {
        let hasher = &mut *hasher;
        let input_slice = slice::from_raw_parts(input, input_len);

        match hasher.inner.hash(algorithm, input_slice) {
            Ok(result) => {
                let output_slice = slice::from_raw_parts_mut(output, result.len());
                output_slice.copy_from_slice(&result);
                XELISHASH_OK
            }
            Err(Error::InputTooShort { .. } | Error::EmptyInput) => XELISHASH_ERR_INPUT,
            Err(Error::UnknownAlgorithm(_)) => XELISHASH_ERR_ALGORITHM,
        }
    }
}
