//! Input decoding for the command-line tool
//!
//! Hash inputs arrive as hex (block headers, test vectors) or as raw text.

use thiserror::Error;

/// How a command-line argument is turned into hash input bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Hex string, optional `0x` prefix
    #[default]
    Hex,
    /// UTF-8 bytes of the argument as given
    Text,
}

/// Input decoding errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("input is empty")]
    Empty,
}

/// Decode `raw` according to `format`
pub fn decode(raw: &str, format: InputFormat) -> Result<Vec<u8>, InputError> {
    let bytes = match format {
        InputFormat::Hex => {
            let trimmed = raw.trim();
            let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
            hex::decode(digits)?
        }
        InputFormat::Text => raw.as_bytes().to_vec(),
    };

    if bytes.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(bytes)
}

/// Zero-extend `input` to at least `min_len` bytes
///
/// Lets short text inputs be hashed with v1, which needs a full 200-byte
/// Keccak state.
pub fn zero_extend(mut input: Vec<u8>, min_len: usize) -> Vec<u8> {
    if input.len() < min_len {
        input.resize(min_len, 0);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode("0x00ff10", InputFormat::Hex).unwrap(), vec![0, 255, 16]);
        assert_eq!(decode(" abcd\n", InputFormat::Hex).unwrap(), vec![0xab, 0xcd]);
        assert!(matches!(
            decode("zz", InputFormat::Hex),
            Err(InputError::Hex(_))
        ));
        assert!(matches!(decode("0x", InputFormat::Hex), Err(InputError::Empty)));
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode("abc", InputFormat::Text).unwrap(), b"abc".to_vec());
        assert!(matches!(decode("", InputFormat::Text), Err(InputError::Empty)));
    }

    #[test]
    fn test_zero_extend() {
        assert_eq!(zero_extend(vec![1, 2], 4), vec![1, 2, 0, 0]);
        assert_eq!(zero_extend(vec![1, 2, 3], 2), vec![1, 2, 3]);
    }
}
