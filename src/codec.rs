//! Storage value codecs
//!
//! Fixed-width encodings for the values the ledger persists: u64 counters as
//! 8 bytes little-endian, the decimals field as a single byte, and string
//! metadata as raw UTF-8. The decimals codec is deliberately distinct from
//! the u64 codec so a one-byte field is never read back through the
//! eight-byte decoder.

use thiserror::Error;

/// Codec errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid value width: expected {expected} bytes, got {actual}")]
    InvalidWidth { expected: usize, actual: usize },
    #[error("Value is not valid UTF-8")]
    InvalidUtf8,
}

/// Encode a u64 as 8 bytes little-endian
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Decode a u64 from exactly 8 bytes little-endian
pub fn decode_u64(bytes: &[u8]) -> Result<u64, CodecError> {
    let arr: [u8; 8] = bytes.try_into().map_err(|_| CodecError::InvalidWidth {
        expected: 8,
        actual: bytes.len(),
    })?;
    Ok(u64::from_le_bytes(arr))
}

/// Encode a u8 as a single byte
pub fn encode_u8(value: u8) -> Vec<u8> {
    vec![value]
}

/// Decode a u8 from exactly one byte
pub fn decode_u8(bytes: &[u8]) -> Result<u8, CodecError> {
    match bytes {
        [b] => Ok(*b),
        _ => Err(CodecError::InvalidWidth {
            expected: 1,
            actual: bytes.len(),
        }),
    }
}

/// Encode a string as its raw UTF-8 bytes
pub fn encode_str(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode a string from raw UTF-8 bytes
pub fn decode_string(bytes: &[u8]) -> Result<String, CodecError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_round_trip() {
        for value in [0u64, 1, 540, u64::MAX] {
            assert_eq!(decode_u64(&encode_u64(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_u64_rejects_wrong_width() {
        let err = decode_u64(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidWidth {
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn test_u8_round_trip_and_width() {
        assert_eq!(decode_u8(&encode_u8(18)).unwrap(), 18);
        assert_eq!(decode_u8(&encode_u8(255)).unwrap(), 255);

        // A u64-encoded value must not decode as decimals
        let err = decode_u8(&encode_u64(18)).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidWidth {
                expected: 1,
                actual: 8
            }
        );
    }

    #[test]
    fn test_string_round_trip() {
        assert_eq!(decode_string(&encode_str("XToken1")).unwrap(), "XToken1");
        assert_eq!(decode_string(&encode_str("")).unwrap(), "");
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        assert_eq!(decode_string(&[0xff, 0xfe]).unwrap_err(), CodecError::InvalidUtf8);
    }
}
