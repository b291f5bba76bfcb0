//! Hex boundary for call data: inputs arrive as hex strings and compressed
//! streams leave as `0x`-prefixed hex.

use crate::error::{CompressorError, Result};

/// Parse a hex string, with or without a `0x` prefix, in any letter case.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() % 2 != 0 {
        return Err(CompressorError::InvalidEncoding(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    hex::decode(digits).map_err(|e| CompressorError::InvalidEncoding(e.to_string()))
}

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_optional() {
        assert_eq!(decode_hex("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex("0XDEADBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_hex("0x").unwrap().is_empty());
        assert!(decode_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(matches!(decode_hex("0xabc"), Err(CompressorError::InvalidEncoding(_))));
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(matches!(decode_hex("0xzz"), Err(CompressorError::InvalidEncoding(_))));
        assert!(matches!(decode_hex("0x0g"), Err(CompressorError::InvalidEncoding(_))));
    }

    #[test]
    fn test_encode_is_prefixed_lowercase() {
        assert_eq!(encode_hex(&[0x3f, 0xAB]), "0x3fab");
        assert_eq!(encode_hex(&[]), "0x");
    }
}
