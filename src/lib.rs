//! # Call Data Compressor
//!
//! Compresses transaction call data into a compact instruction stream that a
//! paired on-chain decompressor expands back into the original bytes.
//!
//! ## Features
//!
//! - **Zero runs**: up to 64 zero bytes in a single header byte
//! - **Padded words**: 32-byte words with leading zeros store only their tail
//! - **Dictionary references**: registered words, addresses and selectors
//!   collapse into a 2 or 3 byte slot reference
//! - **Prefix planning**: a bounded-lookback dynamic program picks the
//!   instruction mix
//! - **Verification**: every stream is decoded and compared before it is returned
//!
//! ## Quick Start
//!
//! ```rust
//! use calldata_compressor::{compress_hex, decompress_hex, Dictionary};
//!
//! let mut dict = Dictionary::new();
//! dict.insert(&[0xa9, 0x05, 0x9c, 0xbb], 0).unwrap();
//!
//! let input = "0xa9059cbb00000000000000000000000000000000000000000000000000000000deadbeef";
//! let compressed = compress_hex(input, &dict).unwrap();
//! assert_eq!(compressed, "0xa00063deadbeef");
//!
//! let restored = decompress_hex(&compressed, &dict).unwrap();
//! assert_eq!(restored, input);
//! ```
//!
//! ### Choosing a planner
//!
//! ```rust
//! use calldata_compressor::{pipeline, CompressorConfig, Dictionary, PlannerMode};
//!
//! let data = vec![0u8; 200];
//! let config = CompressorConfig::default().with_mode(PlannerMode::Greedy);
//! let compressed = pipeline::compress(&data, &Dictionary::new(), &config).unwrap();
//! assert_eq!(compressed.decompressed_size(), 200);
//! ```

pub mod analyzer;
pub mod config;
pub mod decoder;
pub mod dictionary;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod pipeline;
pub mod planner;
pub mod segment;
pub mod serializer;

// Re-export commonly used types for convenience
pub use config::{CompressorConfig, PlannerMode};
pub use dictionary::{Dictionary, PatternLength};
pub use error::{CompressorError, Result};
pub use instruction::{Instruction, Plan};
pub use pipeline::{compress_batch, Compressed, CompressionStats};

/// Compress call data with the default configuration.
///
/// # Example
///
/// ```rust
/// use calldata_compressor::{compress_calldata, Dictionary};
///
/// let compressed = compress_calldata(&[0u8; 64], &Dictionary::new()).unwrap();
/// assert_eq!(compressed.data, vec![0x3f]);
/// assert_eq!(compressed.decompressed_size(), 64);
/// ```
pub fn compress_calldata(data: &[u8], dict: &Dictionary) -> Result<Compressed> {
    pipeline::compress(data, dict, &CompressorConfig::default())
}

/// Compress a hex-encoded call data string and return the `0x`-prefixed hex
/// of the compressed stream.
///
/// The input may carry a `0x` prefix and use either letter case. Odd-length
/// or non-hex input fails with [`CompressorError::InvalidEncoding`] before any
/// analysis.
pub fn compress_hex(input: &str, dict: &Dictionary) -> Result<String> {
    let data = encoding::decode_hex(input)?;
    let compressed = compress_calldata(&data, dict)?;
    Ok(encoding::encode_hex(&compressed.data))
}

/// Expand a hex-encoded compressed stream back into `0x`-prefixed call data.
pub fn decompress_hex(input: &str, dict: &Dictionary) -> Result<String> {
    let stream = encoding::decode_hex(input)?;
    let data = pipeline::decompress(&stream, dict)?;
    Ok(encoding::encode_hex(&data))
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get library version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_hex_round_trip() {
        let input = "0x0000000000000000000000000000000000000000000000000000000000000040";
        let compressed = compress_hex(input, &Dictionary::new()).unwrap();
        assert_eq!(decompress_hex(&compressed, &Dictionary::new()).unwrap(), input);
    }

    #[test]
    fn test_compress_hex_rejects_bad_input() {
        assert!(matches!(compress_hex("0x123", &Dictionary::new()), Err(CompressorError::InvalidEncoding(_))));
        assert!(matches!(compress_hex("0xnothex!", &Dictionary::new()), Err(CompressorError::InvalidEncoding(_))));
    }

    #[test]
    fn test_empty_hex() {
        assert_eq!(compress_hex("0x", &Dictionary::new()).unwrap(), "0x");
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(!info.version.is_empty());
        assert!(!info.description.is_empty());
    }
}
