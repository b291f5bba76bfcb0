//! Reference decompressor: the exact inverse of the serializer.
//!
//! Compressed streams are consumed by an external decompressor; this one is
//! used to verify output before it leaves the crate.

use crate::dictionary::{Dictionary, PatternLength};
use crate::error::{CompressorError, Result};
use crate::instruction::{HeaderFlags, Opcode, PADDED_WORD};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

pub fn decompress(stream: &[u8], dict: &Dictionary) -> Result<Vec<u8>> {
    let mut reader = Cursor::new(stream);
    let mut output = Vec::with_capacity(stream.len() * 2);

    while (reader.position() as usize) < stream.len() {
        let offset = reader.position();
        let header = reader.read_u8().map_err(|e| truncated(offset, e))?;

        match HeaderFlags::opcode(header) {
            Opcode::ZeroRun => {
                let length = (header & 0b0011_1111) as usize + 1;
                output.resize(output.len() + length, 0);
            }
            Opcode::Literal => {
                let count = (header & 0b0001_1111) as usize + 1;
                if HeaderFlags::from_bits_truncate(header).contains(HeaderFlags::SKIP_ZEROS) {
                    output.resize(output.len() + PADDED_WORD - count, 0);
                }
                let mut payload = vec![0u8; count];
                reader.read_exact(&mut payload).map_err(|e| truncated(offset, e))?;
                output.extend_from_slice(&payload);
            }
            Opcode::ShortDictRef => {
                let low = reader.read_u8().map_err(|e| truncated(offset, e))? as u32;
                let slot = ((header & 0x0f) as u32) << 8 | low;
                output.extend_from_slice(resolve(dict, header, slot)?);
            }
            Opcode::WideDictRef => {
                let low = reader.read_u16::<BigEndian>().map_err(|e| truncated(offset, e))? as u32;
                let slot = ((header & 0x0f) as u32) << 16 | low;
                output.extend_from_slice(resolve(dict, header, slot)?);
            }
        }
    }

    Ok(output)
}

fn resolve(dict: &Dictionary, header: u8, slot: u32) -> Result<&[u8]> {
    let selector = (header >> 4) & 0b11;
    let length = PatternLength::from_selector(selector).ok_or_else(|| {
        CompressorError::DecompressionError(format!("invalid pattern selector {}", selector))
    })?;
    dict.pattern(length, slot).ok_or_else(|| {
        CompressorError::DecompressionError(format!("no {}-byte pattern at slot {}", length.bytes(), slot))
    })
}

fn truncated(offset: u64, error: std::io::Error) -> CompressorError {
    CompressorError::DecompressionError(format!("instruction at offset {} is truncated: {}", offset, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_run() {
        assert_eq!(decompress(&[0x3f], &Dictionary::new()).unwrap(), vec![0u8; 64]);
        assert_eq!(decompress(&[0x00, 0x01], &Dictionary::new()).unwrap(), vec![0u8; 3]);
    }

    #[test]
    fn test_padded_literal() {
        let decoded = decompress(&[0x63, 0xde, 0xad, 0xbe, 0xef], &Dictionary::new()).unwrap();
        let mut expected = vec![0u8; 28];
        expected.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_plain_literal() {
        let decoded = decompress(&[0x41, 0x00, 0x07], &Dictionary::new()).unwrap();
        assert_eq!(decoded, vec![0x00, 0x07]);
    }

    #[test]
    fn test_dictionary_references() {
        let mut dict = Dictionary::new();
        let address = hex::decode("5fbdb2315678afecb367f032d93f642f64180aa3").unwrap();
        dict.insert(&address, 1).unwrap();
        dict.insert(&[0xaa; 32], 70_000).unwrap();

        assert_eq!(decompress(&[0x90, 0x01], &dict).unwrap(), address);

        let slot = 70_000u32;
        let wide = [0xc0 | (slot >> 16) as u8, (slot >> 8) as u8, slot as u8];
        assert_eq!(decompress(&wide, &dict).unwrap(), vec![0xaa; 32]);
    }

    #[test]
    fn test_unknown_slot() {
        let result = decompress(&[0x90, 0x02], &Dictionary::new());
        assert!(matches!(result, Err(CompressorError::DecompressionError(_))));
    }

    #[test]
    fn test_truncated_stream() {
        assert!(decompress(&[0x43, 0xde, 0xad], &Dictionary::new()).is_err());
        assert!(decompress(&[0x90], &Dictionary::new()).is_err());
        assert!(decompress(&[0xc0, 0x10], &Dictionary::new()).is_err());
    }
}
