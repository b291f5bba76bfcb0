//! Slot registry for byte patterns that recur across call data: full 32-byte
//! words, 31-byte word tails, 20-byte addresses and 4-byte selectors.
//!
//! The registry is supplied by the caller and only read during compression.

use crate::error::{CompressorError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Largest slot the 20-bit wide dictionary opcode can carry.
pub const MAX_SLOT: u32 = (1 << 20) - 1;

/// The pattern lengths the wire format can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternLength {
    Word,
    WordTail,
    Address,
    Selector,
}

impl PatternLength {
    /// Lengths tried at every offset, longest first. The first match wins ties.
    pub const SEARCH_ORDER: [PatternLength; 4] = [
        PatternLength::Word,
        PatternLength::WordTail,
        PatternLength::Address,
        PatternLength::Selector,
    ];

    /// Position in this table is the 2-bit selector stored in the header.
    const SELECTOR_TABLE: [PatternLength; 4] = [
        PatternLength::Word,
        PatternLength::Address,
        PatternLength::Selector,
        PatternLength::WordTail,
    ];

    pub const fn bytes(self) -> usize {
        match self {
            PatternLength::Word => 32,
            PatternLength::WordTail => 31,
            PatternLength::Address => 20,
            PatternLength::Selector => 4,
        }
    }

    pub fn from_bytes(len: usize) -> Option<Self> {
        match len {
            32 => Some(PatternLength::Word),
            31 => Some(PatternLength::WordTail),
            20 => Some(PatternLength::Address),
            4 => Some(PatternLength::Selector),
            _ => None,
        }
    }

    pub const fn selector(self) -> u8 {
        match self {
            PatternLength::Word => 0,
            PatternLength::Address => 1,
            PatternLength::Selector => 2,
            PatternLength::WordTail => 3,
        }
    }

    pub fn from_selector(selector: u8) -> Option<Self> {
        Self::SELECTOR_TABLE.get(selector as usize).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    patterns: HashMap<Vec<u8>, u32>,
    reverse_patterns: HashMap<(PatternLength, u32), Vec<u8>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` at `slot`. Registering the same pair twice is a no-op.
    pub fn insert(&mut self, pattern: &[u8], slot: u32) -> Result<()> {
        let length = PatternLength::from_bytes(pattern.len())
            .ok_or(CompressorError::UnsupportedPatternLength(pattern.len()))?;
        if slot > MAX_SLOT {
            return Err(CompressorError::SlotOutOfRange(slot));
        }

        if let Some(&existing) = self.patterns.get(pattern) {
            if existing == slot {
                return Ok(());
            }
            return Err(CompressorError::ConflictingSlot { pattern: hex::encode(pattern), existing });
        }
        if self.reverse_patterns.contains_key(&(length, slot)) {
            return Err(CompressorError::SlotCollision { length: length.bytes(), slot });
        }

        self.patterns.insert(pattern.to_vec(), slot);
        self.reverse_patterns.insert((length, slot), pattern.to_vec());
        Ok(())
    }

    /// Build a dictionary from `(hex pattern, slot)` pairs.
    pub fn from_hex_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut dict = Dictionary::new();
        for (pattern, slot) in entries {
            let bytes = crate::encoding::decode_hex(pattern.as_ref())?;
            dict.insert(&bytes, slot)?;
        }
        Ok(dict)
    }

    /// Exact-match lookup. `Some(0)` is a valid match.
    pub fn lookup(&self, candidate: &[u8]) -> Option<u32> {
        self.patterns.get(candidate).copied()
    }

    pub fn pattern(&self, length: PatternLength, slot: u32) -> Option<&[u8]> {
        self.reverse_patterns.get(&(length, slot)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// SHA-256 over the sorted entry set. Streams are only decodable against a
    /// dictionary with the same digest.
    pub fn digest(&self) -> [u8; 32] {
        let mut entries: Vec<(&Vec<u8>, &u32)> = self.patterns.iter().collect();
        entries.sort();

        let mut hasher = Sha256::new();
        for (pattern, slot) in entries {
            hasher.update([pattern.len() as u8]);
            hasher.update(pattern);
            hasher.update(slot.to_be_bytes());
        }
        hasher.finalize().into()
    }
}
