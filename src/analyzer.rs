//! Per-offset compression opportunities.
//!
//! For every byte the analyzer records what a zero run, a zero-skipping copy
//! window and a dictionary reference starting there would cost. The metrics
//! depend only on the input and the dictionary.

use crate::dictionary::{Dictionary, PatternLength};
use crate::instruction::{MAX_LITERAL, MAX_ZERO_RUN, PADDED_WORD, ZERO_RUN_COST};

/// Slots above this value are priced at the 3-byte dictionary opcode.
pub const WIDE_SLOT_COST_THRESHOLD: u32 = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Opportunity {
    pub decompressed: usize,
    pub cost: usize,
}

impl Opportunity {
    pub const fn new(decompressed: usize, cost: usize) -> Self {
        Self { decompressed, cost }
    }

    pub fn savings(&self) -> isize {
        self.decompressed as isize - self.cost as isize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictMatch {
    pub length: PatternLength,
    pub slot: u32,
    pub cost: usize,
}

impl DictMatch {
    pub fn savings(&self) -> isize {
        self.length.bytes() as isize - self.cost as isize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteMetrics {
    pub zero_run: Opportunity,
    pub copy_window: Opportunity,
    /// In [`PatternLength::SEARCH_ORDER`].
    pub dict_matches: Vec<DictMatch>,
}

/// Input bytes paired with their metrics.
pub struct Analysis<'a> {
    data: &'a [u8],
    metrics: Vec<ByteMetrics>,
}

impl<'a> Analysis<'a> {
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn metrics(&self, offset: usize) -> &ByteMetrics {
        &self.metrics[offset]
    }

    /// Zeros dropped from a copy window's payload. Only full words can be
    /// left-padded by the decoder, so shorter windows carry every byte.
    pub fn copy_skip(&self, start: usize, length: usize) -> usize {
        if length != PADDED_WORD {
            return 0;
        }
        let zeros = leading_zeros(&self.data[start..start + length]);
        if zeros < length { zeros } else { 0 }
    }
}

pub fn analyze<'a>(data: &'a [u8], dict: &Dictionary) -> Analysis<'a> {
    let metrics = (0..data.len())
        .map(|offset| ByteMetrics {
            zero_run: zero_run(data, offset),
            copy_window: copy_window(data, offset),
            dict_matches: dict_matches(data, offset, dict),
        })
        .collect();

    Analysis { data, metrics }
}

pub fn zero_run(data: &[u8], offset: usize) -> Opportunity {
    if data[offset] != 0 {
        return Opportunity::default();
    }
    let run = data[offset..].iter().take(MAX_ZERO_RUN).take_while(|&&b| b == 0).count();
    Opportunity::new(run, ZERO_RUN_COST)
}

pub fn copy_window(data: &[u8], offset: usize) -> Opportunity {
    if data[offset] != 0 {
        return Opportunity::new(1, 2);
    }

    let window = (data.len() - offset).min(MAX_LITERAL);
    let zeros = leading_zeros(&data[offset..offset + window]);

    if window == MAX_LITERAL && zeros == MAX_LITERAL {
        // A zero run always beats this.
        return Opportunity::new(MAX_LITERAL - 1, MAX_LITERAL);
    }

    let cost = if window == MAX_LITERAL { MAX_LITERAL - zeros } else { 1 + window };
    Opportunity::new(window, cost)
}

pub fn dict_matches(data: &[u8], offset: usize, dict: &Dictionary) -> Vec<DictMatch> {
    let remaining = data.len() - offset;
    PatternLength::SEARCH_ORDER
        .iter()
        .filter(|length| remaining >= length.bytes())
        .filter_map(|&length| {
            let slot = dict.lookup(&data[offset..offset + length.bytes()])?;
            let cost = if slot > WIDE_SLOT_COST_THRESHOLD { 3 } else { 2 };
            Some(DictMatch { length, slot, cost })
        })
        .collect()
}

fn leading_zeros(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_input(window: usize, zeros: usize) -> Vec<u8> {
        let mut data = vec![0u8; window];
        if zeros < window {
            data[zeros] = 0xaa;
        }
        data
    }

    #[test]
    fn test_zero_run_caps() {
        let data = vec![0u8; 100];
        assert_eq!(zero_run(&data, 0), Opportunity::new(64, 1));
        assert_eq!(zero_run(&data, 90), Opportunity::new(10, 1));

        let data = [0, 0, 0, 7, 0];
        assert_eq!(zero_run(&data, 0), Opportunity::new(3, 1));
        assert_eq!(zero_run(&data, 3), Opportunity::new(0, 0));
        assert_eq!(zero_run(&data, 4), Opportunity::new(1, 1));
    }

    #[test]
    fn test_copy_window_non_zero_byte() {
        assert_eq!(copy_window(&[0x12, 0, 0], 0), Opportunity::new(1, 2));
    }

    #[test]
    fn test_copy_window_full_word_table() {
        for zeros in 1..32 {
            let data = window_input(32, zeros);
            assert_eq!(
                copy_window(&data, 0),
                Opportunity::new(32, 32 - zeros),
                "full window with {} leading zeros",
                zeros
            );
        }
    }

    #[test]
    fn test_copy_window_short_table() {
        for window in 1..32 {
            for zeros in 1..=window {
                let data = window_input(window, zeros);
                assert_eq!(
                    copy_window(&data, 0),
                    Opportunity::new(window, 1 + window),
                    "window {} with {} leading zeros",
                    window,
                    zeros
                );
            }
        }
    }

    #[test]
    fn test_copy_window_saturated() {
        let data = vec![0u8; 40];
        assert_eq!(copy_window(&data, 0), Opportunity::new(31, 32));

        let mut data = vec![0u8; 32];
        data.push(1);
        assert_eq!(copy_window(&data, 0), Opportunity::new(31, 32));
    }

    #[test]
    fn test_dict_matches_in_search_order() {
        let word: Vec<u8> = (1..=32).collect();
        let mut dict = Dictionary::new();
        dict.insert(&word[..4], 9).unwrap();
        dict.insert(&word, 0).unwrap();

        let matches = dict_matches(&word, 0, &dict);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], DictMatch { length: PatternLength::Word, slot: 0, cost: 2 });
        assert_eq!(matches[1], DictMatch { length: PatternLength::Selector, slot: 9, cost: 2 });
    }

    #[test]
    fn test_dict_match_needs_remaining_input() {
        let mut dict = Dictionary::new();
        dict.insert(&[1, 2, 3, 4], 1).unwrap();
        assert!(dict_matches(&[9, 1, 2, 3], 1, &dict).is_empty());
        assert_eq!(dict_matches(&[9, 1, 2, 3, 4], 1, &dict).len(), 1);
    }

    #[test]
    fn test_dict_match_cost_threshold() {
        let mut dict = Dictionary::new();
        dict.insert(&[1, 1, 1, 1], 4096).unwrap();
        dict.insert(&[2, 2, 2, 2], 4097).unwrap();
        assert_eq!(dict_matches(&[1, 1, 1, 1], 0, &dict)[0].cost, 2);
        assert_eq!(dict_matches(&[2, 2, 2, 2], 0, &dict)[0].cost, 3);
    }

    #[test]
    fn test_analyze_and_copy_skip() {
        let mut data = vec![0u8; 28];
        data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let analysis = analyze(&data, &Dictionary::new());

        assert_eq!(analysis.len(), 32);
        assert_eq!(analysis.metrics(0).zero_run, Opportunity::new(28, 1));
        assert_eq!(analysis.metrics(0).copy_window, Opportunity::new(32, 4));
        assert_eq!(analysis.metrics(28).copy_window, Opportunity::new(1, 2));
        assert_eq!(analysis.copy_skip(0, 32), 28);
        assert_eq!(analysis.copy_skip(1, 31), 0);
    }
}
