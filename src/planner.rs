//! Prefix planner.
//!
//! `best[i]` holds the cheapest known plan for bytes `[0, i]`. Each prefix is
//! either the previous prefix plus one literal byte, or an earlier prefix
//! followed by a greedy segment ending at `i`. Segments start at most
//! `lookback` bytes back, which keeps the search at O(n * lookback) segment
//! evaluations.
//!
//! The table stores only the tail segment and its split point per prefix; the
//! final plan is stitched together by walking split points backwards.

use crate::analyzer::Analysis;
use crate::config::{CompressorConfig, PlannerMode};
use crate::instruction::{Instruction, Plan, LITERAL_HEADER_COST, ZERO_RUN_COST};
use crate::segment::best_segment;

/// Cost of one literal byte appended to an existing plan.
const SINGLE_LITERAL_COST: usize = LITERAL_HEADER_COST + 1;

struct PrefixEntry {
    decompressed: usize,
    compressed: usize,
    /// First byte covered by `tail`; the rest of the prefix is `best[split - 1]`.
    split: usize,
    tail: Vec<Instruction>,
}

impl PrefixEntry {
    fn savings(&self) -> isize {
        self.decompressed as isize - self.compressed as isize
    }
}

pub fn plan(analysis: &Analysis<'_>, config: &CompressorConfig) -> Plan {
    if analysis.is_empty() {
        return Plan::new();
    }
    match config.mode {
        PlannerMode::Greedy => best_segment(analysis, 0, analysis.len() - 1),
        PlannerMode::Optimal => plan_prefixes(analysis, config.lookback),
    }
}

fn plan_prefixes(analysis: &Analysis<'_>, lookback: usize) -> Plan {
    let n = analysis.len();
    let lookback = lookback.max(1);
    let mut best: Vec<PrefixEntry> = Vec::with_capacity(n);

    best.push(if analysis.data()[0] == 0 {
        PrefixEntry {
            decompressed: 1,
            compressed: ZERO_RUN_COST,
            split: 0,
            tail: vec![Instruction::ZeroRun { start: 0, length: 1 }],
        }
    } else {
        PrefixEntry {
            decompressed: 1,
            compressed: SINGLE_LITERAL_COST,
            split: 0,
            tail: vec![Instruction::Literal { start: 0, length: 1, skip: 0 }],
        }
    });

    for i in 1..n {
        let previous = &best[i - 1];
        let mut current = PrefixEntry {
            decompressed: previous.decompressed + 1,
            compressed: previous.compressed + SINGLE_LITERAL_COST,
            split: i,
            tail: vec![Instruction::Literal { start: i, length: 1, skip: 0 }],
        };

        let earliest = (i + 1).saturating_sub(lookback);
        for j in (earliest..=i).rev() {
            let segment = best_segment(analysis, j, i);
            let (prefix_decompressed, prefix_compressed) = match j {
                0 => (0, 0),
                _ => (best[j - 1].decompressed, best[j - 1].compressed),
            };

            let savings = prefix_decompressed as isize - prefix_compressed as isize + segment.savings();
            if savings > current.savings() {
                current = PrefixEntry {
                    decompressed: prefix_decompressed + segment.decompressed_size(),
                    compressed: prefix_compressed + segment.compressed_size(),
                    split: j,
                    tail: segment.into_instructions(),
                };
            }
        }

        best.push(current);
    }

    stitch(best)
}

fn stitch(mut best: Vec<PrefixEntry>) -> Plan {
    let Some(last) = best.last() else {
        return Plan::new();
    };
    let (decompressed, compressed) = (last.decompressed, last.compressed);

    let mut tails = Vec::new();
    let mut end = best.len();
    while end > 0 {
        let entry = &mut best[end - 1];
        tails.push(std::mem::take(&mut entry.tail));
        end = entry.split;
    }

    let instructions = tails.into_iter().rev().flatten().collect();
    Plan::from_parts(instructions, decompressed, compressed)
}
