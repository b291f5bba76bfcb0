//! Greedy cover of one byte range.
//!
//! A single forward pass picks, at each offset, between a zero run, a copy
//! window, a dictionary reference, or extending the pending literal run. The
//! tie-break order (zero run, then copy window, then dictionary) is part of the
//! output format's compatibility contract.

use crate::analyzer::{Analysis, DictMatch};
use crate::instruction::{Instruction, Plan, LITERAL_HEADER_COST, MAX_LITERAL, ZERO_RUN_COST};

enum Step {
    Zero(usize),
    Copy,
    Dict(DictMatch),
    Literal,
}

#[derive(Default)]
struct PendingLiteral {
    start: usize,
    len: usize,
}

impl PendingLiteral {
    fn extend(&mut self, plan: &mut Plan, offset: usize, count: usize) {
        if self.len == 0 {
            self.start = offset;
        }
        self.len += count;
        if self.len > MAX_LITERAL {
            push_literal(plan, self.start, MAX_LITERAL);
            self.start += MAX_LITERAL;
            self.len -= MAX_LITERAL;
        }
    }

    fn flush(&mut self, plan: &mut Plan) {
        if self.len > 0 {
            push_literal(plan, self.start, self.len);
            self.len = 0;
        }
    }
}

fn push_literal(plan: &mut Plan, start: usize, length: usize) {
    plan.push(Instruction::Literal { start, length, skip: 0 }, LITERAL_HEADER_COST + length);
}

/// Cover `[from, to]` (inclusive) with instructions.
pub fn best_segment(analysis: &Analysis<'_>, from: usize, to: usize) -> Plan {
    debug_assert!(from <= to && to < analysis.len());

    let mut plan = Plan::new();
    let mut literal = PendingLiteral::default();
    let mut i = from;

    while i <= to {
        let remaining = to - i + 1;
        let metrics = analysis.metrics(i);
        let zero = metrics.zero_run;
        let copy = metrics.copy_window;

        if zero.decompressed >= remaining {
            literal.flush(&mut plan);
            plan.push(Instruction::ZeroRun { start: i, length: remaining }, ZERO_RUN_COST);
            return plan;
        }

        let (use_zero, use_copy) = if zero.decompressed == 0 {
            (false, false)
        } else if copy.decompressed > remaining || zero.savings() > copy.savings() {
            (true, false)
        } else {
            (false, true)
        };

        let dict = metrics.dict_matches.iter().copied().find(|m| {
            m.length.bytes() <= remaining && (use_zero || use_copy || m.savings() > copy.savings())
        });

        let step = match dict {
            Some(m) if use_zero && m.savings() > zero.savings() => Step::Dict(m),
            _ if use_zero => Step::Zero(zero.decompressed),
            Some(m) if use_copy && m.savings() > copy.savings() => Step::Dict(m),
            _ if use_copy => Step::Copy,
            Some(m) => Step::Dict(m),
            None => Step::Literal,
        };

        match step {
            Step::Zero(length) => {
                literal.flush(&mut plan);
                plan.push(Instruction::ZeroRun { start: i, length }, zero.cost);
                i += length;
            }
            Step::Copy => {
                literal.flush(&mut plan);
                let length = copy.decompressed;
                let skip = analysis.copy_skip(i, length);
                plan.push(Instruction::Literal { start: i, length, skip }, copy.cost);
                i += length;
            }
            Step::Dict(m) => {
                literal.flush(&mut plan);
                plan.push(Instruction::DictRef { start: i, length: m.length, slot: m.slot }, m.cost);
                i += m.length.bytes();
            }
            Step::Literal => {
                let count = copy.decompressed.min(remaining);
                literal.extend(&mut plan, i, count);
                i += count;
            }
        }
    }

    literal.flush(&mut plan);
    plan
}
