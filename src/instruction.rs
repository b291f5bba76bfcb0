//! Instructions of the compressed stream and the plans built from them.
//!
//! Every instruction starts with a header whose two high bits select the
//! opcode:
//!
//! ```text
//! 00XXXXXX                    zero run of X+1 bytes
//! 01PXXXXX <X+1 bytes>        literal; P left-pads the payload to a 32-byte word
//! 10BBXXXX XXXXXXXX           dictionary reference, 12-bit slot
//! 11BBXXXX XXXXXXXX XXXXXXXX  dictionary reference, 20-bit slot
//! ```

use crate::dictionary::PatternLength;

pub const MAX_ZERO_RUN: usize = 64;
pub const MAX_LITERAL: usize = 32;
/// Decoded length of a literal whose header carries the skip flag.
pub const PADDED_WORD: usize = 32;
/// Slots below this value fit the 2-byte dictionary opcode.
pub const SHORT_SLOT_LIMIT: u32 = 1 << 12;

pub const ZERO_RUN_COST: usize = 1;
pub const LITERAL_HEADER_COST: usize = 1;

bitflags::bitflags! {
	#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
	pub struct HeaderFlags: u8 {
		const COPY       = 0b0100_0000;
		const DICTIONARY = 0b1000_0000;
		const SKIP_ZEROS = 0b0010_0000;
	}
}

impl HeaderFlags {
	pub const OPCODE_MASK: u8 = 0b1100_0000;

	pub fn opcode(header: u8) -> Opcode {
		let flags = HeaderFlags::from_bits_truncate(header & Self::OPCODE_MASK);
		match (flags.contains(HeaderFlags::DICTIONARY), flags.contains(HeaderFlags::COPY)) {
			(false, false) => Opcode::ZeroRun,
			(false, true) => Opcode::Literal,
			(true, false) => Opcode::ShortDictRef,
			(true, true) => Opcode::WideDictRef,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
	ZeroRun,
	Literal,
	ShortDictRef,
	WideDictRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
	ZeroRun { start: usize, length: usize },
	/// `skip` leading zeros are dropped from the payload; non-zero only for
	/// padded 32-byte words.
	Literal { start: usize, length: usize, skip: usize },
	DictRef { start: usize, length: PatternLength, slot: u32 },
}

impl Instruction {
	pub fn start(&self) -> usize {
		match *self {
			Instruction::ZeroRun { start, .. }
			| Instruction::Literal { start, .. }
			| Instruction::DictRef { start, .. } => start,
		}
	}

	pub fn decompressed_len(&self) -> usize {
		match *self {
			Instruction::ZeroRun { length, .. } | Instruction::Literal { length, .. } => length,
			Instruction::DictRef { length, .. } => length.bytes(),
		}
	}

	pub fn end(&self) -> usize {
		self.start() + self.decompressed_len()
	}

	/// Bytes this instruction occupies in the serialized stream.
	pub fn encoded_len(&self) -> usize {
		match *self {
			Instruction::ZeroRun { .. } => ZERO_RUN_COST,
			Instruction::Literal { length, skip, .. } => LITERAL_HEADER_COST + length - skip,
			Instruction::DictRef { slot, .. } if slot < SHORT_SLOT_LIMIT => 2,
			Instruction::DictRef { .. } => 3,
		}
	}

	pub fn opcode(&self) -> Opcode {
		match *self {
			Instruction::ZeroRun { .. } => Opcode::ZeroRun,
			Instruction::Literal { .. } => Opcode::Literal,
			Instruction::DictRef { slot, .. } if slot < SHORT_SLOT_LIMIT => Opcode::ShortDictRef,
			Instruction::DictRef { .. } => Opcode::WideDictRef,
		}
	}
}

/// An ordered run of instructions with the planner's cost accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
	instructions: Vec<Instruction>,
	decompressed_size: usize,
	compressed_size: usize,
}

impl Plan {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, instruction: Instruction, cost: usize) {
		self.decompressed_size += instruction.decompressed_len();
		self.compressed_size += cost;
		self.instructions.push(instruction);
	}

	pub fn append(&mut self, other: Plan) {
		self.decompressed_size += other.decompressed_size;
		self.compressed_size += other.compressed_size;
		self.instructions.extend(other.instructions);
	}

	pub fn instructions(&self) -> &[Instruction] {
		&self.instructions
	}

	pub fn into_instructions(self) -> Vec<Instruction> {
		self.instructions
	}

	pub fn decompressed_size(&self) -> usize {
		self.decompressed_size
	}

	pub fn compressed_size(&self) -> usize {
		self.compressed_size
	}

	pub fn savings(&self) -> isize {
		self.decompressed_size as isize - self.compressed_size as isize
	}

	pub fn is_empty(&self) -> bool {
		self.instructions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.instructions.len()
	}

	/// True when the instructions tile `[from, to)` with no gap or overlap.
	pub fn covers(&self, from: usize, to: usize) -> bool {
		let mut cursor = from;
		for instruction in &self.instructions {
			if instruction.start() != cursor || instruction.decompressed_len() == 0 {
				return false;
			}
			cursor = instruction.end();
		}
		cursor == to && self.decompressed_size == to - from
	}

	pub(crate) fn from_parts(instructions: Vec<Instruction>, decompressed_size: usize, compressed_size: usize) -> Self {
		Self { instructions, decompressed_size, compressed_size }
	}
}
