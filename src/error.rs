use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressorError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid hex encoding: {0}")]
	InvalidEncoding(String),

	#[error("Unsupported dictionary pattern length: {0} bytes")]
	UnsupportedPatternLength(usize),

	#[error("Dictionary slot {0} does not fit in 20 bits")]
	SlotOutOfRange(u32),

	#[error("Pattern 0x{pattern} is already registered at slot {existing}")]
	ConflictingSlot { pattern: String, existing: u32 },

	#[error("Slot {slot} already holds a different {length}-byte pattern")]
	SlotCollision { length: usize, slot: u32 },

	#[error("Invalid instruction plan: {0}")]
	InvalidPlan(String),

	#[error("Compression failed: {0}")]
	CompressionError(String),

	#[error("Decompression failed: {0}")]
	DecompressionError(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CompressorError>;
