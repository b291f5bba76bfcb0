use crate::analyzer::analyze;
use crate::config::CompressorConfig;
use crate::decoder;
use crate::dictionary::Dictionary;
use crate::error::{CompressorError, Result};
use crate::instruction::{Instruction, Plan};
use crate::planner;
use crate::serializer::serialize;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct Compressed {
	pub data: Vec<u8>,
	pub plan: Plan,
	pub stats: CompressionStats,
}

impl Compressed {
	pub fn decompressed_size(&self) -> usize {
		self.plan.decompressed_size()
	}

	pub fn compressed_size(&self) -> usize {
		self.data.len()
	}
}

/// Instruction mix and sizes of one compressed input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	/// Size the planner priced the plan at.
	pub planned_size: u64,
	pub ratio: f64,
	pub zero_runs: usize,
	pub literals: usize,
	pub padded_literals: usize,
	pub dict_refs: usize,
	pub dictionary_digest: [u8; 32],
}

impl CompressionStats {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_instruction(&mut self, instruction: &Instruction) {
		match instruction {
			Instruction::ZeroRun { .. } => self.zero_runs += 1,
			Instruction::Literal { skip, .. } => {
				self.literals += 1;
				if *skip > 0 {
					self.padded_literals += 1;
				}
			}
			Instruction::DictRef { .. } => self.dict_refs += 1,
		}
	}

	pub fn compression_ratio(&self) -> f64 {
		if self.compressed_size == 0 {
			return 0.0;
		}
		self.original_size as f64 / self.compressed_size as f64
	}

	pub fn space_saved(&self) -> u64 {
		self.original_size.saturating_sub(self.compressed_size)
	}

	pub fn space_saved_percentage(&self) -> f64 {
		if self.original_size == 0 {
			return 0.0;
		}
		(self.space_saved() as f64 / self.original_size as f64) * 100.0
	}
}

pub fn compress(data: &[u8], dict: &Dictionary, config: &CompressorConfig) -> Result<Compressed> {
	config.validate()?;

	let analysis = analyze(data, dict);
	let plan = planner::plan(&analysis, config);
	if !plan.covers(0, data.len()) {
		return Err(CompressorError::CompressionError(format!(
			"plan of {} instructions does not cover the {}-byte input",
			plan.len(),
			data.len()
		)));
	}

	let output = serialize(&plan, data)?;

	if config.verify {
		let restored = decoder::decompress(&output, dict)?;
		if restored != data {
			return Err(CompressorError::CompressionError("round trip does not restore the input".to_string()));
		}
	}

	let mut stats = CompressionStats {
		original_size: data.len() as u64,
		compressed_size: output.len() as u64,
		planned_size: plan.compressed_size() as u64,
		dictionary_digest: dict.digest(),
		..Default::default()
	};
	for instruction in plan.instructions() {
		stats.add_instruction(instruction);
	}
	stats.ratio = stats.compression_ratio();

	log::debug!(
		"compressed {} -> {} bytes ({} zero runs, {} literals, {} dictionary refs)",
		stats.original_size,
		stats.compressed_size,
		stats.zero_runs,
		stats.literals,
		stats.dict_refs
	);

	Ok(Compressed { data: output, plan, stats })
}

/// Compress independent inputs in parallel. Results keep the input order.
pub fn compress_batch<T>(inputs: &[T], dict: &Dictionary, config: &CompressorConfig) -> Result<Vec<Compressed>>
where
	T: AsRef<[u8]> + Sync,
{
	config.validate()?;

	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(config.threads)
		.build()
		.map_err(|e| CompressorError::CompressionError(e.to_string()))?;

	log::debug!("compressing {} inputs on {} threads", inputs.len(), config.threads);

	pool.install(|| {
		inputs
			.par_iter()
			.map(|input| compress(input.as_ref(), dict, config))
			.collect::<Result<Vec<_>>>()
	})
}

pub fn decompress(stream: &[u8], dict: &Dictionary) -> Result<Vec<u8>> {
	decoder::decompress(stream, dict)
}
