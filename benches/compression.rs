use calldata_compressor::config::{CompressorConfig, PlannerMode};
use calldata_compressor::pipeline;
use calldata_compressor::Dictionary;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

fn abi_calldata(words: usize) -> Vec<u8> {
	let mut data = vec![0xa9, 0x05, 0x9c, 0xbb];
	for i in 0..words {
		let mut word = [0u8; 32];
		match i % 3 {
			0 => word[12..].copy_from_slice(&[0x5f; 20]),
			1 => word[24..].copy_from_slice(&(i as u64 * 1_000_000_007).to_be_bytes()),
			_ => {}
		}
		data.extend_from_slice(&word);
	}
	data
}

fn bench_compress(c: &mut Criterion) {
	let data = abi_calldata(128);
	let mut dict = Dictionary::new();
	let mut padded = vec![0u8; 12];
	padded.extend_from_slice(&[0x5f; 20]);
	dict.insert(&padded, 1).unwrap();

	let mut group = c.benchmark_group("compression");
	group.throughput(Throughput::Bytes(data.len() as u64));
	for mode in [PlannerMode::Optimal, PlannerMode::Greedy] {
		let config = CompressorConfig::default().with_mode(mode).with_verify(false);
		group.bench_function(format!("compress_calldata_{:?}", mode).to_lowercase(), |b| {
			b.iter(|| pipeline::compress(&data, &dict, &config).unwrap());
		});
	}
	group.finish();
}

criterion_group!(benches, bench_compress);
criterion_main!(benches);
