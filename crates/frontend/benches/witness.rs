//! Witness generation benchmark for the disjunctive RSA circuits

use std::env;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use num_bigint::BigUint;
use sigset_core::CircuitShape;
use sigset_frontend::{
	circuits::{SignatureCircuit, Variant},
	witness::{KeyPair, KeySet, WitnessBundle},
};

const DEFAULT_MODULUS_BITS: usize = 2048;
const DEFAULT_KEYS: usize = 4;

/// An odd modulus of exactly `bits` bits. Witness generation does not care whether it is an RSA
/// modulus.
fn synthetic_modulus(bits: usize, seed: u64) -> BigUint {
	let offset = BigUint::from(seed) * BigUint::from(0x9e37_79b9_7f4a_7c15u64);
	(BigUint::from(1u8) << (bits - 1)) + (offset << 1u8) + 1u8
}

fn bench_witness_generation(c: &mut Criterion) {
	let modulus_bits = env::var("SIGSET_MODULUS_BITS")
		.ok()
		.and_then(|s| s.parse::<usize>().ok())
		.unwrap_or(DEFAULT_MODULUS_BITS);
	let n_keys = env::var("SIGSET_KEYS")
		.ok()
		.and_then(|s| s.parse::<usize>().ok())
		.unwrap_or(DEFAULT_KEYS);

	let shape = CircuitShape::rsa(modulus_bits, n_keys).unwrap();
	println!("\nWitness Benchmark Parameters:");
	println!("  Shape: {shape}");
	println!("=======================================\n");

	let keys: Vec<KeyPair> = (0..n_keys as u64)
		.map(|seed| KeyPair::new(65537u32, synthetic_modulus(modulus_bits, seed)))
		.collect();
	let signature = BigUint::from(0xdead_beefu64) << (modulus_bits / 2);
	let message = signature.modpow(&keys[n_keys - 1].exponent, &keys[n_keys - 1].modulus);
	let key_set = KeySet::new(shape, keys).unwrap();

	let mut group = c.benchmark_group("witness");
	group.sample_size(10);

	group.bench_function("assemble", |b| {
		b.iter(|| WitnessBundle::assemble(&shape, &key_set, &signature, &message).unwrap())
	});

	let bundle = WitnessBundle::assemble(&shape, &key_set, &signature, &message).unwrap();
	for variant in [Variant::Selector, Variant::ZeroProduct] {
		let circuit = SignatureCircuit::build(shape, variant);
		group.bench_with_input(BenchmarkId::new("populate", variant), &bundle, |b, bundle| {
			b.iter(|| circuit.populate(bundle).unwrap())
		});
	}

	group.finish();
}

criterion_group!(witness, bench_witness_generation);
criterion_main!(witness);
