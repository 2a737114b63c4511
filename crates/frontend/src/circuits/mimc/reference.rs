//! Native MiMC-7 over the BN254 scalar field.

use std::sync::OnceLock;

use ark_ff::{Field, PrimeField, Zero};
use sha3::{Digest, Keccak256};
use sigset_core::Fr;

pub const N_ROUNDS: usize = 91;

const SEED: &[u8] = b"mimc";

/// The round constants: `c_0 = 0`, `c_i = keccak256^(i+1)(seed) mod p`, read big-endian.
pub fn round_constants() -> &'static [Fr] {
	static CONSTANTS: OnceLock<Vec<Fr>> = OnceLock::new();
	CONSTANTS.get_or_init(|| {
		let mut constants = Vec::with_capacity(N_ROUNDS);
		constants.push(Fr::zero());
		let mut digest = Keccak256::digest(SEED);
		for _ in 1..N_ROUNDS {
			digest = Keccak256::digest(digest);
			constants.push(Fr::from_be_bytes_mod_order(&digest));
		}
		constants
	})
}

/// The keyed permutation `E_k(x)`: 91 rounds of `x <- (x + k + c_i)^7`, then `x + k`.
pub fn mimc7(x: Fr, k: Fr) -> Fr {
	let mut r = x;
	for (i, c) in round_constants().iter().enumerate() {
		let t = if i == 0 { r + k } else { r + k + c };
		r = t.pow([7u64]);
	}
	r + k
}

/// Miyaguchi-Preneel chaining: `r <- r + x_i + E_r(x_i)`, starting with `r = key`.
pub fn multi_hash(inputs: &[Fr], key: Fr) -> Fr {
	inputs
		.iter()
		.fold(key, |r, &x| r + x + mimc7(x, r))
}

/// Two-to-one compression of Merkle nodes.
pub fn compress(left: Fr, right: Fr) -> Fr {
	multi_hash(&[left, right], Fr::zero())
}
