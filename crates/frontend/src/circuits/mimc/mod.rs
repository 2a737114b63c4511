//! MiMC-7 in the circuit, matching [`reference`].
//!
//! Each round costs four multiplications (`t^2`, `t^4`, `t^6`, `t^7`).

pub mod reference;

use sigset_core::Fr;

use crate::{
	circuits::merkle::Compression,
	compiler::{CircuitBuilder, Wire},
};

/// The keyed permutation `E_k(x)`.
pub fn mimc7(b: &CircuitBuilder, x: Wire, k: Wire) -> Wire {
	let one = Fr::from(1u64);
	let mut r = x;
	for (i, c) in reference::round_constants().iter().enumerate() {
		let t = if i == 0 {
			b.add(r, k)
		} else {
			b.lin_comb(&[(r, one), (k, one)], *c)
		};
		let t2 = b.mul(t, t);
		let t4 = b.mul(t2, t2);
		let t6 = b.mul(t4, t2);
		r = b.mul(t6, t);
	}
	b.add(r, k)
}

/// Miyaguchi-Preneel chaining over `inputs`, starting with `r = key`.
pub fn multi_hash(b: &CircuitBuilder, inputs: &[Wire], key: Wire) -> Wire {
	inputs.iter().fold(key, |r, &x| {
		let e = mimc7(b, x, r);
		b.sum(&[r, x, e])
	})
}

/// MiMC-7 two-to-one compression.
pub struct Mimc7;

impl Compression for Mimc7 {
	fn compress(b: &CircuitBuilder, left: Wire, right: Wire) -> Wire {
		multi_hash(b, &[left, right], b.zero())
	}

	fn compress_native(left: Fr, right: Fr) -> Fr {
		reference::compress(left, right)
	}
}
