//! "The message equals `signature ^ e_i mod N_i` for some key `i`".
//!
//! Both variants share the public inputs of [`KeySetInputs`] and keep the signature private.
//! They differ in how the matching key is singled out:
//!
//! - [`SelectorVerifier`] witnesses the index of the key together with a one-hot selector vector
//!   and runs a single exponentiation over the selected key.
//! - [`ZeroProductVerifier`] runs one exponentiation per key and proves that at least one of
//!   them equals the message. No witness refers to the index.

mod selector;
mod zero_product;

#[cfg(test)]
mod tests;

use sigset_core::CircuitShape;

pub use selector::SelectorVerifier;
pub use zero_product::ZeroProductVerifier;

use super::bignum::{self, BigUint};
use crate::{
	compiler::{CircuitBuilder, Wire, WitnessFiller},
	util::populate_bits,
	witness::WitnessBundle,
};

/// The public inputs of the disjunctive circuits.
///
/// Inout wires are allocated in public-signal order: the exponent bits of every key, then the
/// modulus limbs of every key, then the message limbs.
pub struct KeySetInputs {
	/// `n_keys` vectors of `exp_bits` bits, least significant first.
	pub exponents: Vec<Vec<Wire>>,
	pub moduli: Vec<BigUint>,
	pub message: BigUint,
}

impl KeySetInputs {
	/// Allocates the public inputs and constrains them to their declared widths.
	pub fn new(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		let exponents: Vec<Vec<Wire>> = (0..shape.n_keys)
			.map(|_| (0..shape.exp_bits).map(|_| builder.add_inout()).collect())
			.collect();
		let moduli: Vec<BigUint> = (0..shape.n_keys)
			.map(|_| BigUint::new_inout(builder, shape.n_limbs))
			.collect();
		let message = BigUint::new_inout(builder, shape.n_limbs);

		for (i, (exponent, modulus)) in exponents.iter().zip(&moduli).enumerate() {
			let b = builder.subcircuit(format!("key[{i}]"));
			for (j, &bit) in exponent.iter().enumerate() {
				b.assert_bool(format!("exponent_bit[{j}]"), bit);
			}
			bignum::range_check(&b, "modulus_range", modulus, shape.limb_bits);
		}
		bignum::range_check(builder, "message_range", &message, shape.limb_bits);

		KeySetInputs {
			exponents,
			moduli,
			message,
		}
	}

	pub fn populate(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		for (i, key) in bundle.keys.iter().enumerate() {
			populate_bits(w, &self.exponents[i], &key.exponent_bits);
			self.moduli[i].populate_limbs(w, &key.modulus_limbs);
		}
		self.message.populate_limbs(w, &bundle.message);
	}
}

/// Allocates the private signature and constrains its limbs.
fn signature_witness(builder: &CircuitBuilder, shape: &CircuitShape) -> BigUint {
	let signature = BigUint::new_witness(builder, shape.n_limbs);
	bignum::range_check(builder, "signature_range", &signature, shape.limb_bits);
	signature
}
