//! Modular exponentiation by square-and-multiply.

use super::bignum::{BigUint, mod_reduce, mod_reduce_wide, mul, square};
use crate::compiler::{CircuitBuilder, Wire};

/// Verifies `result = base ^ exponent mod modulus`.
///
/// The exponent bits are consumed least significant first. Two accumulators are carried along:
///
/// ```text
/// power_0 = base mod modulus,  partial_0 = 1
/// partial_{i+1} = partial_i * select(bit_i, power_i, 1) mod modulus
/// power_{i+1} = power_i ^ 2 mod modulus
/// ```
///
/// The last squaring is not computed since nothing consumes it.
pub struct ModExp {
	pub base: BigUint,
	pub exponent: Vec<Wire>,
	pub modulus: BigUint,
	pub result: BigUint,
}

impl ModExp {
	/// # Arguments
	/// * `builder` - Circuit builder for constraint generation
	/// * `limb_bits` - Width of every limb
	/// * `base` - The base, with canonical limbs of any count
	/// * `exponent` - Exponent bits, least significant first. The caller constrains them to be
	///   boolean.
	/// * `modulus` - The modulus, with canonical limbs. Must not be zero.
	///
	/// # Returns
	/// The exponentiation circuit. `result` has as many limbs as `modulus` and is fully reduced.
	pub fn new(
		builder: &CircuitBuilder,
		limb_bits: usize,
		base: BigUint,
		exponent: Vec<Wire>,
		modulus: BigUint,
	) -> Self {
		let n_limbs = modulus.limbs.len();
		let mut power = mod_reduce_wide(builder, "reduce_base", limb_bits, &base, &modulus);

		let mut one_limbs = vec![0u64; n_limbs];
		one_limbs[0] = 1;
		let mut partial = BigUint::new_constant(builder, &one_limbs);

		for (i, &bit) in exponent.iter().enumerate() {
			let b = builder.subcircuit(format!("step[{i}]"));
			let factor = select_or_one(&b, bit, &power);
			let product = mul(&b, limb_bits, &partial, &factor);
			partial = mod_reduce(&b, "multiply", limb_bits, &product, &modulus);

			if i + 1 < exponent.len() {
				let squared = square(&b, limb_bits, &power);
				power = mod_reduce(&b, "square", limb_bits, &squared, &modulus);
			}
		}

		ModExp {
			base,
			exponent,
			modulus,
			result: partial,
		}
	}
}

/// Returns `x` if `bit = 1` and the number `1` if `bit = 0`, limb by limb.
fn select_or_one(b: &CircuitBuilder, bit: Wire, x: &BigUint) -> BigUint {
	let limbs = x
		.limbs
		.iter()
		.enumerate()
		.map(|(i, &limb)| {
			if i == 0 {
				b.select_or_one(bit, limb)
			} else {
				b.mul(bit, limb)
			}
		})
		.collect();
	BigUint { limbs }
}
