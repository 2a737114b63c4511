//! Square-and-multiply trace, step for step the schedule of the modular exponentiation circuit.

use num_bigint::BigUint;

/// The accumulators after one exponent bit has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModExpStep {
	pub bit: bool,
	/// `partial * select(bit, power, 1) mod modulus`.
	pub partial: BigUint,
	/// The power used by the next step, `None` after the last bit.
	pub power: Option<BigUint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModExpTrace {
	/// `base mod modulus`, the initial power.
	pub reduced_base: BigUint,
	pub steps: Vec<ModExpStep>,
}

impl ModExpTrace {
	/// The final value of the partial product.
	pub fn result(&self) -> BigUint {
		self.steps
			.last()
			.map_or_else(|| BigUint::from(1u8), |step| step.partial.clone())
	}
}

/// Computes `base ^ exponent mod modulus`, with the exponent given least significant bit first.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_exp_trace(base: &BigUint, exponent_bits: &[bool], modulus: &BigUint) -> ModExpTrace {
	assert!(*modulus != BigUint::ZERO, "modulus must not be zero");
	let reduced_base = base % modulus;
	let mut power = reduced_base.clone();
	let mut partial = BigUint::from(1u8);
	let mut steps = Vec::with_capacity(exponent_bits.len());
	for (i, &bit) in exponent_bits.iter().enumerate() {
		partial = if bit {
			&partial * &power % modulus
		} else {
			&partial % modulus
		};
		let next_power = (i + 1 < exponent_bits.len()).then(|| &power * &power % modulus);
		if let Some(next_power) = &next_power {
			power = next_power.clone();
		}
		steps.push(ModExpStep {
			bit,
			partial: partial.clone(),
			power: next_power,
		});
	}
	ModExpTrace {
		reduced_base,
		steps,
	}
}
