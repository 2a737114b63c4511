use super::{
	add::{add, compute_stack_adds},
	biguint::{BigUint, assert_eq, assert_zero, range_check},
	mul::mul,
};
use crate::compiler::CircuitBuilder;

/// Modular reduction verification for BigUint.
///
/// This circuit verifies that:
///
/// a = quotient * modulus + remainder, with remainder < modulus
///
/// The modulus limbs must already be canonical. The quotient and remainder are range checked
/// here.
pub struct ModReduce {
	pub a: BigUint,
	pub modulus: BigUint,
	pub quotient: BigUint,
	pub remainder: BigUint,
}

impl ModReduce {
	/// Creates a new modular reduction verifier circuit.
	///
	/// # Arguments
	/// * `builder` - Circuit builder for constraint generation
	/// * `limb_bits` - Width of every limb
	/// * `a` - The dividend, with canonical limbs
	/// * `modulus` - The divisor, with canonical limbs
	/// * `quotient` - The quotient
	/// * `remainder` - The remainder, with as many limbs as `modulus`
	///
	/// # Constraints
	/// - `quotient` and `remainder` limbs are range checked.
	/// - `quotient * modulus + remainder` equals `a` without wrapping past the width of `a`.
	/// - `remainder < modulus`.
	pub fn new(
		builder: &CircuitBuilder,
		limb_bits: usize,
		a: BigUint,
		modulus: BigUint,
		quotient: BigUint,
		remainder: BigUint,
	) -> Self {
		assert_eq!(
			remainder.limbs.len(),
			modulus.limbs.len(),
			"ModReduce: remainder and modulus must have the same number of limbs"
		);
		let zero = builder.zero();
		range_check(builder, "quotient_range", &quotient, limb_bits);
		range_check(builder, "remainder_range", &remainder, limb_bits);

		let width = a.limbs.len().max(modulus.limbs.len());
		let product = mul(builder, limb_bits, &quotient, &modulus);
		let (product_lo, product_hi) = product.split_at_limbs(width);
		assert_zero(builder, "product_overflow", &product_hi);

		let reconstructed = add(
			builder,
			limb_bits,
			&product_lo.pad_limbs_to(width, zero),
			&remainder.pad_limbs_to(width, zero),
		);
		let (reconstructed, carry) = reconstructed.split_at_limbs(width);
		assert_zero(builder, "sum_overflow", &carry);
		assert_eq(builder, "a_eq_reconstructed", &reconstructed, &a.pad_limbs_to(width, zero));

		assert_lt(builder, limb_bits, &remainder, &modulus);

		ModReduce {
			a,
			modulus,
			quotient,
			remainder,
		}
	}
}

/// Asserts `a < b` for two canonical numbers of equal width.
///
/// The prover supplies the gap `d = b - a - 1`, which is range checked, and the circuit checks
/// that `a + d + 1` equals `b` without carrying out of the top limb.
pub fn assert_lt(builder: &CircuitBuilder, limb_bits: usize, a: &BigUint, b: &BigUint) {
	let gap = BigUint {
		limbs: builder.biguint_lt_gap_hint("lt_gap", &a.limbs, &b.limbs, limb_bits),
	};
	range_check(builder, "lt_gap_range", &gap, limb_bits);

	let mut stacks: Vec<Vec<_>> = a
		.limbs
		.iter()
		.zip(&gap.limbs)
		.map(|(&a_i, &d_i)| vec![a_i, d_i])
		.collect();
	stacks.push(vec![]);
	stacks[0].push(builder.one());

	let sum = compute_stack_adds(builder, limb_bits, &stacks, limb_bits);
	let (sum, carry) = sum.split_at_limbs(a.limbs.len());
	assert_zero(builder, "lt_carry", &carry);
	assert_eq(builder, "lt_eq", &sum, b);
}

/// Reduces `a` modulo `modulus` when the quotient fits in `a.len - modulus.len + 1` limbs.
///
/// This holds for products of two reduced values. Wider quotients make the witness computation
/// fail.
pub fn mod_reduce(
	builder: &CircuitBuilder,
	name: impl Into<String>,
	limb_bits: usize,
	a: &BigUint,
	modulus: &BigUint,
) -> BigUint {
	let quotient_limbs = (a.limbs.len() + 1).saturating_sub(modulus.limbs.len()).max(1);
	reduce_with_quotient(builder, name, limb_bits, a, modulus, quotient_limbs)
}

/// Reduces `a` modulo `modulus` with a quotient as wide as `a`.
///
/// Accepts any dividend, so it is used for unreduced inputs.
pub fn mod_reduce_wide(
	builder: &CircuitBuilder,
	name: impl Into<String>,
	limb_bits: usize,
	a: &BigUint,
	modulus: &BigUint,
) -> BigUint {
	reduce_with_quotient(builder, name, limb_bits, a, modulus, a.limbs.len())
}

fn reduce_with_quotient(
	builder: &CircuitBuilder,
	name: impl Into<String>,
	limb_bits: usize,
	a: &BigUint,
	modulus: &BigUint,
	quotient_limbs: usize,
) -> BigUint {
	let b = builder.subcircuit(name);
	let (quotient, remainder) =
		b.biguint_divide_hint("divide", &a.limbs, &modulus.limbs, quotient_limbs, limb_bits);
	let reduce = ModReduce::new(
		&b,
		limb_bits,
		a.clone(),
		modulus.clone(),
		BigUint { limbs: quotient },
		BigUint { limbs: remainder },
	);
	reduce.remainder
}
