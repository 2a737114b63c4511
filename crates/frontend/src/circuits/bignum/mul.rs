use super::{add::compute_stack_adds, biguint::BigUint};
use crate::compiler::CircuitBuilder;

/// Multiply two arbitrary-sized `BigUint`s.
///
/// Computes `a * b` by schoolbook convolution: limb position `k` accumulates every product
/// `a[i] * b[j]` with `i + j = k` before carries are split off. The result has
/// `a.limbs.len() + b.limbs.len()` limbs to accommodate the full product without overflow.
///
/// # Arguments
/// * `builder` - Circuit builder for constraint generation
/// * `limb_bits` - Width of every limb
/// * `a` - First operand `BigUint`, with canonical limbs
/// * `b` - Second operand `BigUint`, with canonical limbs
///
/// # Returns
/// Product `BigUint` with `a.limbs.len() + b.limbs.len()` canonical limbs
pub fn mul(builder: &CircuitBuilder, limb_bits: usize, a: &BigUint, b: &BigUint) -> BigUint {
	let mut accumulator = vec![vec![]; a.limbs.len() + b.limbs.len()];
	for (i, &ai) in a.limbs.iter().enumerate() {
		for (j, &bj) in b.limbs.iter().enumerate() {
			accumulator[i + j].push(builder.mul(ai, bj));
		}
	}
	compute_stack_adds(builder, limb_bits, &accumulator, 2 * limb_bits)
}

/// Square an arbitrary-sized `BigUint`.
///
/// Computes `a * a` taking advantage of the symmetry in squaring: each cross-product appears
/// twice but is computed once.
///
/// # Returns
/// The square of `a` as a `BigUint` with `2 * a.limbs.len()` limbs
pub fn square(builder: &CircuitBuilder, limb_bits: usize, a: &BigUint) -> BigUint {
	let mut accumulator = vec![vec![]; 2 * a.limbs.len()];
	for (i, &ai) in a.limbs.iter().enumerate() {
		for (j, &aj) in a.limbs.iter().enumerate().skip(i) {
			let product = builder.mul(ai, aj);
			accumulator[i + j].push(product);
			if i != j {
				// Off-diagonal elements appear twice
				accumulator[i + j].push(product);
			}
		}
	}
	compute_stack_adds(builder, limb_bits, &accumulator, 2 * limb_bits)
}
