use sigset_core::shape::bit_len;

use super::biguint::BigUint;
use crate::compiler::{CircuitBuilder, Wire};

/// Add two arbitrary-sized `BigUint`s with carry propagation.
///
/// Computes `a + b` where both inputs have canonical limbs. The result has
/// `max(a.limbs.len(), b.limbs.len()) + 1` canonical limbs, so it never overflows.
///
/// # Arguments
/// * `builder` - Circuit builder for constraint generation
/// * `limb_bits` - Width of every limb
/// * `a` - First operand
/// * `b` - Second operand
pub fn add(builder: &CircuitBuilder, limb_bits: usize, a: &BigUint, b: &BigUint) -> BigUint {
	let n_limbs = a.limbs.len().max(b.limbs.len());
	let mut accumulator = vec![vec![]; n_limbs + 1];
	for (i, &limb) in a.limbs.iter().enumerate() {
		accumulator[i].push(limb);
	}
	for (i, &limb) in b.limbs.iter().enumerate() {
		accumulator[i].push(limb);
	}
	compute_stack_adds(builder, limb_bits, &accumulator, limb_bits)
}

/// Computes multi-operand addition with carry propagation across limb positions.
///
/// This function is the core of bignum arithmetic. Every limb position `i` holds a stack of values
/// that are summed into a column together with the carry from position `i - 1`. The column is then
/// split into a canonical limb and the carry into position `i + 1`.
///
/// # Arguments
/// * `builder` - Circuit builder for constraint generation
/// * `limb_bits` - Width of the output limbs
/// * `limb_stacks` - Array where `limb_stacks[i]` contains all values to be added at limb position
///   `i`.
/// * `entry_bits` - Upper bound on the width of every stack entry
///
/// # Constraints
/// - Every output limb is range checked to `limb_bits` bits.
/// - Every intermediate carry is range checked to its worst-case width.
/// - The carry out of the last position must be zero. This ensures the result fits in
///   `limb_stacks.len()` limbs without overflow.
pub(super) fn compute_stack_adds(
	builder: &CircuitBuilder,
	limb_bits: usize,
	limb_stacks: &[Vec<Wire>],
	entry_bits: usize,
) -> BigUint {
	assert!(entry_bits >= limb_bits, "stack entries are at least as wide as limbs");
	let max_stack = limb_stacks.iter().map(Vec::len).max().unwrap_or(0) + 1;
	let carry_bits = entry_bits - limb_bits + bit_len(max_stack) + 1;

	let mut limbs = Vec::with_capacity(limb_stacks.len());
	let mut carry: Option<Wire> = None;
	for (i, limb_stack) in limb_stacks.iter().enumerate() {
		let mut column = limb_stack.clone();
		column.extend(carry);
		if column.is_empty() {
			limbs.push(builder.zero());
			continue;
		}

		let total = builder.sum(&column);
		let (lo, hi) = builder.split_limb(total, limb_bits);
		builder.range_check(format!("stack_adds_limb[{i}]"), lo, limb_bits);
		if i + 1 < limb_stacks.len() {
			builder.range_check(format!("stack_adds_carry[{i}]"), hi, carry_bits);
			carry = Some(hi);
		} else {
			builder.assert_zero("stack_adds_final_carry_zero", hi);
		}
		limbs.push(lo);
	}
	BigUint { limbs }
}
