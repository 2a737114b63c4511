use num_bigint::BigUint;
use sigset_core::{
	Fr,
	field::{fr_to_biguint, fr_to_u64},
};

use crate::compiler::{Wire, WitnessFiller};

/// Reads canonical `limb_bits`-wide limbs from the given wires.
///
/// Returns `None` if any wire holds a value of `limb_bits` bits or more.
pub fn limbs_from_wires(w: &WitnessFiller, wires: &[Wire], limb_bits: usize) -> Option<Vec<u64>> {
	wires
		.iter()
		.map(|&wire| fr_to_u64(w[wire]).filter(|&limb| limb_bits >= 64 || limb >> limb_bits == 0))
		.collect()
}

/// Returns `Σ w[wires[i]] * 2^(limb_bits * i)`, computed over the integers.
///
/// Limbs that are not canonical are accepted and contribute their full value.
pub fn biguint_from_wires(w: &WitnessFiller, wires: &[Wire], limb_bits: usize) -> BigUint {
	wires.iter().rev().fold(BigUint::ZERO, |acc, &wire| {
		(acc << limb_bits) + fr_to_biguint(w[wire])
	})
}

/// Populate the given wires from little-endian limbs.
///
/// # Panics
/// * If `limbs.len() != wires.len()`
pub fn populate_wires(w: &mut WitnessFiller, wires: &[Wire], limbs: &[u64]) {
	assert_eq!(wires.len(), limbs.len(), "populate_wires: length mismatch");
	for (&wire, &limb) in wires.iter().zip(limbs) {
		w[wire] = Fr::from(limb);
	}
}

/// Populate the given wires from bits, one bit per wire.
pub fn populate_bits(w: &mut WitnessFiller, wires: &[Wire], bits: &[bool]) {
	assert_eq!(wires.len(), bits.len(), "populate_bits: length mismatch");
	for (&wire, &bit) in wires.iter().zip(bits) {
		w[wire] = Fr::from(bit as u64);
	}
}
