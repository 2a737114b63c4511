//! The scalar field every wire value and constraint coefficient lives in.
//!
//! Values are elements of the BN254 scalar field. Big-integer limbs are stored as field elements
//! whose canonical integer representative is below `2^limb_bits`; all conversions below go through
//! that canonical representative.

pub use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use num_bigint::BigUint;

/// The number of bits an integer may have and still be represented in [`Fr`] without wrapping.
pub const CAPACITY_BITS: usize = (Fr::MODULUS_BIT_SIZE - 1) as usize;

/// Reduces `value` into the field.
pub fn fr_from_biguint(value: &BigUint) -> Fr {
	Fr::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Returns the canonical integer representative of `value`.
pub fn fr_to_biguint(value: Fr) -> BigUint {
	BigUint::from_bytes_le(&value.into_bigint().to_bytes_le())
}

/// Returns the canonical representative of `value` if it fits into 64 bits.
pub fn fr_to_u64(value: Fr) -> Option<u64> {
	let repr = value.into_bigint();
	if repr.num_bits() <= 64 {
		Some(repr.as_ref()[0])
	} else {
		None
	}
}

/// Number of significant bits in the canonical representative of `value`.
pub fn fr_bit_len(value: Fr) -> usize {
	value.into_bigint().num_bits() as usize
}

/// `2^exp` as a field element.
pub fn pow2(exp: usize) -> Fr {
	Fr::from(2u64).pow([exp as u64])
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn capacity_is_below_modulus() {
		assert_eq!(CAPACITY_BITS, 253);
		let max = (BigUint::from(1u8) << CAPACITY_BITS) - 1u8;
		assert_eq!(fr_to_biguint(fr_from_biguint(&max)), max);
	}

	#[test]
	fn pow2_matches_integer_shift() {
		for exp in [0, 1, 63, 64, 128, 200] {
			assert_eq!(fr_to_biguint(pow2(exp)), BigUint::from(1u8) << exp);
		}
	}

	proptest! {
		#[test]
		fn u64_conversions_agree(value: u64) {
			let fr = Fr::from(value);
			prop_assert_eq!(fr_to_u64(fr), Some(value));
			prop_assert_eq!(fr_to_biguint(fr), BigUint::from(value));
			prop_assert_eq!(fr_bit_len(fr), 64 - value.leading_zeros() as usize);
		}
	}

	#[test]
	fn wide_values_do_not_fit_u64() {
		assert_eq!(fr_to_u64(pow2(64)), None);
		assert_eq!(fr_to_u64(-Fr::from(1u64)), None);
	}
}
