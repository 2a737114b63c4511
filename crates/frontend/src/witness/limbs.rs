//! Positional limb encoding of unsigned integers.

use num_bigint::BigUint;

/// Encodes `value` as exactly `n_limbs` little-endian limbs of `limb_bits` bits.
///
/// Returns `None` if the value needs more than `limb_bits * n_limbs` bits.
pub fn encode_limbs(value: &BigUint, limb_bits: usize, n_limbs: usize) -> Option<Vec<u64>> {
	assert!((1..=64).contains(&limb_bits), "limb width must be between 1 and 64 bits");
	if value.bits() > (limb_bits * n_limbs) as u64 {
		return None;
	}
	let mut limbs = if limb_bits == 64 {
		value.to_u64_digits()
	} else {
		let mask = (BigUint::from(1u8) << limb_bits) - 1u8;
		let mut rest = value.clone();
		let mut limbs = Vec::with_capacity(n_limbs);
		while rest.bits() > 0 {
			let limb = &rest & &mask;
			limbs.push(limb.iter_u64_digits().next().unwrap_or(0));
			rest >>= limb_bits;
		}
		limbs
	};
	limbs.resize(n_limbs, 0);
	Some(limbs)
}

/// Returns `Σ limbs[i] * 2^(limb_bits * i)`.
pub fn decode_limbs(limbs: &[u64], limb_bits: usize) -> BigUint {
	limbs
		.iter()
		.rev()
		.fold(BigUint::ZERO, |acc, &limb| (acc << limb_bits) + limb)
}

/// The `n_bits` least significant bits of `value`, least significant first.
///
/// Returns `None` if `value` has more than `n_bits` bits.
pub fn exponent_bits(value: &BigUint, n_bits: usize) -> Option<Vec<bool>> {
	if value.bits() > n_bits as u64 {
		return None;
	}
	Some((0..n_bits as u64).map(|i| value.bit(i)).collect())
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn boundary_values() {
		let limb_bits = 16;
		let n_limbs = 4;
		let one = BigUint::from(1u8);
		let cases = [
			BigUint::ZERO,
			one.clone(),
			(&one << limb_bits) - 1u8,
			&one << limb_bits,
			(&one << (limb_bits * n_limbs)) - 1u8,
		];
		for value in cases {
			let limbs = encode_limbs(&value, limb_bits, n_limbs).unwrap();
			assert_eq!(limbs.len(), n_limbs);
			assert!(limbs.iter().all(|&limb| limb < 1 << limb_bits));
			assert_eq!(decode_limbs(&limbs, limb_bits), value);
		}
	}

	#[test]
	fn too_wide() {
		let value = BigUint::from(1u8) << 64;
		assert_eq!(encode_limbs(&value, 16, 4), None);
		assert_eq!(encode_limbs(&value, 64, 1), None);
		assert!(encode_limbs(&value, 64, 2).is_some());
	}

	#[test]
	fn exponent_bits_lsb_first() {
		let bits = exponent_bits(&BigUint::from(65537u32), 17).unwrap();
		assert!(bits[0]);
		assert!(bits[16]);
		assert_eq!(bits.iter().filter(|&&b| b).count(), 2);
		assert_eq!(exponent_bits(&BigUint::from(65537u32), 16), None);
	}

	proptest! {
		#[test]
		fn round_trip(digits in prop::collection::vec(any::<u32>(), 0..8), limb_bits in 1usize..=64) {
			let value = BigUint::new(digits);
			let n_limbs = (value.bits() as usize).div_ceil(limb_bits).max(1);
			let limbs = encode_limbs(&value, limb_bits, n_limbs).unwrap();
			prop_assert_eq!(decode_limbs(&limbs, limb_bits), value);
		}
	}
}
