//! The configuration constants shared by circuit, witness generator and verifier.

use std::fmt;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::{error::ShapeError, field::CAPACITY_BITS};

/// Sizes every circuit and witness in this workspace is instantiated with.
///
/// A shape is fixed when a constraint system is compiled. Prover and verifier must use the very
/// same shape; there is no runtime negotiation.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, CanonicalSerialize, CanonicalDeserialize,
)]
pub struct CircuitShape {
	/// Number of keys in the key set.
	pub n_keys: usize,
	/// Width of one limb in bits.
	pub limb_bits: usize,
	/// Number of limbs of a modulus, a signature and a message.
	pub n_limbs: usize,
	/// Number of bits of every public exponent.
	pub exp_bits: usize,
}

impl CircuitShape {
	pub fn new(
		n_keys: usize,
		limb_bits: usize,
		n_limbs: usize,
		exp_bits: usize,
	) -> Result<Self, ShapeError> {
		let shape = Self {
			n_keys,
			limb_bits,
			n_limbs,
			exp_bits,
		};
		shape.validate()?;
		Ok(shape)
	}

	/// 64-bit limbs sized for `modulus_bits`-bit RSA keys with the exponent 65537.
	pub fn rsa(modulus_bits: usize, n_keys: usize) -> Result<Self, ShapeError> {
		Self::new(n_keys, 64, modulus_bits.div_ceil(64), 17)
	}

	/// Checks that all sizes are non-zero and that limb products fit into the field.
	///
	/// The widest intermediate value of any circuit is a product column of the base reduction,
	/// which sums up to `2 * n_limbs` products of two limbs before carries are split off.
	pub fn validate(&self) -> Result<(), ShapeError> {
		for (field, value) in [
			("n_keys", self.n_keys),
			("n_limbs", self.n_limbs),
			("exp_bits", self.exp_bits),
		] {
			if value == 0 {
				return Err(ShapeError::Empty { field });
			}
		}
		if !(1..=64).contains(&self.limb_bits) {
			return Err(ShapeError::LimbWidth {
				limb_bits: self.limb_bits,
			});
		}
		let required = self.product_bits();
		if required > CAPACITY_BITS {
			return Err(ShapeError::Headroom {
				required,
				available: CAPACITY_BITS,
			});
		}
		Ok(())
	}

	/// Upper bound on the bit width of an unnormalized product column.
	pub fn product_bits(&self) -> usize {
		2 * self.limb_bits + bit_len(2 * self.n_limbs + 1) + 2
	}

	/// Number of bits of the largest integer representable in `n_limbs` limbs.
	pub fn integer_bits(&self) -> usize {
		self.limb_bits * self.n_limbs
	}

	/// Number of levels of the Merkle tree over the key set.
	pub fn merkle_depth(&self) -> usize {
		bit_len(self.n_keys.saturating_sub(1))
	}

	/// Number of public signals describing the key set: all exponent bits followed by all
	/// modulus limbs.
	pub fn n_key_signals(&self) -> usize {
		self.n_keys * (self.exp_bits + self.n_limbs)
	}

	pub fn n_message_signals(&self) -> usize {
		self.n_limbs
	}
}

impl fmt::Display for CircuitShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} keys, {}x{}-bit limbs, {}-bit exponents",
			self.n_keys, self.n_limbs, self.limb_bits, self.exp_bits
		)
	}
}

/// Number of significant bits of `x`; `bit_len(0) == 0`.
pub fn bit_len(x: usize) -> usize {
	(usize::BITS - x.leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rsa_presets() {
		let shape = CircuitShape::rsa(2048, 4).unwrap();
		assert_eq!(shape.n_limbs, 32);
		assert_eq!(shape.limb_bits, 64);
		assert_eq!(shape.exp_bits, 17);
		assert_eq!(shape.integer_bits(), 2048);
		assert_eq!(CircuitShape::rsa(1000, 1).unwrap().n_limbs, 16);
	}

	#[test]
	fn rejects_bad_shapes() {
		assert_eq!(CircuitShape::new(0, 16, 1, 17), Err(ShapeError::Empty { field: "n_keys" }));
		assert_eq!(CircuitShape::new(1, 16, 0, 17), Err(ShapeError::Empty { field: "n_limbs" }));
		assert_eq!(
			CircuitShape::new(1, 65, 1, 17),
			Err(ShapeError::LimbWidth { limb_bits: 65 })
		);
		assert_eq!(CircuitShape::new(1, 0, 1, 17), Err(ShapeError::LimbWidth { limb_bits: 0 }));
	}

	#[test]
	fn widest_limbs_keep_headroom() {
		let shape = CircuitShape::rsa(8192, 1).unwrap();
		assert_eq!(shape.product_bits(), 128 + 9 + 2);
		assert!(shape.product_bits() <= CAPACITY_BITS);
	}

	#[test]
	fn merkle_depth() {
		let depth = |n_keys| CircuitShape::new(n_keys, 16, 1, 17).unwrap().merkle_depth();
		assert_eq!(depth(1), 0);
		assert_eq!(depth(2), 1);
		assert_eq!(depth(3), 2);
		assert_eq!(depth(4), 2);
		assert_eq!(depth(5), 3);
	}

	#[test]
	fn signal_counts() {
		let shape = CircuitShape::new(2, 16, 1, 17).unwrap();
		assert_eq!(shape.n_key_signals(), 2 * 17 + 2);
		assert_eq!(shape.n_message_signals(), 1);
	}
}
