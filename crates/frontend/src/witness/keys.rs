use num_bigint::BigUint;
use sigset_core::CircuitShape;

use super::{
	error::WitnessError,
	limbs::{encode_limbs, exponent_bits},
	modexp::mod_exp_trace,
};

/// An RSA public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPair {
	pub exponent: BigUint,
	pub modulus: BigUint,
}

impl KeyPair {
	pub fn new(exponent: impl Into<BigUint>, modulus: impl Into<BigUint>) -> Self {
		Self {
			exponent: exponent.into(),
			modulus: modulus.into(),
		}
	}

	/// Checks `signature ^ exponent mod modulus == message`.
	pub fn verifies(&self, signature: &BigUint, message: &BigUint) -> bool {
		*message < self.modulus && signature.modpow(&self.exponent, &self.modulus) == *message
	}
}

/// A key in the form the circuits consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKey {
	/// `exp_bits` exponent bits, least significant first.
	pub exponent_bits: Vec<bool>,
	/// `n_limbs` modulus limbs, least significant first.
	pub modulus_limbs: Vec<u64>,
}

/// A validated key set of exactly `shape.n_keys` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
	shape: CircuitShape,
	keys: Vec<KeyPair>,
	encoded: Vec<EncodedKey>,
	n_supplied: usize,
}

impl KeySet {
	/// Validates `keys` against `shape`, padding a short set by duplicating its last key.
	///
	/// # Errors
	///
	/// Fails for an empty set, for more keys than the shape holds, for exponents or moduli wider
	/// than the shape and for moduli below two.
	pub fn new(shape: CircuitShape, mut keys: Vec<KeyPair>) -> Result<Self, WitnessError> {
		let n_supplied = keys.len();
		let Some(last) = keys.last().cloned() else {
			return Err(WitnessError::EmptyKeySet);
		};
		if n_supplied > shape.n_keys {
			return Err(WitnessError::TooManyKeys {
				max: shape.n_keys,
				actual: n_supplied,
			});
		}

		let mut encoded = Vec::with_capacity(shape.n_keys);
		for (index, key) in keys.iter().enumerate() {
			if key.modulus <= BigUint::from(1u8) {
				return Err(WitnessError::DegenerateModulus { index });
			}
			let exponent_bits = exponent_bits(&key.exponent, shape.exp_bits).ok_or(
				WitnessError::ExponentTooWide {
					index,
					bits: key.exponent.bits(),
					max: shape.exp_bits,
				},
			)?;
			let modulus_limbs = encode_limbs(&key.modulus, shape.limb_bits, shape.n_limbs).ok_or(
				WitnessError::ModulusTooWide {
					index,
					bits: key.modulus.bits(),
					max: shape.integer_bits(),
				},
			)?;
			encoded.push(EncodedKey {
				exponent_bits,
				modulus_limbs,
			});
		}

		keys.resize(shape.n_keys, last);
		if let Some(last_encoded) = encoded.last().cloned() {
			encoded.resize(shape.n_keys, last_encoded);
		}

		Ok(Self {
			shape,
			keys,
			encoded,
			n_supplied,
		})
	}

	pub fn shape(&self) -> &CircuitShape {
		&self.shape
	}

	/// All keys including the padding.
	pub fn keys(&self) -> &[KeyPair] {
		&self.keys
	}

	pub fn encoded(&self) -> &[EncodedKey] {
		&self.encoded
	}

	/// The number of keys before padding.
	pub fn n_supplied(&self) -> usize {
		self.n_supplied
	}

	/// Returns the index of the first key under which `signature` verifies `message`.
	///
	/// The check replays the exponentiation schedule of the circuit on the encoded exponent, so a
	/// key found here satisfies the circuit.
	pub fn find_match(&self, signature: &BigUint, message: &BigUint) -> Option<usize> {
		self.keys.iter().zip(&self.encoded).position(|(key, encoded)| {
			mod_exp_trace(signature, &encoded.exponent_bits, &key.modulus).result() == *message
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn shape() -> CircuitShape {
		CircuitShape::new(3, 16, 1, 17).unwrap()
	}

	#[test]
	fn pads_with_last_key() {
		let keys = vec![KeyPair::new(65537u32, 12827u32), KeyPair::new(3u32, 10403u32)];
		let set = KeySet::new(shape(), keys).unwrap();
		assert_eq!(set.n_supplied(), 2);
		assert_eq!(set.keys().len(), 3);
		assert_eq!(set.keys()[2], set.keys()[1]);
		assert_eq!(set.encoded()[2], set.encoded()[1]);
	}

	#[test]
	fn rejects_invalid_sets() {
		assert_eq!(KeySet::new(shape(), vec![]), Err(WitnessError::EmptyKeySet));
		let four = vec![KeyPair::new(3u32, 10403u32); 4];
		assert_eq!(
			KeySet::new(shape(), four),
			Err(WitnessError::TooManyKeys { max: 3, actual: 4 })
		);
		assert_eq!(
			KeySet::new(shape(), vec![KeyPair::new(3u32, 1u32)]),
			Err(WitnessError::DegenerateModulus { index: 0 })
		);
		assert!(matches!(
			KeySet::new(shape(), vec![KeyPair::new(1u32 << 17, 10403u32)]),
			Err(WitnessError::ExponentTooWide { index: 0, .. })
		));
		assert!(matches!(
			KeySet::new(shape(), vec![KeyPair::new(3u32, 1u32 << 16)]),
			Err(WitnessError::ModulusTooWide { index: 0, .. })
		));
	}

	#[test]
	fn finds_matching_key() {
		let keys = vec![KeyPair::new(3u32, 10403u32), KeyPair::new(65537u32, 12827u32)];
		let set = KeySet::new(shape(), keys).unwrap();
		let signature = BigUint::from(1234u32);
		assert_eq!(set.find_match(&signature, &BigUint::from(2271u32)), Some(1));
		assert_eq!(set.find_match(&signature, &BigUint::from(7820u32)), Some(0));
		assert_eq!(set.find_match(&signature, &BigUint::from(7821u32)), None);
		assert!(set.keys()[1].verifies(&signature, &BigUint::from(2271u32)));
		assert!(!set.keys()[0].verifies(&signature, &BigUint::from(2271u32)));
	}
}
