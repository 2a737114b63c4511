use num_bigint::BigUint;
use sigset_core::{CircuitShape, Fr};

use super::{
	error::WitnessError,
	keys::{EncodedKey, KeySet},
	limbs::encode_limbs,
	merkle::{MerkleProof, MerkleTree},
};

/// Everything a prover feeds into the disjunctive circuits for one proof attempt.
///
/// The bundle holds the signature, so it must not outlive the attempt it was assembled for.
#[derive(Debug, Clone)]
pub struct WitnessBundle {
	pub shape: CircuitShape,
	pub keys: Vec<EncodedKey>,
	pub signature: Vec<u64>,
	pub message: Vec<u64>,
	/// Index of the first key that verifies the signature.
	pub matched: usize,
	/// The full public-signal vector, key data first.
	pub public_signals: Vec<Fr>,
}

impl WitnessBundle {
	/// Encodes all values and locates the matching key.
	///
	/// # Errors
	///
	/// - [`WitnessError::ShapeMismatch`] if `key_set` was validated against another shape,
	/// - [`WitnessError::ValueTooWide`] if the signature or message does not fit the shape,
	/// - [`WitnessError::NoMatchingKey`] if no key verifies the signature over the message.
	pub fn assemble(
		shape: &CircuitShape,
		key_set: &KeySet,
		signature: &BigUint,
		message: &BigUint,
	) -> Result<Self, WitnessError> {
		let _span = tracing::debug_span!("witness_assembly", %shape).entered();
		check_shape(shape, key_set)?;
		let signature_limbs = encode_value("signature", signature, shape)?;
		let public_signals = public_signals(shape, key_set, message)?;
		let message_limbs = encode_value("message", message, shape)?;

		let matched = key_set
			.find_match(signature, message)
			.ok_or(WitnessError::NoMatchingKey)?;
		tracing::debug!(matched, "found a matching key");

		Ok(Self {
			shape: *shape,
			keys: key_set.encoded().to_vec(),
			signature: signature_limbs,
			message: message_limbs,
			matched,
			public_signals,
		})
	}

	/// The one-hot selector vector of the matched key.
	pub fn one_hot(&self) -> Vec<bool> {
		(0..self.shape.n_keys).map(|i| i == self.matched).collect()
	}

	/// The inclusion proof of the matched key in the Merkle tree over the key set.
	pub fn merkle_proof(&self) -> MerkleProof {
		MerkleTree::from_keys(&self.keys).proof(self.matched)
	}
}

/// The public signals of the disjunctive circuits: all exponent bits, then all modulus limbs,
/// then the message limbs.
pub fn public_signals(
	shape: &CircuitShape,
	key_set: &KeySet,
	message: &BigUint,
) -> Result<Vec<Fr>, WitnessError> {
	check_shape(shape, key_set)?;
	let mut signals = key_signals(key_set);
	let message_limbs = encode_value("message", message, shape)?;
	signals.extend(message_limbs.into_iter().map(Fr::from));
	Ok(signals)
}

/// The key prefix of the public signals.
pub fn key_signals(key_set: &KeySet) -> Vec<Fr> {
	let keys = key_set.encoded();
	let bits = keys
		.iter()
		.flat_map(|key| key.exponent_bits.iter().map(|&bit| Fr::from(bit as u64)));
	let limbs = keys
		.iter()
		.flat_map(|key| key.modulus_limbs.iter().map(|&limb| Fr::from(limb)));
	bits.chain(limbs).collect()
}

/// The public signals of the Merkle circuit: the root of the key tree, then the message limbs.
pub fn merkle_public_signals(
	shape: &CircuitShape,
	key_set: &KeySet,
	message: &BigUint,
) -> Result<Vec<Fr>, WitnessError> {
	check_shape(shape, key_set)?;
	let mut signals = vec![MerkleTree::from_keys(key_set.encoded()).root()];
	let message_limbs = encode_value("message", message, shape)?;
	signals.extend(message_limbs.into_iter().map(Fr::from));
	Ok(signals)
}

fn check_shape(shape: &CircuitShape, key_set: &KeySet) -> Result<(), WitnessError> {
	if key_set.shape() != shape {
		return Err(WitnessError::ShapeMismatch {
			key_set: *key_set.shape(),
			circuit: *shape,
		});
	}
	Ok(())
}

fn encode_value(
	what: &'static str,
	value: &BigUint,
	shape: &CircuitShape,
) -> Result<Vec<u64>, WitnessError> {
	encode_limbs(value, shape.limb_bits, shape.n_limbs).ok_or(WitnessError::ValueTooWide {
		what,
		bits: value.bits(),
		max: shape.integer_bits(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::witness::KeyPair;

	fn shape() -> CircuitShape {
		CircuitShape::new(2, 16, 1, 17).unwrap()
	}

	fn key_set() -> KeySet {
		KeySet::new(shape(), vec![KeyPair::new(3u32, 10403u32), KeyPair::new(65537u32, 12827u32)])
			.unwrap()
	}

	#[test]
	fn assemble_finds_key() {
		// 1234^65537 mod 12827 = 2271
		let bundle = WitnessBundle::assemble(
			&shape(),
			&key_set(),
			&BigUint::from(1234u32),
			&BigUint::from(2271u32),
		)
		.unwrap();
		assert_eq!(bundle.matched, 1);
		assert_eq!(bundle.one_hot(), vec![false, true]);
		assert_eq!(bundle.signature, vec![1234]);
		assert_eq!(bundle.message, vec![2271]);
	}

	#[test]
	fn assemble_reports_no_matching_key() {
		let err = WitnessBundle::assemble(
			&shape(),
			&key_set(),
			&BigUint::from(1234u32),
			&BigUint::from(2272u32),
		)
		.unwrap_err();
		assert_eq!(err, WitnessError::NoMatchingKey);
	}

	#[test]
	fn rejects_oversized_values() {
		let err = WitnessBundle::assemble(
			&shape(),
			&key_set(),
			&BigUint::from(1u32 << 16),
			&BigUint::from(1u32),
		)
		.unwrap_err();
		assert!(matches!(err, WitnessError::ValueTooWide { what: "signature", .. }));
	}

	#[test]
	fn rejects_foreign_shape() {
		let other = CircuitShape::new(2, 16, 2, 17).unwrap();
		let err = public_signals(&other, &key_set(), &BigUint::from(1u8)).unwrap_err();
		assert!(matches!(err, WitnessError::ShapeMismatch { .. }));
	}

	#[test]
	fn public_signal_layout() {
		let signals = public_signals(&shape(), &key_set(), &BigUint::from(5566u32)).unwrap();
		assert_eq!(signals.len(), shape().n_key_signals() + shape().n_message_signals());
		// exponent 3 of the first key
		assert_eq!(signals[0], Fr::from(1u64));
		assert_eq!(signals[1], Fr::from(1u64));
		assert_eq!(signals[2], Fr::from(0u64));
		// exponent 65537 of the second key
		assert_eq!(signals[17], Fr::from(1u64));
		assert_eq!(signals[33], Fr::from(1u64));
		// moduli, then the message
		assert_eq!(signals[34], Fr::from(10403u64));
		assert_eq!(signals[35], Fr::from(12827u64));
		assert_eq!(signals[36], Fr::from(5566u64));
	}
}
