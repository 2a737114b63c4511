use std::io::{Read, Write};

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use sigset_core::{CircuitShape, Fr};
use sigset_frontend::circuits::Variant;

use crate::error::Error;

const MAGIC: &[u8; 8] = b"SIGSETP1";

/// A published proof.
///
/// The key-derived prefix of the public signals is not part of the artifact. A verifier
/// reconstructs it from the keys it trusts, so the artifact never names the key set it was
/// made for. Only the message limbs are carried along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofArtifact {
	pub shape: CircuitShape,
	pub variant: Variant,
	/// The public signals after the key-derived prefix.
	pub signals: Vec<Fr>,
	pub proof: Vec<u8>,
}

impl ProofArtifact {
	/// Strips the key-derived prefix off `public_signals`.
	///
	/// # Panics
	///
	/// Panics if `public_signals` is shorter than the prefix of `variant`.
	pub fn new(
		shape: CircuitShape,
		variant: Variant,
		public_signals: &[Fr],
		proof: Vec<u8>,
	) -> Self {
		let n_key_signals = variant.n_key_signals(&shape);
		assert!(public_signals.len() >= n_key_signals, "public signals lack the key prefix");
		Self {
			shape,
			variant,
			signals: public_signals[n_key_signals..].to_vec(),
			proof,
		}
	}

	/// The complete public-signal vector for a reconstructed key prefix.
	pub fn public_signals(&self, key_signals: &[Fr]) -> Vec<Fr> {
		key_signals.iter().chain(&self.signals).copied().collect()
	}

	pub fn write_to(&self, mut writer: impl Write) -> Result<(), SerializationError> {
		writer.write_all(MAGIC)?;
		self.shape.serialize_compressed(&mut writer)?;
		self.variant.to_u8().serialize_compressed(&mut writer)?;
		self.signals.serialize_compressed(&mut writer)?;
		self.proof.serialize_compressed(&mut writer)?;
		Ok(())
	}

	pub fn read_from(mut reader: impl Read) -> Result<Self, Error> {
		let malformed = |err: SerializationError| Error::MalformedInput(err.to_string());
		let mut magic = [0u8; 8];
		reader
			.read_exact(&mut magic)
			.map_err(|err| Error::MalformedInput(format!("truncated artifact: {err}")))?;
		if &magic != MAGIC {
			return Err(Error::MalformedInput("not a proof artifact".to_string()));
		}
		let shape = CircuitShape::deserialize_compressed(&mut reader).map_err(malformed)?;
		shape
			.validate()
			.map_err(|err| Error::MalformedInput(err.to_string()))?;
		let tag = u8::deserialize_compressed(&mut reader).map_err(malformed)?;
		let variant = Variant::from_u8(tag)
			.ok_or_else(|| Error::MalformedInput(format!("unknown circuit variant {tag}")))?;
		let signals = Vec::<Fr>::deserialize_compressed(&mut reader).map_err(malformed)?;
		let proof = Vec::<u8>::deserialize_compressed(&mut reader).map_err(malformed)?;
		Ok(Self {
			shape,
			variant,
			signals,
			proof,
		})
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::new();
		self.write_to(&mut bytes).expect("writing to a Vec cannot fail");
		bytes
	}
}
