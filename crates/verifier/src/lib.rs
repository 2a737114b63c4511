//! Verification of published signature proofs.
//!
//! An artifact carries the message limbs only. The verifier rebuilds the key-derived public
//! signals from the keys it was given independently, so a proof made for any other key set
//! fails verification.

use std::sync::Arc;

use num_bigint::BigUint;
use sigset_core::{CircuitShape, Fr};
use sigset_frontend::{
	circuits::{SignatureCircuit, Variant},
	witness::{KeyPair, KeySet},
};
use sigset_prover_interface::{Error, ProofArtifact, ProofBackend, Result};

/// Verifies proofs of one circuit shape and variant.
pub struct VerifierSession {
	circuit: SignatureCircuit,
	backend: Arc<dyn ProofBackend>,
}

impl VerifierSession {
	/// Builds the circuit and checks that `backend` was set up for it.
	pub fn new(
		shape: CircuitShape,
		variant: Variant,
		backend: Arc<dyn ProofBackend>,
	) -> Result<Self> {
		let circuit = SignatureCircuit::build(shape, variant);
		if backend.circuit_digest() != circuit.constraint_system().digest() {
			return Err(Error::ConfigMismatch(format!(
				"{} keys were not set up for the {variant} circuit of shape \"{shape}\"",
				backend.name()
			)));
		}
		Ok(Self { circuit, backend })
	}

	pub fn shape(&self) -> &CircuitShape {
		self.circuit.shape()
	}

	pub fn variant(&self) -> Variant {
		self.circuit.variant()
	}

	/// The public signals `artifact` must have been proved for, given the trusted `keys`.
	pub fn expected_public_signals(&self, keys: &[KeyPair], message: &BigUint) -> Result<Vec<Fr>> {
		let key_set = KeySet::new(*self.shape(), keys.to_vec())?;
		Ok(self.circuit.public_signals(&key_set, message)?)
	}

	/// Checks that `artifact` proves a signature over `message` by one of `keys`.
	///
	/// # Errors
	///
	/// - [`Error::ConfigMismatch`] if the artifact was made for another shape or variant,
	/// - [`Error::MalformedInput`] if the keys or the message do not fit the shape,
	/// - [`Error::VerificationRejected`] if the artifact is for another message or the proof does
	///   not verify,
	/// - [`Error::ProofBackendFailure`] if the backend cannot process the proof.
	pub fn verify(
		&self,
		keys: &[KeyPair],
		message: &BigUint,
		artifact: &ProofArtifact,
	) -> Result<()> {
		let _span = tracing::info_span!("verify", shape = %self.shape(), variant = %self.variant())
			.entered();
		if artifact.shape != *self.shape() || artifact.variant != self.variant() {
			return Err(Error::ConfigMismatch(format!(
				"artifact is a {} proof of shape \"{}\", expected {} of shape \"{}\"",
				artifact.variant,
				artifact.shape,
				self.variant(),
				self.shape()
			)));
		}

		let expected = self.expected_public_signals(keys, message)?;
		let n_key_signals = self.variant().n_key_signals(self.shape());
		if expected[n_key_signals..] != artifact.signals[..] {
			return Err(Error::VerificationRejected(
				"the artifact was made for another message".to_string(),
			));
		}

		let public_signals = artifact.public_signals(&expected[..n_key_signals]);
		match self.backend.verify(&public_signals, &artifact.proof) {
			Ok(true) => {
				tracing::info!("proof verified");
				Ok(())
			}
			Ok(false) => Err(Error::VerificationRejected("the proof does not verify".to_string())),
			Err(source) => Err(Error::ProofBackendFailure {
				attempts: 1,
				source,
			}),
		}
	}
}
