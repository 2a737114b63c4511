use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	thread,
};

use num_bigint::BigUint;
use rayon::prelude::*;
use sigset_core::{CircuitShape, ConstraintSystem, ValueVec};
use sigset_frontend::{
	circuits::{SignatureCircuit, Variant},
	constraint_verifier::verify_constraints,
	witness::{KeyPair, KeySet, WitnessBundle},
};
use sigset_prover_interface::{Error, ProofArtifact, ProofBackend, Result, SessionConfig};

use crate::job::ProofJob;

/// The inputs of one proof.
#[derive(Debug, Clone)]
pub struct ProveRequest {
	pub keys: Vec<KeyPair>,
	pub signature: BigUint,
	pub message: BigUint,
}

/// Proves signatures for one circuit shape and variant.
///
/// The circuit is built once per session. A session is immutable and can prove any number of
/// independent requests concurrently.
pub struct ProverSession {
	circuit: SignatureCircuit,
	cs: ConstraintSystem,
	backend: Arc<dyn ProofBackend>,
	config: SessionConfig,
}

impl ProverSession {
	/// Builds the circuit and checks that `backend` was set up for it.
	pub fn new(
		shape: CircuitShape,
		variant: Variant,
		backend: Arc<dyn ProofBackend>,
	) -> Result<Self> {
		Self::with_config(shape, variant, backend, SessionConfig::default())
	}

	pub fn with_config(
		shape: CircuitShape,
		variant: Variant,
		backend: Arc<dyn ProofBackend>,
		config: SessionConfig,
	) -> Result<Self> {
		let circuit = SignatureCircuit::build(shape, variant);
		let cs = circuit.constraint_system();
		if backend.circuit_digest() != cs.digest() {
			return Err(Error::ConfigMismatch(format!(
				"{} keys were not set up for the {variant} circuit of shape \"{shape}\"",
				backend.name()
			)));
		}
		Ok(Self {
			circuit,
			cs,
			backend,
			config,
		})
	}

	pub fn shape(&self) -> &CircuitShape {
		self.circuit.shape()
	}

	pub fn variant(&self) -> Variant {
		self.circuit.variant()
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	/// Proves `request`, failing with [`Error::NoMatchingKey`] before the backend is invoked if
	/// no key verifies the signature.
	pub fn prove(&self, request: &ProveRequest) -> Result<ProofArtifact> {
		self.prove_until_cancelled(request, &AtomicBool::new(false))
	}

	/// Proves `request` on a background thread.
	pub fn spawn(self: &Arc<Self>, request: ProveRequest) -> ProofJob {
		let cancelled = Arc::new(AtomicBool::new(false));
		let session = Arc::clone(self);
		let flag = Arc::clone(&cancelled);
		let handle = thread::spawn(move || session.prove_until_cancelled(&request, &flag));
		ProofJob::new(handle, cancelled)
	}

	/// Proves independent requests in parallel. The results are in the order of `requests`.
	pub fn prove_batch(&self, requests: &[ProveRequest]) -> Vec<Result<ProofArtifact>> {
		let _span = tracing::info_span!("prove_batch", n_requests = requests.len()).entered();
		requests
			.par_iter()
			.map(|request| self.prove(request))
			.collect()
	}

	pub(crate) fn prove_until_cancelled(
		&self,
		request: &ProveRequest,
		cancelled: &AtomicBool,
	) -> Result<ProofArtifact> {
		let shape = *self.shape();
		let _span = tracing::info_span!("prove", %shape, variant = %self.variant()).entered();

		let key_set = KeySet::new(shape, request.keys.clone())?;
		let bundle =
			WitnessBundle::assemble(&shape, &key_set, &request.signature, &request.message)?;
		let values = self.witness_values(&bundle)?;
		let public_signals = self.circuit.public_signals(&key_set, &request.message)?;
		drop(bundle);

		let max_attempts = self.config.max_attempts();
		let mut attempt = 0;
		let proof = loop {
			if cancelled.load(Ordering::Relaxed) {
				return Err(Error::Cancelled);
			}
			attempt += 1;
			match self.backend.prove(&self.cs, &values) {
				Ok(proof) => break proof,
				Err(source) if attempt >= max_attempts => {
					return Err(Error::ProofBackendFailure {
						attempts: attempt,
						source,
					});
				}
				Err(err) => {
					tracing::warn!(attempt, max_attempts, %err, "proof backend failed, retrying");
					thread::sleep(self.config.retry_delay());
				}
			}
		};
		tracing::info!(attempts = attempt, proof_len = proof.len(), "proved");

		Ok(ProofArtifact::new(shape, self.variant(), &public_signals, proof))
	}

	/// Computes the value vector for an assembled bundle.
	///
	/// The bundle already holds a matching key, so any unsatisfied constraint here is a fault of
	/// the witness generator and not of the request.
	fn witness_values(&self, bundle: &WitnessBundle) -> Result<ValueVec> {
		let values = self
			.circuit
			.populate(bundle)
			.map_err(|err| Error::WitnessGeneration(err.to_string()))?;
		if self.config.check_witness() {
			verify_constraints(&self.cs, &values).map_err(Error::WitnessGeneration)?;
		}
		Ok(values)
	}
}

#[cfg(test)]
mod tests {
	use sigset_core::Fr;
	use sigset_prover_interface::{BackendError, ErrorCode};

	use super::*;

	struct NullBackend([u8; 32]);

	impl ProofBackend for NullBackend {
		fn name(&self) -> &'static str {
			"null"
		}

		fn circuit_digest(&self) -> [u8; 32] {
			self.0
		}

		fn prove(
			&self,
			_cs: &ConstraintSystem,
			_values: &ValueVec,
		) -> std::result::Result<Vec<u8>, BackendError> {
			Ok(Vec::new())
		}

		fn verify(
			&self,
			_public_signals: &[Fr],
			_proof: &[u8],
		) -> std::result::Result<bool, BackendError> {
			Ok(true)
		}
	}

	#[test]
	fn test_unsatisfied_witness_is_an_internal_error() {
		let shape = CircuitShape::new(2, 16, 1, 17).unwrap();
		let digest = SignatureCircuit::build(shape, Variant::Selector)
			.constraint_system()
			.digest();
		let session =
			ProverSession::new(shape, Variant::Selector, Arc::new(NullBackend(digest))).unwrap();

		let keys = vec![KeyPair::new(65537u32, 12827u32), KeyPair::new(3u32, 10403u32)];
		let key_set = KeySet::new(shape, keys).unwrap();
		let signature = BigUint::from(1234u32);
		let message = BigUint::from(2271u32);
		let mut bundle = WitnessBundle::assemble(&shape, &key_set, &signature, &message).unwrap();
		assert!(session.witness_values(&bundle).is_ok());

		// Point the selector at the key that does not verify.
		bundle.matched = 1;
		let err = session.witness_values(&bundle).unwrap_err();
		assert_eq!(err.code(), ErrorCode::WitnessGeneration);
		assert!(!err.is_recoverable());
	}
}
