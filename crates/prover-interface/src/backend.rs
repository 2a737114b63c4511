use sigset_core::{ConstraintSystem, Fr, ValueVec};

use crate::error::BackendError;

/// A proving system, treated as an oracle.
///
/// Implementations are bound to the constraint system they were set up for. Proving may take
/// long, so callers run it off their own thread when they need to stay responsive.
pub trait ProofBackend: Send + Sync {
	/// Human readable name, used in logs.
	fn name(&self) -> &'static str;

	/// [`ConstraintSystem::digest`] of the constraint system the backend was set up for.
	fn circuit_digest(&self) -> [u8; 32];

	/// Proves that `values` satisfies `cs`.
	fn prove(&self, cs: &ConstraintSystem, values: &ValueVec) -> Result<Vec<u8>, BackendError>;

	/// Checks `proof` against the public signals.
	///
	/// Returns `Ok(false)` for a well-formed proof that does not verify.
	fn verify(&self, public_signals: &[Fr], proof: &[u8]) -> Result<bool, BackendError>;
}
