use std::fmt;

use ark_serialize::SerializationError;
use sigset_frontend::witness::WitnessError;
use thiserror::Error;

/// Failures of a proving system.
#[derive(Debug, Error)]
pub enum BackendError {
	#[error("constraint synthesis failed: {0}")]
	Synthesis(String),
	#[error("serialization failed: {0}")]
	Serialization(#[from] SerializationError),
	#[error("no proving key loaded")]
	MissingProvingKey,
	#[error("expected {expected} public signals, got {actual}")]
	PublicSignalsLen { expected: usize, actual: usize },
	#[error("{0}")]
	Other(String),
}

/// Identifies an [`Error`] independently of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	ConfigMismatch,
	NoMatchingKey,
	MalformedInput,
	ProofBackendFailure,
	VerificationRejected,
	WitnessGeneration,
	Cancelled,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorCode::ConfigMismatch => "CONFIG_MISMATCH",
			ErrorCode::NoMatchingKey => "NO_MATCHING_KEY",
			ErrorCode::MalformedInput => "MALFORMED_INPUT",
			ErrorCode::ProofBackendFailure => "PROOF_BACKEND_FAILURE",
			ErrorCode::VerificationRejected => "VERIFICATION_REJECTED",
			ErrorCode::WitnessGeneration => "WITNESS_GENERATION",
			ErrorCode::Cancelled => "CANCELLED",
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors of proving and verification sessions
#[derive(Debug, Error)]
pub enum Error {
	/// The compiled shape disagrees with the supplied keys, artifact or backend.
	#[error("configuration mismatch: {0}")]
	ConfigMismatch(String),

	/// No key in the set verifies the signature over the message.
	#[error("no key in the set matches the signature")]
	NoMatchingKey,

	/// A key, signature or artifact could not be decoded.
	#[error("malformed input: {0}")]
	MalformedInput(String),

	/// The backend failed on every attempt.
	#[error("proof backend failed after {attempts} attempt(s): {source}")]
	ProofBackendFailure {
		attempts: usize,
		#[source]
		source: BackendError,
	},

	/// The proof or the reconstructed public signals did not verify.
	#[error("proof rejected: {0}")]
	VerificationRejected(String),

	/// A witness assembled from valid inputs does not satisfy the circuit.
	#[error("internal witness generation failure: {0}")]
	WitnessGeneration(String),

	/// The proving job was cancelled before it produced a proof.
	#[error("proving job cancelled")]
	Cancelled,
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Error::ConfigMismatch(_) => ErrorCode::ConfigMismatch,
			Error::NoMatchingKey => ErrorCode::NoMatchingKey,
			Error::MalformedInput(_) => ErrorCode::MalformedInput,
			Error::ProofBackendFailure { .. } => ErrorCode::ProofBackendFailure,
			Error::VerificationRejected(_) => ErrorCode::VerificationRejected,
			Error::WitnessGeneration(_) => ErrorCode::WitnessGeneration,
			Error::Cancelled => ErrorCode::Cancelled,
		}
	}

	/// Whether the caller can recover by supplying another key set.
	pub fn is_recoverable(&self) -> bool {
		matches!(self, Error::NoMatchingKey)
	}
}

impl From<WitnessError> for Error {
	fn from(err: WitnessError) -> Self {
		match err {
			WitnessError::NoMatchingKey => Error::NoMatchingKey,
			WitnessError::ShapeMismatch { .. } => Error::ConfigMismatch(err.to_string()),
			_ => Error::MalformedInput(err.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use sigset_core::CircuitShape;

	use super::*;

	#[test]
	fn test_error_display() {
		let err = Error::ConfigMismatch("2 keys vs 3 keys".to_string());
		assert_eq!(err.to_string(), "configuration mismatch: 2 keys vs 3 keys");

		let err = Error::ProofBackendFailure {
			attempts: 3,
			source: BackendError::MissingProvingKey,
		};
		assert_eq!(
			err.to_string(),
			"proof backend failed after 3 attempt(s): no proving key loaded"
		);
	}

	#[test]
	fn test_error_codes() {
		assert_eq!(Error::NoMatchingKey.code().to_string(), "NO_MATCHING_KEY");
		assert_eq!(Error::Cancelled.code(), ErrorCode::Cancelled);
		assert_eq!(
			Error::VerificationRejected("bad proof".into()).code().as_str(),
			"VERIFICATION_REJECTED"
		);
		assert_eq!(
			Error::WitnessGeneration("assertion failed".into()).code().as_str(),
			"WITNESS_GENERATION"
		);
	}

	#[test]
	fn test_only_no_matching_key_is_recoverable() {
		assert!(Error::NoMatchingKey.is_recoverable());
		assert!(!Error::Cancelled.is_recoverable());
		assert!(!Error::MalformedInput("truncated".into()).is_recoverable());
		assert!(!Error::VerificationRejected("bad proof".into()).is_recoverable());
		assert!(!Error::WitnessGeneration("assertion failed".into()).is_recoverable());
	}

	#[test]
	fn test_error_from_witness_error() {
		assert!(matches!(Error::from(WitnessError::NoMatchingKey), Error::NoMatchingKey));
		assert!(matches!(Error::from(WitnessError::EmptyKeySet), Error::MalformedInput(_)));

		let shape = CircuitShape::new(2, 16, 1, 17).unwrap();
		let other = CircuitShape::new(3, 16, 1, 17).unwrap();
		let err = Error::from(WitnessError::ShapeMismatch {
			key_set: other,
			circuit: shape,
		});
		assert_eq!(err.code(), ErrorCode::ConfigMismatch);
	}

	#[test]
	fn test_error_is_std_error() {
		let err: Box<dyn std::error::Error> = Box::new(Error::ProofBackendFailure {
			attempts: 1,
			source: BackendError::Other("out of memory".to_string()),
		});
		assert!(err.source().is_some());
	}
}
