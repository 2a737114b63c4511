//! Interface between the signature circuits and a proving system.
//!
//! The circuits only need an oracle that turns a constraint system and a satisfying value
//! vector into a proof, and that checks a proof against public signals. [`ProofBackend`] is that
//! oracle; [`Groth16Backend`] implements it with Groth16 over BN254.
//!
//! # Example
//!
//! ```no_run
//! use rand::{SeedableRng, rngs::StdRng};
//! use sigset_core::CircuitShape;
//! use sigset_frontend::circuits::{SignatureCircuit, Variant};
//! use sigset_prover_interface::{Groth16Backend, ProofBackend};
//!
//! let shape = CircuitShape::rsa(2048, 4).unwrap();
//! let circuit = SignatureCircuit::build(shape, Variant::ZeroProduct);
//! let backend = Groth16Backend::setup(&circuit.constraint_system(), &mut StdRng::from_entropy())
//! 	.expect("setup failed");
//! println!("circuit digest: {:02x?}", backend.circuit_digest());
//! ```

pub use crate::{
	artifact::ProofArtifact,
	backend::ProofBackend,
	config::{SessionConfig, SessionConfigBuilder},
	error::{BackendError, Error, ErrorCode},
	groth16::Groth16Backend,
};

mod artifact;
mod backend;
mod config;
mod error;
mod groth16;

/// Result type for proving and verification sessions
pub type Result<T> = std::result::Result<T, Error>;
