//! Circuits for disjunctive RSA signature proofs.
//!
//! The [`compiler`] turns circuits written against [`compiler::CircuitBuilder`] into rank-1
//! constraint systems and evaluates their witnesses. [`circuits`] holds the big-integer
//! arithmetic, modular exponentiation and the disjunctive verifiers built on it. [`witness`] is
//! the host-side half: everything the prover computes outside the circuit before populating it.

pub mod circuits;
pub mod compiler;
pub mod constraint_verifier;
pub mod util;
pub mod witness;
