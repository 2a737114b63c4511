pub mod bignum;
pub mod disjunction;
pub mod merkle;
pub mod merkle_rsa;
pub mod mimc;
pub mod modexp;

use std::{fmt, str::FromStr};

use num_bigint::BigUint;
use sigset_core::{CircuitShape, ConstraintSystem, Fr, ValueVec};

use crate::{
	compiler::{Circuit, CircuitBuilder, PopulateError},
	witness::{KeySet, WitnessBundle, WitnessError, merkle_public_signals, public_signals},
};

/// Which circuit proves the disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
	/// [`disjunction::SelectorVerifier`].
	Selector,
	/// [`disjunction::ZeroProductVerifier`].
	ZeroProduct,
	/// [`merkle_rsa::MerkleRsaVerify`].
	Merkle,
}

impl Variant {
	pub const ALL: [Variant; 3] = [Variant::Selector, Variant::ZeroProduct, Variant::Merkle];

	pub fn as_str(&self) -> &'static str {
		match self {
			Variant::Selector => "selector",
			Variant::ZeroProduct => "zero-product",
			Variant::Merkle => "merkle",
		}
	}

	pub fn to_u8(self) -> u8 {
		match self {
			Variant::Selector => 0,
			Variant::ZeroProduct => 1,
			Variant::Merkle => 2,
		}
	}

	pub fn from_u8(tag: u8) -> Option<Self> {
		Self::ALL.into_iter().find(|variant| variant.to_u8() == tag)
	}

	/// Number of leading public signals that are derived from the key set alone.
	pub fn n_key_signals(&self, shape: &CircuitShape) -> usize {
		match self {
			Variant::Selector | Variant::ZeroProduct => shape.n_key_signals(),
			Variant::Merkle => 1,
		}
	}
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Variant {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|variant| variant.as_str() == s)
			.ok_or_else(|| format!("unknown circuit variant {s:?}"))
	}
}

enum Verifier {
	Selector(disjunction::SelectorVerifier),
	ZeroProduct(disjunction::ZeroProductVerifier),
	Merkle(merkle_rsa::MerkleRsaVerify),
}

/// A built signature circuit of a given shape and variant.
pub struct SignatureCircuit {
	shape: CircuitShape,
	variant: Variant,
	circuit: Circuit,
	verifier: Verifier,
}

impl SignatureCircuit {
	pub fn build(shape: CircuitShape, variant: Variant) -> Self {
		let _span = tracing::info_span!("build_circuit", %shape, %variant).entered();
		let builder = CircuitBuilder::new();
		let verifier = match variant {
			Variant::Selector => {
				Verifier::Selector(disjunction::SelectorVerifier::new(&builder, &shape))
			}
			Variant::ZeroProduct => {
				Verifier::ZeroProduct(disjunction::ZeroProductVerifier::new(&builder, &shape))
			}
			Variant::Merkle => Verifier::Merkle(merkle_rsa::MerkleRsaVerify::new(&builder, &shape)),
		};
		let circuit = builder.build();
		tracing::info!(n_gates = circuit.n_gates(), "built circuit");
		Self {
			shape,
			variant,
			circuit,
			verifier,
		}
	}

	pub fn shape(&self) -> &CircuitShape {
		&self.shape
	}

	pub fn variant(&self) -> Variant {
		self.variant
	}

	pub fn circuit(&self) -> &Circuit {
		&self.circuit
	}

	pub fn constraint_system(&self) -> ConstraintSystem {
		self.circuit.constraint_system()
	}

	/// Computes the full value vector of the circuit from an assembled witness bundle.
	///
	/// # Panics
	///
	/// Panics if the bundle was assembled for another shape.
	pub fn populate(&self, bundle: &WitnessBundle) -> Result<ValueVec, PopulateError> {
		assert_eq!(bundle.shape, self.shape, "witness bundle of another shape");
		let _span = tracing::info_span!("populate_witness", variant = %self.variant).entered();
		let mut w = self.circuit.new_witness_filler();
		match &self.verifier {
			Verifier::Selector(verifier) => verifier.populate(&mut w, bundle),
			Verifier::ZeroProduct(verifier) => verifier.populate(&mut w, bundle),
			Verifier::Merkle(verifier) => verifier.populate(&mut w, bundle),
		}
		self.circuit.populate_wire_witness(&mut w)?;
		Ok(w.into_value_vec())
	}

	/// The public signals a witness for `message` under `key_set` must have.
	pub fn public_signals(
		&self,
		key_set: &KeySet,
		message: &BigUint,
	) -> Result<Vec<Fr>, WitnessError> {
		match self.variant {
			Variant::Selector | Variant::ZeroProduct => {
				public_signals(&self.shape, key_set, message)
			}
			Variant::Merkle => merkle_public_signals(&self.shape, key_set, message),
		}
	}
}
