//! Groth16 over BN254.
//!
//! The rank-1 constraints of [`ConstraintSystem`] map one to one onto arkworks constraints.
//! Constants are folded into coefficients of the arkworks `one` variable, inout values become
//! instance variables in order and everything else becomes a witness variable.

use std::io::{Read, Write};

use ark_bn254::Bn254;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
	ConstraintSynthesizer, ConstraintSystemRef, LinearCombination, SynthesisError, Variable,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use rand::{CryptoRng, RngCore, SeedableRng, rngs::StdRng};
use sigset_core::{ConstraintSystem, Fr, Term, ValueVec};

use crate::{backend::ProofBackend, error::BackendError};

/// Groth16 keys for one constraint system.
///
/// A verifier only needs the verifying key, see [`Groth16Backend::verifier_only`].
pub struct Groth16Backend {
	digest: [u8; 32],
	proving_key: Option<ProvingKey<Bn254>>,
	verifying_key: VerifyingKey<Bn254>,
	prepared: PreparedVerifyingKey<Bn254>,
}

impl Groth16Backend {
	/// Runs the circuit-specific setup.
	///
	/// Whoever runs the setup can forge proofs, this is a stand-in for a setup ceremony.
	pub fn setup<R: RngCore + CryptoRng>(
		cs: &ConstraintSystem,
		rng: &mut R,
	) -> Result<Self, BackendError> {
		let _span = tracing::info_span!("groth16_setup", n_constraints = cs.n_constraints())
			.entered();
		let (proving_key, verifying_key) =
			Groth16::<Bn254>::circuit_specific_setup(R1csCircuit { cs, values: None }, rng)
				.map_err(synthesis_error)?;
		Ok(Self::from_keys(cs.digest(), Some(proving_key), verifying_key))
	}

	fn from_keys(
		digest: [u8; 32],
		proving_key: Option<ProvingKey<Bn254>>,
		verifying_key: VerifyingKey<Bn254>,
	) -> Self {
		let prepared = PreparedVerifyingKey::from(verifying_key.clone());
		Self {
			digest,
			proving_key,
			verifying_key,
			prepared,
		}
	}

	/// Drops the proving key.
	pub fn verifier_only(self) -> Self {
		Self {
			proving_key: None,
			..self
		}
	}

	pub fn has_proving_key(&self) -> bool {
		self.proving_key.is_some()
	}

	/// Writes the digest, the verifying key and, if present, the proving key.
	pub fn write_keys(&self, mut writer: impl Write) -> Result<(), SerializationError> {
		self.digest.to_vec().serialize_compressed(&mut writer)?;
		self.verifying_key.serialize_compressed(&mut writer)?;
		self.proving_key.is_some().serialize_compressed(&mut writer)?;
		if let Some(proving_key) = &self.proving_key {
			proving_key.serialize_compressed(&mut writer)?;
		}
		Ok(())
	}

	pub fn read_keys(mut reader: impl Read) -> Result<Self, SerializationError> {
		let digest: [u8; 32] = Vec::<u8>::deserialize_compressed(&mut reader)?
			.try_into()
			.map_err(|_| SerializationError::InvalidData)?;
		let verifying_key = VerifyingKey::deserialize_compressed(&mut reader)?;
		let proving_key = if bool::deserialize_compressed(&mut reader)? {
			Some(ProvingKey::deserialize_compressed(&mut reader)?)
		} else {
			None
		};
		Ok(Self::from_keys(digest, proving_key, verifying_key))
	}
}

impl ProofBackend for Groth16Backend {
	fn name(&self) -> &'static str {
		"groth16-bn254"
	}

	fn circuit_digest(&self) -> [u8; 32] {
		self.digest
	}

	fn prove(&self, cs: &ConstraintSystem, values: &ValueVec) -> Result<Vec<u8>, BackendError> {
		let proving_key = self
			.proving_key
			.as_ref()
			.ok_or(BackendError::MissingProvingKey)?;
		let mut rng = StdRng::from_entropy();
		let proof = Groth16::<Bn254>::prove(
			proving_key,
			R1csCircuit {
				cs,
				values: Some(values),
			},
			&mut rng,
		)
		.map_err(synthesis_error)?;
		let mut bytes = Vec::new();
		proof.serialize_compressed(&mut bytes)?;
		Ok(bytes)
	}

	fn verify(&self, public_signals: &[Fr], proof: &[u8]) -> Result<bool, BackendError> {
		let expected = self.verifying_key.gamma_abc_g1.len() - 1;
		if public_signals.len() != expected {
			return Err(BackendError::PublicSignalsLen {
				expected,
				actual: public_signals.len(),
			});
		}
		let proof = Proof::<Bn254>::deserialize_compressed(proof)?;
		Groth16::<Bn254>::verify_with_processed_vk(&self.prepared, public_signals, &proof)
			.map_err(synthesis_error)
	}
}

fn synthesis_error(err: SynthesisError) -> BackendError {
	BackendError::Synthesis(err.to_string())
}

/// A [`ConstraintSystem`] with an optional assignment, as an arkworks circuit.
struct R1csCircuit<'a> {
	cs: &'a ConstraintSystem,
	values: Option<&'a ValueVec>,
}

impl ConstraintSynthesizer<Fr> for R1csCircuit<'_> {
	fn generate_constraints(self, ark_cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
		let layout = &self.cs.value_vec_layout;
		let value = |index: usize| -> Result<Fr, SynthesisError> {
			self.values
				.map(|values| values.combined_witness()[index])
				.ok_or(SynthesisError::AssignmentMissing)
		};

		let mut variables = Vec::with_capacity(layout.total_len - layout.n_const);
		for index in layout.offset_inout..layout.offset_witness {
			variables.push(ark_cs.new_input_variable(|| value(index))?);
		}
		for index in layout.offset_witness..layout.total_len {
			variables.push(ark_cs.new_witness_variable(|| value(index))?);
		}

		let lc = |operand: &[Term]| {
			let mut lc = LinearCombination::<Fr>::zero();
			for term in operand {
				let index = term.index.0 as usize;
				lc += if index < layout.n_const {
					(term.coeff * self.cs.constants[index], Variable::One)
				} else {
					(term.coeff, variables[index - layout.n_const])
				};
			}
			lc
		};
		for constraint in &self.cs.constraints {
			ark_cs.enforce_constraint(lc(&constraint.a), lc(&constraint.b), lc(&constraint.c))?;
		}
		Ok(())
	}
}
