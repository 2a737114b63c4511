use std::ops::{Index, IndexMut};

use ark_ff::{BigInteger, PrimeField, Zero};
use sha2::{Digest, Sha256};

use crate::{error::ConstraintSystemError, field::Fr};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ValueIndex(pub u32);

impl ValueIndex {
	/// The value index that is not considered to be valid.
	pub const INVALID: ValueIndex = ValueIndex(u32::MAX);

	/// The constant `1`. Every circuit places it at the very start of the value vector.
	pub const ONE: ValueIndex = ValueIndex(0);
}

// The most sensible default for a value index is to make it invalid.
impl Default for ValueIndex {
	fn default() -> Self {
		Self::INVALID
	}
}

/// A single `coeff * z[index]` summand of a linear combination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Term {
	pub index: ValueIndex,
	pub coeff: Fr,
}

impl Term {
	pub fn plain(index: ValueIndex) -> Self {
		Self {
			index,
			coeff: Fr::from(1u64),
		}
	}

	pub fn scaled(index: ValueIndex, coeff: Fr) -> Self {
		Self { index, coeff }
	}
}

/// A linear combination of values. The empty operand evaluates to zero.
pub type Operand = Vec<Term>;

/// A rank-1 constraint: `<A, z> * <B, z> = <C, z>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct R1csConstraint {
	pub a: Operand,
	pub b: Operand,
	pub c: Operand,
}

impl R1csConstraint {
	pub fn abc(
		a: impl IntoIterator<Item = Term>,
		b: impl IntoIterator<Item = Term>,
		c: impl IntoIterator<Item = Term>,
	) -> R1csConstraint {
		R1csConstraint {
			a: a.into_iter().collect(),
			b: b.into_iter().collect(),
			c: c.into_iter().collect(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct ConstraintSystem {
	pub value_vec_layout: ValueVecLayout,
	pub constants: Vec<Fr>,
	pub constraints: Vec<R1csConstraint>,
}

impl ConstraintSystem {
	pub fn new(
		constants: Vec<Fr>,
		value_vec_layout: ValueVecLayout,
		constraints: Vec<R1csConstraint>,
	) -> Self {
		assert_eq!(constants.len(), value_vec_layout.n_const);
		assert_eq!(constants.first(), Some(&Fr::from(1u64)), "constant 1 must come first");
		ConstraintSystem {
			value_vec_layout,
			constants,
			constraints,
		}
	}

	pub fn add_constraint(&mut self, constraint: R1csConstraint) {
		self.constraints.push(constraint);
	}

	pub fn n_constraints(&self) -> usize {
		self.constraints.len()
	}

	/// The number of public signals (inout values) of this constraint system.
	pub fn n_public(&self) -> usize {
		self.value_vec_layout.n_inout
	}

	/// The total length of the [`ValueVec`] expected by this constraint system.
	pub fn value_vec_len(&self) -> usize {
		self.value_vec_layout.total_len
	}

	/// Create a new [`ValueVec`] with the size expected by this constraint system.
	pub fn new_value_vec(&self) -> ValueVec {
		let mut value_vec = ValueVec::new(self.value_vec_layout.clone());
		for (i, constant) in self.constants.iter().enumerate() {
			value_vec.set(i, *constant);
		}
		value_vec
	}

	/// A fingerprint of the layout and of every constraint.
	///
	/// Two parties that compiled the same circuit shape obtain the same digest. Proving and
	/// verification keys record the digest of the system they were generated for.
	pub fn digest(&self) -> [u8; 32] {
		let layout = &self.value_vec_layout;
		let mut hasher = Sha256::new();
		hasher.update(b"sigset.constraint_system.v1");
		for n in [
			layout.n_const,
			layout.n_inout,
			layout.n_witness,
			layout.n_internal,
			self.constraints.len(),
		] {
			hasher.update((n as u64).to_le_bytes());
		}
		for constant in &self.constants {
			hasher.update(constant.into_bigint().to_bytes_le());
		}
		for constraint in &self.constraints {
			for operand in [&constraint.a, &constraint.b, &constraint.c] {
				hasher.update((operand.len() as u64).to_le_bytes());
				for term in operand {
					hasher.update(term.index.0.to_le_bytes());
					hasher.update(term.coeff.into_bigint().to_bytes_le());
				}
			}
		}
		hasher.finalize().into()
	}
}

/// Description of a layout of the value vector for a particular circuit.
///
/// The vector is laid out as `[constants][inout][witness][internal]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueVecLayout {
	/// The number of the constants declared by the circuit.
	pub n_const: usize,
	/// The number of the input output parameters declared by the circuit.
	pub n_inout: usize,
	/// The number of the witness parameters declared by the circuit.
	pub n_witness: usize,
	/// The number of the internal values declared by the circuit.
	///
	/// Those are outputs and intermediaries created by the gates.
	pub n_internal: usize,

	/// The offset at which `inout` parameters start.
	pub offset_inout: usize,
	/// The offset at which `witness` parameters start.
	pub offset_witness: usize,
	/// The total size of the value vec vector.
	pub total_len: usize,
}

impl ValueVecLayout {
	pub fn new(n_const: usize, n_inout: usize, n_witness: usize, n_internal: usize) -> Self {
		Self {
			n_const,
			n_inout,
			n_witness,
			n_internal,
			offset_inout: n_const,
			offset_witness: n_const + n_inout,
			total_len: n_const + n_inout + n_witness + n_internal,
		}
	}

	/// Asserts that the value vec layout has a correct shape.
	pub fn validate(&self) {
		assert!(self.n_const >= 1, "the constant 1 must always be present");
		assert_eq!(self.offset_inout, self.n_const);
		assert_eq!(self.offset_witness, self.n_const + self.n_inout);
		assert_eq!(self.total_len, self.offset_witness + self.n_witness + self.n_internal);
	}
}

/// The vector of values.
///
/// This is a prover-only structure.
#[derive(Clone, Debug)]
pub struct ValueVec {
	layout: ValueVecLayout,
	data: Vec<Fr>,
}

impl ValueVec {
	pub fn new(layout: ValueVecLayout) -> ValueVec {
		let size = layout.total_len;
		ValueVec {
			layout,
			data: vec![Fr::zero(); size],
		}
	}

	pub fn new_from_data(
		layout: ValueVecLayout,
		data: Vec<Fr>,
	) -> Result<ValueVec, ConstraintSystemError> {
		if data.len() != layout.total_len {
			return Err(ConstraintSystemError::ValueVecLenMismatch {
				expected: layout.total_len,
				actual: data.len(),
			});
		}
		Ok(ValueVec { layout, data })
	}

	pub fn layout(&self) -> &ValueVecLayout {
		&self.layout
	}

	/// The total size of the vector.
	pub fn size(&self) -> usize {
		self.data.len()
	}

	pub fn get(&self, index: usize) -> Fr {
		self.data[index]
	}

	pub fn set(&mut self, index: usize, value: Fr) {
		self.data[index] = value;
	}

	/// Returns the constants portion of the values vector.
	pub fn constants(&self) -> &[Fr] {
		&self.data[..self.layout.offset_inout]
	}

	/// Returns the public signals, i.e. the inout portion of the values vector.
	pub fn public(&self) -> &[Fr] {
		&self.data[self.layout.offset_inout..self.layout.offset_witness]
	}

	/// Returns the private portion of the values vector (witness and internal values).
	pub fn witness(&self) -> &[Fr] {
		&self.data[self.layout.offset_witness..]
	}

	/// Returns the combined values vector.
	pub fn combined_witness(&self) -> &[Fr] {
		&self.data
	}
}

impl Index<ValueIndex> for ValueVec {
	type Output = Fr;

	fn index(&self, index: ValueIndex) -> &Self::Output {
		&self.data[index.0 as usize]
	}
}

impl IndexMut<ValueIndex> for ValueVec {
	fn index_mut(&mut self, index: ValueIndex) -> &mut Self::Output {
		&mut self.data[index.0 as usize]
	}
}
