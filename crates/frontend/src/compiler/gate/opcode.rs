#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
	// Arithmetic
	LinComb,
	Mul,

	// Decomposition
	SplitBits,
	SplitLimb,

	// Assertions
	AssertEq,
	AssertZero,
	AssertBool,
	AssertProductZero,

	// Hints
	BigUintDivideHint,
	BigUintLtGapHint,
	IsZeroHint,
}

pub struct OpcodeShape {
	pub n_in: usize,
	pub n_out: usize,
	pub n_internal: usize,
	pub n_imm: usize,
	pub n_coeff: usize,
}

impl OpcodeShape {
	const fn fixed(n_in: usize, n_out: usize) -> Self {
		OpcodeShape {
			n_in,
			n_out,
			n_internal: 0,
			n_imm: 0,
			n_coeff: 0,
		}
	}
}

impl Opcode {
	pub fn shape(&self, dimensions: &[usize]) -> OpcodeShape {
		match self {
			Opcode::LinComb => super::lin_comb::shape(dimensions),
			Opcode::Mul => OpcodeShape::fixed(2, 1),

			Opcode::SplitBits => super::split_bits::shape(dimensions),
			Opcode::SplitLimb => OpcodeShape {
				n_imm: 1,
				..OpcodeShape::fixed(1, 2)
			},

			Opcode::AssertEq => OpcodeShape::fixed(2, 0),
			Opcode::AssertZero => OpcodeShape::fixed(1, 0),
			Opcode::AssertBool => OpcodeShape::fixed(1, 0),
			Opcode::AssertProductZero => OpcodeShape::fixed(2, 0),

			Opcode::BigUintDivideHint => super::biguint_divide_hint::shape(dimensions),
			Opcode::BigUintLtGapHint => super::biguint_lt_gap_hint::shape(dimensions),
			Opcode::IsZeroHint => OpcodeShape::fixed(1, 2),
		}
	}

	/// Hints compute values on the prover side only and emit no constraints.
	pub fn is_hint(&self) -> bool {
		matches!(self, Opcode::BigUintDivideHint | Opcode::BigUintLtGapHint | Opcode::IsZeroHint)
	}
}
