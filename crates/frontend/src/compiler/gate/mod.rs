use crate::compiler::{
	circuit,
	constraint_builder::ConstraintBuilder,
	gate_graph::{Gate, GateGraph},
};

pub mod opcode;

pub use opcode::Opcode;

pub mod assert_bool;
pub mod assert_eq;
pub mod assert_product_zero;
pub mod assert_zero;
pub mod biguint_divide_hint;
pub mod biguint_lt_gap_hint;
pub mod is_zero_hint;
pub mod lin_comb;
pub mod mul;
pub mod split_bits;
pub mod split_limb;

pub fn constrain(gate: Gate, graph: &GateGraph, builder: &mut ConstraintBuilder) {
	let data = &graph.gates[gate];
	match data.opcode {
		Opcode::LinComb => lin_comb::constrain(gate, data, builder),
		Opcode::Mul => mul::constrain(gate, data, builder),
		Opcode::SplitBits => split_bits::constrain(gate, data, builder),
		Opcode::SplitLimb => split_limb::constrain(gate, data, builder),
		Opcode::AssertEq => assert_eq::constrain(gate, data, builder),
		Opcode::AssertZero => assert_zero::constrain(gate, data, builder),
		Opcode::AssertBool => assert_bool::constrain(gate, data, builder),
		Opcode::AssertProductZero => assert_product_zero::constrain(gate, data, builder),
		// Hints do not introduce constraints
		Opcode::BigUintDivideHint | Opcode::BigUintLtGapHint | Opcode::IsZeroHint => (),
	}
}

pub fn evaluate(gate: Gate, graph: &GateGraph, w: &mut circuit::WitnessFiller) {
	let data = &graph.gates[gate];
	let assertion_name = graph.assertion_names[gate].as_str();

	match data.opcode {
		Opcode::LinComb => lin_comb::evaluate(gate, data, w),
		Opcode::Mul => mul::evaluate(gate, data, w),
		Opcode::SplitBits => split_bits::evaluate(gate, data, assertion_name, w),
		Opcode::SplitLimb => split_limb::evaluate(gate, data, w),
		Opcode::AssertEq => assert_eq::evaluate(gate, data, assertion_name, w),
		Opcode::AssertZero => assert_zero::evaluate(gate, data, assertion_name, w),
		Opcode::AssertBool => assert_bool::evaluate(gate, data, assertion_name, w),
		Opcode::AssertProductZero => {
			assert_product_zero::evaluate(gate, data, assertion_name, w)
		}
		Opcode::BigUintDivideHint => {
			biguint_divide_hint::evaluate(gate, data, assertion_name, w)
		}
		Opcode::BigUintLtGapHint => biguint_lt_gap_hint::evaluate(gate, data, assertion_name, w),
		Opcode::IsZeroHint => is_zero_hint::evaluate(gate, data, w),
	}
}
