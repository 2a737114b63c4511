//! Zero assertion.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `x * 1 = 0`
use ark_ff::Zero;

use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, empty, plain},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x] = inputs else { unreachable!() };

	let one = builder.one();
	builder.r1cs().a(plain(*x)).b(plain(one)).c(empty()).build();
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x] = inputs else { unreachable!() };

	if !w[*x].is_zero() {
		w.flag_assertion_failed(assertion_name, |w| format!("{} != 0", w[*x]));
	}
}
