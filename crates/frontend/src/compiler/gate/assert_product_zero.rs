//! Product assertion.
//!
//! Enforces `x * y = 0`, i.e. at least one of the two values is zero.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `x * y = 0`
use ark_ff::Zero;

use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, empty, plain},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	builder.r1cs().a(plain(*x)).b(plain(*y)).c(empty()).build();
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	if !(w[*x] * w[*y]).is_zero() {
		w.flag_assertion_failed(assertion_name, |w| format!("{} * {} != 0", w[*x], w[*y]));
	}
}
