//! Equality assertion.
//!
//! Enforces `x = y`.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `x * 1 = y`
use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, plain},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	let one = builder.one();
	builder.r1cs().a(plain(*x)).b(plain(one)).c(plain(*y)).build();
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x, y] = inputs else { unreachable!() };

	if w[*x] != w[*y] {
		w.flag_assertion_failed(assertion_name, |w| format!("{} != {}", w[*x], w[*y]));
	}
}
