//! Boolean assertion.
//!
//! Enforces `x ∈ {0, 1}`.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `x * (x - 1) = 0`
use ark_ff::{One, Zero};

use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, empty, plain, sub2},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x] = inputs else { unreachable!() };

	let one = builder.one();
	builder.r1cs().a(plain(*x)).b(sub2(*x, one)).c(empty()).build();
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let GateParam { inputs, .. } = data.gate_param();
	let [x] = inputs else { unreachable!() };

	let value = w[*x];
	if !(value.is_zero() || value.is_one()) {
		w.flag_assertion_failed(assertion_name, |_| format!("{value} is not a bit"));
	}
}
