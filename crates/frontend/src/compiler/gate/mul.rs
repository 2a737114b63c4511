//! Field multiplication.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `x * y = out`
use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, plain},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let [x, y] = inputs else { unreachable!() };
	let [out] = outputs else { unreachable!() };

	builder.r1cs().a(plain(*x)).b(plain(*y)).c(plain(*out)).build();
}

pub fn evaluate(_gate: Gate, data: &GateData, w: &mut circuit::WitnessFiller) {
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let [x, y] = inputs else { unreachable!() };
	let [out] = outputs else { unreachable!() };

	w[*out] = w[*x] * w[*y];
}
