//! Linear combination.
//!
//! Computes `out = c_0 * x_0 + ... + c_{n-1} * x_{n-1} + k`.
//!
//! The coefficients are stored with the gate: the first `n` belong to the inputs, the last one is
//! the constant term `k`.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `(c_0 * x_0 + ... + c_{n-1} * x_{n-1} + k * 1) * 1 = out`
use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, plain, scaled},
	gate::opcode::OpcodeShape,
	gate_graph::{Gate, GateData, GateParam},
};

pub fn shape(dimensions: &[usize]) -> OpcodeShape {
	let [n_inputs] = dimensions else {
		unreachable!()
	};
	OpcodeShape {
		n_in: *n_inputs,
		n_out: 1,
		n_internal: 0,
		n_imm: 0,
		n_coeff: *n_inputs + 1,
	}
}

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam {
		inputs,
		outputs,
		coeffs,
		..
	} = data.gate_param();
	let [out] = outputs else { unreachable!() };
	let Some((constant, coeffs)) = coeffs.split_last() else {
		unreachable!()
	};

	let one = builder.one();
	let mut sum: Vec<_> = inputs
		.iter()
		.zip(coeffs)
		.map(|(&x, &c)| scaled(x, c))
		.collect();
	sum.push(scaled(one, *constant));

	builder.r1cs().a(sum).b(plain(one)).c(plain(*out)).build();
}

pub fn evaluate(_gate: Gate, data: &GateData, w: &mut circuit::WitnessFiller) {
	let GateParam {
		inputs,
		outputs,
		coeffs,
		..
	} = data.gate_param();
	let [out] = outputs else { unreachable!() };
	let Some((constant, coeffs)) = coeffs.split_last() else {
		unreachable!()
	};

	let value = inputs
		.iter()
		.zip(coeffs)
		.fold(*constant, |acc, (&x, &c)| acc + c * w[x]);
	w[*out] = value;
}
