//! Bit decomposition.
//!
//! Splits `x` into `n` little-endian bits. Doubles as the range check `x < 2^n`: a value that does
//! not fit has no decomposition satisfying the constraints.
//!
//! # Constraints
//!
//! The gate generates `n + 1` constraints:
//! - `b_i * (b_i - 1) = 0` for every bit
//! - `(b_0 + 2 * b_1 + ... + 2^(n-1) * b_{n-1}) * 1 = x`
use sigset_core::{
	Fr,
	field::{fr_to_biguint, pow2},
};

use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, empty, plain, scaled, sub2},
	gate::opcode::OpcodeShape,
	gate_graph::{Gate, GateData, GateParam},
};

pub fn shape(dimensions: &[usize]) -> OpcodeShape {
	let [n_bits] = dimensions else { unreachable!() };
	OpcodeShape {
		n_in: 1,
		n_out: *n_bits,
		n_internal: 0,
		n_imm: 0,
		n_coeff: 0,
	}
}

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let [x] = inputs else { unreachable!() };

	let one = builder.one();
	for &bit in outputs {
		builder.r1cs().a(plain(bit)).b(sub2(bit, one)).c(empty()).build();
	}
	let recomposed = outputs
		.iter()
		.enumerate()
		.map(|(i, &bit)| scaled(bit, pow2(i)))
		.collect();
	builder.r1cs().a(recomposed).b(plain(one)).c(plain(*x)).build();
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let [x] = inputs else { unreachable!() };

	let value = fr_to_biguint(w[*x]);
	let n_bits = outputs.len();
	if value.bits() as usize > n_bits {
		w.flag_assertion_failed(assertion_name, |_| {
			format!("{value} does not fit into {n_bits} bits")
		});
	}
	for (i, &bit) in outputs.iter().enumerate() {
		w[bit] = Fr::from(value.bit(i as u64) as u64);
	}
}
