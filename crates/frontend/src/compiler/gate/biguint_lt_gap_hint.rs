//! BigUint less-than gap.
//!
//! Given `a` and `b` of `k` limbs each, returns `d = b - a - 1` in `k` limbs. The value exists
//! exactly when `a < b`, so `a + d + 1 = b` with canonical limbs of `d` proves the strict
//! inequality.
//!
//! The dimensions are `[k, limb_bits]`.
//!
//! # Constraints
//!
//! No constraints are generated! This is a hint. The caller checks `a + d + 1 == b` with bignum
//! circuits and range checks `d`.
use ark_ff::Zero;
use sigset_core::Fr;

use crate::{
	compiler::{
		circuit,
		gate::opcode::OpcodeShape,
		gate_graph::{Gate, GateData, GateParam},
	},
	util::{biguint_from_wires, populate_wires},
	witness::encode_limbs,
};

pub fn shape(dimensions: &[usize]) -> OpcodeShape {
	let [n_limbs, _limb_bits] = dimensions else {
		unreachable!()
	};
	OpcodeShape {
		n_in: 2 * *n_limbs,
		n_out: *n_limbs,
		n_internal: 0,
		n_imm: 0,
		n_coeff: 0,
	}
}

pub fn evaluate(
	_gate: Gate,
	data: &GateData,
	assertion_name: &str,
	w: &mut circuit::WitnessFiller,
) {
	let [n_limbs, limb_bits] = data.dimensions.as_slice() else {
		unreachable!()
	};
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let (a_wires, b_wires) = inputs.split_at(*n_limbs);

	let a = biguint_from_wires(w, a_wires, *limb_bits);
	let b = biguint_from_wires(w, b_wires, *limb_bits);

	let gap = (a < b)
		.then(|| encode_limbs(&(&b - &a - 1u8), *limb_bits, *n_limbs))
		.flatten();
	match gap {
		Some(limbs) => populate_wires(w, outputs, &limbs),
		None => {
			w.flag_assertion_failed(assertion_name, |_| format!("{a} is not less than {b}"));
			for &wire in outputs {
				w[wire] = Fr::zero();
			}
		}
	}
}
