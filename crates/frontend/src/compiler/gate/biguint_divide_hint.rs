//! BigUint division.
//!
//! Given `dividend` and `divisor`, returns `(quotient, remainder)`, numbers represented by
//! little-endian arrays of `limb_bits`-wide limbs. The quotient has the number of limbs requested
//! by the caller and `remainder.len() == divisor.len()`.
//!
//! The dimensions are `[dividend_limbs, divisor_limbs, quotient_limbs, limb_bits]`.
//!
//! # Algorithm
//!
//! Performs the long division of [`crate::witness::long_division`]. Division by zero, a quotient
//! that does not fit into the requested number of limbs and limbs that are not canonical are
//! reported as assertion failures, and zeros are written to the outputs.
//!
//! # Constraints
//!
//! No constraints are generated! This is a hint - a deterministic computation that happens only
//! on the prover side. The result should be additionally constrained by checking that
//! `remainder + divisor * quotient == dividend` using bignum circuits.
use ark_ff::Zero;
use sigset_core::Fr;

use crate::{
	compiler::{
		circuit,
		gate::opcode::OpcodeShape,
		gate_graph::{Gate, GateData, GateParam},
	},
	util::{limbs_from_wires, populate_wires},
	witness::long_division,
};

pub fn shape(dimensions: &[usize]) -> OpcodeShape {
	let [dividend_limbs_len, divisor_limbs_len, quotient_limbs_len, _limb_bits] = dimensions
	else {
		unreachable!()
	};
	OpcodeShape {
		n_in: *dividend_limbs_len + *divisor_limbs_len,
		n_out: *quotient_limbs_len + *divisor_limbs_len,
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
	let [dividend_limbs_len, _, quotient_limbs_len, limb_bits] = data.dimensions.as_slice()
	else {
		unreachable!()
	};
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();

	let (dividend_wires, divisor_wires) = inputs.split_at(*dividend_limbs_len);
	let (quotient_wires, remainder_wires) = outputs.split_at(*quotient_limbs_len);

	let division = match (
		limbs_from_wires(w, dividend_wires, *limb_bits),
		limbs_from_wires(w, divisor_wires, *limb_bits),
	) {
		(Some(dividend), Some(divisor)) => {
			long_division(&dividend, &divisor, *limb_bits, *quotient_limbs_len)
				.map_err(|err| err.to_string())
		}
		_ => Err(format!("operand limbs are not {limb_bits}-bit values")),
	};

	match division {
		Ok(division) => {
			populate_wires(w, quotient_wires, &division.quotient);
			populate_wires(w, remainder_wires, &division.remainder);
		}
		Err(message) => {
			w.flag_assertion_failed(assertion_name, |_| message);
			for &wire in outputs {
				w[wire] = Fr::zero();
			}
		}
	}
}
