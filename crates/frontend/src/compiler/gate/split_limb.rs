//! Limb split.
//!
//! Splits `t` into `lo = t mod 2^n` and `hi = t >> n`, where `n` is the immediate. Used to
//! normalize limb columns into a canonical limb and a carry.
//!
//! The gate does not range check its outputs. Callers constrain `lo` and `hi` with bit
//! decompositions.
//!
//! # Constraints
//!
//! The gate generates 1 constraint:
//! - `(lo + 2^n * hi) * 1 = t`
use sigset_core::field::{fr_from_biguint, fr_to_biguint, pow2};

use crate::compiler::{
	circuit,
	constraint_builder::{ConstraintBuilder, WireTerm, plain, scaled},
	gate_graph::{Gate, GateData, GateParam},
};

pub fn constrain(_gate: Gate, data: &GateData, builder: &mut ConstraintBuilder) {
	let GateParam {
		inputs,
		outputs,
		imm,
		..
	} = data.gate_param();
	let [t] = inputs else { unreachable!() };
	let [lo, hi] = outputs else { unreachable!() };
	let [n] = imm else { unreachable!() };

	let one = builder.one();
	let recomposed: Vec<WireTerm> = vec![scaled(*lo, 1u64.into()), scaled(*hi, pow2(*n as usize))];
	builder.r1cs().a(recomposed).b(plain(one)).c(plain(*t)).build();
}

pub fn evaluate(_gate: Gate, data: &GateData, w: &mut circuit::WitnessFiller) {
	let GateParam {
		inputs,
		outputs,
		imm,
		..
	} = data.gate_param();
	let [t] = inputs else { unreachable!() };
	let [lo, hi] = outputs else { unreachable!() };
	let [n] = imm else { unreachable!() };

	let value = fr_to_biguint(w[*t]);
	let mask = (num_bigint::BigUint::from(1u8) << *n) - 1u8;
	w[*lo] = fr_from_biguint(&(&value & &mask));
	w[*hi] = fr_from_biguint(&(value >> *n));
}
