//! Zero indicator.
//!
//! Given `x`, returns `(z, inv)` where `z = 1` and `inv = 0` if `x = 0`, otherwise `z = 0` and
//! `inv = x^-1`.
//!
//! # Constraints
//!
//! No constraints are generated! The caller pins the indicator down with
//!
//! - `z * (z - 1) = 0`
//! - `z * x = 0`
//! - `(z - 1) * (inv * x - 1) = 0`
use ark_ff::{Field, One, Zero};
use sigset_core::Fr;

use crate::compiler::{
	circuit,
	gate_graph::{Gate, GateData, GateParam},
};

pub fn evaluate(_gate: Gate, data: &GateData, w: &mut circuit::WitnessFiller) {
	let GateParam {
		inputs, outputs, ..
	} = data.gate_param();
	let [x] = inputs else { unreachable!() };
	let [z, inv] = outputs else { unreachable!() };

	match w[*x].inverse() {
		Some(x_inv) => {
			w[*z] = Fr::zero();
			w[*inv] = x_inv;
		}
		None => {
			w[*z] = Fr::one();
			w[*inv] = Fr::zero();
		}
	}
}
