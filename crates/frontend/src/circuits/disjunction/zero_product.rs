use sigset_core::{CircuitShape, Fr};

use super::{KeySetInputs, signature_witness};
use crate::{
	circuits::{bignum::BigUint, modexp::ModExp},
	compiler::{CircuitBuilder, Wire, WitnessFiller},
	witness::WitnessBundle,
};

/// Index-free disjunctive verifier.
///
/// For every key `i` the circuit computes `res_i = signature ^ e_i mod N_i` and, for every limb,
/// a zero indicator of `res_i[j] - message[j]`. The indicators of a key are multiplied into
/// `flag_i`, which is `1` exactly when the key matches.
///
/// # Constraints
///
/// `prod_i (flag_i - 1) = 0`, i.e. at least one flag equals `1`.
///
/// The witness depends on the signature only, so which key matched leaves no trace in the
/// public signals or in the shape of the witness.
pub struct ZeroProductVerifier {
	pub inputs: KeySetInputs,
	pub signature: BigUint,
	pub modexps: Vec<ModExp>,
	/// `flag_i` of each key.
	pub flags: Vec<Wire>,
}

impl ZeroProductVerifier {
	pub fn new(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		let inputs = KeySetInputs::new(builder, shape);
		let signature = signature_witness(builder, shape);
		let one = Fr::from(1u64);

		let mut modexps = Vec::with_capacity(shape.n_keys);
		let mut flags = Vec::with_capacity(shape.n_keys);
		for (i, (exponent, modulus)) in inputs.exponents.iter().zip(&inputs.moduli).enumerate() {
			let b = builder.subcircuit(format!("key[{i}]"));
			let modexp = ModExp::new(
				&b.subcircuit("modexp"),
				shape.limb_bits,
				signature.clone(),
				exponent.clone(),
				modulus.clone(),
			);

			let indicators: Vec<Wire> = modexp
				.result
				.limbs
				.iter()
				.zip(&inputs.message.limbs)
				.enumerate()
				.map(|(j, (&res, &msg))| b.is_zero(format!("limb_eq[{j}]"), b.sub(res, msg)))
				.collect();
			let flag = indicators
				.into_iter()
				.reduce(|flag, indicator| b.mul(flag, indicator))
				.unwrap_or_else(|| b.one());
			flags.push(flag);
			modexps.push(modexp);
		}

		let b = builder.subcircuit("fold");
		let acc = flags
			.iter()
			.map(|&flag| b.lin_comb(&[(flag, one)], -one))
			.reduce(|acc, flag_minus_one| b.mul(acc, flag_minus_one))
			.unwrap_or_else(|| b.add_constant(-one));
		b.assert_zero("some_key_matches", acc);

		ZeroProductVerifier {
			inputs,
			signature,
			modexps,
			flags,
		}
	}

	pub fn populate(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		self.inputs.populate(w, bundle);
		self.signature.populate_limbs(w, &bundle.signature);
	}
}
