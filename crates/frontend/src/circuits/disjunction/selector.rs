use ark_ff::Zero;
use sigset_core::{CircuitShape, Fr};

use super::{KeySetInputs, signature_witness};
use crate::{
	circuits::{
		bignum::{self, BigUint},
		modexp::ModExp,
	},
	compiler::{CircuitBuilder, Wire, WitnessFiller},
	util::populate_bits,
	witness::WitnessBundle,
};

/// Disjunctive verifier with a witnessed key index.
///
/// # Constraints
///
/// - every selector entry `s_j` is boolean and `sum(s_j) = 1`,
/// - `sum(j * s_j) = index`,
/// - `e = sum(s_j * e_j)` and `N = sum(s_j * N_j)`, bit by bit and limb by limb,
/// - `signature ^ e mod N = message`.
///
/// The index and the selector are private, but the circuit does nothing to hide them from an
/// artifact derived from the witness.
pub struct SelectorVerifier {
	pub inputs: KeySetInputs,
	pub signature: BigUint,
	pub index: Wire,
	pub selector: Vec<Wire>,
	pub modexp: ModExp,
}

impl SelectorVerifier {
	pub fn new(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		let inputs = KeySetInputs::new(builder, shape);
		let signature = signature_witness(builder, shape);
		let index = builder.add_witness();
		let selector: Vec<Wire> = (0..shape.n_keys).map(|_| builder.add_witness()).collect();

		let b = builder.subcircuit("selector");
		for (j, &s) in selector.iter().enumerate() {
			b.assert_bool(format!("one_hot_bool[{j}]"), s);
		}
		b.assert_eq("one_hot_sum", b.sum(&selector), b.one());
		let weighted: Vec<(Wire, Fr)> = selector
			.iter()
			.enumerate()
			.map(|(j, &s)| (s, Fr::from(j as u64)))
			.collect();
		b.assert_eq("index", b.lin_comb(&weighted, Fr::zero()), index);

		let exponent: Vec<Wire> = (0..shape.exp_bits)
			.map(|t| select(&b, &selector, inputs.exponents.iter().map(|e| e[t])))
			.collect();
		let modulus = BigUint {
			limbs: (0..shape.n_limbs)
				.map(|l| select(&b, &selector, inputs.moduli.iter().map(|m| m.limbs[l])))
				.collect(),
		};

		let modexp = ModExp::new(
			&builder.subcircuit("modexp"),
			shape.limb_bits,
			signature.clone(),
			exponent,
			modulus,
		);
		bignum::assert_eq(builder, "result_eq_message", &modexp.result, &inputs.message);

		SelectorVerifier {
			inputs,
			signature,
			index,
			selector,
			modexp,
		}
	}

	pub fn populate(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		self.inputs.populate(w, bundle);
		self.signature.populate_limbs(w, &bundle.signature);
		w[self.index] = Fr::from(bundle.matched as u64);
		populate_bits(w, &self.selector, &bundle.one_hot());
	}
}

/// `sum(s_j * x_j)`, which is `x_idx` for a one-hot `s`.
fn select(b: &CircuitBuilder, selector: &[Wire], values: impl Iterator<Item = Wire>) -> Wire {
	let products: Vec<Wire> = selector
		.iter()
		.zip(values)
		.map(|(&s, x)| b.mul(s, x))
		.collect();
	b.sum(&products)
}
