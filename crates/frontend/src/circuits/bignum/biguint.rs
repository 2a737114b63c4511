use crate::{
	compiler::{CircuitBuilder, Wire, circuit::WitnessFiller},
	util::populate_wires,
};

/// Represents an arbitrarily large unsigned integer using a vector of `Wire`s
///
/// - Each `Wire` holds a `limb_bits`-wide unsigned integer value (a "limb")
/// - Limbs are stored in little-endian order (index 0 = least significant)
/// - The limb width is not stored; every operation takes it explicitly
///
/// Limbs are only canonical (`< 2^limb_bits`) if something constrains them to be. Limbs produced
/// by the bignum operations are range checked; limbs of fresh inout and witness wires are not
/// until [`range_check`] is applied.
#[derive(Clone, Debug)]
pub struct BigUint {
	pub limbs: Vec<Wire>,
}

impl BigUint {
	/// Creates a new BigUint with the given number of limbs as inout wires.
	pub fn new_inout(b: &CircuitBuilder, num_limbs: usize) -> Self {
		let limbs = (0..num_limbs).map(|_| b.add_inout()).collect();
		BigUint { limbs }
	}

	/// Creates a new BigUint with the given number of limbs as witness wires.
	pub fn new_witness(b: &CircuitBuilder, num_limbs: usize) -> Self {
		let limbs = (0..num_limbs).map(|_| b.add_witness()).collect();
		BigUint { limbs }
	}

	/// A constant with the given limbs.
	pub fn new_constant(b: &CircuitBuilder, limb_values: &[u64]) -> Self {
		let limbs = limb_values
			.iter()
			.map(|&v| b.add_constant_u64(v))
			.collect();
		BigUint { limbs }
	}

	/// Populate the BigUint with the expected limb_values
	///
	/// Panics if limb_values.len() != self.limbs.len()
	pub fn populate_limbs(&self, w: &mut WitnessFiller, limb_values: &[u64]) {
		populate_wires(w, &self.limbs, limb_values);
	}

	/// Zero-extends to `n_limbs` limbs.
	///
	/// # Panics
	/// Panics if the number is already wider than `n_limbs`.
	pub fn pad_limbs_to(&self, n_limbs: usize, zero: Wire) -> BigUint {
		assert!(self.limbs.len() <= n_limbs, "pad_limbs_to: cannot shrink");
		let mut limbs = self.limbs.clone();
		limbs.resize(n_limbs, zero);
		BigUint { limbs }
	}

	/// Splits into the `n_limbs` least significant limbs and the rest.
	pub fn split_at_limbs(&self, n_limbs: usize) -> (BigUint, BigUint) {
		let (lo, hi) = self.limbs.split_at(n_limbs.min(self.limbs.len()));
		(BigUint { limbs: lo.to_vec() }, BigUint { limbs: hi.to_vec() })
	}
}

/// Asserts that that two `BigUint`s are equal limb by limb.
///
/// Limb-wise equality implies integer equality only for canonical limbs.
///
/// # Panics
/// Panics if `a` and `b` have different number of limbs.
pub fn assert_eq(builder: &CircuitBuilder, name: impl Into<String>, a: &BigUint, b: &BigUint) {
	assert_eq!(
		a.limbs.len(),
		b.limbs.len(),
		"biguint assert_eq: inputs must have the same number of limbs"
	);
	let base_name = name.into();
	for (i, (&a_l, &b_l)) in a.limbs.iter().zip(b.limbs.iter()).enumerate() {
		builder.assert_eq(format!("{base_name}[{i}]"), a_l, b_l);
	}
}

/// Asserts that every limb is zero.
pub fn assert_zero(builder: &CircuitBuilder, name: impl Into<String>, a: &BigUint) {
	let base_name = name.into();
	for (i, &limb) in a.limbs.iter().enumerate() {
		builder.assert_zero(format!("{base_name}[{i}]"), limb);
	}
}

/// Constrains every limb to be below `2^limb_bits`.
pub fn range_check(builder: &CircuitBuilder, name: impl Into<String>, a: &BigUint, limb_bits: usize) {
	let base_name = name.into();
	for (i, &limb) in a.limbs.iter().enumerate() {
		builder.range_check(format!("{base_name}[{i}]"), limb, limb_bits);
	}
}
