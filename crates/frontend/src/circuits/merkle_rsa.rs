//! RSA signature verification against a key committed to by a Merkle root.

use ark_ff::Zero;
use sigset_core::{CircuitShape, Fr, field::pow2};

use super::{
	bignum::{self, BigUint},
	merkle::MerklePath,
	mimc::{self, Mimc7},
	modexp::ModExp,
};
use crate::{
	compiler::{CircuitBuilder, Wire, WitnessFiller},
	util::populate_bits,
	witness::{EXPONENT_CHUNK_BITS, WitnessBundle},
};

/// Proves `signature ^ e mod N = message` for a key `(e, N)` whose leaf is in the key tree.
///
/// Public inputs are the tree root followed by the message limbs. The key, the signature and the
/// path are private, so the cost grows with the depth of the tree instead of the number of keys.
///
/// # Constraints
///
/// - the exponent bits are boolean and the modulus and signature limbs canonical,
/// - the leaf hash of `(e, N)` lies on a path to `root`,
/// - `signature ^ e mod N = message`.
pub struct MerkleRsaVerify {
	pub root: Wire,
	pub message: BigUint,
	pub exponent: Vec<Wire>,
	pub modulus: BigUint,
	pub signature: BigUint,
	pub path: MerklePath<Mimc7>,
	pub modexp: ModExp,
}

impl MerkleRsaVerify {
	pub fn new(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		let root = builder.add_inout();
		let message = BigUint::new_inout(builder, shape.n_limbs);
		bignum::range_check(builder, "message_range", &message, shape.limb_bits);

		let b = builder.subcircuit("key");
		let exponent: Vec<Wire> = (0..shape.exp_bits).map(|_| b.add_witness()).collect();
		for (j, &bit) in exponent.iter().enumerate() {
			b.assert_bool(format!("exponent_bit[{j}]"), bit);
		}
		let modulus = BigUint::new_witness(&b, shape.n_limbs);
		bignum::range_check(&b, "modulus_range", &modulus, shape.limb_bits);
		let signature = BigUint::new_witness(builder, shape.n_limbs);
		bignum::range_check(builder, "signature_range", &signature, shape.limb_bits);

		let leaf = key_leaf(&b, &exponent, &modulus);
		let path = MerklePath::new(&builder.subcircuit("path"), shape.merkle_depth(), leaf);
		builder.assert_eq("root", path.root, root);

		let modexp = ModExp::new(
			&builder.subcircuit("modexp"),
			shape.limb_bits,
			signature.clone(),
			exponent.clone(),
			modulus.clone(),
		);
		bignum::assert_eq(builder, "result_eq_message", &modexp.result, &message);

		MerkleRsaVerify {
			root,
			message,
			exponent,
			modulus,
			signature,
			path,
			modexp,
		}
	}

	pub fn populate(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		let proof = bundle.merkle_proof();
		let key = &bundle.keys[bundle.matched];
		w[self.root] = proof.compute_root();
		self.message.populate_limbs(w, &bundle.message);
		populate_bits(w, &self.exponent, &key.exponent_bits);
		self.modulus.populate_limbs(w, &key.modulus_limbs);
		self.signature.populate_limbs(w, &bundle.signature);
		w[self.path.leaf] = proof.leaf;
		self.path.populate_path(w, &proof);
	}
}

/// The leaf hash of a key, packing the exponent bits into field elements first.
fn key_leaf(b: &CircuitBuilder, exponent: &[Wire], modulus: &BigUint) -> Wire {
	let chunks = exponent.chunks(EXPONENT_CHUNK_BITS).map(|chunk| {
		let terms: Vec<(Wire, Fr)> = chunk
			.iter()
			.enumerate()
			.map(|(i, &bit)| (bit, pow2(i)))
			.collect();
		b.lin_comb(&terms, Fr::zero())
	});
	let inputs: Vec<Wire> = chunks.chain(modulus.limbs.iter().copied()).collect();
	mimc::multi_hash(b, &inputs, b.zero())
}
