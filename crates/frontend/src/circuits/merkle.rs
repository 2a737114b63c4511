use std::marker::PhantomData;

use ark_ff::Zero;
use sigset_core::Fr;

use crate::{
	compiler::{CircuitBuilder, Wire, WitnessFiller},
	witness::MerkleProof,
};

/// Trait for two-to-one compression functions used in merkle tree circuits.
///
/// The trait bridges between the circuit representation of a node (a single wire) and its
/// runtime value used during witness generation.
pub trait Compression {
	/// Compute `hash(left, right)` in the circuit.
	fn compress(b: &CircuitBuilder, left: Wire, right: Wire) -> Wire;
	/// Compute `hash(left, right)` natively.
	fn compress_native(left: Fr, right: Fr) -> Fr;
}

/// Circuit that verifies a merkle path from leaf to root.
///
/// Every level carries three private values: the sibling, whether the current node is the right
/// child, and whether the level is skipped because the current node was promoted unchanged (the
/// last node of an odd layer). The recurrence is
///
/// ```text
/// (left, right) = is_right ? (sibling, cur) : (cur, sibling)
/// next = skip ? cur : hash(left, right)
/// ```
pub struct MerklePath<C: Compression> {
	/// Tree depth (number of levels from leaf to root)
	pub depth: usize,
	/// Wire containing the leaf hash
	pub leaf: Wire,
	/// Wire containing the root computed from the leaf and the path
	pub root: Wire,
	/// Wires containing sibling hashes for each level
	pub siblings: Vec<Wire>,
	/// Orientation bits for each level
	pub is_right: Vec<Wire>,
	/// Promotion bits for each level
	pub skip: Vec<Wire>,
	_compression: PhantomData<C>,
}

impl<C: Compression> MerklePath<C> {
	/// Creates a new merkle path verification circuit for `leaf`.
	///
	/// The caller constrains [`Self::root`].
	pub fn new(b: &CircuitBuilder, depth: usize, leaf: Wire) -> Self {
		let siblings: Vec<Wire> = (0..depth).map(|_| b.add_witness()).collect();
		let is_right: Vec<Wire> = (0..depth).map(|_| b.add_witness()).collect();
		let skip: Vec<Wire> = (0..depth).map(|_| b.add_witness()).collect();

		let one = Fr::from(1u64);
		let mut cur = leaf;
		for level in 0..depth {
			let b = b.subcircuit(format!("level[{level}]"));
			b.assert_bool("is_right", is_right[level]);
			b.assert_bool("skip", skip[level]);
			// A promoted node is always the last, and therefore a left, node of its layer.
			b.assert_product_zero("skip_is_left", skip[level], is_right[level]);

			let diff = b.sub(siblings[level], cur);
			let swap = b.mul(is_right[level], diff);
			let left = b.lin_comb(&[(cur, one), (swap, one)], Fr::zero());
			let right = b.lin_comb(&[(siblings[level], one), (swap, -one)], Fr::zero());
			let hash = C::compress(&b, left, right);

			let step = b.sub(hash, cur);
			let skipped = b.mul(skip[level], step);
			cur = b.sub(hash, skipped);
		}

		Self {
			depth,
			leaf,
			root: cur,
			siblings,
			is_right,
			skip,
			_compression: PhantomData,
		}
	}

	/// Sets siblings, orientation and promotion bits from a host-side proof.
	///
	/// # Panics
	///
	/// Panics if the proof does not have exactly `depth` steps.
	pub fn populate_path(&self, w: &mut WitnessFiller, proof: &MerkleProof) {
		assert_eq!(
			proof.steps.len(),
			self.depth,
			"path length {path_len} must equal depth {depth}",
			path_len = proof.steps.len(),
			depth = self.depth
		);
		for (level, step) in proof.steps.iter().enumerate() {
			w[self.siblings[level]] = step.sibling.unwrap_or_else(Fr::zero);
			w[self.is_right[level]] = Fr::from(step.is_right as u64);
			w[self.skip[level]] = Fr::from(step.sibling.is_none() as u64);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		circuits::mimc::Mimc7, compiler::circuit::Circuit,
		constraint_verifier::verify_constraints, witness::MerkleTree,
	};

	fn merkle_circuit(depth: usize) -> (Circuit, MerklePath<Mimc7>, Wire) {
		let builder = CircuitBuilder::new();
		let leaf = builder.add_witness();
		let root = builder.add_inout();
		let path = MerklePath::<Mimc7>::new(&builder, depth, leaf);
		builder.assert_eq("root", path.root, root);
		(builder.build(), path, root)
	}

	#[test]
	fn every_leaf_of_odd_tree() {
		let leaves: Vec<Fr> = (0..5u64).map(|i| Fr::from(1000 + i)).collect();
		let tree = MerkleTree::new(leaves.clone());
		assert_eq!(tree.depth(), 3);
		let (circuit, path, root) = merkle_circuit(tree.depth());
		let cs = circuit.constraint_system();

		for index in 0..leaves.len() {
			let proof = tree.proof(index);
			let mut w = circuit.new_witness_filler();
			w[path.leaf] = leaves[index];
			w[root] = tree.root();
			path.populate_path(&mut w, &proof);
			circuit.populate_wire_witness(&mut w).unwrap();
			verify_constraints(&cs, &w.into_value_vec()).unwrap();
		}
	}

	#[test]
	fn tampered_sibling_is_rejected() {
		let leaves: Vec<Fr> = (0..4u64).map(Fr::from).collect();
		let tree = MerkleTree::new(leaves.clone());
		let (circuit, path, root) = merkle_circuit(tree.depth());

		let mut proof = tree.proof(2);
		proof.steps[1].sibling = proof.steps[1].sibling.map(|s| s + Fr::from(1u64));
		let mut w = circuit.new_witness_filler();
		w[path.leaf] = leaves[2];
		w[root] = tree.root();
		path.populate_path(&mut w, &proof);
		assert!(circuit.populate_wire_witness(&mut w).is_err());
	}
}
