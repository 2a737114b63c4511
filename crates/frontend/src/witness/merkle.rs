//! Merkle tree over the key set.
//!
//! Leaves are MiMC multi-hashes of the key encodings and inner nodes are [`compress`]ions of two
//! children. The last node of an odd layer is promoted to the next layer unchanged.

use ark_ff::Zero;
use sigset_core::{Fr, field::pow2};

use super::keys::EncodedKey;
use crate::circuits::mimc::reference::{compress, multi_hash};

/// Number of exponent bits packed into one field element of a leaf.
pub const EXPONENT_CHUNK_BITS: usize = 128;

/// The hash inputs of a key: exponent bits packed into 128-bit chunks, then the modulus limbs.
pub fn leaf_inputs(key: &EncodedKey) -> Vec<Fr> {
	let chunks = key.exponent_bits.chunks(EXPONENT_CHUNK_BITS).map(|chunk| {
		chunk
			.iter()
			.enumerate()
			.filter(|(_, bit)| **bit)
			.map(|(i, _)| pow2(i))
			.sum::<Fr>()
	});
	let limbs = key.modulus_limbs.iter().map(|&limb| Fr::from(limb));
	chunks.chain(limbs).collect()
}

pub fn key_leaf(key: &EncodedKey) -> Fr {
	multi_hash(&leaf_inputs(key), Fr::zero())
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerkleStep {
	/// The sibling, or `None` if the node is promoted without hashing.
	pub sibling: Option<Fr>,
	/// Whether the node is the right child.
	pub is_right: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
	pub leaf: Fr,
	pub index: usize,
	pub steps: Vec<MerkleStep>,
}

impl MerkleProof {
	pub fn compute_root(&self) -> Fr {
		self.steps.iter().fold(self.leaf, |cur, step| match step.sibling {
			None => cur,
			Some(sibling) if step.is_right => compress(sibling, cur),
			Some(sibling) => compress(cur, sibling),
		})
	}

	pub fn verify(&self, root: Fr) -> bool {
		self.compute_root() == root
	}
}

#[derive(Debug, Clone)]
pub struct MerkleTree {
	/// `layers[0]` are the leaves, the last layer holds the root alone.
	layers: Vec<Vec<Fr>>,
}

impl MerkleTree {
	/// # Panics
	///
	/// Panics if `leaves` is empty.
	pub fn new(leaves: Vec<Fr>) -> Self {
		assert!(!leaves.is_empty(), "a merkle tree needs at least one leaf");
		let mut layers = vec![leaves];
		while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
			let next: Vec<Fr> = layer
				.chunks(2)
				.map(|pair| match pair {
					[left, right] => compress(*left, *right),
					[promoted] => *promoted,
					_ => unreachable!(),
				})
				.collect();
			layers.push(next);
		}
		Self { layers }
	}

	pub fn from_keys(keys: &[EncodedKey]) -> Self {
		Self::new(keys.iter().map(key_leaf).collect())
	}

	pub fn root(&self) -> Fr {
		self.layers[self.layers.len() - 1][0]
	}

	/// Number of levels between the leaves and the root.
	pub fn depth(&self) -> usize {
		self.layers.len() - 1
	}

	pub fn leaves(&self) -> &[Fr] {
		&self.layers[0]
	}

	/// # Panics
	///
	/// Panics if `index` is not the index of a leaf.
	pub fn proof(&self, index: usize) -> MerkleProof {
		assert!(index < self.leaves().len(), "leaf index {index} out of range");
		let mut steps = Vec::with_capacity(self.depth());
		let mut i = index;
		for layer in &self.layers[..self.depth()] {
			let sibling = layer.get(i ^ 1).copied();
			steps.push(MerkleStep {
				sibling,
				is_right: i & 1 == 1,
			});
			i >>= 1;
		}
		MerkleProof {
			leaf: self.layers[0][index],
			index,
			steps,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_leaf_verifies() {
		for n in 1..=9u64 {
			let tree = MerkleTree::new((0..n).map(|i| Fr::from(i * 7 + 1)).collect());
			for index in 0..n as usize {
				let proof = tree.proof(index);
				assert_eq!(proof.steps.len(), tree.depth());
				assert!(proof.verify(tree.root()), "n={n} index={index}");
			}
		}
	}

	#[test]
	fn flipping_a_sibling_fails() {
		let tree = MerkleTree::new((0..6u64).map(Fr::from).collect());
		for index in 0..6 {
			let proof = tree.proof(index);
			for level in 0..proof.steps.len() {
				let Some(sibling) = proof.steps[level].sibling else {
					continue;
				};
				let mut tampered = proof.clone();
				tampered.steps[level].sibling = Some(sibling + Fr::from(1u64));
				assert!(!tampered.verify(tree.root()));
			}
		}
	}

	#[test]
	fn odd_node_is_promoted() {
		let leaves: Vec<Fr> = (0..3u64).map(Fr::from).collect();
		let tree = MerkleTree::new(leaves.clone());
		let left = compress(leaves[0], leaves[1]);
		assert_eq!(tree.root(), compress(left, leaves[2]));
		assert_eq!(tree.proof(2).steps[0].sibling, None);
	}

	#[test]
	fn leaf_packs_exponent_bits() {
		let key = EncodedKey {
			exponent_bits: vec![true, false, true],
			modulus_limbs: vec![11, 13],
		};
		assert_eq!(leaf_inputs(&key), vec![Fr::from(5u64), Fr::from(11u64), Fr::from(13u64)]);
	}
}
