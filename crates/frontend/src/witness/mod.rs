//! Host-side witness generation.
//!
//! Everything here computes values; nothing is constrained. The circuits in
//! [`crate::circuits`] consume the results through [`WitnessBundle`] and prove them correct.

mod bundle;
mod division;
mod error;
mod keys;
mod limbs;
mod merkle;
mod modexp;

pub use bundle::{WitnessBundle, key_signals, merkle_public_signals, public_signals};
pub use division::{Division, long_division};
pub use error::{DivisionError, WitnessError};
pub use keys::{EncodedKey, KeyPair, KeySet};
pub use limbs::{decode_limbs, encode_limbs, exponent_bits};
pub use merkle::{
	EXPONENT_CHUNK_BITS, MerkleProof, MerkleStep, MerkleTree, key_leaf, leaf_inputs,
};
pub use modexp::{ModExpStep, ModExpTrace, mod_exp_trace};
