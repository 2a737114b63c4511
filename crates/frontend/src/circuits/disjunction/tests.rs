use num_bigint::BigUint as NumBigUint;
use sigset_core::{CircuitShape, Fr, ValueVec};

use super::*;
use crate::{
	compiler::{Circuit, PopulateError},
	constraint_verifier::verify_constraints,
	witness::{KeyPair, KeySet, public_signals},
};

fn shape() -> CircuitShape {
	CircuitShape::new(2, 16, 1, 17).unwrap()
}

fn key_set(shape: CircuitShape) -> KeySet {
	KeySet::new(
		shape,
		vec![KeyPair::new(65537u32, 12827u32), KeyPair::new(3u32, 10403u32)],
	)
	.unwrap()
}

fn bundle(shape: &CircuitShape, keys: &KeySet, signature: u32, message: u32) -> WitnessBundle {
	WitnessBundle::assemble(
		shape,
		keys,
		&NumBigUint::from(signature),
		&NumBigUint::from(message),
	)
	.unwrap()
}

/// Builds one of the disjunctive circuits and populates it from a bundle.
trait Variant: Sized {
	fn build(builder: &CircuitBuilder, shape: &CircuitShape) -> Self;
	fn fill(&self, w: &mut WitnessFiller, bundle: &WitnessBundle);

	fn prove(shape: &CircuitShape, bundle: &WitnessBundle) -> Result<ValueVec, PopulateError> {
		let builder = CircuitBuilder::new();
		let verifier = Self::build(&builder, shape);
		let circuit = builder.build();
		let values = populate(&circuit, |w| verifier.fill(w, bundle))?;
		verify_constraints(&circuit.constraint_system(), &values).unwrap();
		Ok(values)
	}
}

impl Variant for SelectorVerifier {
	fn build(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		SelectorVerifier::new(builder, shape)
	}

	fn fill(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		self.populate(w, bundle);
	}
}

impl Variant for ZeroProductVerifier {
	fn build(builder: &CircuitBuilder, shape: &CircuitShape) -> Self {
		ZeroProductVerifier::new(builder, shape)
	}

	fn fill(&self, w: &mut WitnessFiller, bundle: &WitnessBundle) {
		self.populate(w, bundle);
	}
}

fn populate(
	circuit: &Circuit,
	fill: impl FnOnce(&mut WitnessFiller),
) -> Result<ValueVec, PopulateError> {
	let mut w = circuit.new_witness_filler();
	fill(&mut w);
	circuit.populate_wire_witness(&mut w)?;
	Ok(w.into_value_vec())
}

fn accepts_match_at_any_index<V: Variant>() {
	let shape = shape();
	let keys = key_set(shape);
	// 1234 ^ 65537 mod 12827 = 2271 and 1234 ^ 3 mod 10403 = 7820
	for (index, message) in [(0, 2271), (1, 7820)] {
		let bundle = bundle(&shape, &keys, 1234, message);
		assert_eq!(bundle.matched, index);
		let values = V::prove(&shape, &bundle).unwrap();
		assert_eq!(values.public(), bundle.public_signals);
		assert_eq!(
			values.public(),
			public_signals(&shape, &keys, &NumBigUint::from(message)).unwrap()
		);
	}
}

#[test]
fn selector_accepts_match_at_any_index() {
	accepts_match_at_any_index::<SelectorVerifier>();
}

#[test]
fn zero_product_accepts_match_at_any_index() {
	accepts_match_at_any_index::<ZeroProductVerifier>();
}

#[test]
fn padded_key_set() {
	let shape = CircuitShape::new(4, 16, 1, 17).unwrap();
	let keys = KeySet::new(shape, vec![KeyPair::new(3u32, 10403u32)]).unwrap();
	let bundle = bundle(&shape, &keys, 1234, 7820);
	SelectorVerifier::prove(&shape, &bundle).unwrap();
	ZeroProductVerifier::prove(&shape, &bundle).unwrap();
}

#[test]
fn zero_product_with_a_single_key() {
	let shape = CircuitShape::new(1, 16, 1, 17).unwrap();
	let keys = KeySet::new(shape, vec![KeyPair::new(3u32, 10403u32)]).unwrap();
	ZeroProductVerifier::prove(&shape, &bundle(&shape, &keys, 1234, 7820)).unwrap();

	let mut forged = bundle(&shape, &keys, 1234, 7820);
	forged.signature = vec![1235];
	let err = ZeroProductVerifier::prove(&shape, &forged).unwrap_err();
	assert_eq!(err.total_count, 1);
	assert!(err.messages[0].starts_with("fold.some_key_matches"));
}

#[test]
fn zero_product_public_signals_do_not_depend_on_the_matching_key() {
	let shape = shape();
	let keys = key_set(shape);
	// 2841 ^ 65537 mod 12827 = 7820 = 1234 ^ 3 mod 10403
	let first = bundle(&shape, &keys, 2841, 7820);
	let second = bundle(&shape, &keys, 1234, 7820);
	assert_eq!((first.matched, second.matched), (0, 1));

	let first = ZeroProductVerifier::prove(&shape, &first).unwrap();
	let second = ZeroProductVerifier::prove(&shape, &second).unwrap();
	assert_eq!(first.public(), second.public());
}

#[test]
fn wrong_signature_is_rejected() {
	let shape = shape();
	let keys = key_set(shape);
	let mut forged = bundle(&shape, &keys, 1234, 2271);
	forged.signature = vec![4321];

	let err = SelectorVerifier::prove(&shape, &forged).unwrap_err();
	assert!(err.to_string().contains("result_eq_message"));
	assert!(ZeroProductVerifier::prove(&shape, &forged).is_err());
}

#[test]
fn wrong_index_is_rejected() {
	let shape = shape();
	let keys = key_set(shape);
	let mut forged = bundle(&shape, &keys, 1234, 2271);
	forged.matched = 1;
	assert!(SelectorVerifier::prove(&shape, &forged).is_err());
}

#[test]
fn selector_must_be_one_hot() {
	let shape = shape();
	let keys = key_set(shape);
	let bundle = bundle(&shape, &keys, 1234, 2271);

	let builder = CircuitBuilder::new();
	let verifier = SelectorVerifier::new(&builder, &shape);
	let circuit = builder.build();

	// Selecting both keys at once.
	let err = populate(&circuit, |w| {
		verifier.populate(w, &bundle);
		w[verifier.selector[1]] = Fr::from(1u64);
	})
	.unwrap_err();
	assert!(err.to_string().contains("selector.one_hot_sum"));

	let err = populate(&circuit, |w| {
		verifier.populate(w, &bundle);
		w[verifier.index] = Fr::from(1u64);
	})
	.unwrap_err();
	assert!(err.to_string().contains("selector.index"));
}
