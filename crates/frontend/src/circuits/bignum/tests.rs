use num_bigint::BigUint as NumBigUint;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;
use crate::{
	compiler::{Circuit, CircuitBuilder, WitnessFiller},
	constraint_verifier::verify_constraints,
	util::biguint_from_wires,
	witness::{decode_limbs, encode_limbs},
};

fn check(cs: &Circuit, w: WitnessFiller) -> Result<(), String> {
	verify_constraints(&cs.constraint_system(), &w.into_value_vec())
}

#[quickcheck]
fn prop_add_multi_limb(vals: Vec<(u64, u64)>) -> TestResult {
	if vals.len() > 16 {
		return TestResult::discard();
	}
	let a_limbs: Vec<u64> = vals.iter().map(|&(a, _)| a).collect();
	let b_limbs: Vec<u64> = vals.iter().map(|&(_, b)| b).collect();

	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, vals.len());
	let b = BigUint::new_witness(&builder, vals.len());
	let result = add(&builder, 64, &a, &b);
	if result.limbs.len() != vals.len() + 1 {
		return TestResult::error("sum must have one extra limb");
	}

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &a_limbs);
	b.populate_limbs(&mut w, &b_limbs);
	if let Err(e) = cs.populate_wire_witness(&mut w) {
		return TestResult::error(format!("populate failed: {e}"));
	}

	let expected = decode_limbs(&a_limbs, 64) + decode_limbs(&b_limbs, 64);
	let actual = biguint_from_wires(&w, &result.limbs, 64);
	if actual != expected {
		return TestResult::error(format!("{actual} != {expected}"));
	}
	if let Err(e) = check(&cs, w) {
		return TestResult::error(format!("Constraint verification failed: {e}"));
	}
	TestResult::passed()
}

#[test]
fn test_add_propagates_carry_through_all_limbs() {
	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, 3);
	let b = BigUint::new_witness(&builder, 1);
	let result = add(&builder, 8, &a, &b);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &[0xff, 0xff, 0xff]);
	b.populate_limbs(&mut w, &[1]);
	cs.populate_wire_witness(&mut w).unwrap();

	assert_eq!(biguint_from_wires(&w, &result.limbs, 8), NumBigUint::from(1u32 << 24));
	check(&cs, w).unwrap();
}

#[test]
fn test_mul_single_case() {
	let builder = CircuitBuilder::new();

	let a = BigUint::new_witness(&builder, 32);
	let b = BigUint::new_witness(&builder, 32);
	let product = mul(&builder, 64, &a, &b);
	assert_eq!(product.limbs.len(), 64);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();

	// a = 2^64 + 1, b = 2^64 + 2
	let mut a_limbs = vec![0u64; 32];
	a_limbs[..2].copy_from_slice(&[1, 1]);
	let mut b_limbs = vec![0u64; 32];
	b_limbs[..2].copy_from_slice(&[2, 1]);
	a.populate_limbs(&mut w, &a_limbs);
	b.populate_limbs(&mut w, &b_limbs);
	cs.populate_wire_witness(&mut w).unwrap();

	// (2^64 + 1) * (2^64 + 2) = 2^128 + 3*2^64 + 2
	let mut expected = vec![0u64; 64];
	expected[..3].copy_from_slice(&[2, 3, 1]);
	assert_eq!(
		biguint_from_wires(&w, &product.limbs, 64),
		decode_limbs(&expected, 64)
	);
	check(&cs, w).unwrap();
}

#[quickcheck]
fn test_mul_with_values(a_limbs: Vec<u64>, b_limbs: Vec<u64>) -> TestResult {
	if a_limbs.len() > 12 || b_limbs.len() > 12 {
		return TestResult::discard();
	}
	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, a_limbs.len());
	let b = BigUint::new_witness(&builder, b_limbs.len());
	let result = mul(&builder, 64, &a, &b);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &a_limbs);
	b.populate_limbs(&mut w, &b_limbs);
	if let Err(e) = cs.populate_wire_witness(&mut w) {
		return TestResult::error(format!("populate failed: {e}"));
	}

	let expected = decode_limbs(&a_limbs, 64) * decode_limbs(&b_limbs, 64);
	let actual = biguint_from_wires(&w, &result.limbs, 64);
	if actual != expected {
		return TestResult::error(format!("Multiplication failed: {actual} (expected {expected})"));
	}
	if let Err(e) = check(&cs, w) {
		return TestResult::error(format!("Constraint verification failed: {e}"));
	}
	TestResult::passed()
}

#[quickcheck]
fn prop_square_matches_mul(limbs: Vec<u16>) -> TestResult {
	if limbs.is_empty() || limbs.len() > 10 {
		return TestResult::discard();
	}
	let limbs: Vec<u64> = limbs.into_iter().map(u64::from).collect();

	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, limbs.len());
	let squared = square(&builder, 16, &a);
	let product = mul(&builder, 16, &a, &a);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &limbs);
	if let Err(e) = cs.populate_wire_witness(&mut w) {
		return TestResult::error(format!("populate failed: {e}"));
	}
	let value = decode_limbs(&limbs, 16);
	let squared = biguint_from_wires(&w, &squared.limbs, 16);
	let product = biguint_from_wires(&w, &product.limbs, 16);
	if squared != &value * &value || squared != product {
		return TestResult::error(format!("{squared} != {product}"));
	}
	TestResult::from_bool(check(&cs, w).is_ok())
}

#[quickcheck]
fn prop_mod_reduce_product(a: Vec<u16>, b: Vec<u16>, m: Vec<u16>) -> TestResult {
	const LIMB_BITS: usize = 16;
	let n_limbs = m.len();
	if n_limbs == 0 || n_limbs > 6 || m.iter().all(|&l| l == 0) {
		return TestResult::discard();
	}
	let modulus = decode_limbs(&m.iter().map(|&l| l as u64).collect::<Vec<_>>(), LIMB_BITS);
	let to_reduced = |v: &[u16]| {
		let value = decode_limbs(&v.iter().map(|&l| l as u64).collect::<Vec<_>>(), LIMB_BITS);
		encode_limbs(&(value % &modulus), LIMB_BITS, n_limbs).unwrap()
	};
	let a_limbs = to_reduced(&a);
	let b_limbs = to_reduced(&b);
	let m_limbs = encode_limbs(&modulus, LIMB_BITS, n_limbs).unwrap();

	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, n_limbs);
	let b = BigUint::new_witness(&builder, n_limbs);
	let m = BigUint::new_inout(&builder, n_limbs);
	let product = mul(&builder, LIMB_BITS, &a, &b);
	let reduced = mod_reduce(&builder, "reduce", LIMB_BITS, &product, &m);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &a_limbs);
	b.populate_limbs(&mut w, &b_limbs);
	m.populate_limbs(&mut w, &m_limbs);
	if let Err(e) = cs.populate_wire_witness(&mut w) {
		return TestResult::error(format!("populate failed: {e}"));
	}

	let expected =
		decode_limbs(&a_limbs, LIMB_BITS) * decode_limbs(&b_limbs, LIMB_BITS) % &modulus;
	let actual = biguint_from_wires(&w, &reduced.limbs, LIMB_BITS);
	if actual != expected {
		return TestResult::error(format!("{actual} != {expected}"));
	}
	if let Err(e) = check(&cs, w) {
		return TestResult::error(format!("Constraint verification failed: {e}"));
	}
	TestResult::passed()
}

#[test]
fn test_mod_reduce_wide_accepts_unreduced_dividend() {
	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, 4);
	let m = BigUint::new_witness(&builder, 2);
	let reduced = mod_reduce_wide(&builder, "reduce", 16, &a, &m);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &[0xffff, 0xffff, 0xffff, 0xffff]);
	m.populate_limbs(&mut w, &[7, 0]);
	cs.populate_wire_witness(&mut w).unwrap();

	let expected = NumBigUint::from(u64::MAX % 7);
	assert_eq!(biguint_from_wires(&w, &reduced.limbs, 16), expected);
	check(&cs, w).unwrap();
}

#[test]
fn test_mod_reduce_narrow_quotient_overflow_is_reported() {
	let builder = CircuitBuilder::new();
	let a = BigUint::new_witness(&builder, 2);
	let m = BigUint::new_witness(&builder, 2);
	// Two dividend limbs over two modulus limbs leave room for a single quotient limb.
	mod_reduce(&builder, "reduce", 8, &a, &m);

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	a.populate_limbs(&mut w, &[0xff, 0xff]);
	m.populate_limbs(&mut w, &[1, 0]);
	let err = cs.populate_wire_witness(&mut w).unwrap_err();
	assert!(err.to_string().contains("reduce.divide"));
}

#[test]
fn test_mod_reduce_rejects_unreduced_remainder() {
	// 100 = 7 * 13 + 9, but the prover claims 100 = 6 * 13 + 22.
	let builder = CircuitBuilder::new();
	let a = BigUint::new_constant(&builder, &[100]);
	let m = BigUint::new_constant(&builder, &[13]);
	let q = BigUint::new_witness(&builder, 1);
	let r = BigUint::new_witness(&builder, 1);
	ModReduce::new(&builder, 8, a, m, q.clone(), r.clone());

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	q.populate_limbs(&mut w, &[6]);
	r.populate_limbs(&mut w, &[22]);
	assert!(cs.populate_wire_witness(&mut w).is_err());
}

#[test]
fn test_mod_reduce_rejects_wrong_quotient() {
	let builder = CircuitBuilder::new();
	let a = BigUint::new_constant(&builder, &[100]);
	let m = BigUint::new_constant(&builder, &[13]);
	let q = BigUint::new_witness(&builder, 1);
	let r = BigUint::new_witness(&builder, 1);
	ModReduce::new(&builder, 8, a, m, q.clone(), r.clone());

	let cs = builder.build();
	let mut w = cs.new_witness_filler();
	q.populate_limbs(&mut w, &[6]);
	r.populate_limbs(&mut w, &[9]);
	assert!(cs.populate_wire_witness(&mut w).is_err());
}

#[test]
fn test_assert_lt() {
	let build = |a_val: u64, b_val: u64| {
		let builder = CircuitBuilder::new();
		let a = BigUint::new_witness(&builder, 2);
		let b = BigUint::new_witness(&builder, 2);
		assert_lt(&builder, 8, &a, &b);
		let cs = builder.build();
		let mut w = cs.new_witness_filler();
		a.populate_limbs(&mut w, &[a_val & 0xff, a_val >> 8]);
		b.populate_limbs(&mut w, &[b_val & 0xff, b_val >> 8]);
		cs.populate_wire_witness(&mut w).map(|()| check(&cs, w))
	};

	assert!(matches!(build(0x00ff, 0x0100), Ok(Ok(()))));
	assert!(matches!(build(0, 0xffff), Ok(Ok(()))));
	assert!(build(0x1234, 0x1234).is_err());
	assert!(build(0x0100, 0x00ff).is_err());
}
