//! Long division in base `2^limb_bits`.
//!
//! The quotient and remainder computed here are the prover-side witnesses of the modular
//! reduction circuit. Nothing in this module is constrained; the reduction circuit re-derives the
//! dividend from the results and rejects anything inconsistent.

use super::error::DivisionError;

/// Quotient and remainder of a long division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
	/// `quotient_limbs` limbs, as requested by the caller.
	pub quotient: Vec<u64>,
	/// As many limbs as the divisor.
	pub remainder: Vec<u64>,
}

/// Divides `dividend` by `divisor`, both little-endian limbs of `limb_bits` bits.
///
/// Leading zero limbs of either operand are ignored, so a divisor keeps its declared width while
/// the algorithm works on its significant part.
///
/// # Errors
///
/// - [`DivisionError::DivisionByZero`] if all limbs of `divisor` are zero,
/// - [`DivisionError::QuotientOverflow`] if the quotient needs more than `quotient_limbs` limbs,
/// - [`DivisionError::LimbOutOfRange`] if any limb has `limb_bits` bits or more.
pub fn long_division(
	dividend: &[u64],
	divisor: &[u64],
	limb_bits: usize,
	quotient_limbs: usize,
) -> Result<Division, DivisionError> {
	assert!((1..=64).contains(&limb_bits), "limb width must be between 1 and 64 bits");
	let mask = u64::MAX >> (64 - limb_bits);
	if let Some(&limb) = dividend.iter().chain(divisor).find(|&&limb| limb & !mask != 0) {
		return Err(DivisionError::LimbOutOfRange { limb, limb_bits });
	}

	let n = significant_len(divisor);
	let m = significant_len(dividend);
	if n == 0 {
		return Err(DivisionError::DivisionByZero);
	}

	let (mut quotient, mut remainder) = if m < n {
		(vec![], dividend[..m].to_vec())
	} else if n == 1 {
		divide_by_limb(&dividend[..m], divisor[0], limb_bits)
	} else {
		divide_normalized(&dividend[..m], &divisor[..n], limb_bits)
	};

	if significant_len(&quotient) > quotient_limbs {
		return Err(DivisionError::QuotientOverflow { quotient_limbs });
	}
	quotient.resize(quotient_limbs, 0);
	remainder.resize(divisor.len(), 0);
	Ok(Division {
		quotient,
		remainder,
	})
}

fn significant_len(limbs: &[u64]) -> usize {
	limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}

fn divide_by_limb(dividend: &[u64], divisor: u64, limb_bits: usize) -> (Vec<u64>, Vec<u64>) {
	let divisor = divisor as u128;
	let mut quotient = vec![0u64; dividend.len()];
	let mut rem = 0u128;
	for (i, &limb) in dividend.iter().enumerate().rev() {
		let cur = (rem << limb_bits) | limb as u128;
		quotient[i] = (cur / divisor) as u64;
		rem = cur % divisor;
	}
	(quotient, vec![rem as u64])
}

/// Schoolbook division with a normalized divisor of at least two limbs.
///
/// The divisor is shifted so its top limb has the top bit set. Every trial quotient limb is then
/// at most two above the true one.
fn divide_normalized(dividend: &[u64], divisor: &[u64], limb_bits: usize) -> (Vec<u64>, Vec<u64>) {
	let n = divisor.len();
	let m = dividend.len();
	let base = 1u128 << limb_bits;
	let mask = base - 1;

	let top_bits = 64 - divisor[n - 1].leading_zeros() as usize;
	let shift = limb_bits - top_bits;
	let v = shift_left(divisor, shift, limb_bits);
	debug_assert_eq!(v.len(), n + 1);
	debug_assert_eq!(v[n], 0);
	let mut u = shift_left(dividend, shift, limb_bits);

	let v_top = v[n - 1] as u128;
	let v_next = v[n - 2] as u128;
	let mut quotient = vec![0u64; m - n + 1];

	for j in (0..=m - n).rev() {
		let num = ((u[j + n] as u128) << limb_bits) | u[j + n - 1] as u128;
		let mut q_hat = num / v_top;
		let mut r_hat = num % v_top;
		while q_hat >= base || q_hat * v_next > ((r_hat << limb_bits) | u[j + n - 2] as u128) {
			q_hat -= 1;
			r_hat += v_top;
			if r_hat >= base {
				break;
			}
		}

		// u[j..=j+n] -= q_hat * v
		let mut borrow = 0i128;
		let mut carry = 0u128;
		for i in 0..n {
			let p = q_hat * v[i] as u128 + carry;
			carry = p >> limb_bits;
			let t = u[i + j] as i128 - borrow - (p & mask) as i128;
			u[i + j] = (t & mask as i128) as u64;
			borrow = (t < 0) as i128;
		}
		let t = u[j + n] as i128 - borrow - carry as i128;
		u[j + n] = (t & mask as i128) as u64;

		if t < 0 {
			// The trial quotient was one too large.
			q_hat -= 1;
			let mut carry = 0u128;
			for i in 0..n {
				let s = u[i + j] as u128 + v[i] as u128 + carry;
				u[i + j] = (s & mask) as u64;
				carry = s >> limb_bits;
			}
			u[j + n] = ((u[j + n] as u128 + carry) & mask) as u64;
		}
		quotient[j] = q_hat as u64;
	}

	(quotient, shift_right(&u[..n], shift, limb_bits))
}

/// Shifts left by `shift < limb_bits` bits into `limbs.len() + 1` limbs.
fn shift_left(limbs: &[u64], shift: usize, limb_bits: usize) -> Vec<u64> {
	let mask = (1u128 << limb_bits) - 1;
	let mut out = Vec::with_capacity(limbs.len() + 1);
	let mut carry = 0u128;
	for &limb in limbs {
		let wide = ((limb as u128) << shift) | carry;
		out.push((wide & mask) as u64);
		carry = wide >> limb_bits;
	}
	out.push(carry as u64);
	out
}

/// Shifts right by `shift < limb_bits` bits.
fn shift_right(limbs: &[u64], shift: usize, limb_bits: usize) -> Vec<u64> {
	let mask = (1u128 << limb_bits) - 1;
	let mut out = vec![0u64; limbs.len()];
	let mut carry = 0u128;
	for (i, &limb) in limbs.iter().enumerate().rev() {
		let wide = (carry << limb_bits) | limb as u128;
		out[i] = ((wide >> shift) & mask) as u64;
		carry = wide & ((1u128 << shift) - 1);
	}
	out
}

#[cfg(test)]
mod tests {
	use num_bigint::BigUint;
	use proptest::prelude::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::witness::limbs::{decode_limbs, encode_limbs};

	fn check(a: &BigUint, b: &BigUint, limb_bits: usize, ka: usize, kb: usize) {
		let a_limbs = encode_limbs(a, limb_bits, ka).unwrap();
		let b_limbs = encode_limbs(b, limb_bits, kb).unwrap();
		let division = long_division(&a_limbs, &b_limbs, limb_bits, ka).unwrap();
		assert_eq!(division.remainder.len(), kb);
		assert_eq!(decode_limbs(&division.quotient, limb_bits), a / b, "a={a} b={b}");
		assert_eq!(decode_limbs(&division.remainder, limb_bits), a % b, "a={a} b={b}");
	}

	#[test]
	fn boundary_cases() {
		let one = BigUint::from(1u8);
		for limb_bits in [8, 16, 64] {
			let limb_max = (&one << limb_bits) - 1u8;
			let all_max = (&one << (4 * limb_bits)) - 1u8;
			let b = (&one << (2 * limb_bits)) - 3u8;
			// a < b
			check(&BigUint::from(5u8), &b, limb_bits, 4, 2);
			// a == b
			check(&b, &b, limb_bits, 4, 2);
			// all-max limbs in a
			check(&all_max, &b, limb_bits, 4, 2);
			// single-limb b
			check(&all_max, &limb_max, limb_bits, 4, 1);
			check(&all_max, &BigUint::from(3u8), limb_bits, 4, 1);
			// divisor with leading zero limbs
			check(&all_max, &BigUint::from(7u8), limb_bits, 4, 3);
		}
	}

	#[test]
	fn add_back_step() {
		// The first trial quotient limb is one too large here.
		let limb_bits = 16;
		let a = decode_limbs(&[0, 0, 0x8000, 0x7fff], limb_bits);
		let b = decode_limbs(&[1, 0, 0x8000], limb_bits);
		check(&a, &b, limb_bits, 4, 3);
	}

	#[test]
	fn errors() {
		assert_eq!(long_division(&[5], &[0, 0], 16, 1), Err(DivisionError::DivisionByZero));
		assert_eq!(
			long_division(&[0, 0, 5], &[3, 0], 16, 1),
			Err(DivisionError::QuotientOverflow { quotient_limbs: 1 })
		);
		assert_eq!(
			long_division(&[1 << 16], &[3], 16, 1),
			Err(DivisionError::LimbOutOfRange {
				limb: 1 << 16,
				limb_bits: 16
			})
		);
	}

	#[test]
	fn random_wide() {
		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..200 {
			let limb_bits = [13, 32, 64][rng.gen_range(0..3)];
			let kb = rng.gen_range(1..6);
			let ka = kb + rng.gen_range(0..6);
			let a = BigUint::from_bytes_le(&(0..ka * 8).map(|_| rng.gen()).collect::<Vec<u8>>())
				% (BigUint::from(1u8) << (ka * limb_bits));
			let mut b = BigUint::from_bytes_le(&(0..kb * 8).map(|_| rng.gen()).collect::<Vec<u8>>())
				% (BigUint::from(1u8) << (kb * limb_bits));
			if b == BigUint::ZERO {
				b = BigUint::from(1u8);
			}
			check(&a, &b, limb_bits, ka, kb);
		}
	}

	proptest! {
		#[test]
		fn matches_num_bigint(a in any::<u128>(), b in 1u64..) {
			let (a, b) = (BigUint::from(a), BigUint::from(b));
			check(&a, &b, 32, 4, 2);
		}
	}
}
