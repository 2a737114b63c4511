use std::{fmt, str::FromStr};

use hex_literal::hex;
use num_bigint::BigUint;
use sha2::{Digest, Sha256, Sha512};

use crate::error::ParseError;

/// DER `DigestInfo` headers preceding the digest in an encoded message.
const SHA256_DIGEST_INFO: [u8; 19] = hex!("3031300d060960864801650304020105000420");
const SHA512_DIGEST_INFO: [u8; 19] = hex!("3051300d060960864801650304020305000440");

/// Minimum number of `0xff` padding bytes.
const MIN_PADDING: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
	Sha256,
	Sha512,
}

impl HashAlgorithm {
	pub fn as_str(&self) -> &'static str {
		match self {
			HashAlgorithm::Sha256 => "sha256",
			HashAlgorithm::Sha512 => "sha512",
		}
	}

	pub fn digest(&self, data: &[u8]) -> Vec<u8> {
		match self {
			HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
			HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
		}
	}

	fn digest_info(&self) -> &'static [u8] {
		match self {
			HashAlgorithm::Sha256 => &SHA256_DIGEST_INFO,
			HashAlgorithm::Sha512 => &SHA512_DIGEST_INFO,
		}
	}
}

impl fmt::Display for HashAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for HashAlgorithm {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sha256" => Ok(HashAlgorithm::Sha256),
			"sha512" => Ok(HashAlgorithm::Sha512),
			_ => Err(ParseError::UnsupportedAlgorithm(s.to_string())),
		}
	}
}

/// The EMSA-PKCS1-v1_5 encoding of `data` for a modulus of `modulus_len` bytes.
///
/// A valid signature `s` under `(e, n)` satisfies `s^e mod n == encode_pkcs1v15(..)`.
pub fn encode_pkcs1v15(
	hash: HashAlgorithm,
	data: &[u8],
	modulus_len: usize,
) -> Result<BigUint, ParseError> {
	let digest_info = hash.digest_info();
	let digest = hash.digest(data);
	let t_len = digest_info.len() + digest.len();
	if modulus_len < t_len + MIN_PADDING + 3 {
		return Err(ParseError::ModulusTooShort {
			modulus_len,
			digest_len: digest.len(),
		});
	}

	let mut encoded = Vec::with_capacity(modulus_len);
	encoded.extend_from_slice(&[0x00, 0x01]);
	encoded.resize(modulus_len - t_len - 1, 0xff);
	encoded.push(0x00);
	encoded.extend_from_slice(digest_info);
	encoded.extend_from_slice(&digest);
	debug_assert_eq!(encoded.len(), modulus_len);
	Ok(BigUint::from_bytes_be(&encoded))
}

#[cfg(test)]
mod tests {
	use rand::{SeedableRng, rngs::StdRng};
	use rsa::{
		RsaPrivateKey, RsaPublicKey,
		pkcs1v15::SigningKey,
		signature::{SignatureEncoding, Signer},
		traits::PublicKeyParts,
	};

	use super::*;

	const DATA: &[u8] = b"signed by one of several keys";

	fn private_key() -> RsaPrivateKey {
		let mut rng = StdRng::seed_from_u64(0);
		RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate key")
	}

	fn check(public_key: &RsaPublicKey, signature: &[u8], hash: HashAlgorithm) {
		let n = BigUint::from_bytes_be(&public_key.n().to_bytes_be());
		let e = BigUint::from_bytes_be(&public_key.e().to_bytes_be());
		let s = BigUint::from_bytes_be(signature);
		assert_eq!(s.modpow(&e, &n), encode_pkcs1v15(hash, DATA, public_key.size()).unwrap());
	}

	#[test]
	fn test_matches_rsa_sha256() {
		let private_key = private_key();
		let public_key = RsaPublicKey::from(&private_key);
		let signature = SigningKey::<Sha256>::new(private_key).sign(DATA).to_bytes();
		check(&public_key, &signature, HashAlgorithm::Sha256);
	}

	#[test]
	fn test_matches_rsa_sha512() {
		let private_key = private_key();
		let public_key = RsaPublicKey::from(&private_key);
		let signature = SigningKey::<Sha512>::new(private_key).sign(DATA).to_bytes();
		check(&public_key, &signature, HashAlgorithm::Sha512);
	}

	#[test]
	fn test_layout() {
		let encoded = encode_pkcs1v15(HashAlgorithm::Sha256, b"", 64).unwrap().to_bytes_be();
		// The leading zero byte vanishes in the integer.
		assert_eq!(encoded.len(), 63);
		assert_eq!(encoded[0], 0x01);
		assert!(encoded[1..11].iter().all(|&b| b == 0xff));
		assert_eq!(encoded[11], 0x00);
		assert_eq!(&encoded[12..31], &SHA256_DIGEST_INFO);
	}

	#[test]
	fn test_modulus_too_short() {
		assert_eq!(
			encode_pkcs1v15(HashAlgorithm::Sha512, b"", 64),
			Err(ParseError::ModulusTooShort {
				modulus_len: 64,
				digest_len: 64
			})
		);
		assert!(encode_pkcs1v15(HashAlgorithm::Sha256, b"", 62).is_ok());
	}

	#[test]
	fn test_names() {
		assert_eq!("sha512".parse(), Ok(HashAlgorithm::Sha512));
		assert!("md5".parse::<HashAlgorithm>().is_err());
	}
}
