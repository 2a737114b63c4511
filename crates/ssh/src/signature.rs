use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use num_bigint::BigUint;

use crate::{
	error::ParseError,
	key::SshRsaKey,
	pkcs1::{HashAlgorithm, encode_pkcs1v15},
	wire::{Reader, Writer},
};

const MAGIC: &[u8; 6] = b"SSHSIG";
const VERSION: u32 = 1;
const BEGIN: &str = "-----BEGIN SSH SIGNATURE-----";
const END: &str = "-----END SSH SIGNATURE-----";
const LINE_WIDTH: usize = 70;

/// RSA signature schemes accepted in a signature blob. SHA-1 `ssh-rsa` signatures are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
	RsaSha256,
	RsaSha512,
}

impl SignatureAlgorithm {
	pub fn as_str(&self) -> &'static str {
		match self {
			SignatureAlgorithm::RsaSha256 => "rsa-sha2-256",
			SignatureAlgorithm::RsaSha512 => "rsa-sha2-512",
		}
	}

	pub fn hash(&self) -> HashAlgorithm {
		match self {
			SignatureAlgorithm::RsaSha256 => HashAlgorithm::Sha256,
			SignatureAlgorithm::RsaSha512 => HashAlgorithm::Sha512,
		}
	}
}

impl fmt::Display for SignatureAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SignatureAlgorithm {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"rsa-sha2-256" => Ok(SignatureAlgorithm::RsaSha256),
			"rsa-sha2-512" => Ok(SignatureAlgorithm::RsaSha512),
			_ => Err(ParseError::UnsupportedAlgorithm(s.to_string())),
		}
	}
}

/// Everything besides the key and the data that determines what an `SSHSIG` signature signs.
///
/// A verifier that never sees the signature rebuilds the signed message from a context agreed on
/// out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureContext {
	pub namespace: String,
	pub reserved: Vec<u8>,
	pub hash_algorithm: HashAlgorithm,
	pub algorithm: SignatureAlgorithm,
}

impl SignatureContext {
	/// The context `ssh-keygen -Y sign -n <namespace>` signs with for RSA keys.
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			reserved: Vec::new(),
			hash_algorithm: HashAlgorithm::Sha512,
			algorithm: SignatureAlgorithm::RsaSha512,
		}
	}

	/// The blob the RSA signature is computed over when signing `data`.
	pub fn signed_data(&self, data: &[u8]) -> Vec<u8> {
		Writer::default()
			.raw(MAGIC)
			.string(self.namespace.as_bytes())
			.string(&self.reserved)
			.string(self.hash_algorithm.as_str().as_bytes())
			.string(&self.hash_algorithm.digest(data))
			.finish()
	}

	/// The integer `signature^e mod n` must equal for a signature over `data` to be valid, for
	/// any key with a `modulus_len`-byte modulus.
	pub fn encoded_message(&self, data: &[u8], modulus_len: usize) -> Result<BigUint, ParseError> {
		encode_pkcs1v15(self.algorithm.hash(), &self.signed_data(data), modulus_len)
	}
}

/// A detached signature as produced by `ssh-keygen -Y sign`.
///
/// The RSA signature does not sign the data directly but a blob binding the namespace and the
/// digest of the data, see [`Self::signed_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshSignature {
	pub public_key: SshRsaKey,
	pub namespace: String,
	pub reserved: Vec<u8>,
	pub hash_algorithm: HashAlgorithm,
	pub algorithm: SignatureAlgorithm,
	pub signature: BigUint,
}

impl SshSignature {
	pub fn from_armored(text: &str) -> Result<Self, ParseError> {
		let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
		if lines.next() != Some(BEGIN) {
			return Err(ParseError::Armor(BEGIN));
		}
		let mut encoded = String::new();
		let mut terminated = false;
		for line in lines.by_ref() {
			if line == END {
				terminated = true;
				break;
			}
			encoded.push_str(line);
		}
		if !terminated {
			return Err(ParseError::Armor(END));
		}
		if lines.next().is_some() {
			return Err(ParseError::Armor(END));
		}
		Self::from_blob(&BASE64.decode(encoded)?)
	}

	pub fn from_blob(blob: &[u8]) -> Result<Self, ParseError> {
		let mut reader = Reader::new(blob);
		let magic = reader.bytes(MAGIC.len())?;
		if magic != MAGIC {
			return Err(ParseError::UnexpectedName {
				expected: "SSHSIG",
				found: String::from_utf8_lossy(magic).into_owned(),
			});
		}
		let version = reader.u32()?;
		if version != VERSION {
			return Err(ParseError::UnsupportedVersion(version));
		}
		let public_key = SshRsaKey::from_blob(reader.string()?)?;
		let namespace = reader.utf8("namespace")?.to_string();
		let reserved = reader.string()?.to_vec();
		let hash_algorithm = reader.utf8("hash algorithm")?.parse()?;

		let mut sig_reader = Reader::new(reader.string()?);
		let algorithm = sig_reader.utf8("signature algorithm")?.parse()?;
		let signature = BigUint::from_bytes_be(sig_reader.string()?);
		sig_reader.finish()?;
		reader.finish()?;

		Ok(Self {
			public_key,
			namespace,
			reserved,
			hash_algorithm,
			algorithm,
			signature,
		})
	}

	pub fn to_blob(&self) -> Vec<u8> {
		let signature = Writer::default()
			.string(self.algorithm.as_str().as_bytes())
			.string(&self.signature_bytes())
			.finish();
		Writer::default()
			.raw(MAGIC)
			.u32(VERSION)
			.string(&self.public_key.to_blob())
			.string(self.namespace.as_bytes())
			.string(&self.reserved)
			.string(self.hash_algorithm.as_str().as_bytes())
			.string(&signature)
			.finish()
	}

	pub fn to_armored(&self) -> String {
		let encoded = BASE64.encode(self.to_blob());
		let mut text = format!("{BEGIN}\n");
		for chunk in encoded.as_bytes().chunks(LINE_WIDTH) {
			text.push_str(&String::from_utf8_lossy(chunk));
			text.push('\n');
		}
		text.push_str(END);
		text.push('\n');
		text
	}

	pub fn context(&self) -> SignatureContext {
		SignatureContext {
			namespace: self.namespace.clone(),
			reserved: self.reserved.clone(),
			hash_algorithm: self.hash_algorithm,
			algorithm: self.algorithm,
		}
	}

	pub fn signed_data(&self, data: &[u8]) -> Vec<u8> {
		self.context().signed_data(data)
	}

	pub fn encoded_message(&self, data: &[u8], modulus_len: usize) -> Result<BigUint, ParseError> {
		self.context().encoded_message(data, modulus_len)
	}

	/// The signature left-padded to the length of the embedded key's modulus.
	fn signature_bytes(&self) -> Vec<u8> {
		let bytes = self.signature.to_bytes_be();
		let len = self.public_key.modulus_len().max(bytes.len());
		let mut padded = vec![0; len - bytes.len()];
		padded.extend_from_slice(&bytes);
		padded
	}
}

#[cfg(test)]
mod tests {
	use rand::{SeedableRng, rngs::StdRng};
	use rsa::{
		RsaPrivateKey, RsaPublicKey,
		pkcs1v15::SigningKey,
		sha2::{Sha256, Sha512},
		signature::{SignatureEncoding, Signer},
		traits::PublicKeyParts,
	};

	use super::*;

	const DATA: &[u8] = b"release 1.4.2\n";

	/// Signs `DATA` the way `ssh-keygen -Y sign -n file` does.
	fn sign(algorithm: SignatureAlgorithm) -> (SshSignature, RsaPublicKey) {
		let mut rng = StdRng::seed_from_u64(1);
		let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate key");
		let public_key = RsaPublicKey::from(&private_key);
		let mut signature = SshSignature {
			public_key: SshRsaKey {
				exponent: BigUint::from_bytes_be(&public_key.e().to_bytes_be()),
				modulus: BigUint::from_bytes_be(&public_key.n().to_bytes_be()),
				comment: None,
			},
			namespace: "file".to_string(),
			reserved: Vec::new(),
			hash_algorithm: HashAlgorithm::Sha512,
			algorithm,
			signature: BigUint::default(),
		};
		let signed_data = signature.signed_data(DATA);
		let bytes = match algorithm {
			SignatureAlgorithm::RsaSha256 => SigningKey::<Sha256>::new(private_key)
				.sign(&signed_data)
				.to_bytes()
				.to_vec(),
			SignatureAlgorithm::RsaSha512 => SigningKey::<Sha512>::new(private_key)
				.sign(&signed_data)
				.to_bytes()
				.to_vec(),
		};
		signature.signature = BigUint::from_bytes_be(&bytes);
		(signature, public_key)
	}

	#[test]
	fn test_armored_signature_verifies() {
		for algorithm in [SignatureAlgorithm::RsaSha256, SignatureAlgorithm::RsaSha512] {
			let (signature, public_key) = sign(algorithm);
			let armored = signature.to_armored();
			assert!(armored.lines().all(|line| line.len() <= LINE_WIDTH));

			let parsed = SshSignature::from_armored(&armored).unwrap();
			assert_eq!(parsed, signature);

			let key = &parsed.public_key;
			let expected = parsed.encoded_message(DATA, public_key.size()).unwrap();
			assert_eq!(parsed.signature.modpow(&key.exponent, &key.modulus), expected);

			let other = parsed.encoded_message(b"release 1.4.3\n", public_key.size()).unwrap();
			assert_ne!(expected, other);
		}
	}

	#[test]
	fn test_context_of_ssh_keygen() {
		let (signature, public_key) = sign(SignatureAlgorithm::RsaSha512);
		let context = SignatureContext::new("file");
		assert_eq!(signature.context(), context);
		assert_eq!(
			context.encoded_message(DATA, public_key.size()),
			signature.encoded_message(DATA, public_key.size())
		);
	}

	#[test]
	fn test_rejects_bad_headers() {
		let (signature, _) = sign(SignatureAlgorithm::RsaSha512);
		let blob = signature.to_blob();

		let mut wrong_magic = blob.clone();
		wrong_magic[0] = b'X';
		assert!(matches!(
			SshSignature::from_blob(&wrong_magic),
			Err(ParseError::UnexpectedName { .. })
		));

		let mut wrong_version = blob.clone();
		wrong_version[9] = 2;
		assert_eq!(SshSignature::from_blob(&wrong_version), Err(ParseError::UnsupportedVersion(2)));

		let mut trailing = blob.clone();
		trailing.push(0);
		assert_eq!(SshSignature::from_blob(&trailing), Err(ParseError::TrailingBytes(1)));

		assert!(matches!(
			SshSignature::from_blob(&blob[..blob.len() - 1]),
			Err(ParseError::Truncated { .. })
		));
	}

	#[test]
	fn test_rejects_weak_algorithms() {
		let (signature, _) = sign(SignatureAlgorithm::RsaSha512);
		let blob = |hash: &str, algorithm: &str| {
			let inner = Writer::default()
				.string(algorithm.as_bytes())
				.string(&signature.signature.to_bytes_be())
				.finish();
			Writer::default()
				.raw(MAGIC)
				.u32(VERSION)
				.string(&signature.public_key.to_blob())
				.string(b"file")
				.string(b"")
				.string(hash.as_bytes())
				.string(&inner)
				.finish()
		};
		assert!(SshSignature::from_blob(&blob("sha512", "rsa-sha2-512")).is_ok());
		assert_eq!(
			SshSignature::from_blob(&blob("sha512", "ssh-rsa")),
			Err(ParseError::UnsupportedAlgorithm("ssh-rsa".to_string()))
		);
		assert_eq!(
			SshSignature::from_blob(&blob("md5", "rsa-sha2-512")),
			Err(ParseError::UnsupportedAlgorithm("md5".to_string()))
		);
	}

	#[test]
	fn test_rejects_bad_armor() {
		let (signature, _) = sign(SignatureAlgorithm::RsaSha256);
		let armored = signature.to_armored();

		let unterminated = armored.replace(END, "");
		assert_eq!(SshSignature::from_armored(&unterminated), Err(ParseError::Armor(END)));
		assert_eq!(
			SshSignature::from_armored(&armored.replace(BEGIN, "-----BEGIN PGP SIGNATURE-----")),
			Err(ParseError::Armor(BEGIN))
		);
		let mut lines = armored.lines().map(str::to_string).collect::<Vec<_>>();
		lines[1].replace_range(..1, "*");
		assert!(matches!(
			SshSignature::from_armored(&lines.join("\n")),
			Err(ParseError::Base64(_))
		));
	}
}
