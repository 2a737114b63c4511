use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use num_bigint::BigUint;
use sigset_frontend::witness::KeyPair;
use sigset_prover_interface::Error;
use sigset_ssh::{SignatureContext, SshRsaKey, SshSignature, parse_authorized_keys};

/// The `ssh-rsa` keys of an authorized_keys style file.
pub fn read_keys(path: &Path) -> Result<Vec<SshRsaKey>> {
	let text =
		fs::read_to_string(path).with_context(|| format!("reading keys from {}", path.display()))?;
	Ok(parse_keys(&path.display().to_string(), &text)?)
}

/// Parses a key file. A line that is not an `ssh-rsa` key makes the whole file malformed.
pub fn parse_keys(name: &str, text: &str) -> Result<Vec<SshRsaKey>, Error> {
	let keys = parse_authorized_keys(text)
		.map_err(|(line_no, err)| Error::MalformedInput(format!("{name}:{line_no}: {err}")))?;
	if keys.is_empty() {
		return Err(Error::MalformedInput(format!("{name} contains no keys")));
	}
	Ok(keys)
}

pub fn read_signature(path: &Path) -> Result<SshSignature> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("reading signature from {}", path.display()))?;
	Ok(parse_signature(&path.display().to_string(), &text)?)
}

pub fn parse_signature(name: &str, text: &str) -> Result<SshSignature, Error> {
	SshSignature::from_armored(text).map_err(|err| Error::MalformedInput(format!("{name}: {err}")))
}

pub fn read_data(path: &Path) -> Result<Vec<u8>> {
	fs::read(path).with_context(|| format!("reading signed data from {}", path.display()))
}

pub fn key_pairs(keys: &[SshRsaKey]) -> Vec<KeyPair> {
	keys.iter()
		.map(|key| KeyPair::new(key.exponent.clone(), key.modulus.clone()))
		.collect()
}

/// The byte length shared by all moduli.
///
/// The message integer depends on the modulus length, so a key set mixing key sizes has no single
/// message every key could have signed.
pub fn common_modulus_len(keys: &[SshRsaKey]) -> Result<usize> {
	let Some(first) = keys.first() else {
		bail!("the key set is empty");
	};
	let len = first.modulus_len();
	if let Some(other) = keys.iter().find(|key| key.modulus_len() != len) {
		bail!(
			"keys of {} and {} bytes cannot share a message",
			len,
			other.modulus_len()
		);
	}
	Ok(len)
}

/// The message integer a valid signature under any of `keys` raises to.
pub fn message(context: &SignatureContext, data: &[u8], keys: &[SshRsaKey]) -> Result<BigUint> {
	let modulus_len = common_modulus_len(keys)?;
	let message = context
		.encoded_message(data, modulus_len)
		.map_err(|err| Error::MalformedInput(err.to_string()))?;
	Ok(message)
}
