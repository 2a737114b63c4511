use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use num_bigint::BigUint;

use crate::{
	error::ParseError,
	wire::{Reader, Writer},
};

pub(crate) const SSH_RSA: &str = "ssh-rsa";

/// An RSA public key in OpenSSH form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshRsaKey {
	pub exponent: BigUint,
	pub modulus: BigUint,
	pub comment: Option<String>,
}

impl SshRsaKey {
	/// Parses the wire blob `string "ssh-rsa" || mpint e || mpint n`.
	pub fn from_blob(blob: &[u8]) -> Result<Self, ParseError> {
		let mut reader = Reader::new(blob);
		reader.name(SSH_RSA)?;
		let exponent = reader.mpint()?;
		let modulus = reader.mpint()?;
		reader.finish()?;
		Ok(Self {
			exponent,
			modulus,
			comment: None,
		})
	}

	/// Parses a line `ssh-rsa <base64 blob> [comment]`.
	pub fn from_line(line: &str) -> Result<Self, ParseError> {
		let mut fields = line.split_whitespace();
		let key_type = fields
			.next()
			.ok_or_else(|| ParseError::KeyLine("empty line".to_string()))?;
		if key_type != SSH_RSA {
			return Err(ParseError::UnsupportedAlgorithm(key_type.to_string()));
		}
		let encoded = fields
			.next()
			.ok_or_else(|| ParseError::KeyLine("missing key data".to_string()))?;
		let mut key = Self::from_blob(&BASE64.decode(encoded)?)?;

		let comment = fields.collect::<Vec<_>>().join(" ");
		if !comment.is_empty() {
			key.comment = Some(comment);
		}
		Ok(key)
	}

	pub fn to_blob(&self) -> Vec<u8> {
		Writer::default()
			.string(SSH_RSA.as_bytes())
			.mpint(&self.exponent)
			.mpint(&self.modulus)
			.finish()
	}

	/// Length of the modulus in bytes, the size of every encoded message.
	pub fn modulus_len(&self) -> usize {
		self.modulus.bits().div_ceil(8) as usize
	}
}

impl fmt::Display for SshRsaKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{SSH_RSA} {}", BASE64.encode(self.to_blob()))?;
		if let Some(comment) = &self.comment {
			write!(f, " {comment}")?;
		}
		Ok(())
	}
}

/// Parses every key of an `authorized_keys` style file.
///
/// Blank lines and `#` comments are skipped. Any other line must hold an `ssh-rsa` key, the
/// error names its line number.
pub fn parse_authorized_keys(text: &str) -> Result<Vec<SshRsaKey>, (usize, ParseError)> {
	text.lines()
		.enumerate()
		.map(|(index, line)| (index + 1, line.trim()))
		.filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
		.map(|(line_no, line)| SshRsaKey::from_line(line).map_err(|err| (line_no, err)))
		.collect()
}
