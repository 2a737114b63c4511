use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
	#[error("truncated input: needed {needed} bytes at offset {offset}, {available} left")]
	Truncated {
		offset: usize,
		needed: usize,
		available: usize,
	},
	#[error("{0} trailing bytes")]
	TrailingBytes(usize),
	#[error("invalid base64: {0}")]
	Base64(String),
	#[error("expected {expected}, found {found:?}")]
	UnexpectedName { expected: &'static str, found: String },
	#[error("unsupported algorithm {0:?}")]
	UnsupportedAlgorithm(String),
	#[error("unsupported signature version {0}")]
	UnsupportedVersion(u32),
	#[error("missing or malformed armor line {0:?}")]
	Armor(&'static str),
	#[error("malformed key line: {0}")]
	KeyLine(String),
	#[error("{field} is not valid UTF-8")]
	Utf8 { field: &'static str },
	#[error("a {modulus_len}-byte modulus is too short for a {digest_len}-byte digest")]
	ModulusTooShort { modulus_len: usize, digest_len: usize },
}

impl From<base64::DecodeError> for ParseError {
	fn from(err: base64::DecodeError) -> Self {
		ParseError::Base64(err.to_string())
	}
}
