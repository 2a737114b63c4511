//! The SSH wire encoding: big-endian `uint32` and length-prefixed `string` fields.

use num_bigint::BigUint;

use crate::error::ParseError;

pub(crate) struct Reader<'a> {
	data: &'a [u8],
	offset: usize,
}

impl<'a> Reader<'a> {
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, offset: 0 }
	}

	pub fn bytes(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
		let available = self.data.len() - self.offset;
		if len > available {
			return Err(ParseError::Truncated {
				offset: self.offset,
				needed: len,
				available,
			});
		}
		let bytes = &self.data[self.offset..self.offset + len];
		self.offset += len;
		Ok(bytes)
	}

	pub fn u32(&mut self) -> Result<u32, ParseError> {
		let bytes = self.bytes(4)?;
		Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
	}

	pub fn string(&mut self) -> Result<&'a [u8], ParseError> {
		let len = self.u32()? as usize;
		self.bytes(len)
	}

	pub fn utf8(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
		std::str::from_utf8(self.string()?).map_err(|_| ParseError::Utf8 { field })
	}

	/// Reads a string and checks it equals `expected`.
	pub fn name(&mut self, expected: &'static str) -> Result<(), ParseError> {
		let found = self.string()?;
		if found != expected.as_bytes() {
			return Err(ParseError::UnexpectedName {
				expected,
				found: String::from_utf8_lossy(found).into_owned(),
			});
		}
		Ok(())
	}

	pub fn mpint(&mut self) -> Result<BigUint, ParseError> {
		Ok(BigUint::from_bytes_be(self.string()?))
	}

	pub fn finish(self) -> Result<(), ParseError> {
		match self.data.len() - self.offset {
			0 => Ok(()),
			n => Err(ParseError::TrailingBytes(n)),
		}
	}
}

#[derive(Default)]
pub(crate) struct Writer {
	buf: Vec<u8>,
}

impl Writer {
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_be_bytes())
	}

	pub fn string(&mut self, bytes: &[u8]) -> &mut Self {
		self.u32(bytes.len() as u32).raw(bytes)
	}

	/// Positive integers get a leading zero byte when their top bit is set.
	pub fn mpint(&mut self, value: &BigUint) -> &mut Self {
		let mut bytes = value.to_bytes_be();
		if bytes == [0] {
			bytes.clear();
		} else if bytes[0] & 0x80 != 0 {
			bytes.insert(0, 0);
		}
		self.string(&bytes)
	}

	pub fn finish(&mut self) -> Vec<u8> {
		std::mem::take(&mut self.buf)
	}
}
