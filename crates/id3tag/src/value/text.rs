use crate::error::FrameError;

/// Text encoding marker at the start of text-bearing frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1.
	Latin1 = 0,

	/// UTF-16 with a byte order mark.
	Utf16 = 1,

	/// UTF-16 big endian, without a byte order mark (v2.4).
	Utf16Be = 2,

	/// UTF-8 (v2.4).
	Utf8 = 3,
}

impl TextEncoding {
	/// Encoding used for text the encoder writes.
	///
	/// UTF-16 is the only Unicode encoding v2.3 has.
	pub const WRITE: Self = Self::Utf16;

	/// Get an encoding from its marker byte.
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::Utf16),
			2 => Some(Self::Utf16Be),
			3 => Some(Self::Utf8),
			_ => None,
		}
	}

	/// Read the marker byte at the start of a frame body, returning the rest.
	pub(crate) fn split_marker(body: &[u8]) -> Result<(Self, &[u8]), FrameError> {
		let (&marker, rest) = body
			.split_first()
			.ok_or(FrameError::Truncated("encoding marker"))?;
		let encoding = Self::from_u8(marker).ok_or(FrameError::UnsupportedEncoding(marker))?;
		Ok((encoding, rest))
	}

	fn is_wide(self) -> bool {
		matches!(self, Self::Utf16 | Self::Utf16Be)
	}

	/// Split off a null-terminated string, returning it (without terminator) and the rest.
	///
	/// Wide encodings are terminated by two zero bytes on an even offset.
	pub(crate) fn split_terminated(self, bytes: &[u8]) -> Option<(&[u8], &[u8])> {
		if self.is_wide() {
			let end = bytes.chunks_exact(2).position(|c| c == [0, 0])? * 2;
			Some((&bytes[..end], &bytes[end + 2..]))
		} else {
			let end = bytes.iter().position(|b| *b == 0)?;
			Some((&bytes[..end], &bytes[end + 1..]))
		}
	}

	/// Decode a string running to the end of the bytes, dropping one trailing terminator.
	pub(crate) fn decode_trimmed(self, bytes: &[u8]) -> Result<String, FrameError> {
		let bytes = if self.is_wide() {
			let even = &bytes[..bytes.len() & !1];
			even.strip_suffix(&[0, 0]).unwrap_or(even)
		} else {
			bytes.strip_suffix(&[0]).unwrap_or(bytes)
		};
		self.decode(bytes)
	}

	/// Decode a string with no terminator.
	pub(crate) fn decode(self, bytes: &[u8]) -> Result<String, FrameError> {
		Ok(match self {
			Self::Latin1 => bytes.iter().map(|b| char::from(*b)).collect(),
			Self::Utf16 => match bytes {
				[0xFE, 0xFF, rest @ ..] => utf16_decode(rest, u16::from_be_bytes),
				[0xFF, 0xFE, rest @ ..] => utf16_decode(rest, u16::from_le_bytes),
				// no BOM: little endian, like most writers that forget it
				_ => utf16_decode(bytes, u16::from_le_bytes),
			},
			Self::Utf16Be => utf16_decode(bytes, u16::from_be_bytes),
			Self::Utf8 => {
				String::from_utf8(bytes.to_vec()).map_err(|_| FrameError::InvalidText("UTF-8"))?
			}
		})
	}

	/// Encode a string, optionally with a terminator.
	pub(crate) fn encode(self, text: &str, terminated: bool) -> Vec<u8> {
		let mut out = match self {
			Self::Latin1 => text
				.chars()
				.map(|c| u8::try_from(c).unwrap_or(b'?'))
				.collect(),
			Self::Utf16 => {
				let mut out = vec![0xFF, 0xFE];
				out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
				out
			}
			Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
			Self::Utf8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.extend_from_slice(if self.is_wide() { &[0, 0] } else { &[0] });
		}

		out
	}
}

fn utf16_decode(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> String {
	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect();
	String::from_utf16_lossy(&units)
}
