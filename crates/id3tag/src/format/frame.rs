use std::fmt;

use deku::prelude::*;

use crate::error::{ErrorKind, SimpleError};

use super::{header::Version, synchsafe};

/// Four-character frame identifier, like `TIT2` or `APIC`.
///
/// Only uppercase ASCII letters and digits are allowed.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FrameId([u8; 4]);

impl FrameId {
	/// Parse a frame identifier, returning `None` if it's not four uppercase letters or digits.
	pub fn new(id: &str) -> Option<Self> {
		let bytes: [u8; 4] = id.as_bytes().try_into().ok()?;
		Self::is_valid(&bytes).then_some(Self(bytes))
	}

	/// Identifier from a literal known to be valid, for static tables.
	pub(crate) const fn from_static(bytes: [u8; 4]) -> Self {
		Self(bytes)
	}

	/// Whether some bytes could be (part of) a frame identifier.
	///
	/// Used as the end-of-frames sentinel: padding and garbage fail this check.
	pub fn is_valid(bytes: &[u8]) -> bool {
		bytes
			.iter()
			.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
	}

	/// The identifier as a string.
	pub fn as_str(&self) -> &str {
		// only ever holds ASCII
		std::str::from_utf8(&self.0).unwrap_or_default()
	}

	/// The identifier as bytes.
	pub fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}
}

impl PartialEq<str> for FrameId {
	fn eq(&self, other: &str) -> bool {
		self.0 == other.as_bytes()
	}
}

impl fmt::Debug for FrameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FrameId({})", self.as_str())
	}
}

impl fmt::Display for FrameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Frame flags this library acts on.
///
/// Status flags (tag/file alter preservation, read-only) are not kept.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[allow(clippy::struct_excessive_bools)] // CLIPPY: these are flags
pub struct FrameFlags {
	/// Body is zlib-compressed.
	pub compression: bool,

	/// Body is encrypted.
	pub encryption: bool,

	/// A group identifier byte precedes the body.
	pub grouping_identity: bool,

	/// Body is unsynchronised (v2.4 only).
	pub unsynchronisation: bool,

	/// A synchsafe data length precedes the body (v2.4 only).
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Interpret the two flag bytes of a frame header.
	///
	/// The bit layout moved between v2.3 (`abc00000 ijk00000`) and v2.4 (`0abc0000 0h00kmnp`);
	/// v2.2 frames have no flags.
	pub fn from_bits(bits: u16, version: Version) -> Self {
		match version.major {
			3 => Self {
				compression: bits & 0x0080 != 0,
				encryption: bits & 0x0040 != 0,
				grouping_identity: bits & 0x0020 != 0,
				unsynchronisation: false,
				data_length_indicator: false,
			},
			4 => Self {
				grouping_identity: bits & 0x0040 != 0,
				compression: bits & 0x0008 != 0,
				encryption: bits & 0x0004 != 0,
				unsynchronisation: bits & 0x0002 != 0,
				data_length_indicator: bits & 0x0001 != 0,
			},
			_ => Self::default(),
		}
	}
}

/// Frame header of a v2.3 or v2.4 tag, as it is on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct RawFrameHeader {
	/// Frame identifier.
	pub id: [u8; 4],

	/// Body size: synchsafe in v2.4, plain in v2.3.
	pub size: [u8; 4],

	/// Status and format flags.
	pub flags: u16,
}

impl RawFrameHeader {
	/// Body size, or `None` if it should be synchsafe and isn't.
	pub fn body_size(&self, version: Version) -> Option<u32> {
		if version.has_synchsafe_frames() {
			synchsafe::is_valid(self.size).then(|| synchsafe::decode(self.size))
		} else {
			Some(u32::from_be_bytes(self.size))
		}
	}
}

/// Frame header of a v2.2 tag, as it is on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct RawLegacyFrameHeader {
	/// Three-character frame identifier.
	pub id: [u8; 3],

	/// Body size, 24-bit big-endian.
	pub size: [u8; 3],
}

impl RawLegacyFrameHeader {
	/// Body size.
	pub fn body_size(&self) -> u32 {
		let [a, b, c] = self.size;
		u32::from_be_bytes([0, a, b, c])
	}
}

/// Encode a v2.3 frame header, with no flags set.
pub fn encode_frame_header(id: FrameId, body_size: usize) -> crate::error::Result<Vec<u8>> {
	let size = u32::try_from(body_size).map_err(|_| ErrorKind::TagTooLarge(body_size))?;
	RawFrameHeader {
		id: id.0,
		size: size.to_be_bytes(),
		flags: 0,
	}
	.to_bytes()
	.map_err(|err| SimpleError::from_deku(err).into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identifiers() {
		assert_eq!(FrameId::new("TIT2").map(|id| id.to_string()), Some("TIT2".into()));
		assert_eq!(FrameId::new("tit2"), None);
		assert_eq!(FrameId::new("TT2"), None);
		assert_eq!(FrameId::new("TIT2 "), None);
		assert!(FrameId::is_valid(b"TT2"));
		assert!(!FrameId::is_valid(&[0, 0, 0, 0]));
	}

	#[test]
	fn frame_headers() {
		let header = encode_frame_header(FrameId::new("TIT2").unwrap(), 300).unwrap();
		assert_eq!(header, b"TIT2\x00\x00\x01\x2C\x00\x00");

		let (_, raw) = RawFrameHeader::from_bytes((header.as_slice(), 0)).unwrap();
		assert_eq!(raw.body_size(Version { major: 3, revision: 0 }), Some(300));
		assert_eq!(raw.body_size(Version { major: 4, revision: 0 }), Some(172));

		let bad = RawFrameHeader {
			size: [0, 0, 0, 0x80],
			..raw
		};
		assert_eq!(bad.body_size(Version { major: 4, revision: 0 }), None);

		let (_, legacy) =
			RawLegacyFrameHeader::from_bytes((&b"TT2\x01\x00\x02"[..], 0)).unwrap();
		assert_eq!(&legacy.id, b"TT2");
		assert_eq!(legacy.body_size(), 0x010002);
	}

	#[test]
	fn flag_layouts() {
		let v3 = Version { major: 3, revision: 0 };
		let v4 = Version { major: 4, revision: 0 };

		assert!(FrameFlags::from_bits(0x0080, v3).compression);
		assert!(!FrameFlags::from_bits(0x0080, v4).compression);
		assert!(FrameFlags::from_bits(0x0008, v4).compression);
		assert!(FrameFlags::from_bits(0x0040, v3).encryption);
		assert!(FrameFlags::from_bits(0x0004, v4).encryption);
		assert!(FrameFlags::from_bits(0x0040, v4).grouping_identity);
		assert_eq!(
			FrameFlags::from_bits(0x0003, v4),
			FrameFlags {
				unsynchronisation: true,
				data_length_indicator: true,
				..Default::default()
			}
		);
		assert_eq!(
			FrameFlags::from_bits(0xFFFF, Version { major: 2, revision: 0 }),
			FrameFlags::default()
		);
	}
}
