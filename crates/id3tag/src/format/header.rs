//! ID3v2 tag header.
//!
//! The header is ten bytes: the `ID3` identifier, major version, revision, a flag byte, and the
//! synchsafe size of everything that follows the header (extended header, frames, and padding,
//! but not a v2.4 footer).
//!
//! [`RawHeader`] is the wire layout, read and written with deku. [`TagHeader`] is the checked
//! version callers work with, obtained through [`decode_header`].

use deku::prelude::*;
use tracing::{debug, instrument, trace};

use crate::error::{ErrorKind, SimpleError, SourceError};

use super::{
	constants::{HEADER_LENGTH, ID3_MAGIC, MAX_SYNCHSAFE, WRITE_MAJOR_VERSION},
	synchsafe, take4,
};

/// Tag header as it is on the wire.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct RawHeader {
	/// Magic identifier. Asserted to match [`ID3_MAGIC`].
	#[deku(count = "3", assert = "*magic == ID3_MAGIC")]
	pub magic: Vec<u8>,

	/// Major version.
	#[deku(bytes = "1")]
	pub major: u8,

	/// Revision.
	#[deku(bytes = "1")]
	pub revision: u8,

	/// Flag bit 7: unsynchronisation applied.
	#[deku(bits = "1")]
	pub unsynchronisation: bool,

	/// Flag bit 6: extended header present (compression, in v2.2).
	#[deku(bits = "1")]
	pub extended_header: bool,

	/// Flag bit 5: experimental tag.
	#[deku(bits = "1")]
	pub experimental: bool,

	/// Flag bit 4: footer present (v2.4 only).
	#[deku(bits = "1")]
	pub footer: bool,

	/// Remaining flag bits, which should be zero.
	#[deku(bits = "4")]
	pub reserved: u8,

	/// Synchsafe size of the tag body.
	pub size: [u8; 4],
}

/// Tag version, `2.major.revision`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Version {
	/// Major version: 2, 3, or 4.
	pub major: u8,

	/// Revision, in practice always 0.
	pub revision: u8,
}

impl Version {
	/// Version written by the encoder.
	pub const WRITE: Self = Self {
		major: WRITE_MAJOR_VERSION,
		revision: 0,
	};

	/// ID3v2.2, with three-character frame identifiers and six-byte frame headers.
	pub fn is_legacy(self) -> bool {
		self.major == 2
	}

	/// Whether frame sizes are synchsafe (v2.4) rather than plain big-endian.
	pub fn has_synchsafe_frames(self) -> bool {
		self.major >= 4
	}
}

/// Tag-wide flags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[allow(clippy::struct_excessive_bools)] // CLIPPY: these are flags
pub struct TagFlags {
	/// The tag body (v2.2, v2.3) or every frame (v2.4) is unsynchronised.
	pub unsynchronisation: bool,

	/// An extended header sits between the header and the frames.
	pub extended_header: bool,

	/// The tag is experimental.
	pub experimental: bool,

	/// A footer follows the tag body. Only meaningful in v2.4.
	pub footer: bool,
}

/// Checked tag header.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TagHeader {
	/// Tag version.
	pub version: Version,

	/// Tag flags.
	pub flags: TagFlags,

	/// Length in bytes of everything after the 10-byte header, excluding any footer.
	pub size: u32,
}

impl TagHeader {
	/// Length of the header and body together.
	pub fn tag_length(&self) -> usize {
		HEADER_LENGTH + self.size as usize
	}

	/// Length of the extended header at the start of `body`, or zero if there isn't one.
	///
	/// In v2.3 the extended header starts with a big-endian length that doesn't count its own
	/// four bytes; in v2.4 it starts with a synchsafe length that does. v2.2 has no extended
	/// header.
	#[instrument(level = "trace", skip(body))]
	pub fn extended_header_length(&self, body: &[u8]) -> crate::error::Result<usize> {
		if !self.flags.extended_header || self.version.is_legacy() {
			return Ok(0);
		}

		let invalid = || {
			SourceError::from_source(ErrorKind::InvalidSize { at: HEADER_LENGTH }, body, 0, 8)
		};

		let field = take4(body, 0).ok_or_else(invalid)?;
		let length = if self.version.has_synchsafe_frames() {
			if !synchsafe::is_valid(field) {
				return Err(invalid().into());
			}
			synchsafe::decode(field) as usize
		} else {
			4 + u32::from_be_bytes(field) as usize
		};

		trace!(%length, "extended header");
		if length > body.len() {
			return Err(invalid()
				.with_message(format!(
					"extended header of {length} bytes overruns the {} byte tag body",
					body.len()
				))
				.into());
		}

		Ok(length)
	}
}

/// Decode a tag header from the start of `buffer`.
///
/// The buffer must start at the `ID3` identifier, use [`locate`](crate::locate) to find it.
#[instrument(level = "debug", skip(buffer))]
pub fn decode_header(buffer: &[u8]) -> crate::error::Result<TagHeader> {
	let (_, raw) = RawHeader::from_bytes((buffer, 0)).map_err(SimpleError::from_deku)?;
	trace!(?raw, "read raw tag header");

	if !(2..=4).contains(&raw.major) || raw.revision == 0xFF {
		return Err(ErrorKind::UnsupportedVersion {
			major: raw.major,
			revision: raw.revision,
		}
		.into());
	}

	if !synchsafe::is_valid(raw.size) {
		return Err(SourceError::from_source(
			ErrorKind::InvalidSize { at: 6 },
			buffer,
			6,
			HEADER_LENGTH,
		)
		.into());
	}

	let header = TagHeader {
		version: Version {
			major: raw.major,
			revision: raw.revision,
		},
		flags: TagFlags {
			unsynchronisation: raw.unsynchronisation,
			extended_header: raw.extended_header,
			experimental: raw.experimental,
			footer: raw.major == 4 && raw.footer,
		},
		size: synchsafe::decode(raw.size),
	};
	debug!(?header, "read tag header");
	Ok(header)
}

/// Encode a tag header for a body of `body_size` bytes.
///
/// Always produces a v2.3.0 header with no flags set, regardless of where the body came from.
pub fn encode_header(body_size: usize) -> crate::error::Result<Vec<u8>> {
	let size = u32::try_from(body_size)
		.ok()
		.filter(|size| *size <= MAX_SYNCHSAFE)
		.ok_or(ErrorKind::TagTooLarge(body_size))?;

	RawHeader {
		magic: ID3_MAGIC.to_vec(),
		major: Version::WRITE.major,
		revision: Version::WRITE.revision,
		unsynchronisation: false,
		extended_header: false,
		experimental: false,
		footer: false,
		reserved: 0,
		size: synchsafe::encode(size),
	}
	.to_bytes()
	.map_err(|err| SimpleError::from_deku(err).into())
}
