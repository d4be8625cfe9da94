use deku::DekuContainerRead;
use tracing::{debug, trace, warn};

use crate::format::{
	FrameFlags, FrameId, RawFrameHeader, RawLegacyFrameHeader, Version, FRAME_HEADER_LENGTH,
	LEGACY_FRAME_HEADER_LENGTH,
};

/// A frame as found in a tag body.
///
/// The body is a view into the tag: nothing has been decompressed or resynchronised yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<'tag> {
	/// Frame identifier: four characters, or three in v2.2 tags.
	pub id: &'tag str,

	/// Frame flags.
	pub flags: FrameFlags,

	/// Frame body, possibly clipped to the end of the tag.
	pub body: &'tag [u8],
}

/// Iterator over the frames of a tag body.
///
/// Stops at the first thing that isn't a frame header, which is usually the start of the padding.
/// A frame that claims to be longer than what's left of the tag is clipped, and ends the iteration.
#[derive(Clone, Debug)]
pub struct FrameIterator<'tag> {
	body: &'tag [u8],
	version: Version,
	offset: usize,
	done: bool,
}

impl<'tag> FrameIterator<'tag> {
	/// Iterate over the frames in `body`, which starts after any extended header.
	pub fn new(body: &'tag [u8], version: Version) -> Self {
		Self {
			body,
			version,
			offset: 0,
			done: false,
		}
	}

	/// Offset of the next frame within the body.
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Read a frame header at the current offset: identifier, declared size, flags.
	fn read_header(&self, rest: &'tag [u8]) -> Option<(&'tag [u8], usize, FrameFlags)> {
		if self.version.is_legacy() {
			let (_, header) = RawLegacyFrameHeader::from_bytes((rest, 0)).ok()?;
			Some((&rest[..3], header.body_size() as usize, FrameFlags::default()))
		} else {
			let (_, header) = RawFrameHeader::from_bytes((rest, 0)).ok()?;
			let Some(size) = header.body_size(self.version) else {
				debug!(offset = %self.offset, "frame size is not synchsafe");
				return None;
			};
			Some((
				&rest[..4],
				size as usize,
				FrameFlags::from_bits(header.flags, self.version),
			))
		}
	}
}

impl<'tag> Iterator for FrameIterator<'tag> {
	type Item = Frame<'tag>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let tag = self.body;
		let rest = tag.get(self.offset..).unwrap_or_default();
		let header_length = if self.version.is_legacy() {
			LEGACY_FRAME_HEADER_LENGTH
		} else {
			FRAME_HEADER_LENGTH
		};
		if rest.len() < header_length {
			trace!(offset = %self.offset, "no room left for a frame");
			self.done = true;
			return None;
		}

		let Some((id, size, flags)) = self
			.read_header(rest)
			.filter(|(id, _, _)| FrameId::is_valid(id))
		else {
			debug!(offset = %self.offset, "end of frames");
			self.done = true;
			return None;
		};
		let id = std::str::from_utf8(id).ok()?;

		let available = rest.len() - header_length;
		let body = if size > available {
			warn!(%id, %size, %available, "frame overruns the tag, clipping it and stopping there");
			self.done = true;
			&rest[header_length..]
		} else {
			&rest[header_length..header_length + size]
		};

		trace!(%id, offset = %self.offset, size = %body.len(), ?flags, "frame");
		self.offset += header_length + body.len();
		Some(Frame { id, flags, body })
	}
}
