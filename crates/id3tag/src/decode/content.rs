use std::{borrow::Cow, io::Read};

use flate2::read::ZlibDecoder;
use tracing::{instrument, trace};

use crate::{
	codec::Codec,
	error::FrameError,
	format::{synchsafe, FrameId, TagHeader, Version, MAX_SYNCHSAFE},
	table::{FrameSpec, FrameSpecs},
	tags::DecodeOptions,
	value::FrameValue,
};

use super::{unsynch::resync, Frame};

impl<'tag> Frame<'tag> {
	/// The frame body with its format flags undone.
	///
	/// Strips the extra bytes flags add before the body (group identifier, decompressed size, data
	/// length indicator), reverses unsynchronisation, and inflates compressed bodies. Borrows from
	/// the tag unless one of the last two had to happen.
	///
	/// `tag_unsynchronised` is the tag header's flag, which in v2.4 applies to every frame.
	pub(crate) fn content(
		&self,
		version: Version,
		tag_unsynchronised: bool,
	) -> Result<Cow<'tag, [u8]>, FrameError> {
		let flags = self.flags;
		if flags.encryption {
			return Err(FrameError::Encrypted);
		}

		let mut body = self.body;
		let mut inflated_length = None;
		match version.major {
			3 => {
				if flags.compression {
					let (size, rest) = body
						.split_first_chunk::<4>()
						.ok_or(FrameError::Truncated("decompressed size"))?;
					inflated_length = Some(u32::from_be_bytes(*size));
					body = rest;
				}
				if flags.grouping_identity {
					body = body.get(1..).ok_or(FrameError::Truncated("group identifier"))?;
				}
			}
			4 => {
				if flags.grouping_identity {
					body = body.get(1..).ok_or(FrameError::Truncated("group identifier"))?;
				}
				if flags.data_length_indicator {
					let (size, rest) = body
						.split_first_chunk::<4>()
						.ok_or(FrameError::Truncated("data length indicator"))?;
					inflated_length = Some(synchsafe::decode(*size));
					body = rest;
				}
			}
			_ => {}
		}

		let mut content = Cow::Borrowed(body);
		if version.has_synchsafe_frames() && (flags.unsynchronisation || tag_unsynchronised) {
			trace!(id = %self.id, "resynchronise frame");
			content = Cow::Owned(resync(&content));
		}

		if flags.compression {
			let bound = inflated_length.map_or(MAX_SYNCHSAFE, |length| length.min(MAX_SYNCHSAFE));
			trace!(id = %self.id, compressed = %content.len(), %bound, "inflate frame");

			let mut inflated = Vec::new();
			ZlibDecoder::new(&*content)
				.take(u64::from(bound))
				.read_to_end(&mut inflated)
				.map_err(FrameError::Inflate)?;
			content = Cow::Owned(inflated);
		}

		Ok(content)
	}
}

impl<S: FrameSpecs> Codec<S> {
	/// Look up a frame in the frame table, accepting v2.2 identifiers in v2.2 tags.
	pub(crate) fn frame_spec(&self, id: &str, version: Version) -> Option<&FrameSpec> {
		if version.is_legacy() {
			self.specs.by_legacy_id(id)
		} else {
			FrameId::new(id).and_then(|id| self.specs.by_id(id))
		}
	}

	/// Decode one frame.
	///
	/// Returns `Ok(None)` for frames the options exclude.
	#[instrument(level = "trace", skip(self, frame, options), fields(id = %frame.id))]
	pub(crate) fn read_frame(
		&self,
		frame: &Frame<'_>,
		header: &TagHeader,
		options: &DecodeOptions,
	) -> Result<Option<(FrameSpec, FrameValue)>, FrameError> {
		let spec = *self
			.frame_spec(frame.id, header.version)
			.ok_or_else(|| FrameError::Unknown(frame.id.into()))?;
		if !options.wants(spec.id) {
			return Ok(None);
		}

		let content = frame.content(header.version, header.flags.unsynchronisation)?;
		let value = spec.kind.decode(&content, header.version)?;
		Ok(Some((spec, value)))
	}
}
