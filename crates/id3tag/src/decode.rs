//! Decoding tags.
//!
//! Tag-level problems (a size that can't be trusted, an unknown version) are errors. Frame-level
//! problems never are: a frame that can't be decoded is logged and left out, and decoding carries
//! on with the next one.

use std::borrow::Cow;

use tracing::{debug, instrument, trace, warn};

use crate::{
	codec::Codec,
	error::{FrameError, Result},
	format::{decode_header, HEADER_LENGTH},
	locate::locate,
	table::FrameSpecs,
	tags::{DecodeOptions, RawTags, Tags, WriteTags},
};

#[doc(inline)]
pub use self::frame_iterator::{Frame, FrameIterator};

mod content;
mod frame_iterator;
mod unsynch;

impl<S: FrameSpecs> Codec<S> {
	/// Decode the first tag found in `buffer`.
	///
	/// Returns `Ok(None)` if there's no tag, and an error if there's one but its header or size
	/// can't be trusted.
	#[instrument(level = "debug", skip(self, buffer), fields(len = buffer.len()))]
	pub fn decode(&self, buffer: &[u8], options: &DecodeOptions) -> Result<Option<Tags>> {
		let Some(raw) = self.decode_raw(buffer, options)? else {
			return Ok(None);
		};

		let named = if options.wants_named() {
			self.name(&raw)
		} else {
			WriteTags::new()
		};
		let raw = options.wants_raw().then_some(raw);
		Ok(Some(Tags { named, raw }))
	}

	/// Decode the first tag found in `buffer`, keeping the frame identifier map only.
	#[instrument(level = "debug", skip(self, buffer), fields(len = buffer.len()))]
	pub fn decode_raw(&self, buffer: &[u8], options: &DecodeOptions) -> Result<Option<RawTags>> {
		let Some(offset) = locate(buffer) else {
			debug!("no tag found");
			return Ok(None);
		};
		debug!(%offset, "found tag");

		self.read_tag(&buffer[offset..], options).map(Some)
	}

	/// Rename a raw map to human-readable names.
	///
	/// Frames the table doesn't name are left out.
	pub fn name(&self, raw: &RawTags) -> WriteTags {
		raw.iter()
			.filter_map(|(id, value)| {
				let spec = self.specs.by_id(*id)?;
				Some((spec.alias.to_string(), value.clone()))
			})
			.collect()
	}

	/// Read the frames of the tag at the start of `tag`.
	#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
	fn read_tag(&self, tag: &[u8], options: &DecodeOptions) -> Result<RawTags> {
		let header = decode_header(tag)?;

		let mut body = &tag[HEADER_LENGTH..];
		if body.len() < header.size as usize {
			warn!(
				declared = %header.size,
				available = %body.len(),
				"tag is shorter than its header says, reading what's there"
			);
		} else {
			body = &body[..header.size as usize];
		}

		let mut raw = RawTags::new();
		if header.version.is_legacy() && header.flags.extended_header {
			// in v2.2 this flag means the whole tag is compressed, with no defined scheme
			warn!("v2.2 tag is compressed, skipping its frames");
			return Ok(raw);
		}

		let body = if header.flags.unsynchronisation && !header.version.has_synchsafe_frames() {
			trace!("resynchronise tag body");
			Cow::Owned(unsynch::resync(body))
		} else {
			Cow::Borrowed(body)
		};

		let extended = header.extended_header_length(&body)?;
		for frame in FrameIterator::new(&body[extended..], header.version) {
			match self.read_frame(&frame, &header, options) {
				Ok(Some((spec, value))) if spec.multiple => raw.push(spec.id, value),
				Ok(Some((spec, value))) => {
					if raw.insert(spec.id, value).is_some() {
						debug!(id = %spec.id, "repeated single-valued frame, keeping the last");
					}
				}
				Ok(None) => trace!(id = %frame.id, "frame filtered out"),
				Err(err @ FrameError::Unknown(_)) => debug!(%err, "skipping frame"),
				Err(err) => warn!(id = %frame.id, %err, "dropping malformed frame"),
			}
		}

		debug!(frames = %raw.len(), "decoded tag");
		Ok(raw)
	}
}
