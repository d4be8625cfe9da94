//! Encoding tags.
//!
//! The encoder always writes ID3v2.3: a v2.3 header with no flags, then v2.3 frame headers with no
//! flags, then frame bodies. Nothing is compressed or unsynchronised, and there is no padding.

use tracing::{debug, instrument, trace, warn};

use crate::{
	codec::Codec,
	error::Result,
	format::encode_frame_header,
	table::FrameSpecs,
	tags::{DecodeOptions, RawTags, WriteTags},
};

#[doc(inline)]
pub use self::assemble::{embed, strip};

mod assemble;

impl<S: FrameSpecs> Codec<S> {
	/// Rename human-readable tag names to frame identifiers.
	///
	/// Names can also be frame identifiers already. Names the frame table doesn't know are left
	/// out.
	pub fn translate(&self, tags: &WriteTags) -> RawTags {
		tags.iter()
			.filter_map(|(name, value)| {
				let Some(spec) = self.specs.resolve(name) else {
					warn!(%name, "unknown tag name, skipping");
					return None;
				};
				Some((spec.id, value.clone()))
			})
			.collect()
	}

	/// Encode tags as a complete tag, header included.
	#[instrument(level = "debug", skip(self, tags), fields(tags = tags.len()))]
	pub fn encode(&self, tags: &WriteTags) -> Result<Vec<u8>> {
		self.encode_raw(&self.translate(tags))
	}

	/// Encode tags keyed by frame identifier as a complete tag, header included.
	#[instrument(level = "debug", skip(self, raw), fields(tags = raw.len()))]
	pub fn encode_raw(&self, raw: &RawTags) -> Result<Vec<u8>> {
		embed(&self.encode_frames(raw)?)
	}

	/// Encode tags keyed by frame identifier as frames, without a tag header.
	///
	/// Frames are written in map order, and the values of multi-valued frames in list order. A
	/// single-valued frame given several values only gets the first. Values that don't fit their
	/// frame, like a picture for a title, are left out.
	pub fn encode_frames(&self, raw: &RawTags) -> Result<Vec<u8>> {
		let mut frames = Vec::new();
		for (id, value) in raw.iter() {
			let Some(spec) = self.specs.by_id(*id) else {
				warn!(%id, "unknown frame, skipping");
				continue;
			};

			let values = if spec.multiple {
				value.values()
			} else {
				if value.values().len() > 1 {
					warn!(%id, "several values for a single-valued frame, writing the first");
				}
				value.values().get(..1).unwrap_or_default()
			};

			for value in values {
				let Some(body) = value.encode_as(spec.kind) else {
					warn!(%id, kind = ?spec.kind, %value, "value doesn't fit frame, skipping");
					continue;
				};

				trace!(%id, size = %body.len(), "write frame");
				frames.extend(encode_frame_header(*id, body.len())?);
				frames.extend(body);
			}
		}

		debug!(bytes = %frames.len(), "encoded frames");
		Ok(frames)
	}

	/// Replace the tag in `buffer` with a new one holding `tags`.
	///
	/// If `buffer` has no tag, the new tag is prepended. The existing tag's content is discarded,
	/// see [`update`](Self::update) to keep it.
	#[instrument(level = "debug", skip(self, tags, buffer), fields(len = buffer.len()))]
	pub fn write(&self, tags: &WriteTags, buffer: &[u8]) -> Result<Vec<u8>> {
		let tag = self.encode(tags)?;
		replace_tag(tag, buffer)
	}

	/// Merge `tags` into the tag in `buffer`, and replace it with the result.
	///
	/// See [`merge`](Self::merge) for how values combine. If `buffer` has no tag, this is the same
	/// as [`write`](Self::write).
	#[instrument(level = "debug", skip(self, tags, buffer), fields(len = buffer.len()))]
	pub fn update(&self, tags: &WriteTags, buffer: &[u8]) -> Result<Vec<u8>> {
		let current = self
			.decode_raw(buffer, &DecodeOptions::new())?
			.unwrap_or_default();
		let merged = self.merge(tags, current);
		let tag = self.encode_raw(&merged)?;
		replace_tag(tag, buffer)
	}
}

/// Put `tag` at the start of `buffer`, in place of the tag it has, if any.
fn replace_tag(mut tag: Vec<u8>, buffer: &[u8]) -> Result<Vec<u8>> {
	match strip(buffer)? {
		Some(rest) => tag.extend(rest),
		None => tag.extend_from_slice(buffer),
	}
	Ok(tag)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use crate::{
		format::FrameId,
		tags::TagValue,
		value::{Picture, UserText},
	};

	use super::*;

	fn id(id: &str) -> FrameId {
		FrameId::new(id).unwrap()
	}

	#[test]
	fn translate_by_alias_or_id() {
		let codec = Codec::standard();
		let tags: WriteTags = [("title", "a"), ("TALB", "b"), ("nope", "c")]
			.into_iter()
			.map(|(k, v)| (k.to_string(), v))
			.collect();
		let raw = codec.translate(&tags);
		assert_eq!(raw.keys().copied().collect::<Vec<_>>(), [id("TIT2"), id("TALB")]);
	}

	#[test]
	fn encodes_v3_frames_in_order() {
		let codec = Codec::standard();
		let raw: RawTags = [(id("TIT2"), "a"), (id("TALB"), "b")].into_iter().collect();
		let frames = codec.encode_frames(&raw).unwrap();
		assert_eq!(
			frames,
			b"TIT2\x00\x00\x00\x05\x00\x00\x01\xFF\xFEa\x00TALB\x00\x00\x00\x05\x00\x00\x01\xFF\xFEb\x00"
		);
	}

	#[test]
	fn multiple_values_become_multiple_frames() {
		let codec = Codec::standard();
		let mut raw = RawTags::new();
		raw.insert(
			id("TXXX"),
			vec![UserText::new("a", "1"), UserText::new("b", "2")],
		);
		raw.insert(id("TIT2"), vec!["first", "second"]);

		let frames = codec.encode_frames(&raw).unwrap();
		let count = |needle: &[u8]| frames.windows(4).filter(|w| *w == needle).count();
		assert_eq!(count(&b"TXXX"[..]), 2);
		assert_eq!(count(&b"TIT2"[..]), 1);
	}

	#[test]
	fn skips_mismatched_values() {
		let codec = Codec::standard();
		let mut raw = RawTags::new();
		raw.insert(id("TIT2"), TagValue::from(Picture::default()));
		assert_eq!(codec.encode_frames(&raw).unwrap(), b"");
	}

	#[test]
	fn write_replaces_existing_tag() {
		let codec = Codec::standard();
		let mut buffer = codec
			.encode(&[("title".to_string(), "old")].into_iter().collect())
			.unwrap();
		buffer.extend(b"audio");

		let written = codec
			.write(&[("album".to_string(), "new")].into_iter().collect(), &buffer)
			.unwrap();
		assert!(written.ends_with(b"audio"));

		let tags = codec.decode(&written, &DecodeOptions::new()).unwrap().unwrap();
		assert_eq!(tags.named.keys().collect::<Vec<_>>(), ["album"]);

		let prepended = codec
			.write(&[("album".to_string(), "new")].into_iter().collect(), b"audio")
			.unwrap();
		assert_eq!(prepended, written);
	}
}
