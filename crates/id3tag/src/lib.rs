//! ID3v2 tags: find, decode, encode, and merge them in memory.
//!
//! This reads ID3v2.2, ID3v2.3, and ID3v2.4 tags, and writes ID3v2.3 tags. Everything works on
//! byte buffers; reading and writing files is left to the caller.
//!
//! ```
//! use id3tag::{DecodeOptions, WriteTags};
//!
//! let mut tags = WriteTags::new();
//! tags.insert("title".into(), "Song");
//! tags.insert("album".into(), "Album");
//!
//! let tag = id3tag::encode(&tags)?;
//! let decoded = id3tag::decode(&tag, &DecodeOptions::new())?.expect("just encoded a tag");
//! assert_eq!(decoded.named, tags);
//! # Ok::<(), id3tag::Error>(())
//! ```
//!
//! Frame knowledge (identifiers, names, body layouts, merge rules) lives in a table implementing
//! [`FrameSpecs`]. The free functions use the built-in [`StandardFrames`]; use a [`Codec`] to
//! provide another.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::{
	codec::Codec,
	encode::{embed, strip},
	error::{Error, ErrorKind, Result},
	locate::locate,
	table::{CompareKey, FrameSpec, FrameSpecs, StandardFrames},
	tags::{DecodeOptions, RawTags, TagMap, TagValue, Tags, WriteTags},
	value::{FrameKind, FrameValue},
};

mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
mod locate;
mod merge;
pub mod table;
pub mod tags;
pub mod value;

/// Decode the first tag found in `buffer`.
///
/// Returns `Ok(None)` if there's no tag. See [`Codec::decode`].
pub fn decode(buffer: &[u8], options: &DecodeOptions) -> Result<Option<Tags>> {
	Codec::standard().decode(buffer, options)
}

/// Encode tags as a complete tag. See [`Codec::encode`].
pub fn encode(tags: &WriteTags) -> Result<Vec<u8>> {
	Codec::standard().encode(tags)
}

/// Merge new tags into existing raw tags. See [`Codec::merge`].
pub fn merge(tags: &WriteTags, current: RawTags) -> RawTags {
	Codec::standard().merge(tags, current)
}

/// Replace the tag in `buffer`, or prepend one. See [`Codec::write`].
pub fn write(tags: &WriteTags, buffer: &[u8]) -> Result<Vec<u8>> {
	Codec::standard().write(tags, buffer)
}

/// Merge tags into the tag in `buffer`. See [`Codec::update`].
pub fn update(tags: &WriteTags, buffer: &[u8]) -> Result<Vec<u8>> {
	Codec::standard().update(tags, buffer)
}
