//! Frame table: which frames exist, what they're called, and how they merge.
//!
//! The codec never hardcodes frame knowledge; it asks a [`FrameSpecs`] implementation.
//! [`StandardFrames`] covers the common ID3v2.3 and ID3v2.4 frames, and any slice of
//! [`FrameSpec`]s can stand in for it.

use crate::{format::FrameId, value::FrameKind};

/// Field of a multi-valued frame's records that identifies a record when merging.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CompareKey {
	/// The description (`TXXX`, `WXXX`, `COMM`, `USLT`).
	Description,
	/// The picture type (`APIC`).
	PictureType,
	/// The owner identifier (`PRIV`, `UFID`).
	Owner,
	/// The email (`POPM`).
	Email,
}

/// What the codec knows about a frame identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FrameSpec {
	/// Four-character identifier.
	pub id: FrameId,

	/// Three-character ID3v2.2 identifier, if the frame existed then.
	pub legacy_id: Option<&'static str>,

	/// Human-readable name.
	pub alias: &'static str,

	/// Body layout.
	pub kind: FrameKind,

	/// Whether a tag can hold several of these frames.
	pub multiple: bool,

	/// Which field identifies a record when merging; only for multi-valued frames.
	pub update_compare_key: Option<CompareKey>,
}

impl FrameSpec {
	/// A frame that appears at most once per tag.
	pub const fn single(
		id: [u8; 4],
		legacy_id: Option<&'static str>,
		alias: &'static str,
		kind: FrameKind,
	) -> Self {
		Self {
			id: FrameId::from_static(id),
			legacy_id,
			alias,
			kind,
			multiple: false,
			update_compare_key: None,
		}
	}

	/// A frame that can appear several times per tag.
	pub const fn multiple(
		id: [u8; 4],
		legacy_id: Option<&'static str>,
		alias: &'static str,
		kind: FrameKind,
		update_compare_key: Option<CompareKey>,
	) -> Self {
		Self {
			id: FrameId::from_static(id),
			legacy_id,
			alias,
			kind,
			multiple: true,
			update_compare_key,
		}
	}
}

/// Lookup service for frame metadata.
pub trait FrameSpecs {
	/// Look up a frame by its four-character identifier.
	fn by_id(&self, id: FrameId) -> Option<&FrameSpec>;

	/// Look up a frame by its human-readable name.
	fn by_alias(&self, alias: &str) -> Option<&FrameSpec>;

	/// Look up a frame by its ID3v2.2 identifier.
	fn by_legacy_id(&self, id: &str) -> Option<&FrameSpec>;

	/// Resolve the name of a tag given for writing, which may be an alias or an identifier.
	fn resolve(&self, name: &str) -> Option<&FrameSpec> {
		self.by_alias(name)
			.or_else(|| FrameId::new(name).and_then(|id| self.by_id(id)))
	}
}

impl FrameSpecs for [FrameSpec] {
	fn by_id(&self, id: FrameId) -> Option<&FrameSpec> {
		self.iter().find(|spec| spec.id == id)
	}

	fn by_alias(&self, alias: &str) -> Option<&FrameSpec> {
		self.iter().find(|spec| spec.alias == alias)
	}

	fn by_legacy_id(&self, id: &str) -> Option<&FrameSpec> {
		self.iter().find(|spec| spec.legacy_id == Some(id))
	}
}

impl<T: FrameSpecs + ?Sized> FrameSpecs for &T {
	fn by_id(&self, id: FrameId) -> Option<&FrameSpec> {
		(**self).by_id(id)
	}

	fn by_alias(&self, alias: &str) -> Option<&FrameSpec> {
		(**self).by_alias(alias)
	}

	fn by_legacy_id(&self, id: &str) -> Option<&FrameSpec> {
		(**self).by_legacy_id(id)
	}
}

/// The built-in frame table.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFrames;

impl StandardFrames {
	/// All entries of the built-in table.
	pub fn all(&self) -> &'static [FrameSpec] {
		STANDARD_FRAMES
	}
}

impl FrameSpecs for StandardFrames {
	fn by_id(&self, id: FrameId) -> Option<&FrameSpec> {
		STANDARD_FRAMES.by_id(id)
	}

	fn by_alias(&self, alias: &str) -> Option<&FrameSpec> {
		STANDARD_FRAMES.by_alias(alias)
	}

	fn by_legacy_id(&self, id: &str) -> Option<&FrameSpec> {
		STANDARD_FRAMES.by_legacy_id(id)
	}
}

use CompareKey::*;
use FrameKind::*;

#[rustfmt::skip]
static STANDARD_FRAMES: &[FrameSpec] = &[
	// text
	FrameSpec::single(*b"TALB", Some("TAL"), "album", Text),
	FrameSpec::single(*b"TBPM", Some("TBP"), "bpm", Text),
	FrameSpec::single(*b"TCOM", Some("TCM"), "composer", Text),
	FrameSpec::single(*b"TCON", Some("TCO"), "genre", Text),
	FrameSpec::single(*b"TCOP", Some("TCR"), "copyright", Text),
	FrameSpec::single(*b"TDAT", Some("TDA"), "date", Text),
	FrameSpec::single(*b"TDLY", Some("TDY"), "playlistDelay", Text),
	FrameSpec::single(*b"TENC", Some("TEN"), "encodedBy", Text),
	FrameSpec::single(*b"TEXT", Some("TXT"), "textWriter", Text),
	FrameSpec::single(*b"TFLT", Some("TFT"), "fileType", Text),
	FrameSpec::single(*b"TIME", Some("TIM"), "time", Text),
	FrameSpec::single(*b"TIT1", Some("TT1"), "contentGroup", Text),
	FrameSpec::single(*b"TIT2", Some("TT2"), "title", Text),
	FrameSpec::single(*b"TIT3", Some("TT3"), "subtitle", Text),
	FrameSpec::single(*b"TKEY", Some("TKE"), "initialKey", Text),
	FrameSpec::single(*b"TLAN", Some("TLA"), "language", Text),
	FrameSpec::single(*b"TLEN", Some("TLE"), "length", Text),
	FrameSpec::single(*b"TMED", Some("TMT"), "mediaType", Text),
	FrameSpec::single(*b"TOAL", Some("TOT"), "originalTitle", Text),
	FrameSpec::single(*b"TOFN", Some("TOF"), "originalFilename", Text),
	FrameSpec::single(*b"TOLY", Some("TOL"), "originalTextwriter", Text),
	FrameSpec::single(*b"TOPE", Some("TOA"), "originalArtist", Text),
	FrameSpec::single(*b"TORY", Some("TOR"), "originalYear", Text),
	FrameSpec::single(*b"TOWN", None,        "fileOwner", Text),
	FrameSpec::single(*b"TPE1", Some("TP1"), "artist", Text),
	FrameSpec::single(*b"TPE2", Some("TP2"), "performerInfo", Text),
	FrameSpec::single(*b"TPE3", Some("TP3"), "conductor", Text),
	FrameSpec::single(*b"TPE4", Some("TP4"), "remixArtist", Text),
	FrameSpec::single(*b"TPOS", Some("TPA"), "partOfSet", Text),
	FrameSpec::single(*b"TPUB", Some("TPB"), "publisher", Text),
	FrameSpec::single(*b"TRCK", Some("TRK"), "trackNumber", Text),
	FrameSpec::single(*b"TRDA", Some("TRD"), "recordingDates", Text),
	FrameSpec::single(*b"TRSN", None,        "internetRadioName", Text),
	FrameSpec::single(*b"TRSO", None,        "internetRadioOwner", Text),
	FrameSpec::single(*b"TSIZ", Some("TSI"), "size", Text),
	FrameSpec::single(*b"TSRC", Some("TRC"), "ISRC", Text),
	FrameSpec::single(*b"TSSE", Some("TSS"), "encodingTechnology", Text),
	FrameSpec::single(*b"TYER", Some("TYE"), "year", Text),
	// text, v2.4
	FrameSpec::single(*b"TDEN", None,        "encodingTime", Text),
	FrameSpec::single(*b"TDOR", None,        "originalReleaseTime", Text),
	FrameSpec::single(*b"TDRC", None,        "recordingTime", Text),
	FrameSpec::single(*b"TDRL", None,        "releaseTime", Text),
	FrameSpec::single(*b"TDTG", None,        "taggingTime", Text),
	FrameSpec::single(*b"TIPL", None,        "involvedPeopleList", Text),
	FrameSpec::single(*b"TMCL", None,        "musicianCreditsList", Text),
	FrameSpec::single(*b"TMOO", None,        "mood", Text),
	FrameSpec::single(*b"TPRO", None,        "producedNotice", Text),
	FrameSpec::single(*b"TSOA", None,        "albumSortOrder", Text),
	FrameSpec::single(*b"TSOP", None,        "performerSortOrder", Text),
	FrameSpec::single(*b"TSOT", None,        "titleSortOrder", Text),
	FrameSpec::single(*b"TSST", None,        "setSubtitle", Text),
	// links
	FrameSpec::multiple(*b"WCOM", Some("WCM"), "commercialUrl", Url, None),
	FrameSpec::single(*b"WCOP", Some("WCP"), "copyrightUrl", Url),
	FrameSpec::single(*b"WOAF", Some("WAF"), "fileUrl", Url),
	FrameSpec::multiple(*b"WOAR", Some("WAR"), "artistUrl", Url, None),
	FrameSpec::single(*b"WOAS", Some("WAS"), "audioSourceUrl", Url),
	FrameSpec::single(*b"WORS", None,        "radioStationUrl", Url),
	FrameSpec::single(*b"WPAY", None,        "paymentUrl", Url),
	FrameSpec::single(*b"WPUB", Some("WPB"), "publisherUrl", Url),
	// structured
	FrameSpec::multiple(*b"TXXX", Some("TXX"), "userDefinedText", UserText, Some(Description)),
	FrameSpec::multiple(*b"WXXX", Some("WXX"), "userDefinedUrl", UserUrl, Some(Description)),
	FrameSpec::multiple(*b"COMM", Some("COM"), "comment", Comment, Some(Description)),
	FrameSpec::multiple(*b"USLT", Some("ULT"), "unsynchronisedLyrics", Comment, Some(Description)),
	FrameSpec::multiple(*b"APIC", Some("PIC"), "image", Picture, Some(PictureType)),
	FrameSpec::multiple(*b"PRIV", None,        "private", Private, Some(Owner)),
	FrameSpec::multiple(*b"UFID", Some("UFI"), "uniqueFileIdentifier", UniqueFileId, Some(Owner)),
	FrameSpec::multiple(*b"POPM", Some("POP"), "popularimeter", Popularimeter, Some(Email)),
];
