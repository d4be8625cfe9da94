//! Decoded frame values.
//!
//! Frame bodies form a closed set of variants, picked by the [`FrameKind`] the frame table assigns
//! to each identifier. Every variant can be decoded from and encoded to a frame body.

use std::fmt;

use crate::{error::FrameError, format::Version, table::CompareKey};

#[doc(inline)]
pub use self::records::{
	Comment, Picture, Popularimeter, Private, UniqueFileId, UserText, UserUrl,
};
#[doc(inline)]
pub use self::text::TextEncoding;

mod records;
mod text;

/// Decoding and encoding of one kind of frame body.
pub(crate) trait FrameBody: Sized {
	/// Decode a frame body, after decompression and unsynchronisation have been undone.
	fn decode(body: &[u8], version: Version) -> Result<Self, FrameError>;

	/// Encode a frame body for writing in a v2.3 tag.
	fn encode(&self) -> Vec<u8>;
}

/// Text frame (`T***` other than `TXXX`): encoding marker, then a single string.
impl FrameBody for String {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (encoding, text) = TextEncoding::split_marker(body)?;
		encoding.decode_trimmed(text)
	}

	fn encode(&self) -> Vec<u8> {
		let mut out = vec![TextEncoding::WRITE as u8];
		out.extend(TextEncoding::WRITE.encode(self, false));
		out
	}
}

/// Link frame (`W***` other than `WXXX`): a Latin-1 URL with no encoding marker.
struct Url(String);

impl FrameBody for Url {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		TextEncoding::Latin1.decode_trimmed(body).map(Self)
	}

	fn encode(&self) -> Vec<u8> {
		TextEncoding::Latin1.encode(&self.0, false)
	}
}

/// Kind of frame body, which decides how it is laid out.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FrameKind {
	/// Plain text.
	Text,
	/// User-defined text (`TXXX`).
	UserText,
	/// Comment-like: `COMM` and `USLT`.
	Comment,
	/// Plain link.
	Url,
	/// User-defined link (`WXXX`).
	UserUrl,
	/// Attached picture (`APIC`).
	Picture,
	/// Private data (`PRIV`).
	Private,
	/// Unique file identifier (`UFID`).
	UniqueFileId,
	/// Popularimeter (`POPM`).
	Popularimeter,
}

impl FrameKind {
	/// Decode a frame body of this kind.
	pub(crate) fn decode(self, body: &[u8], version: Version) -> Result<FrameValue, FrameError> {
		Ok(match self {
			Self::Text => FrameValue::Text(String::decode(body, version)?),
			Self::UserText => FrameValue::UserText(UserText::decode(body, version)?),
			Self::Comment => FrameValue::Comment(Comment::decode(body, version)?),
			Self::Url => FrameValue::Url(Url::decode(body, version)?.0),
			Self::UserUrl => FrameValue::UserUrl(UserUrl::decode(body, version)?),
			Self::Picture => FrameValue::Picture(Picture::decode(body, version)?),
			Self::Private => FrameValue::Private(Private::decode(body, version)?),
			Self::UniqueFileId => FrameValue::UniqueFileId(UniqueFileId::decode(body, version)?),
			Self::Popularimeter => FrameValue::Popularimeter(Popularimeter::decode(body, version)?),
		})
	}
}

/// A decoded frame value.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FrameValue {
	/// Text frame value.
	Text(String),
	/// User-defined text.
	UserText(UserText),
	/// Comment or lyrics.
	Comment(Comment),
	/// Link.
	Url(String),
	/// User-defined link.
	UserUrl(UserUrl),
	/// Picture.
	Picture(Picture),
	/// Private data.
	Private(Private),
	/// Unique file identifier.
	UniqueFileId(UniqueFileId),
	/// Popularimeter.
	Popularimeter(Popularimeter),
}

impl FrameValue {
	/// Encode this value as the body of a frame of the given kind.
	///
	/// Returns `None` if the value doesn't fit the kind, like a picture given for a title.
	pub(crate) fn encode_as(&self, kind: FrameKind) -> Option<Vec<u8>> {
		Some(match (kind, self) {
			(FrameKind::Text, Self::Text(text)) => text.encode(),
			(FrameKind::Url, Self::Url(url) | Self::Text(url)) => Url(url.clone()).encode(),
			(FrameKind::UserText, Self::UserText(text)) => text.encode(),
			(FrameKind::Comment, Self::Comment(comment)) => comment.encode(),
			(FrameKind::UserUrl, Self::UserUrl(url)) => url.encode(),
			(FrameKind::Picture, Self::Picture(picture)) => picture.encode(),
			(FrameKind::Private, Self::Private(private)) => private.encode(),
			(FrameKind::UniqueFileId, Self::UniqueFileId(ufid)) => ufid.encode(),
			(FrameKind::Popularimeter, Self::Popularimeter(popm)) => popm.encode(),
			_ => return None,
		})
	}

	/// The value of this record's field named by a compare key, if it has that field.
	pub fn key(&self, key: CompareKey) -> Option<KeyValue> {
		match (key, self) {
			(CompareKey::Description, Self::UserText(UserText { description, .. }))
			| (CompareKey::Description, Self::Comment(Comment { description, .. }))
			| (CompareKey::Description, Self::UserUrl(UserUrl { description, .. }))
			| (CompareKey::Description, Self::Picture(Picture { description, .. })) => {
				Some(KeyValue::Text(description.clone()))
			}
			(CompareKey::PictureType, Self::Picture(picture)) => {
				Some(KeyValue::Byte(picture.picture_type))
			}
			(CompareKey::Owner, Self::Private(Private { owner, .. }))
			| (CompareKey::Owner, Self::UniqueFileId(UniqueFileId { owner, .. })) => {
				Some(KeyValue::Text(owner.clone()))
			}
			(CompareKey::Email, Self::Popularimeter(popm)) => Some(KeyValue::Text(popm.email.clone())),
			_ => None,
		}
	}
}

/// The value of a record's compare key field.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyValue {
	/// A string field.
	Text(String),
	/// A byte field.
	Byte(u8),
}

impl From<&str> for FrameValue {
	fn from(text: &str) -> Self {
		Self::Text(text.into())
	}
}

impl From<String> for FrameValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

macro_rules! from_record {
	($($record:ident),+) => {
		$(
			impl From<$record> for FrameValue {
				fn from(record: $record) -> Self {
					Self::$record(record)
				}
			}
		)+
	};
}

from_record!(
	UserText,
	Comment,
	UserUrl,
	Picture,
	Private,
	UniqueFileId,
	Popularimeter
);

impl fmt::Display for FrameValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) | Self::Url(text) => f.write_str(text),
			Self::UserText(UserText { description, value }) => write!(f, "{description}: {value}"),
			Self::Comment(Comment {
				language,
				description,
				text,
			}) => write!(f, "[{language}] {description}: {text}"),
			Self::UserUrl(UserUrl { description, url }) => write!(f, "{description}: {url}"),
			Self::Picture(Picture {
				mime,
				picture_type,
				description,
				data,
			}) => write!(
				f,
				"{mime} type {picture_type} {description:?} ({} bytes)",
				data.len()
			),
			Self::Private(Private { owner, data }) => write!(f, "{owner} ({} bytes)", data.len()),
			Self::UniqueFileId(UniqueFileId { owner, identifier }) => {
				write!(f, "{owner}: {}", String::from_utf8_lossy(identifier))
			}
			Self::Popularimeter(Popularimeter {
				email,
				rating,
				counter,
			}) => write!(f, "{email}: rating {rating}, played {counter}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const V3: Version = Version {
		major: 3,
		revision: 0,
	};

	#[test]
	fn text_frame_body() {
		assert_eq!(
			FrameKind::Text.decode(b"\x00title\x00", V3).unwrap(),
			FrameValue::Text("title".into())
		);
		assert_eq!(
			FrameKind::Text.decode(b"\x03\xC3\xA9t\xC3\xA9", V3).unwrap(),
			FrameValue::Text("été".into())
		);
		let body = FrameValue::from("a").encode_as(FrameKind::Text).unwrap();
		assert_eq!(body, [1, 0xFF, 0xFE, b'a', 0]);
		assert!(FrameKind::Text.decode(b"", V3).is_err());
	}

	#[test]
	fn url_frame_body() {
		let body = FrameValue::Url("https://example.com".into())
			.encode_as(FrameKind::Url)
			.unwrap();
		assert_eq!(body, b"https://example.com");
		assert_eq!(
			FrameKind::Url.decode(&body, V3).unwrap(),
			FrameValue::Url("https://example.com".into())
		);
	}

	#[test]
	fn mismatched_kind_does_not_encode() {
		assert_eq!(FrameValue::from("a").encode_as(FrameKind::Picture), None);
		assert_eq!(
			FrameValue::from(UserText::default()).encode_as(FrameKind::Text),
			None
		);
	}

	#[test]
	fn compare_keys() {
		let text = FrameValue::from(UserText {
			description: "abc".into(),
			value: "deg".into(),
		});
		assert_eq!(
			text.key(CompareKey::Description),
			Some(KeyValue::Text("abc".into()))
		);
		assert_eq!(text.key(CompareKey::Owner), None);

		let picture = FrameValue::from(Picture {
			picture_type: 3,
			..Default::default()
		});
		assert_eq!(picture.key(CompareKey::PictureType), Some(KeyValue::Byte(3)));
		assert_eq!(FrameValue::from("plain").key(CompareKey::Description), None);
	}
}
