//! Structured frame bodies.
//!
//! Every structured frame follows the same shape: an optional text encoding marker, then fields
//! that are either null-terminated strings, fixed-size values, or a final field running to the end
//! of the frame. A field that can't be found means the frame is truncated and gets dropped.

use crate::{error::FrameError, format::Version};

use super::{text::TextEncoding, FrameBody};

/// User-defined text (`TXXX`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct UserText {
	/// Description, unique among a tag's `TXXX` frames.
	pub description: String,

	/// Value.
	pub value: String,
}

impl UserText {
	/// New user-defined text.
	pub fn new(description: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			value: value.into(),
		}
	}
}

impl FrameBody for UserText {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (encoding, rest) = TextEncoding::split_marker(body)?;
		let (description, value) = encoding
			.split_terminated(rest)
			.ok_or(FrameError::Truncated("user text description"))?;

		Ok(Self {
			description: encoding.decode(description)?,
			value: encoding.decode_trimmed(value)?,
		})
	}

	fn encode(&self) -> Vec<u8> {
		let encoding = TextEncoding::WRITE;
		let mut out = vec![encoding as u8];
		out.extend(encoding.encode(&self.description, true));
		out.extend(encoding.encode(&self.value, false));
		out
	}
}

/// Comment (`COMM`) or unsynchronised lyrics (`USLT`).
///
/// Both frames share this layout.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Comment {
	/// ISO-639-2 language code, three characters.
	pub language: String,

	/// Short description.
	pub description: String,

	/// The comment or lyrics.
	pub text: String,
}

impl Comment {
	/// Language written when [`language`](Self::language) isn't three characters.
	pub const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";
}

impl FrameBody for Comment {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (encoding, rest) = TextEncoding::split_marker(body)?;
		let (language, rest) = rest
			.split_first_chunk::<3>()
			.ok_or(FrameError::Truncated("language"))?;
		let (description, text) = encoding
			.split_terminated(rest)
			.ok_or(FrameError::Truncated("comment description"))?;

		Ok(Self {
			language: TextEncoding::Latin1.decode(language)?,
			description: encoding.decode(description)?,
			text: encoding.decode_trimmed(text)?,
		})
	}

	fn encode(&self) -> Vec<u8> {
		let encoding = TextEncoding::WRITE;
		let mut out = vec![encoding as u8];
		match <[u8; 3]>::try_from(TextEncoding::Latin1.encode(&self.language, false)) {
			Ok(language) => out.extend(language),
			Err(_) => out.extend(Self::UNKNOWN_LANGUAGE),
		}
		out.extend(encoding.encode(&self.description, true));
		out.extend(encoding.encode(&self.text, false));
		out
	}
}

/// User-defined link (`WXXX`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct UserUrl {
	/// Description, unique among a tag's `WXXX` frames.
	pub description: String,

	/// The URL, always Latin-1.
	pub url: String,
}

impl FrameBody for UserUrl {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (encoding, rest) = TextEncoding::split_marker(body)?;
		let (description, url) = encoding
			.split_terminated(rest)
			.ok_or(FrameError::Truncated("link description"))?;

		Ok(Self {
			description: encoding.decode(description)?,
			url: TextEncoding::Latin1.decode_trimmed(url)?,
		})
	}

	fn encode(&self) -> Vec<u8> {
		let encoding = TextEncoding::WRITE;
		let mut out = vec![encoding as u8];
		out.extend(encoding.encode(&self.description, true));
		out.extend(TextEncoding::Latin1.encode(&self.url, false));
		out
	}
}

/// Attached picture (`APIC`, or `PIC` in v2.2).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Picture {
	/// MIME type of the image.
	pub mime: String,

	/// Picture type: 3 is the front cover, 0 is "other", see the ID3v2 documentation for the
	/// full list.
	pub picture_type: u8,

	/// Description.
	pub description: String,

	/// Image data.
	pub data: Vec<u8>,
}

impl Picture {
	/// Front cover picture type.
	pub const FRONT_COVER: u8 = 3;

	/// MIME type for a v2.2 three-character image format.
	fn mime_from_format(format: &[u8; 3]) -> String {
		match format.to_ascii_uppercase().as_slice() {
			b"JPG" => "image/jpeg".into(),
			b"PNG" => "image/png".into(),
			b"GIF" => "image/gif".into(),
			b"BMP" => "image/bmp".into(),
			other => format!("image/{}", String::from_utf8_lossy(other).to_lowercase()),
		}
	}
}

impl FrameBody for Picture {
	fn decode(body: &[u8], version: Version) -> Result<Self, FrameError> {
		let (encoding, rest) = TextEncoding::split_marker(body)?;
		let (mime, rest) = if version.is_legacy() {
			let (format, rest) = rest
				.split_first_chunk::<3>()
				.ok_or(FrameError::Truncated("image format"))?;
			(Self::mime_from_format(format), rest)
		} else {
			let (mime, rest) = TextEncoding::Latin1
				.split_terminated(rest)
				.ok_or(FrameError::Truncated("MIME type"))?;
			(TextEncoding::Latin1.decode(mime)?, rest)
		};
		let (&picture_type, rest) = rest
			.split_first()
			.ok_or(FrameError::Truncated("picture type"))?;
		let (description, data) = encoding
			.split_terminated(rest)
			.ok_or(FrameError::Truncated("picture description"))?;

		Ok(Self {
			mime,
			picture_type,
			description: encoding.decode(description)?,
			data: data.to_vec(),
		})
	}

	fn encode(&self) -> Vec<u8> {
		let encoding = TextEncoding::WRITE;
		let mut out = vec![encoding as u8];
		out.extend(TextEncoding::Latin1.encode(&self.mime, true));
		out.push(self.picture_type);
		out.extend(encoding.encode(&self.description, true));
		out.extend_from_slice(&self.data);
		out
	}
}

/// Private frame (`PRIV`): opaque data tagged with its owner.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Private {
	/// Owner identifier, usually a URL or email.
	pub owner: String,

	/// Data.
	pub data: Vec<u8>,
}

impl FrameBody for Private {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (owner, data) = split_owner(body)?;
		Ok(Self {
			owner,
			data: data.to_vec(),
		})
	}

	fn encode(&self) -> Vec<u8> {
		let mut out = TextEncoding::Latin1.encode(&self.owner, true);
		out.extend_from_slice(&self.data);
		out
	}
}

/// Unique file identifier (`UFID`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct UniqueFileId {
	/// Owner identifier, the database the identifier belongs to.
	pub owner: String,

	/// Identifier, up to 64 bytes.
	pub identifier: Vec<u8>,
}

impl FrameBody for UniqueFileId {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (owner, identifier) = split_owner(body)?;
		Ok(Self {
			owner,
			identifier: identifier.to_vec(),
		})
	}

	fn encode(&self) -> Vec<u8> {
		let mut out = TextEncoding::Latin1.encode(&self.owner, true);
		out.extend_from_slice(&self.identifier);
		out
	}
}

/// Popularimeter (`POPM`): a rating and play counter per user.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Popularimeter {
	/// Email identifying the user.
	pub email: String,

	/// Rating, 1 (worst) to 255 (best), 0 for unknown.
	pub rating: u8,

	/// Play counter.
	pub counter: u64,
}

impl FrameBody for Popularimeter {
	fn decode(body: &[u8], _version: Version) -> Result<Self, FrameError> {
		let (email, rest) = split_owner(body)?;
		let (&rating, counter) = rest
			.split_first()
			.ok_or(FrameError::Truncated("rating"))?;

		// the counter is as long as it needs to be; keep the low 8 bytes if someone overdid it
		let counter = counter[counter.len().saturating_sub(8)..]
			.iter()
			.fold(0_u64, |n, byte| (n << 8) | u64::from(*byte));

		Ok(Self {
			email,
			rating,
			counter,
		})
	}

	fn encode(&self) -> Vec<u8> {
		let mut out = TextEncoding::Latin1.encode(&self.email, true);
		out.push(self.rating);

		// at least four bytes
		let counter = self.counter.to_be_bytes();
		let skip = (self.counter.leading_zeros() / 8).min(4) as usize;
		out.extend_from_slice(&counter[skip..]);
		out
	}
}

fn split_owner(body: &[u8]) -> Result<(String, &[u8]), FrameError> {
	let (owner, rest) = TextEncoding::Latin1
		.split_terminated(body)
		.ok_or(FrameError::Truncated("owner identifier"))?;
	Ok((TextEncoding::Latin1.decode(owner)?, rest))
}

#[cfg(test)]
mod tests {
	use super::*;

	const V3: Version = Version {
		major: 3,
		revision: 0,
	};

	#[test]
	fn user_text() {
		let text = UserText {
			description: "abc".into(),
			value: "deg".into(),
		};
		assert_eq!(UserText::decode(&text.encode(), V3).unwrap(), text);

		let latin = UserText::decode(b"\x00desc\x00value\x00", V3).unwrap();
		assert_eq!(latin.description, "desc");
		assert_eq!(latin.value, "value");

		assert!(matches!(
			UserText::decode(b"\x00no terminator", V3),
			Err(FrameError::Truncated(_))
		));
		assert!(matches!(
			UserText::decode(b"\x09desc\x00value", V3),
			Err(FrameError::UnsupportedEncoding(9))
		));
	}

	#[test]
	fn comment_language() {
		let comment = Comment {
			language: "eng".into(),
			description: String::new(),
			text: "hello".into(),
		};
		let bytes = comment.encode();
		assert_eq!(&bytes[1..4], b"eng");
		assert_eq!(Comment::decode(&bytes, V3).unwrap(), comment);

		let bytes = Comment {
			language: "english".into(),
			..comment
		}
		.encode();
		assert_eq!(&bytes[1..4], b"XXX");

		assert!(Comment::decode(b"\x00en", V3).is_err());
	}

	#[test]
	fn picture_legacy_format() {
		let body = b"\x00PNG\x03cover\x00\x89PNG";
		let picture = Picture::decode(body, Version { major: 2, revision: 0 }).unwrap();
		assert_eq!(picture.mime, "image/png");
		assert_eq!(picture.picture_type, Picture::FRONT_COVER);
		assert_eq!(picture.description, "cover");
		assert_eq!(picture.data, b"\x89PNG");

		let picture = Picture {
			mime: "image/jpeg".into(),
			..picture
		};
		assert_eq!(Picture::decode(&picture.encode(), V3).unwrap(), picture);
	}

	#[test]
	fn popularimeter_counter() {
		let popm = Popularimeter {
			email: "a@b.c".into(),
			rating: 196,
			counter: 7,
		};
		let bytes = popm.encode();
		assert_eq!(&bytes[bytes.len() - 4..], [0, 0, 0, 7]);
		assert_eq!(Popularimeter::decode(&bytes, V3).unwrap(), popm);

		let big = Popularimeter {
			counter: 1 << 40,
			..popm
		};
		assert_eq!(big.encode().len(), 6 + 1 + 6);
		assert_eq!(Popularimeter::decode(&big.encode(), V3).unwrap(), big);

		let no_counter = Popularimeter::decode(b"a@b.c\x00\x10", V3).unwrap();
		assert_eq!(no_counter.counter, 0);
	}

	#[test]
	fn owned_frames() {
		let private = Private {
			owner: "owner".into(),
			data: vec![0, 1, 2],
		};
		assert_eq!(Private::decode(&private.encode(), V3).unwrap(), private);

		let ufid = UniqueFileId {
			owner: "http://musicbrainz.org".into(),
			identifier: b"1234".to_vec(),
		};
		assert_eq!(UniqueFileId::decode(&ufid.encode(), V3).unwrap(), ufid);
	}
}
