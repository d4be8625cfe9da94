//! Error types.
//!
//! Only tag-level problems are errors. A buffer without a tag is not an error (the functions that
//! look for a tag return `Option`), and problems with individual frames are handled inside the
//! decoder: the frame is dropped and decoding carries on.
use std::borrow::Cow;

use deku::DekuError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// Error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),

	/// Error that includes the bytes it was found in.
	#[error(transparent)]
	Source(#[from] SourceError),
}

impl Error {
	/// The kind of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Simple(err) => err.kind,
			Self::Source(err) => err.kind,
		}
	}
}

/// Tag error.
#[derive(Error, Diagnostic, Debug)]
#[error("id3 tag: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

/// Tag error with a snippet of the offending bytes.
#[derive(Error, Diagnostic, Debug)]
#[error("id3 tag: {message}")]
pub struct SourceError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Error location in the snippet.
	#[label("here")]
	pub at: SourceSpan,

	/// Snippet of the tag, as hex.
	#[source_code]
	pub snippet: String,
}

impl SimpleError {
	/// New error without source.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
		}
	}

	/// New simple error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

impl SourceError {
	/// New error with source snippet.
	pub fn new(kind: ErrorKind, snippet: &[u8], at_byte: usize) -> Self {
		Self {
			kind,
			message: kind.default_message(),
			snippet: format!("{snippet:02x?}"),
			at: SourceSpan::from((
				(at_byte * 4) + 1, // "[" then "xx, " per byte
				2,                 // always 2 bytes for the hex value
			)),
		}
	}

	/// New error with source snippet, extracted from a larger source.
	pub fn from_source(kind: ErrorKind, source: &[u8], at_byte: usize, context: usize) -> Self {
		let start = at_byte.saturating_sub(context).min(source.len());
		let end = at_byte.saturating_add(context).min(source.len());
		Self::new(kind, &source[start..end], at_byte.saturating_sub(start))
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// A size field is not a valid synchsafe integer, or claims more bytes than there are.
	///
	/// This is distinct from not finding a tag at all: a tag signature was found, but its
	/// structure can't be trusted.
	InvalidSize {
		/// Offset of the size field from the start of the tag.
		at: usize,
	},

	/// Tag header declares a version this library doesn't read.
	UnsupportedVersion {
		/// Major version byte.
		major: u8,
		/// Revision byte.
		revision: u8,
	},

	/// Encoded tag body is too large to be described by a synchsafe size.
	TagTooLarge(usize),

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::InvalidSize { at } => {
				Cow::Owned(format!("invalid size field at tag offset {at}"))
			}
			ErrorKind::UnsupportedVersion { major, revision } => Cow::Owned(format!(
				"unsupported tag version 2.{major}.{revision}, this library reads 2.2, 2.3, and 2.4"
			)),
			ErrorKind::TagTooLarge(len) => Cow::Owned(format!(
				"tag body of {len} bytes is larger than the maximum of {} bytes",
				crate::format::MAX_SYNCHSAFE
			)),
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}

/// Failure to decode a single frame.
///
/// These never reach callers: the decoder logs them and drops the frame.
#[derive(Error, Debug)]
pub(crate) enum FrameError {
	#[error("unknown frame {0}")]
	Unknown(String),

	#[error("encrypted frames are not supported")]
	Encrypted,

	#[error("unsupported text encoding 0x{0:02X}")]
	UnsupportedEncoding(u8),

	#[error("truncated {0}")]
	Truncated(&'static str),

	#[error("invalid {0} text")]
	InvalidText(&'static str),

	#[error("failed to inflate compressed frame: {0}")]
	Inflate(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_survives_wrapping() {
		let err: Error = ErrorKind::TagTooLarge(1 << 30).into();
		assert_eq!(err.kind(), ErrorKind::TagTooLarge(1 << 30));

		let err: Error = SourceError::from_source(ErrorKind::InvalidSize { at: 6 }, &[0; 10], 6, 4)
			.into();
		assert_eq!(err.kind(), ErrorKind::InvalidSize { at: 6 });
	}

	#[test]
	fn source_snippet_is_clamped() {
		let err = SourceError::from_source(ErrorKind::Parse, &[1, 2, 3], 2, 8);
		assert_eq!(err.snippet, "[01, 02, 03]");
	}
}
