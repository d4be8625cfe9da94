//! The codec, holding the frame table it consults.

use crate::table::{FrameSpecs, StandardFrames};

/// ID3v2 codec.
///
/// Decoding, encoding, and merging all need to know about frames: which identifiers exist, what
/// they're called, how their bodies are laid out, and how values merge. That knowledge comes from
/// a [`FrameSpecs`] table, [`StandardFrames`] unless another one is provided.
#[derive(Clone, Copy, Debug, Default)]
pub struct Codec<S = StandardFrames> {
	pub(crate) specs: S,
}

impl Codec<StandardFrames> {
	/// Codec using the built-in frame table.
	pub fn standard() -> Self {
		Self {
			specs: StandardFrames,
		}
	}
}

impl<S: FrameSpecs> Codec<S> {
	/// Codec using a custom frame table.
	pub fn new(specs: S) -> Self {
		Self { specs }
	}

	/// The frame table.
	pub fn specs(&self) -> &S {
		&self.specs
	}
}
