//! Wire format of ID3v2 tags.
//!
//! Constants, synchsafe integers, the tag header, frame headers.

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::frame::{
	encode_frame_header, FrameFlags, FrameId, RawFrameHeader, RawLegacyFrameHeader,
};
#[doc(inline)]
pub use self::header::{decode_header, encode_header, RawHeader, TagFlags, TagHeader, Version};

mod constants;
mod frame;
mod header;
pub mod synchsafe;

/// Read four bytes at `at`, if there are four bytes there.
pub(crate) fn take4(buffer: &[u8], at: usize) -> Option<[u8; 4]> {
	buffer.get(at..at.checked_add(4)?)?.try_into().ok()
}
