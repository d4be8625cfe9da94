//! Reversing unsynchronisation.
//!
//! Unsynchronisation inserts a zero byte after every `0xFF` that is followed by a byte that could
//! be mistaken for an MPEG sync (`0xE0` and above), or by a zero. Undoing it means dropping the
//! zero after every `0xFF`.

/// Undo unsynchronisation.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
pub(crate) fn resync(bytes: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(bytes.len());
	let mut after_ff = false;
	for &byte in bytes {
		if !(after_ff && byte == 0x00) {
			out.push(byte);
		}
		after_ff = byte == 0xFF;
	}
	out
}
