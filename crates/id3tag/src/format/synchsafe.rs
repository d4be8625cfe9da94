//! Synchsafe integers.
//!
//! ID3v2 stores the tag size (and, from v2.4, frame sizes) as a 28-bit integer spread over four
//! bytes, seven bits per byte, most significant first. Bit 7 of every byte is zero, so a size field
//! can never contain something that looks like an MPEG frame sync.

/// Encode a value as a synchsafe integer.
///
/// Only the low 28 bits of `n` are representable; callers check against
/// [`MAX_SYNCHSAFE`](super::MAX_SYNCHSAFE) first.
pub fn encode(n: u32) -> [u8; 4] {
	debug_assert!(n <= super::MAX_SYNCHSAFE, "{n} does not fit in 28 bits");
	[
		((n >> 21) & 0x7F) as u8,
		((n >> 14) & 0x7F) as u8,
		((n >> 7) & 0x7F) as u8,
		(n & 0x7F) as u8,
	]
}

/// Decode a synchsafe integer.
///
/// The high bit of each byte is ignored; check [`is_valid`] before trusting the result.
pub fn decode(bytes: [u8; 4]) -> u32 {
	bytes
		.iter()
		.fold(0, |n, byte| (n << 7) | u32::from(byte & 0x7F))
}

/// Whether four bytes are a well-formed synchsafe integer, i.e. no byte has its high bit set.
pub fn is_valid(bytes: [u8; 4]) -> bool {
	(bytes[0] | bytes[1] | bytes[2] | bytes[3]) & 0x80 == 0
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::format::MAX_SYNCHSAFE;

	#[test]
	fn known_values() {
		assert_eq!(encode(0), [0, 0, 0, 0]);
		assert_eq!(encode(0x7F), [0, 0, 0, 0x7F]);
		assert_eq!(encode(0x80), [0, 0, 1, 0]);
		assert_eq!(encode(257), [0, 0, 2, 1]);
		assert_eq!(encode(MAX_SYNCHSAFE), [0x7F; 4]);
		assert_eq!(decode([0x00, 0x00, 0x02, 0x01]), 257);
		assert_eq!(decode([0x7F; 4]), MAX_SYNCHSAFE);
	}

	#[test]
	fn round_trips_across_the_range() {
		let mut n = 0_u32;
		while n <= MAX_SYNCHSAFE {
			let encoded = encode(n);
			assert!(is_valid(encoded), "{n} encoded to {encoded:02x?}");
			assert_eq!(decode(encoded), n);
			n = n * 3 + 1;
		}
		assert_eq!(decode(encode(MAX_SYNCHSAFE - 1)), MAX_SYNCHSAFE - 1);
	}

	#[test]
	fn any_high_bit_is_invalid() {
		for position in 0..4 {
			let mut bytes = [0x01; 4];
			bytes[position] |= 0x80;
			assert!(!is_valid(bytes), "{bytes:02x?}");
		}
		assert!(is_valid([0x7F, 0x00, 0x7F, 0x00]));
	}
}
