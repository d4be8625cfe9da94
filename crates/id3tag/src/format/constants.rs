/// Tag identifier, at the start of every tag header.
pub const ID3_MAGIC: [u8; 3] = *b"ID3";

/// Length of the tag header in bytes.
pub const HEADER_LENGTH: usize = 10;

/// Length of a v2.3 or v2.4 frame header in bytes.
pub const FRAME_HEADER_LENGTH: usize = 10;

/// Length of a v2.2 frame header in bytes.
pub const LEGACY_FRAME_HEADER_LENGTH: usize = 6;

/// Largest value a synchsafe size field can hold (2^28 - 1).
pub const MAX_SYNCHSAFE: u32 = 0x0FFF_FFFF;

/// Major version of tags produced by the encoder.
///
/// The encoder always writes ID3v2.3, whatever version the tag it replaces or merges into was.
pub const WRITE_MAJOR_VERSION: u8 = 3;
