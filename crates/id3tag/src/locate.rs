//! Finding a tag in a buffer.

use tracing::{instrument, trace};

use crate::format::{synchsafe, take4, HEADER_LENGTH, ID3_MAGIC};

/// Find the offset of the first plausible ID3v2 tag header in `buffer`.
///
/// `ID3` can turn up by chance in audio data, so a match only counts if the following bytes also
/// look like a header: a known major version, no `0xFF` version bytes, and a valid synchsafe
/// size. Matches that fail those checks are skipped and scanning carries on.
#[instrument(level = "debug", skip(buffer), fields(len = buffer.len()))]
pub fn locate(buffer: &[u8]) -> Option<usize> {
	buffer
		.windows(ID3_MAGIC.len())
		.enumerate()
		.filter(|(_, window)| *window == ID3_MAGIC)
		.map(|(offset, _)| offset)
		.find(|&offset| {
			let plausible = is_plausible_header(&buffer[offset..]);
			if !plausible {
				trace!(%offset, "false positive tag signature");
			}
			plausible
		})
}

fn is_plausible_header(candidate: &[u8]) -> bool {
	let Some(header) = candidate.get(..HEADER_LENGTH) else {
		return false;
	};

	let (major, revision) = (header[3], header[4]);
	major != 0xFF
		&& revision != 0xFF
		&& (2..=4).contains(&major)
		&& take4(header, 6).is_some_and(synchsafe::is_valid)
}
