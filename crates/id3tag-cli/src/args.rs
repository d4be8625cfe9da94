use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{read::ReadArgs, strip::StripArgs, write::WriteArgs};

/// Read, write, and strip ID3v2 tags.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "id3tag",
	bin_name = "id3tag",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs or odd tags. Use
	/// multiple times to increase verbosity: warnings (such as dropped frames), then info, debug,
	/// and trace.
	///
	/// The RUST_LOG environment variable takes precedence when set.
	#[arg(long, short, global = true, action = ArgAction::Count, default_value = "0", num_args = 0)]
	pub verbose: Option<u8>,

	/// Write diagnostic logs to a file, as JSON.
	///
	/// If given a directory, a file named with the current time is created in it. Has no effect
	/// without `-v`.
	#[arg(
		long,
		global = true,
		num_args = 0..=1,
		default_missing_value = ".",
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// Print the tag of an audio file.
	Read(ReadArgs),

	/// Write tags to an audio file, replacing or updating its tag.
	Write(WriteArgs),

	/// Remove the tag from an audio file.
	Strip(StripArgs),
}

/// Parse `KEY=VALUE`, splitting at the first `=`.
pub(crate) fn parse_pair(pair: &str) -> Result<(String, String), String> {
	pair.split_once('=')
		.map(|(key, value)| (key.to_string(), value.to_string()))
		.ok_or_else(|| format!("expected KEY=VALUE, got {pair:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pairs() {
		assert_eq!(
			parse_pair("title=a=b"),
			Ok(("title".to_string(), "a=b".to_string()))
		);
		assert!(parse_pair("title").is_err());
	}

	#[test]
	fn parses_subcommands() {
		let args = Args::parse_from([
			"id3tag", "-vv", "write", "song.mp3", "--set", "title=a", "--user", "k=v", "--merge",
		]);
		assert_eq!(args.verbose, Some(2));
		let Action::Write(write) = &args.action else {
			panic!("expected write");
		};
		assert_eq!(write.set, [("title".to_string(), "a".to_string())]);
		assert!(write.merge);
	}
}
