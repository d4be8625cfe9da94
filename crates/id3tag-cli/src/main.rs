//! `id3tag`: read, write, and strip ID3v2 tags in audio files.
//!
//! Files are read whole, handed to the `id3tag` codec as buffers, and written back in one go.
//! Logging comes from `RUST_LOG` when it is set, and from `-v`/`--log-file` otherwise.

#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use tracing::{debug, warn};

use crate::args::Action;

mod args;
mod logs;
mod read;
mod strip;
mod write;

fn main() -> miette::Result<()> {
	let logs_on = logs::from_env().into_diagnostic()?;

	debug!("parsing arguments");
	let args = args::Args::parse();

	if logs_on {
		warn!("ignoring logging options from args");
	} else {
		logs::from_args(&args)
			.into_diagnostic()
			.wrap_err("setting up logging")?;
	}

	debug!(?args, "got arguments");

	match args.action {
		Action::Read(args) => {
			let input = args.input.clone();
			read::read(args).wrap_err_with(|| format!("reading tags from {}", input.display()))
		}
		Action::Write(args) => {
			let input = args.input.clone();
			write::write(args).wrap_err_with(|| format!("writing tags to {}", input.display()))
		}
		Action::Strip(args) => {
			let input = args.input.clone();
			strip::strip(args).wrap_err_with(|| format!("stripping tag from {}", input.display()))
		}
	}
}
