use std::{fs, path::PathBuf};

use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct StripArgs {
	/// Audio file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Write the result here instead of modifying the input file.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub output: Option<PathBuf>,
}

pub(crate) fn strip(args: StripArgs) -> miette::Result<()> {
	info!(path = ?args.input, "read input file");
	let buffer = fs::read(&args.input).into_diagnostic()?;

	let Some(stripped) = id3tag::strip(&buffer)? else {
		eprintln!("no tag found in {}", args.input.display());
		return Ok(());
	};

	let output = args.output.unwrap_or(args.input);
	info!(path = ?output, removed = %(buffer.len() - stripped.len()), "write output file");
	fs::write(output, stripped).into_diagnostic()
}
