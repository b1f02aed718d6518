//! # index-md CLI
//!
//! Binary entry point for the `index-md` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging from the global `--log-level` flag.
//! - Dispatching to the selected command and turning its outcome into the
//!   process exit status the calling git hook sees.
//!
//! The hook logic itself lives in the `index_md` library crate.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
