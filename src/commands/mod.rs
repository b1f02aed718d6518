//! # CLI Command Implementations
//!
//! Each subcommand of the `index-md` tool lives in its own file with:
//! - An `Args` struct deriving `clap::Args`.
//! - An `execute` function that calls into the `index_md` library.
//!
//! Commands that decide the process exit status (`run`, `validate`, `check`)
//! return an `ExitCode`; the others succeed or fail through `anyhow::Result`.

pub mod check;
pub mod completions;
pub mod hooks;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// The directory to operate on: `repo` if given, else the current directory.
pub(crate) fn repo_or_cwd(repo: Option<PathBuf>) -> Result<PathBuf> {
    match repo {
        Some(repo) => Ok(repo),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}
