//! # Check Command Implementation
//!
//! The `check` subcommand reports whether the summarizer CLI can be started,
//! printing its version. It is the same probe `run` performs before touching
//! any index file, exposed on its own so a hook setup can be verified without
//! making a commit.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use index_md::config;
use index_md::exit_codes;
use index_md::summarize::CliSummarizer;

/// Check that the summarizer CLI is installed and responding
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Summarizer executable (defaults to the configured one)
    #[arg(long, value_name = "PROGRAM", env = "INDEX_MD_SUMMARIZER")]
    pub program: Option<String>,

    /// Repository root whose `.index-md.yaml` is read (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs) -> Result<ExitCode> {
    let root = super::repo_or_cwd(args.repo)?;
    let mut config = config::load(&root)
        .with_context(|| format!("Failed to load config from {}", root.display()))?;
    if let Some(program) = args.program {
        config.summarizer_program = program;
    }

    let summarizer = CliSummarizer::from_config(&config);
    println!("Checking summarizer: {}", summarizer.program());
    match summarizer.probe() {
        Ok(version) => {
            println!("[OK] {} is available ({})", summarizer.program(), version);
            Ok(ExitCode::from(exit_codes::SUCCESS))
        }
        Err(e) => {
            println!("[ERR] {}", e);
            Ok(ExitCode::from(exit_codes::FAILURE))
        }
    }
}
