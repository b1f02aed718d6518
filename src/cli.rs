//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// index-md - Keep per-directory index.md files in sync with your commits
#[derive(Parser, Debug)]
#[command(name = "index-md")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update index files for the changes of the last commit
    Run(commands::run::RunArgs),

    /// Check index files for their required structure
    Validate(commands::validate::ValidateArgs),

    /// Check that the summarizer CLI is installed and responding
    Check(commands::check::CheckArgs),

    /// Manage the post-commit hook
    Hooks(commands::hooks::HooksArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_target(false)
            .init();

        match self.command {
            Commands::Run(args) => commands::run::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
            Commands::Check(args) => commands::check::execute(args),
            Commands::Hooks(args) => commands::hooks::execute(args).map(|()| ExitCode::SUCCESS),
            Commands::Completions(args) => {
                commands::completions::execute(args).map(|()| ExitCode::SUCCESS)
            }
        }
    }
}
