//! # Run Command Implementation
//!
//! The `run` subcommand is what the installed `post-commit` hook executes.
//! It resolves the repository root, loads `.index-md.yaml` (or the file given
//! with `--config`), applies command-line overrides, makes sure the
//! summarizer CLI answers, and then reconciles the index files for every
//! change of the last commit.
//!
//! Exit status is 0 when every change was reconciled (or there was nothing to
//! do) and 1 when any change failed or the summarizer is missing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use log::{debug, error, info};

use index_md::config::{self, HookConfig};
use index_md::exit_codes;
use index_md::git::{self, GitCli};
use index_md::orchestrator::Orchestrator;
use index_md::summarize::CliSummarizer;

/// Update index files for the changes of the last commit
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path inside the Git repository (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Configuration file to use instead of `<repo>/.index-md.yaml`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Summarization attempts per file
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_retries: Option<u32>,

    /// Seconds to wait for each summarization attempt
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Language the summaries are written in
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Summarizer executable
    #[arg(long, value_name = "PROGRAM", env = "INDEX_MD_SUMMARIZER")]
    pub program: Option<String>,
}

impl RunArgs {
    fn apply_overrides(&self, config: &mut HookConfig) {
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(program) = &self.program {
            config.summarizer_program = program.clone();
        }
    }
}

/// Execute the `run` command.
pub fn execute(args: RunArgs) -> Result<ExitCode> {
    let dir = super::repo_or_cwd(args.repo.clone())?;
    let root = resolve_root(&dir);

    let mut config = match &args.config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load(&root)
            .with_context(|| format!("Failed to load config from {}", root.display()))?,
    };
    args.apply_overrides(&mut config);

    let summarizer = CliSummarizer::from_config(&config);
    match summarizer.probe() {
        Ok(version) => info!("using {} {}", summarizer.program(), version),
        Err(e) => {
            error!("{}", e);
            eprintln!(
                "The summarizer CLI '{}' is not available; install it or pass --program.",
                summarizer.program()
            );
            return Ok(ExitCode::from(exit_codes::FAILURE));
        }
    }

    let source = GitCli::new(&root);
    let report = Orchestrator::new(&root, &config, &source, &summarizer).run();

    if !report.touched.is_empty() {
        println!("Updated index files:");
        for path in &report.touched {
            println!("  {}", path.display());
        }
    }
    if !report.failed.is_empty() {
        eprintln!("Failed to update index files for:");
        for (kind, path) in &report.failed {
            eprintln!("  {} {}", kind, path);
        }
    }

    Ok(ExitCode::from(report.exit_code()))
}

/// The repository top level containing `dir`, or `dir` itself outside a repository.
fn resolve_root(dir: &Path) -> PathBuf {
    match git::toplevel(dir) {
        Ok(root) => root,
        Err(e) => {
            debug!("not inside a git repository ({}), using {}", e, dir.display());
            dir.to_path_buf()
        }
    }
}
