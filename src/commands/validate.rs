//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks index files
//! for the two markers every index must keep: a `#` heading and the section
//! header.
//!
//! With explicit paths only those files are checked. Without paths the whole
//! repository is walked, skipping protected directories (including the
//! snapshot directories), and every index file found is checked.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use walkdir::WalkDir;

use index_md::config::{self, HookConfig};
use index_md::exit_codes;
use index_md::validate::{inspect, Inspection};

/// Check index files for their required structure
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Index files to check (defaults to every index file in the repository)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Repository root (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs) -> Result<ExitCode> {
    let root = super::repo_or_cwd(args.repo)?;
    let config = config::load(&root)
        .with_context(|| format!("Failed to load config from {}", root.display()))?;

    let paths = if args.paths.is_empty() {
        find_index_files(&root, &config)
    } else {
        args.paths
    };

    if paths.is_empty() {
        println!("No {} files found under {}", config.index_file_name, root.display());
        return Ok(ExitCode::from(exit_codes::SUCCESS));
    }

    let mut invalid = 0;
    for path in &paths {
        match inspect(path, &config.section_header) {
            Inspection::Valid => println!("[OK] {}", path.display()),
            Inspection::Absent => println!("[OK] {} (does not exist)", path.display()),
            Inspection::Invalid { missing } => {
                invalid += 1;
                println!("[ERR] {}: missing {}", path.display(), missing.join(", "));
            }
            Inspection::Unreadable(e) => {
                invalid += 1;
                println!("[ERR] {}: {}", path.display(), e);
            }
        }
    }

    println!();
    if invalid == 0 {
        println!("All {} index files are valid", paths.len());
        Ok(ExitCode::from(exit_codes::SUCCESS))
    } else {
        println!("{} of {} index files are invalid", invalid, paths.len());
        Ok(ExitCode::from(exit_codes::FAILURE))
    }
}

/// Every index file below `root`, sorted, outside protected directories.
fn find_index_files(root: &Path, config: &HookConfig) -> Vec<PathBuf> {
    let protected = config.all_protected_dirs();
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && protected.iter().any(|p| entry.file_name() == *p))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == config.index_file_name.as_str())
        .map(|entry| entry.into_path())
        .collect();
    found.sort();
    found
}
