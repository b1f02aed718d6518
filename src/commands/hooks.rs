//! # Hooks Command Implementation
//!
//! Manages the git `post-commit` hook that runs `index-md run` after every
//! commit.
//!
//! - **Install**: writes the hook script, marked with [`HOOK_MARKER`]. A
//!   foreign hook is only replaced with `--force`, after being moved to
//!   `post-commit.backup`.
//! - **Uninstall**: removes the hook if, and only if, index-md installed it.
//! - **Status**: reports whether the hook is installed.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// Manage the post-commit hook
#[derive(Args, Debug)]
pub struct HooksArgs {
    #[command(subcommand)]
    pub command: HooksCommand,
}

#[derive(Subcommand, Debug)]
pub enum HooksCommand {
    /// Install the index-md post-commit hook
    Install(InstallArgs),

    /// Uninstall the index-md post-commit hook
    Uninstall(RepoArgs),

    /// Show hook installation status
    Status(RepoArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Path to the Git repository (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Replace an existing hook (a foreign hook is backed up first)
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Path to the Git repository (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

/// Execute the `hooks` command
pub fn execute(args: HooksArgs) -> Result<()> {
    match args.command {
        HooksCommand::Install(args) => execute_install(args),
        HooksCommand::Uninstall(args) => execute_uninstall(args),
        HooksCommand::Status(args) => execute_status(args),
    }
}

/// Marker line identifying hooks written by index-md
const HOOK_MARKER: &str = "# index-md-hook";

const HOOK_NAME: &str = "post-commit";

fn hook_script() -> String {
    format!(
        r#"#!/bin/sh
{HOOK_MARKER}
# Keeps per-directory index.md files in sync with each commit.
#
# To uninstall: index-md hooks uninstall

if ! command -v index-md >/dev/null 2>&1; then
    echo "Warning: index-md not found in PATH, skipping index update"
    exit 0
fi

index-md run
"#
    )
}

/// Find the .git directory for a repository
fn find_git_dir(repo_path: &Path) -> Result<PathBuf> {
    let git_dir = repo_path.join(".git");

    if git_dir.is_dir() {
        Ok(git_dir)
    } else if git_dir.is_file() {
        // Worktree or submodule: .git points at the real git dir
        let content = fs::read_to_string(&git_dir)?;
        let gitdir = content
            .strip_prefix("gitdir: ")
            .ok_or_else(|| anyhow!("Invalid .git file format"))?
            .trim();

        if Path::new(gitdir).is_absolute() {
            Ok(PathBuf::from(gitdir))
        } else {
            Ok(repo_path.join(gitdir))
        }
    } else {
        Err(anyhow!("Not a Git repository: {}", repo_path.display()))
    }
}

fn hook_paths(repo: Option<PathBuf>) -> Result<(PathBuf, PathBuf)> {
    let repo_path = super::repo_or_cwd(repo)?;
    let hooks_dir = find_git_dir(&repo_path)?.join("hooks");
    let hook_path = hooks_dir.join(HOOK_NAME);
    Ok((hooks_dir, hook_path))
}

fn execute_install(args: InstallArgs) -> Result<()> {
    let (hooks_dir, hook_path) = hook_paths(args.repo)?;
    fs::create_dir_all(&hooks_dir)?;

    if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_MARKER) {
            if !args.force {
                println!("index-md hook already installed. Use --force to overwrite.");
                return Ok(());
            }
            println!("Overwriting existing index-md hook...");
        } else if args.force {
            let backup_path = hooks_dir.join(format!("{}.backup", HOOK_NAME));
            fs::rename(&hook_path, &backup_path)?;
            println!("Backed up existing hook to: {}", backup_path.display());
        } else {
            bail!(
                "A {} hook already exists (not from index-md). \
                 Use --force to overwrite (existing hook will be backed up).",
                HOOK_NAME
            );
        }
    }

    fs::write(&hook_path, hook_script())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    println!("Installed {} hook: {}", HOOK_NAME, hook_path.display());
    println!("The hook will run 'index-md run' after each commit.");
    Ok(())
}

fn execute_uninstall(args: RepoArgs) -> Result<()> {
    let (hooks_dir, hook_path) = hook_paths(args.repo)?;

    if !hook_path.exists() {
        println!("No {} hook found.", HOOK_NAME);
        return Ok(());
    }
    if !fs::read_to_string(&hook_path)?.contains(HOOK_MARKER) {
        println!("The {} hook was not installed by index-md. Not removing.", HOOK_NAME);
        return Ok(());
    }

    fs::remove_file(&hook_path)?;
    println!("Uninstalled {} hook: {}", HOOK_NAME, hook_path.display());

    let backup_path = hooks_dir.join(format!("{}.backup", HOOK_NAME));
    if backup_path.exists() {
        println!("Note: A backup hook exists at: {}", backup_path.display());
        println!(
            "You may want to restore it with: mv {} {}",
            backup_path.display(),
            hook_path.display()
        );
    }
    Ok(())
}

fn execute_status(args: RepoArgs) -> Result<()> {
    let (_, hook_path) = hook_paths(args.repo)?;

    if !hook_path.exists() {
        println!("Status: Not installed");
        println!("Run 'index-md hooks install' to install the {} hook.", HOOK_NAME);
    } else if fs::read_to_string(&hook_path)?.contains(HOOK_MARKER) {
        println!("Status: Installed");
        println!("Hook path: {}", hook_path.display());
    } else {
        println!("Status: Other hook present (not index-md)");
        println!("Hook path: {}", hook_path.display());
    }
    Ok(())
}
