//! Git access for the hook.
//!
//! The hook only needs two views of the commit it runs after:
//!
//! - `git diff HEAD~1 HEAD --name-status` for the classified change list, and
//! - `git diff HEAD~1 HEAD --name-only` to spot hand-edited index files.
//!
//! Both go through the system `git` binary with `core.quotePath=false`, so
//! non-ASCII paths arrive verbatim instead of as octal escapes.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::warn;

use crate::classify::RawChange;
use crate::error::{Error, Result};

/// Source of the raw changes of one commit.
pub trait ChangeSource {
    /// Status/path records for the inspected commit.
    fn name_status(&self) -> Result<Vec<RawChange>>;

    /// Every path touched by the inspected commit.
    fn changed_paths(&self) -> Result<Vec<String>>;
}

/// [`ChangeSource`] backed by the `git` CLI, diffing `HEAD~1..HEAD`.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    fn diff(&self, format: &str) -> Result<String> {
        run_git(&self.repo, &["diff", "HEAD~1", "HEAD", format])
    }
}

impl ChangeSource for GitCli {
    fn name_status(&self) -> Result<Vec<RawChange>> {
        self.diff("--name-status").map(|out| parse_name_status(&out))
    }

    fn changed_paths(&self) -> Result<Vec<String>> {
        self.diff("--name-only").map(|out| parse_name_only(&out))
    }
}

/// Resolve the top-level directory of the repository containing `dir`.
pub fn toplevel(dir: &Path) -> Result<PathBuf> {
    let out = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(out.trim()))
}

fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-c")
        .arg("core.quotePath=false")
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `--name-status` output.
///
/// Format: `<status>\t<path>`, or `<status>\t<old>\t<new>` for renames and
/// copies. Malformed lines are skipped with a warning.
pub fn parse_name_status(output: &str) -> Vec<RawChange> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            match parts.as_slice() {
                [status, path] => Some(RawChange::new(*status, *path)),
                [status, old, new] => Some(RawChange::renamed(*status, *old, *new)),
                _ => {
                    warn!("ignoring malformed diff line: {:?}", line);
                    None
                }
            }
        })
        .collect()
}

/// Parse `--name-only` output.
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
