//! # Change Classifier
//!
//! Turns the raw `--name-status` records of a commit into the ordered stream of
//! change events the orchestrator acts on.
//!
//! - `A`, `M` and `D` map directly to [`ChangeKind`]s; `T` (type change) is
//!   treated as a modification.
//! - A rename `R<score> old new` becomes a deletion of `old` followed by an
//!   addition of `new`, so the old entry is removed before the new one lands.
//! - A copy `C<score> old new` adds `new`; the source is untouched.
//! - Paths under a protected directory, index files themselves, and the hook's
//!   own artifacts never produce events.
//!
//! Unknown status letters are skipped with a warning instead of failing the
//! commit.

use std::fmt;

use log::warn;

use crate::config::HookConfig;

/// One record of `git diff --name-status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    /// Status column as printed by git, e.g. `M` or `R097`.
    pub status: String,
    /// The path, or the source path of a rename/copy.
    pub path: String,
    /// Destination path of a rename/copy.
    pub new_path: Option<String>,
}

impl RawChange {
    pub fn new(status: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            path: path.into(),
            new_path: None,
        }
    }

    pub fn renamed(status: impl Into<String>, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            path: old.into(),
            new_path: Some(new.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// The single-letter git status for this kind.
    pub fn code(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A normalized change to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Repository-relative path with `/` separators.
    pub path: String,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Containing directory (empty for the repository root).
    pub fn directory(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    pub fn file_name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.path)
    }
}

/// Filters and normalizes raw changes.
#[derive(Debug, Clone)]
pub struct Classifier {
    protected_dirs: Vec<String>,
    index_file_name: String,
    hook_artifacts: Vec<String>,
}

impl Classifier {
    pub fn new(config: &HookConfig) -> Self {
        Self {
            protected_dirs: config
                .all_protected_dirs()
                .into_iter()
                .map(str::to_string)
                .collect(),
            index_file_name: config.index_file_name.clone(),
            hook_artifacts: config.hook_artifacts.clone(),
        }
    }

    /// `true` if `path` must never produce a change event.
    pub fn is_ignored(&self, path: &str) -> bool {
        let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
        if components.peek().is_none() {
            return true;
        }
        let file_name = path.rsplit('/').next().unwrap_or(path);

        file_name == self.index_file_name
            || self.is_hook_artifact(path)
            || components.any(|c| self.protected_dirs.iter().any(|p| p == c))
    }

    fn is_hook_artifact(&self, path: &str) -> bool {
        self.hook_artifacts.iter().any(|artifact| {
            path == artifact
                || path
                    .strip_suffix(artifact.as_str())
                    .is_some_and(|prefix| prefix.ends_with('/'))
        })
    }

    /// Classify `raw` into events, preserving input order.
    pub fn classify(&self, raw: &[RawChange]) -> Vec<ChangeEvent> {
        let mut events = Vec::with_capacity(raw.len());
        for change in raw {
            let status = change.status.chars().next();
            match (status, change.new_path.as_deref()) {
                (Some('A'), _) => self.push(&mut events, ChangeKind::Added, &change.path),
                (Some('M' | 'T'), _) => self.push(&mut events, ChangeKind::Modified, &change.path),
                (Some('D'), _) => self.push(&mut events, ChangeKind::Deleted, &change.path),
                (Some('R'), Some(new_path)) => {
                    self.push(&mut events, ChangeKind::Deleted, &change.path);
                    self.push(&mut events, ChangeKind::Added, new_path);
                }
                (Some('C'), Some(new_path)) => self.push(&mut events, ChangeKind::Added, new_path),
                _ => warn!(
                    "skipping unsupported change '{}' for '{}'",
                    change.status, change.path
                ),
            }
        }
        events
    }

    fn push(&self, events: &mut Vec<ChangeEvent>, kind: ChangeKind, path: &str) {
        if !self.is_ignored(path) {
            events.push(ChangeEvent::new(kind, path));
        }
    }
}
