//! # Entry Reconciler
//!
//! Applies one entry edit to one directory's index file, safely.
//!
//! Every write goes through the same bracket:
//!
//! 1. Read and parse the current index (if any) and compute the new content.
//!    If nothing would change, stop here: no snapshot, no write.
//! 2. Snapshot the existing file with the [`BackupManager`].
//! 3. Write the new content.
//! 4. Validate the result. If validation fails (or the write itself failed),
//!    put the pre-write content back and report the edit as failed.
//!
//! A freshly created index has no snapshot; rolling it back means removing it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::backup::{BackupManager, Snapshot};
use crate::config::HookConfig;
use crate::document::{Entry, IndexDocument, Upsert};
use crate::error::{Error, Result};
use crate::validate::missing_markers;

/// What a reconciliation did to the index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new index file was written.
    Created,
    /// An existing index file was rewritten; `snapshot` holds its prior content.
    Updated { snapshot: Option<Snapshot> },
    /// The index already matched; nothing was written.
    Unchanged,
}

/// Edits index files below a repository root.
#[derive(Debug)]
pub struct Reconciler<'a> {
    root: &'a Path,
    config: &'a HookConfig,
    backups: BackupManager,
}

impl<'a> Reconciler<'a> {
    pub fn new(root: &'a Path, config: &'a HookConfig) -> Self {
        Self {
            root,
            config,
            backups: BackupManager::new(config.backup_dir.clone()),
        }
    }

    /// Index path for `directory`, relative to the repository root.
    pub fn index_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.config.index_file_name)
    }

    /// Set the entry for `file_name` in `directory`'s index to `summary`.
    pub fn upsert(&self, directory: &Path, file_name: &str, summary: &str) -> Result<Outcome> {
        let path = self.root.join(self.index_path(directory));
        let entry = Entry::new(file_name, summary);

        if !path.exists() {
            info!("creating '{}'", path.display());
            let mut doc = IndexDocument::new(
                &self.title_for(directory),
                &self.config.placeholder_description,
                &self.config.section_header,
            );
            doc.upsert(entry);
            self.create(&path, &doc.render())?;
            return Ok(Outcome::Created);
        }

        let current = fs::read_to_string(&path)?;
        let mut doc = IndexDocument::parse(&current, &self.config.section_header);
        match doc.upsert(entry) {
            Upsert::Unchanged => {
                info!("'{}' already up to date for '{}'", path.display(), file_name);
                Ok(Outcome::Unchanged)
            }
            _ => {
                info!("updating '{}'", path.display());
                let snapshot = self.replace(&path, &doc.render())?;
                Ok(Outcome::Updated { snapshot })
            }
        }
    }

    /// Remove every entry for `file_name` from `directory`'s index.
    pub fn remove(&self, directory: &Path, file_name: &str) -> Result<Outcome> {
        let path = self.root.join(self.index_path(directory));
        if !path.exists() {
            return Ok(Outcome::Unchanged);
        }

        let current = fs::read_to_string(&path)?;
        let mut doc = IndexDocument::parse(&current, &self.config.section_header);
        if doc.remove(file_name) == 0 {
            info!("no entry for '{}' in '{}'", file_name, path.display());
            return Ok(Outcome::Unchanged);
        }

        info!("removing '{}' from '{}'", file_name, path.display());
        let snapshot = self.replace(&path, &doc.render())?;
        Ok(Outcome::Updated { snapshot })
    }

    fn title_for(&self, directory: &Path) -> String {
        directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.root_title.clone())
    }

    /// Write a brand-new index; on failure the file is removed again.
    fn create(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let written = fs::write(path, content).map_err(Error::from).and_then(|_| self.check(path));
        if let Err(e) = written {
            if path.exists() {
                if let Err(remove_err) = fs::remove_file(path) {
                    error!("could not remove invalid '{}': {}", path.display(), remove_err);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Snapshot, overwrite and validate an existing index.
    fn replace(&self, path: &Path, content: &str) -> Result<Option<Snapshot>> {
        let snapshot = self.backups.snapshot(path);
        let written = fs::write(path, content).map_err(Error::from).and_then(|_| self.check(path));
        match written {
            Ok(()) => Ok(snapshot),
            Err(e) => {
                error!("write to '{}' failed: {}", path.display(), e);
                match &snapshot {
                    Some(snapshot) if self.backups.restore(path, snapshot) => Err(e),
                    Some(_) => Err(Error::Restore {
                        path: path.to_path_buf(),
                        message: format!("rollback after failed write did not complete: {}", e),
                    }),
                    None => Err(e),
                }
            }
        }
    }

    fn check(&self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let missing = missing_markers(&content, &self.config.section_header);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                path: path.to_path_buf(),
                missing,
            })
        }
    }
}
