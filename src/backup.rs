//! Index snapshots.
//!
//! Before an existing index file is rewritten, its current content is copied
//! into a reserved directory next to it:
//!
//! ```text
//! src/index.md
//! src/.index_backups/index_md_backup_20250314_092653.md
//! ```
//!
//! Snapshots are never rotated. Two snapshots of the same directory taken
//! within the same second share a name and the later one wins, which is fine
//! for the only consumer: restoring within the same run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{debug, error, info};

/// Handle to a snapshot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name for a snapshot taken at `at`.
pub fn backup_file_name(at: NaiveDateTime) -> String {
    format!("index_md_backup_{}.md", at.format("%Y%m%d_%H%M%S"))
}

/// Creates and restores snapshots in a fixed sibling directory.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir_name: String,
}

impl BackupManager {
    pub fn new(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
        }
    }

    /// The snapshot directory used for `original`.
    pub fn backup_dir_for(&self, original: &Path) -> PathBuf {
        original
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.dir_name)
    }

    /// Snapshot `original` using the current local time.
    pub fn snapshot(&self, original: &Path) -> Option<Snapshot> {
        self.snapshot_at(original, Local::now().naive_local())
    }

    /// Snapshot `original` as if taken at `at`.
    ///
    /// Returns `None` when there is nothing to snapshot or the copy fails.
    /// A failed copy is logged; the caller carries on without a rollback point.
    pub fn snapshot_at(&self, original: &Path, at: NaiveDateTime) -> Option<Snapshot> {
        if !original.is_file() {
            debug!("no snapshot for '{}': file does not exist", original.display());
            return None;
        }

        let dir = self.backup_dir_for(original);
        let path = dir.join(backup_file_name(at));
        let copied = fs::create_dir_all(&dir).and_then(|_| fs::copy(original, &path));

        match copied {
            Ok(_) => {
                info!("backup created: {}", path.display());
                Some(Snapshot { path })
            }
            Err(e) => {
                error!("backup of '{}' failed: {}", original.display(), e);
                None
            }
        }
    }

    /// Copy `snapshot` back over `original`.
    pub fn restore(&self, original: &Path, snapshot: &Snapshot) -> bool {
        if !snapshot.path.is_file() {
            error!(
                "cannot restore '{}': snapshot '{}' is gone",
                original.display(),
                snapshot.path.display()
            );
            return false;
        }
        match fs::copy(&snapshot.path, original) {
            Ok(_) => {
                info!("restored from backup: {}", original.display());
                true
            }
            Err(e) => {
                error!("restore of '{}' failed: {}", original.display(), e);
                false
            }
        }
    }
}
