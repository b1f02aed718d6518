//! # Orchestrator
//!
//! Drives one hook run over the most recent commit:
//!
//! 1. Warn about index files that were edited by hand in the commit.
//! 2. Fetch and classify the commit's changes. A git failure or an empty
//!    change list ends the run successfully.
//! 3. Process events strictly in order. Added and modified files are
//!    summarized and upserted; deleted files are removed from their index.
//!    A failed event is recorded and the loop moves on.
//!
//! The [`RunReport`] carries the index files that were touched and the events
//! that failed; any failure makes the run fail.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::classify::{ChangeEvent, ChangeKind, Classifier};
use crate::config::HookConfig;
use crate::error::Result;
use crate::exit_codes;
use crate::git::ChangeSource;
use crate::reconcile::{Outcome, Reconciler};
use crate::summarize::{summarize_with_retry, Summarizer};

/// Result of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Repository-relative index paths written or confirmed by an event.
    pub touched: BTreeSet<PathBuf>,
    /// Events that could not be applied, in processing order.
    pub failed: Vec<(ChangeKind, String)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}

pub struct Orchestrator<'a> {
    root: &'a Path,
    config: &'a HookConfig,
    source: &'a dyn ChangeSource,
    summarizer: &'a dyn Summarizer,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        root: &'a Path,
        config: &'a HookConfig,
        source: &'a dyn ChangeSource,
        summarizer: &'a dyn Summarizer,
    ) -> Self {
        Self {
            root,
            config,
            source,
            summarizer,
        }
    }

    pub fn run(&self) -> RunReport {
        let mut report = RunReport::default();
        self.warn_hand_edited();

        let raw = match self.source.name_status() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("could not read the commit's changes, nothing to do: {}", e);
                return report;
            }
        };
        let events = Classifier::new(self.config).classify(&raw);
        if events.is_empty() {
            info!("no indexable changes in this commit");
            return report;
        }

        let reconciler = Reconciler::new(self.root, self.config);
        for event in &events {
            info!("processing {} {}", event.kind, event.path);
            match self.apply(&reconciler, event) {
                Ok(outcome) => {
                    let index = reconciler.index_path(Path::new(event.directory()));
                    if outcome != Outcome::Unchanged || self.root.join(&index).exists() {
                        report.touched.insert(index);
                    }
                }
                Err(e) => {
                    error!("failed to update index for {} {}: {}", event.kind, event.path, e);
                    report.failed.push((event.kind, event.path.clone()));
                }
            }
        }
        report
    }

    fn apply(&self, reconciler: &Reconciler<'_>, event: &ChangeEvent) -> Result<Outcome> {
        let directory = Path::new(event.directory());
        match event.kind {
            ChangeKind::Added | ChangeKind::Modified => {
                let summary = self.summary_for(&event.path);
                reconciler.upsert(directory, event.file_name(), &summary)
            }
            ChangeKind::Deleted => reconciler.remove(directory, event.file_name()),
        }
    }

    fn summary_for(&self, path: &str) -> String {
        let bytes = match fs::read(self.root.join(path)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not read '{}': {}", path, e);
                Vec::new()
            }
        };
        if bytes.is_empty() {
            return self.config.empty_file_summary.clone();
        }

        let content = String::from_utf8_lossy(&bytes);
        summarize_with_retry(self.summarizer, path, &content, self.config.max_retries)
            .into_summary(&self.config.fallback_summary)
    }

    fn warn_hand_edited(&self) {
        let paths = match self.source.changed_paths() {
            Ok(paths) => paths,
            Err(_) => return,
        };
        for path in paths {
            let file_name = path.rsplit('/').next().unwrap_or(&path);
            if file_name == self.config.index_file_name {
                warn!(
                    "'{}' was edited by hand in this commit; automatic updates may overwrite those edits",
                    path
                );
            }
        }
    }
}
