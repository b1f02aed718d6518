//! # index-md
//!
//! Keeps a per-directory `index.md` in sync with the source tree. Run as a git
//! `post-commit` hook, it reads the changes of the last commit and, for every
//! added, modified or deleted file, updates or removes a one-line summary entry
//! in the index file of the file's directory.
//!
//! ## Quick Example
//!
//! ```
//! use index_md::document::{Entry, IndexDocument};
//!
//! let mut doc = IndexDocument::new("src", "Application sources.", "## Key Files");
//! doc.upsert(Entry::new("util.py", "Utility helpers for string formatting."));
//! doc.upsert(Entry::new("main.py", "Program entry point."));
//!
//! let rendered = doc.render();
//! assert!(rendered.contains("- `main.py`: Program entry point.\n- `util.py`"));
//! assert_eq!(doc.entries().count(), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Documents (`document`)**: the typed model of an index file. Entries are
//!   keyed by exact file name; untouched lines render back unchanged.
//! - **Safe writes (`backup`, `validate`, `reconcile`)**: every rewrite of an
//!   existing index is preceded by a timestamped snapshot and followed by a
//!   structural check; a failed check restores the snapshot.
//! - **Changes (`git`, `classify`)**: `git diff HEAD~1 HEAD --name-status`
//!   records normalized into add/modify/delete events, with renames expanded
//!   and protected paths dropped.
//! - **Summaries (`summarize`)**: an external CLI behind the `Summarizer`
//!   trait, called with a timeout and a bounded number of attempts.
//! - **Runs (`orchestrator`)**: processes the events of one commit in order
//!   and reports touched index files and failed events.
//!
//! Behaviour is tuned through [`config::HookConfig`], loaded from an optional
//! `.index-md.yaml` at the repository root.

pub mod backup;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod orchestrator;
pub mod reconcile;
pub mod summarize;
pub mod validate;

#[cfg(test)]
mod document_proptest;
