//! Default values for index-md configuration.
//!
//! This module provides centralized default values used by the configuration
//! loader and the CLI, so the two never drift apart.

use std::time::Duration;

/// Name of the per-directory index file.
pub const INDEX_FILE_NAME: &str = "index.md";

/// Reserved subdirectory, beside each index file, that holds its snapshots.
pub const BACKUP_DIR: &str = ".index_backups";

/// Heading line that opens the list of entries.
pub const SECTION_HEADER: &str = "## Key Files";

/// Description line written into freshly created index files.
pub const PLACEHOLDER_DESCRIPTION: &str = "Describe the role of this folder.";

/// Title used for the index file at the repository root.
pub const ROOT_TITLE: &str = "Root";

/// Directory names whose contents never produce change events.
pub const PROTECTED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__"];

/// Optional configuration file, looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = ".index-md.yaml";

/// Number of summarization attempts before falling back.
pub const MAX_RETRIES: u32 = 3;

/// Wait for a single summarization attempt, in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Wait for the `--version` probe, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Number of characters of file content sent to the summarizer.
pub const CONTENT_BUDGET: usize = 8000;

/// Natural language the summaries are written in.
pub const LANGUAGE: &str = "English";

/// Program invoked to produce summaries.
pub const SUMMARIZER_PROGRAM: &str = "claude";

/// Summary used once every attempt has failed.
pub const FALLBACK_SUMMARY: &str = "Summary generation failed.";

/// Summary used for missing or zero-length files.
pub const EMPTY_FILE_SUMMARY: &str = "File is empty or does not exist.";

/// Returns the default per-attempt summarization timeout.
pub fn default_timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
