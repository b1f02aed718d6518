//! # Error Handling
//!
//! This module defines the centralized error type for the `index-md` library.
//! It uses the `thiserror` library to describe every failure mode the hook can
//! run into while reading changes, talking to the summarizer, and rewriting
//! index files.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum for all library failures. Each variant carries
//!   enough context (paths, commands, stderr) to produce a useful diagnostic
//!   line on the hook's error stream.
//!
//! - **`SummarizeError`**: The narrower failure set of a summarization call.
//!   These are recovered locally by retrying and then falling back to a fixed
//!   summary, so they rarely escape as an `Error`.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for index-md operations
#[derive(Error, Debug)]
pub enum Error {
    /// The `.index-md.yaml` configuration could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A git command could not be run or exited unsuccessfully.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An index file lost one of its mandatory markers after a write.
    ///
    /// By the time this is returned the pre-write content has already been
    /// restored (or the restore failure logged).
    #[error("Index validation failed for {}: missing {}", path.display(), missing.join(", "))]
    Validation { path: PathBuf, missing: Vec<String> },

    /// Restoring an index file from its snapshot failed.
    #[error("Restore failed for {}: {message}", path.display())]
    Restore { path: PathBuf, message: String },

    /// A summarization call failed.
    #[error("Summarization error: {0}")]
    Summarize(#[from] SummarizeError),

    /// A required external tool is missing or unusable.
    #[error("Tool validation error: {tool} - {message}")]
    ToolValidation { tool: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure modes of a single summarization attempt.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The summarizer could not be started at all.
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),

    /// The summarizer did not answer within the configured wait.
    #[error("summarizer timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The summarizer exited successfully but printed nothing.
    #[error("summarizer returned an empty response")]
    EmptyResponse,

    /// The summarizer exited with a non-zero status.
    #[error("summarizer exited with {}: {stderr}", code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()))]
    Failed { code: Option<i32>, stderr: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
