//! Process exit codes.
//!
//! The hook runs as a git lifecycle hook, so its exit status is the only
//! signal the caller sees:
//!
//! - `SUCCESS` (0): every change event was reconciled, or there were none.
//! - `FAILURE` (1): at least one reconciliation failed, or the environment is
//!   unusable (for example the summarizer CLI is missing).
//! - Exit code 2 is left to clap for invalid command-line usage.

/// Every event succeeded.
pub const SUCCESS: u8 = 0;

/// At least one event failed, or the run aborted before processing.
pub const FAILURE: u8 = 1;
