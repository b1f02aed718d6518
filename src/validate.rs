//! Structural validation of index files.
//!
//! An index file is structurally sound when it still contains a `#` heading
//! marker and the literal section header. The check is deliberately shallow:
//! it runs after every write and only has to catch edits that destroyed the
//! skeleton of the file.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;

/// Result of inspecting an index file on disk.
#[derive(Debug)]
pub enum Inspection {
    /// The file does not exist yet; nothing to check.
    Absent,
    Valid,
    /// The file exists but lacks the listed markers.
    Invalid { missing: Vec<String> },
    /// The file exists but could not be read as text.
    Unreadable(io::Error),
}

impl Inspection {
    pub fn is_valid(&self) -> bool {
        matches!(self, Inspection::Absent | Inspection::Valid)
    }
}

/// Markers from `["#", section_header]` that `content` does not contain.
pub fn missing_markers(content: &str, section_header: &str) -> Vec<String> {
    ["#", section_header.trim()]
        .into_iter()
        .filter(|marker| !content.contains(marker))
        .map(str::to_string)
        .collect()
}

/// Inspect the index file at `path`.
pub fn inspect(path: &Path, section_header: &str) -> Inspection {
    if !path.exists() {
        return Inspection::Absent;
    }
    match fs::read_to_string(path) {
        Ok(content) => {
            let missing = missing_markers(&content, section_header);
            if missing.is_empty() {
                Inspection::Valid
            } else {
                Inspection::Invalid { missing }
            }
        }
        Err(e) => Inspection::Unreadable(e),
    }
}

/// `true` if `path` is absent or structurally sound.
pub fn validate(path: &Path, section_header: &str) -> bool {
    match inspect(path, section_header) {
        Inspection::Invalid { missing } => {
            for marker in missing {
                warn!("'{}' is missing required section '{}'", path.display(), marker);
            }
            false
        }
        Inspection::Unreadable(e) => {
            warn!("index validation failed for '{}': {}", path.display(), e);
            false
        }
        Inspection::Absent | Inspection::Valid => true,
    }
}
