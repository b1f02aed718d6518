//! # Hook Configuration
//!
//! This module defines `HookConfig`, the single explicit configuration value
//! that is handed to the classifier, the reconciler and the orchestrator. Nothing
//! in the library reads process-wide settings; tests build a `HookConfig`
//! directly and override whatever bounds they need.
//!
//! ## Loading
//!
//! The configuration lives in an optional `.index-md.yaml` file at the
//! repository root. Every key is optional and falls back to the values in
//! [`crate::defaults`]:
//!
//! ```yaml
//! section-header: "## 주요 파일"
//! language: Korean
//! max-retries: 5
//! timeout-secs: 60
//! protected-dirs: [".git", "node_modules", "__pycache__", "target"]
//! ```
//!
//! Unknown keys are rejected so that typos do not silently fall back to
//! defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Configuration for one hook run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HookConfig {
    /// File name of the per-directory index.
    pub index_file_name: String,
    /// Reserved subdirectory holding index snapshots.
    pub backup_dir: String,
    /// Heading line that opens the entry list.
    pub section_header: String,
    /// Description line for freshly created index files.
    pub placeholder_description: String,
    /// Title of the index file at the repository root.
    pub root_title: String,
    /// Directory names that are never indexed. The backup directory is
    /// always protected in addition to this list.
    pub protected_dirs: Vec<String>,
    /// File names belonging to the hook itself.
    pub hook_artifacts: Vec<String>,
    /// Summarization attempts per file.
    pub max_retries: u32,
    /// Wait per summarization attempt, in seconds.
    pub timeout_secs: u64,
    /// Characters of content sent to the summarizer.
    pub content_budget: usize,
    /// Language the summaries are written in.
    pub language: String,
    /// Summarizer executable.
    pub summarizer_program: String,
    /// Summary used when every attempt fails.
    pub fallback_summary: String,
    /// Summary used for missing or empty files.
    pub empty_file_summary: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            index_file_name: defaults::INDEX_FILE_NAME.to_string(),
            backup_dir: defaults::BACKUP_DIR.to_string(),
            section_header: defaults::SECTION_HEADER.to_string(),
            placeholder_description: defaults::PLACEHOLDER_DESCRIPTION.to_string(),
            root_title: defaults::ROOT_TITLE.to_string(),
            protected_dirs: defaults::PROTECTED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            hook_artifacts: vec![defaults::CONFIG_FILE_NAME.to_string()],
            max_retries: defaults::MAX_RETRIES,
            timeout_secs: defaults::TIMEOUT_SECS,
            content_budget: defaults::CONTENT_BUDGET,
            language: defaults::LANGUAGE.to_string(),
            summarizer_program: defaults::SUMMARIZER_PROGRAM.to_string(),
            fallback_summary: defaults::FALLBACK_SUMMARY.to_string(),
            empty_file_summary: defaults::EMPTY_FILE_SUMMARY.to_string(),
        }
    }
}

impl HookConfig {
    /// Every protected directory name, including the backup directory.
    pub fn all_protected_dirs(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = self.protected_dirs.iter().map(String::as_str).collect();
        if !dirs.contains(&self.backup_dir.as_str()) {
            dirs.push(&self.backup_dir);
        }
        dirs
    }

    /// Per-attempt summarization timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn check(self) -> Result<Self> {
        if self.max_retries == 0 {
            return Err(Error::ConfigParse {
                message: "max-retries must be at least 1".to_string(),
                hint: Some("use max-retries: 1 to disable retrying".to_string()),
            });
        }
        if self.section_header.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "section-header must not be empty".to_string(),
                hint: None,
            });
        }
        if self.index_file_name.is_empty() || self.backup_dir.is_empty() {
            return Err(Error::ConfigParse {
                message: "index-file-name and backup-dir must not be empty".to_string(),
                hint: None,
            });
        }
        Ok(self)
    }
}

/// Parse a YAML document into a `HookConfig`.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<HookConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(HookConfig::default());
    }
    let config: HookConfig = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(format!(
            "see {} keys in the index-md documentation",
            defaults::CONFIG_FILE_NAME
        )),
    })?;
    config.check()
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<HookConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load `.index-md.yaml` from `repo_root`, or the defaults if it is absent.
pub fn load(repo_root: &Path) -> Result<HookConfig> {
    let path = repo_root.join(defaults::CONFIG_FILE_NAME);
    if path.is_file() {
        from_file(path)
    } else {
        Ok(HookConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_yields_defaults() {
        assert_eq!(parse("").unwrap(), HookConfig::default());
        assert_eq!(parse("  \n").unwrap(), HookConfig::default());
    }

    #[test]
    fn test_parse_overrides_selected_fields() {
        let yaml = r###"
section-header: "## 주요 파일"
language: Korean
max-retries: 5
"###;
        let config = parse(yaml).unwrap();
        assert_eq!(config.section_header, "## 주요 파일");
        assert_eq!(config.language, "Korean");
        assert_eq!(config.max_retries, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.backup_dir, ".index_backups");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = parse("retries: 3\n").unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_rejects_zero_retries() {
        let err = parse("max-retries: 0\n").unwrap_err();
        assert!(format!("{}", err).contains("max-retries must be at least 1"));
    }

    #[test]
    fn test_all_protected_dirs_includes_backup_dir() {
        let config = HookConfig::default();
        let dirs = config.all_protected_dirs();
        assert!(dirs.contains(&".git"));
        assert!(dirs.contains(&"node_modules"));
        assert!(dirs.contains(&"__pycache__"));
        assert!(dirs.contains(&".index_backups"));
    }

    #[test]
    fn test_all_protected_dirs_follows_custom_backup_dir() {
        let config = HookConfig {
            backup_dir: ".snapshots".to_string(),
            protected_dirs: vec![],
            ..HookConfig::default()
        };
        assert_eq!(config.all_protected_dirs(), vec![".snapshots"]);
    }

    #[test]
    fn test_load_without_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load(temp.path()).unwrap(), HookConfig::default());
    }

    #[test]
    fn test_load_reads_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".index-md.yaml"), "timeout-secs: 5\n").unwrap();
        let config = load(temp.path()).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
