//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("src/index.md", "# src\n## Key Files\n");
//!     fixture.command().arg("validate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::summarizers;
    pub use super::TestFixture;
}

/// `.index-md.yaml` snippets.
#[allow(dead_code)]
pub mod configs {
    /// Korean summaries under a Korean section header.
    pub const KOREAN: &str = r###"
section-header: "## 주요 파일"
language: Korean
"###;

    /// Single attempt with a one-second wait.
    pub const FAST_FAIL: &str = r#"
max-retries: 1
timeout-secs: 1
"#;

    /// Unknown key, rejected by the loader.
    pub const UNKNOWN_KEY: &str = "retries: 3\n";

    pub const INVALID_YAML: &str = "invalid: yaml: content:";
}

/// Bodies for fake summarizer scripts. Each answers `--version` itself.
#[allow(dead_code)]
pub mod summarizers {
    pub const UTILITY: &str = "echo 'Utility helpers for string formatting.'";

    /// Echoes the file path line of the prompt back as the summary.
    pub const ECHO_PATH: &str =
        r#"printf '%s\n' "$2" | grep '^File path: ' | sed 's/^File path: /Summary of /'"#;

    pub const SLOW: &str = "exec sleep 10";

    pub const FAILING: &str = "echo 'quota exceeded' >&2; exit 1";
}

/// A temporary directory, optionally a git repository, with helpers to
/// populate it and run `index-md` inside it.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    bin_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            bin_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a fixture holding an initialized git repository.
    #[allow(dead_code)]
    pub fn git_repo() -> Self {
        let fixture = Self::new();
        fixture.git(&["init", "-q"]);
        fixture
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.write(path, content);
        self
    }

    /// Add a `.index-md.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".index-md.yaml", content)
    }

    /// Write (or overwrite) a file.
    pub fn write(&self, path: &str, content: &str) {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
    }

    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Run git in the fixture, panicking on failure.
    #[allow(dead_code)]
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args([
                "-c",
                "user.name=index-md tests",
                "-c",
                "user.email=tests@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Stage everything and commit.
    #[allow(dead_code)]
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    /// Write an executable fake summarizer outside the repository and
    /// return its path. `body` handles every call except `--version`.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn summarizer(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.path().join("fake-summarizer");
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then\n    echo 'fake-summarizer 1.0'\n    exit 0\nfi\n{}\n",
            body
        );
        std::fs::write(&path, script).expect("Failed to write summarizer");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make summarizer executable");
        path
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("index-md");
        cmd.current_dir(self.path()).env_remove("INDEX_MD_SUMMARIZER");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("src/a.py", "a = 1\n");
        assert_eq!(fixture.read("src/a.py"), "a = 1\n");
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        for config in [configs::KOREAN, configs::FAST_FAIL, configs::UNKNOWN_KEY] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML).is_err());
    }
}
