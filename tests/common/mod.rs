//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files. The git helpers build small local
//! repositories so syncs run entirely against the filesystem, with no
//! network access.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new();
//!     let src = fixture.source_repo("src");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;
    pub use serde_json::json;

    #[allow(unused_imports)]
    pub use super::docs;
    #[allow(unused_imports)]
    pub use super::{amend_commit, commit_file, create_branch, git, resolve_ref};
    pub use super::TestFixture;
}

/// Canned settings documents for testing.
#[allow(dead_code)]
pub mod docs {
    /// Minimal valid settings; the URLs are placeholders that validate and
    /// info never contact.
    pub const MINIMAL: &str = r#"{
  "sync_folder": "/var/lib/repo-sync",
  "repos": {
    "my-service": {
      "from_repo_url": "https://example.com/src.git",
      "to_repo_url": "https://example.com/dst.git"
    }
  }
}"#;

    /// Truncated JSON for parse-error testing.
    pub const INVALID_JSON: &str = r#"{ "sync_folder": "/var/lib/repo-sync", "repos": "#;

    /// A document missing the required sync_folder.
    pub const MISSING_SYNC_FOLDER: &str = r#"{
  "repos": {
    "my-service": {
      "from_repo_url": "https://example.com/src.git",
      "to_repo_url": "https://example.com/dst.git"
    }
  }
}"#;
}

/// Run a git command in `cwd`, panicking on failure.
///
/// Returns trimmed stdout.
#[allow(dead_code)]
pub fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} in {} failed: {}",
        args,
        cwd.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Resolve `reference` in `repo` to a commit hash, `None` when missing.
#[allow(dead_code)]
pub fn resolve_ref(repo: &Path, reference: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--verify", reference])
        .current_dir(repo)
        .output()
        .expect("failed to run git");
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// Write `file`, stage it, and commit with a fixed identity.
#[allow(dead_code)]
pub fn commit_file(repo: &Path, file: &str, content: &str, message: &str) {
    std::fs::write(repo.join(file), content).expect("failed to write file");
    git(repo, &["add", file]);
    git(
        repo,
        &[
            "-c",
            "user.email=ci@example.com",
            "-c",
            "user.name=CI",
            "commit",
            "-m",
            message,
        ],
    );
}

/// Rewrite the tip commit so the branch diverges from any mirror of it.
#[allow(dead_code)]
pub fn amend_commit(repo: &Path, file: &str, content: &str) {
    std::fs::write(repo.join(file), content).expect("failed to write file");
    git(repo, &["add", file]);
    git(
        repo,
        &[
            "-c",
            "user.email=ci@example.com",
            "-c",
            "user.name=CI",
            "commit",
            "--amend",
            "-m",
            "amended",
        ],
    );
}

/// Create a branch at the current tip.
#[allow(dead_code)]
pub fn create_branch(repo: &Path, name: &str) {
    git(repo, &["branch", name]);
}

/// A test fixture around a temporary directory: settings document, local
/// source/destination repositories, and a staging folder, all side by side.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `settings.json` with the given document.
    pub fn with_settings(self, doc: &Value) -> Self {
        let content = serde_json::to_string_pretty(doc).expect("settings doc serializes");
        self.temp_dir
            .child("settings.json")
            .write_str(&content)
            .expect("Failed to write settings file");
        self
    }

    /// Write a raw settings document under the given file name.
    #[allow(dead_code)]
    pub fn with_settings_file(self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child(name)
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.temp_dir.path().join("settings.json")
    }

    /// The staging root the settings documents in these tests point at.
    #[allow(dead_code)]
    pub fn sync_folder(&self) -> PathBuf {
        self.temp_dir.path().join("mirrors")
    }

    /// Create a source repository with one commit on `main`.
    #[allow(dead_code)]
    pub fn source_repo(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::create_dir_all(&path).expect("failed to create repo directory");
        git(&path, &["init", "-b", "main"]);
        commit_file(&path, "README.md", &format!("# {}\n", name), "initial commit");
        path
    }

    /// Create a bare destination repository.
    #[allow(dead_code)]
    pub fn dest_repo(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::create_dir_all(&path).expect("failed to create repo directory");
        git(&path, &["init", "--bare"]);
        path
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// The caller's logging and color environment is stripped so output
    /// assertions stay deterministic.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-sync");
        cmd.current_dir(self.path());
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("NO_COLOR");
        cmd.env_remove("CLICOLOR");
        cmd.env_remove("CLICOLOR_FORCE");
        cmd
    }

    /// A `sync` command pointed at this fixture's settings, colors off.
    #[allow(dead_code)]
    pub fn sync_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--color")
            .arg("never")
            .arg("sync")
            .arg("--settings")
            .arg(self.settings_path());
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
    use serde_json::json;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_settings() {
        let fixture = TestFixture::new().with_settings(&json!({
            "sync_folder": "/tmp/mirrors",
            "repos": {}
        }));
        assert!(fixture.settings_path().exists());
    }

    #[test]
    fn test_canned_docs_parse_as_expected() {
        serde_json::from_str::<serde_json::Value>(docs::MINIMAL).expect("MINIMAL should parse");
        serde_json::from_str::<serde_json::Value>(docs::MISSING_SYNC_FOLDER)
            .expect("MISSING_SYNC_FOLDER should parse");
        assert!(serde_json::from_str::<serde_json::Value>(docs::INVALID_JSON).is_err());
    }
}
