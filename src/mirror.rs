//! # Local Mirror Store
//!
//! Manages the on-disk staging clones that sit between a source repository
//! and its destination. Each configured repository stages into
//! `sync_folder/<key>` as a bare, checkout-less clone; that directory is the
//! only state the system persists.
//!
//! Whether a staging clone exists is determined structurally: the presence
//! of the `HEAD` marker inside the directory. There is no tracking table,
//! so a staging folder left behind by an interrupted first sync is simply
//! recovered by cloning into it.
//!
//! The staging clone is never force-updated. Updating happens through a
//! single fast-forward-only fetch of all heads; diverged source history
//! surfaces as an error and is resolved by removing the staging directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::git::GitRunner;

/// Outcome of ensuring a folder exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    AlreadyExists,
}

/// Outcome of a clone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    AlreadyCloned,
}

/// Per-clone details reported by `repo_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// URL of the `origin` remote.
    pub current_remote: String,
    /// Symbolic name of the checked-out (primary) branch.
    pub current_branch: String,
}

/// Create `path` (and any missing parents) when absent.
///
/// A pre-existing directory is the normal `AlreadyExists` outcome, never an
/// error.
pub fn ensure_folder(path: &Path) -> Result<FolderStatus> {
    if path.is_dir() {
        return Ok(FolderStatus::AlreadyExists);
    }
    fs::create_dir_all(path)?;
    Ok(FolderStatus::Created)
}

/// Total size in bytes of the files under `path`.
///
/// Unreadable entries are skipped; a missing directory reports zero.
pub fn directory_size(path: &Path) -> u64 {
    let mut total = 0u64;
    for entry in WalkDir::new(path).into_iter().flatten() {
        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                total += metadata.len();
            }
        }
    }
    total
}

/// The staging-clone store rooted at the configured `sync_folder`.
pub struct MirrorStore {
    git: Arc<dyn GitRunner>,
    base_dir: PathBuf,
}

impl MirrorStore {
    pub fn new(git: Arc<dyn GitRunner>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            git,
            base_dir: base_dir.into(),
        }
    }

    /// The configured staging root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Staging directory for a repository key.
    pub fn staging_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }

    /// Whether `path` holds a clone, determined by the `HEAD` marker.
    pub fn is_cloned(&self, path: &Path) -> bool {
        path.join("HEAD").exists()
    }

    /// Clone `url` into `path` as a bare, checkout-less staging clone.
    ///
    /// A no-op when the clone already exists. `branch` narrows the primary
    /// ref of the clone; the full ref set is still copied, so later pushes
    /// of other branches keep working.
    pub fn clone(&self, url: &str, path: &Path, branch: Option<&str>) -> Result<CloneOutcome> {
        if self.is_cloned(path) {
            log::debug!("staging clone already present at {}", path.display());
            return Ok(CloneOutcome::AlreadyCloned);
        }

        let path_arg = path.to_string_lossy();
        let mut args = vec!["clone", "--no-checkout", "--bare"];
        if let Some(branch) = branch {
            args.push("--branch");
            args.push(branch);
        }
        args.push(url);
        args.push(&path_arg);

        let output = self.git.run(&args, None)?;
        if !output.is_empty() {
            log::debug!("clone output: {}", output);
        }
        Ok(CloneOutcome::Cloned)
    }

    /// Fast-forward the staging clone's heads from `origin`.
    ///
    /// One fetch updates every head (`refs/heads/*:refs/heads/*`); without a
    /// leading `+` git refuses non-fast-forward updates, which surfaces as
    /// `NonFastForward`.
    pub fn fetch_fast_forward(&self, path: &Path) -> Result<String> {
        if !self.is_cloned(path) {
            return Err(Error::NotCloned {
                path: path.display().to_string(),
            });
        }

        match self
            .git
            .run(&["fetch", "origin", "refs/heads/*:refs/heads/*"], Some(path))
        {
            Ok(output) => Ok(output),
            Err(Error::GitCommand { stderr, .. }) if is_non_fast_forward(&stderr) => {
                Err(Error::NonFastForward {
                    path: path.display().to_string(),
                    message: stderr,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Best-effort recursive removal of a staging directory.
    ///
    /// Failures are logged at warn and swallowed; cleanup must never fail a
    /// sync that already completed.
    pub fn remove(&self, path: &Path) {
        match fs::remove_dir_all(path) {
            Ok(()) => log::info!("removed staging directory {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "failed to remove staging directory {}: {}",
                path.display(),
                e
            ),
        }
    }

    /// Report the remote URL and primary branch of a staging clone.
    pub fn repo_info(&self, path: &Path) -> Result<RepoInfo> {
        if !self.is_cloned(path) {
            return Err(Error::NotCloned {
                path: path.display().to_string(),
            });
        }

        let current_remote = self
            .git
            .run(&["config", "--get", "remote.origin.url"], Some(path))?;
        let current_branch = self
            .git
            .run(&["rev-parse", "--abbrev-ref", "HEAD"], Some(path))?;

        Ok(RepoInfo {
            current_remote,
            current_branch,
        })
    }
}

fn is_non_fast_forward(stderr: &str) -> bool {
    stderr.contains("non-fast-forward") || stderr.contains("[rejected]")
}
