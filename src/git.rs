//! # Git Command Runner
//!
//! This module wraps execution of the system `git` binary behind the
//! `GitRunner` trait so the engine never talks to `std::process` directly.
//!
//! Using the system git command automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! The trait-based design allows the runner to be replaced with a scripted
//! mock in tests, so clone/fetch/push logic can be exercised without real
//! repositories or network access.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Interface for running git commands.
///
/// Implementations run `git` with the given arguments, optionally in a
/// working directory, and return trimmed stdout on success.
pub trait GitRunner: Send + Sync {
    /// Run `git` with `args` in `cwd` (or the process working directory).
    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<String>;
}

/// The default `GitRunner` that shells out to the system `git` binary.
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        let command = args.join(" ");
        log::debug!("running: git {}", command);

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| Error::GitCommand {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitCommand {
                command,
                stderr: describe_failure(&stderr),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Expand common auth failures into an actionable message.
fn describe_failure(stderr: &str) -> String {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        format!(
            "Authentication failed. Make sure you have access to the repository.\n\
            For private repos, ensure you have:\n\
            - SSH key added to ssh-agent\n\
            - Git credentials configured\n\
            - Personal access token set up\n\
            Error: {}",
            stderr
        )
    } else {
        stderr.to_string()
    }
}
