//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-sync` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures and ensure
//!   type safety.
//!
//! The `Error` enum covers the failure scenarios of the sync engine:
//!
//! - Settings document problems (document-level and per-repo).
//! - Selection of a repository key that is not configured.
//! - Construction of a hook with an unrecognized name.
//! - Operations against a staging directory that is not a clone.
//! - Fast-forward fetches refused by the staging clone.
//! - Push failures (mirror or per-branch).
//! - Hook invocation failures.
//! - Git command execution failures.
//! - I/O errors.
//! - JSON and YAML parsing errors.
//!
//! Per-repo runtime errors (`NotCloned`, `NonFastForward`, `Push`, `Hook`,
//! `GitCommand`, `Io`) are captured into the per-repo sync outcome at the
//! orchestrator boundary and never abort a batch; document-level errors and
//! bad key/hook names surface before any sync work starts.

use thiserror::Error;

/// Main error type for repo-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A problem with the settings document.
    ///
    /// Raised for document-level issues (missing `sync_folder`, empty
    /// `repos`) and for per-repo entries that cannot be turned into a
    /// sync specification. Optionally carries a hint about how to fix it.
    #[error("Settings error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Settings {
        message: String,
        /// Optional hint for how to fix the settings issue
        hint: Option<String>,
    },

    /// A repository key was requested that does not exist in the settings.
    #[error("Unknown repository key: {key}")]
    UnknownRepo { key: String },

    /// A hook was configured with a name outside the known set.
    #[error("Unknown hook: {name}")]
    UnknownHook { name: String },

    /// A staging directory was expected to hold a clone but does not.
    ///
    /// Existence of a clone is structural: the `HEAD` marker inside the
    /// staging directory. A half-created folder without it triggers this.
    #[error("Not a cloned repository: {path}")]
    NotCloned { path: String },

    /// The staging clone refused a fast-forward update from the source.
    ///
    /// The staging clone is never force-updated; diverged source history
    /// must be resolved by removing the staging directory.
    #[error("Fast-forward fetch refused for {path}: {message}")]
    NonFastForward { path: String, message: String },

    /// A push to the destination repository failed.
    #[error("Push failed{}: {message}", branch.as_ref().map(|b| format!(" for branch '{}'", b)).unwrap_or_default())]
    Push {
        /// The branch being pushed, or `None` for a mirror push
        branch: Option<String>,
        message: String,
    },

    /// A hook failed during invocation.
    #[error("Hook '{name}' failed: {message}")]
    Hook { name: String, message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Build a settings error without a hint.
    pub fn settings(message: impl Into<String>) -> Self {
        Error::Settings {
            message: message.into(),
            hint: None,
        }
    }

    /// Build a settings error with a hint.
    pub fn settings_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::Settings {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
