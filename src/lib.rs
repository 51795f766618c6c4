//! # Repo Sync Library
//!
//! This library provides the core functionality for mirroring git
//! repositories between remotes. It is designed to be used by the
//! `repo-sync` command-line tool but can also be embedded in other
//! applications that need to keep repository mirrors up to date.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use repo_sync::settings::{parse_document, Settings};
//!
//! let content = r#"{
//!     "sync_folder": "/var/lib/repo-sync",
//!     "repos": {
//!         "my-service": {
//!             "from_repo_url": "https://github.com/org/service.git",
//!             "to_repo_url": "git@mirror.example.com:org/service.git"
//!         }
//!     }
//! }"#;
//!
//! let doc = parse_document(Path::new("settings.json"), content).unwrap();
//! let settings = Settings::from_doc(doc).unwrap();
//!
//! let (specs, issues) = settings.build_specs();
//! assert!(issues.is_empty());
//! assert_eq!(specs[0].key, "my-service");
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Settings (`settings`)**: The schema for the settings document — a
//!   `sync_folder` plus an ordered map of repositories — and its validation
//!   into per-repository [`settings::SyncSpec`] values.
//! - **Mirror Store (`mirror`)**: Bare, no-checkout staging clones under the
//!   sync folder, one directory per repository key.
//! - **Push Strategies (`push`)**: Full `--mirror` pushes, or per-branch
//!   pushes when a repository narrows the sync to a branch list.
//! - **Hooks (`hooks`)**: Small user-configured actions (`sleep`, `input`,
//!   `print`) that run at fixed points of the sync lifecycle.
//! - **Engine and Scheduler (`sync`, `scheduler`)**: The per-repository
//!   orchestrator and the sequential batch driver around it.
//!
//! ## Execution Flow
//!
//! For each configured repository the engine runs these steps:
//!
//! 1.  **Hooks**: Run the `pre_sync` hooks.
//! 2.  **Staging**: Ensure the staging directory for the repository key.
//! 3.  **Clone or fetch**: Create the bare clone on first contact, or bring
//!     an existing one up to date with a fast-forward fetch.
//! 4.  **Hooks**: Run the `pre_push` hooks.
//! 5.  **Push**: Push everything (`--mirror`) or the configured branches.
//! 6.  **Hooks**: Run the `post_sync` hooks.
//! 7.  **Cleanup**: Remove the staging clone when `delete_after_sync` is
//!     set, whether the steps above succeeded or not.
//!
//! Failures stay contained: one repository's error is captured into its
//! outcome and the batch moves on to the next one.

pub mod defaults;
pub mod error;
pub mod git;
pub mod hooks;
pub mod mirror;
pub mod output;
pub mod push;
pub mod scheduler;
pub mod settings;
pub mod suggestions;
pub mod sync;
pub mod urls;

#[cfg(test)]
mod urls_proptest;
