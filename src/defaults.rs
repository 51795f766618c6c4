//! Default values for repo-sync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Default settings document, looked up in the current directory.
///
/// Can be overridden with the `--settings` CLI flag. `.yaml` and `.yml`
/// documents are accepted too; the parser dispatches on the extension.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Seconds a `sleep` hook waits when configured without arguments.
pub const DEFAULT_SLEEP_SECONDS: f64 = 2.0;
