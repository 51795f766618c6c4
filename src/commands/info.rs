//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which displays the
//! configured repositories and the state of their staging clones.
//!
//! ## Functionality
//!
//! - **Settings Overview**: Displays the settings path, sync folder and
//!   repository count.
//! - **Repository Information**: Lists each repository with its (redacted)
//!   URLs, sync options and hook count.
//! - **Staging State**: Reports whether the staging clone exists, its size
//!   on disk, and what `origin` and primary branch it carries.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_sync::defaults::DEFAULT_SETTINGS_FILE;
use repo_sync::mirror::directory_size;
use repo_sync::output::OutputConfig;
use repo_sync::settings::Settings;
use repo_sync::suggestions;
use repo_sync::sync::SyncEngine;
use repo_sync::urls;

/// Show the configured repositories and their staging state
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the settings document (.json, .yaml or .yml).
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Show only the repository with this key.
    #[arg(long, value_name = "KEY")]
    pub repo: Option<String>,
}

/// Execute the `info` command.
///
/// Loads the settings document and reports each configured repository
/// together with the on-disk state of its staging clone.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: InfoArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.settings.exists() {
        return Err(suggestions::settings_not_found(&args.settings));
    }
    let settings = Settings::from_file(&args.settings)?;

    if let Some(key) = &args.repo {
        if !settings.repos.contains_key(key) {
            let keys: Vec<&str> = settings.repos.keys().map(String::as_str).collect();
            return Err(suggestions::unknown_repo_key(key, &keys));
        }
    }

    println!(
        "{} Settings: {}",
        out.glyph("📋", "[INFO]"),
        args.settings.display()
    );
    println!("\nSync folder: {}", settings.sync_folder.display());

    let selected: Vec<&String> = match &args.repo {
        Some(key) => settings.repos.keys().filter(|k| *k == key).collect(),
        None => settings.repos.keys().collect(),
    };
    println!("Repositories: {}", selected.len());

    let engine = SyncEngine::new(settings.sync_folder.clone());
    let store = engine.store();

    for key in selected {
        let spec = match settings.build_spec(key) {
            Ok(spec) => spec,
            Err(e) => {
                println!("  • {} (invalid): {}", key, e);
                continue;
            }
        };

        println!(
            "  • {}: {} -> {}",
            key,
            urls::redact(&spec.from_url),
            urls::redact(&spec.to_url)
        );

        let mut options = Vec::new();
        match &spec.branches {
            Some(branches) => options.push(format!("branches: {}", branches.join(", "))),
            None => options.push("all refs (mirror)".to_string()),
        }
        if spec.force_push {
            options.push("force push".to_string());
        }
        if spec.delete_after_sync {
            options.push("delete after sync".to_string());
        }
        let hook_count: usize = spec.hooks.values().map(Vec::len).sum();
        if hook_count > 0 {
            options.push(format!("{} hooks", hook_count));
        }
        println!("      {}", options.join(", "));

        let staging = store.staging_path(key);
        if store.is_cloned(&staging) {
            let size = format_size(directory_size(&staging));
            match store.repo_info(&staging) {
                Ok(info) => println!(
                    "      staging: cloned ({}, origin {}, branch {})",
                    size,
                    urls::redact(&info.current_remote),
                    info.current_branch
                ),
                Err(e) => {
                    log::debug!("repo_info failed for {}: {}", staging.display(), e);
                    println!("      staging: cloned ({})", size);
                }
            }
        } else if staging.is_dir() {
            println!("      staging: folder present but not a clone");
        } else {
            println!("      staging: not synced yet");
        }
    }

    Ok(())
}

/// Human-readable byte count.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}
