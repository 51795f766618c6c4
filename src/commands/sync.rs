//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which mirrors every
//! configured repository from its source remote to its destination remote.
//!
//! ## Functionality
//!
//! - **Batch sync**: All repositories from the settings document, in
//!   configured order, one at a time.
//! - **Single sync**: `--repo KEY` restricts the run to one repository.
//! - **Interval mode**: `--interval SECS` keeps the process alive and
//!   repeats the sync in an endless loop.
//!
//! One repository's failure never aborts the batch: the outcome is
//! reported and the run continues, finishing with exit code 0. Settings
//! problems that affect the whole document (or the explicitly selected
//! repository) are fatal.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use repo_sync::defaults::DEFAULT_SETTINGS_FILE;
use repo_sync::output::OutputConfig;
use repo_sync::scheduler;
use repo_sync::settings::{RepoIssue, Settings};
use repo_sync::suggestions;
use repo_sync::sync::{SyncEngine, SyncOutcome};

/// Sync all configured repositories, or a single one by key
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the settings document (.json, .yaml or .yml).
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Sync only the repository with this key.
    #[arg(long, value_name = "KEY")]
    pub repo: Option<String>,

    /// Keep running, repeating the sync every SECS seconds.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

/// Execute the `sync` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.settings.exists() {
        return Err(suggestions::settings_not_found(&args.settings));
    }
    let settings = Settings::from_file(&args.settings)?;

    let (specs, issues) = match &args.repo {
        Some(key) => {
            if !settings.repos.contains_key(key) {
                let keys: Vec<&str> = settings.repos.keys().map(String::as_str).collect();
                return Err(suggestions::unknown_repo_key(key, &keys));
            }
            // A broken entry is fatal when it was asked for by name.
            (vec![settings.build_spec(key)?], Vec::new())
        }
        None => settings.build_specs(),
    };

    for issue in &issues {
        println!("{} Skipping {}: {}", out.err(), issue.key, issue.error);
    }

    let engine = SyncEngine::new(settings.sync_folder.clone());

    if let Some(secs) = args.interval {
        println!(
            "{} Syncing {} repositories every {}s; Ctrl-C to stop",
            out.scan(),
            specs.len(),
            secs
        );
        scheduler::run_forever(&engine, Duration::from_secs(secs), &specs);
    }

    let outcomes = scheduler::run_once(&engine, &specs);
    report(&out, &outcomes, &issues);

    Ok(())
}

/// Print one line per outcome plus a closing summary.
fn report(out: &OutputConfig, outcomes: &[SyncOutcome], issues: &[RepoIssue]) {
    let mut synced = 0;
    let mut failed = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                synced += 1;
                println!("{} {} ({})", out.ok(), outcome.key, report.action);
            }
            Err(error) => {
                failed += 1;
                println!("{} {}: {}", out.err(), outcome.key, error);
            }
        }
    }

    if failed == 0 && issues.is_empty() {
        println!("\n{} Synced {} repositories", out.ok(), synced);
    } else {
        println!(
            "\n{} {} synced, {} failed, {} skipped",
            out.warn(),
            synced,
            failed,
            issues.len()
        );
    }
}
