//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the
//! settings document without syncing anything.
//!
//! ## Functionality
//!
//! - **Document Validation**: Parses the settings file and checks the
//!   top-level requirements (`sync_folder`, non-empty `repos`).
//! - **Repository Validation**: Builds every repository spec and reports
//!   each one that is broken (missing URLs, bad keys, unknown hooks).
//! - **Warnings**: Flags unresolved URL placeholders, `force_push` without
//!   a branch list, and hooks attached to unknown extension points.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use repo_sync::defaults::DEFAULT_SETTINGS_FILE;
use repo_sync::error::Error;
use repo_sync::hooks;
use repo_sync::output::OutputConfig;
use repo_sync::settings::{parse_document, Settings};
use repo_sync::suggestions;
use repo_sync::urls;

/// Validate the settings document without syncing anything
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the settings document (.json, .yaml or .yml).
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// Reports every problem it can find rather than stopping at the first
/// one, so a whole settings document can be fixed in a single pass.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating settings: {}",
        out.scan(),
        args.settings.display()
    );

    if !args.settings.exists() {
        return Err(suggestions::settings_not_found(&args.settings));
    }

    let content = std::fs::read_to_string(&args.settings)?;
    let doc = match parse_document(&args.settings, &content) {
        Ok(doc) => {
            println!("{} Settings file parsed successfully", out.ok());
            doc
        }
        Err(e) => {
            println!("{} Settings parsing failed: {}", out.err(), e);
            return Err(anyhow::anyhow!("Settings parsing failed: {}", e));
        }
    };

    let settings = match Settings::from_doc(doc) {
        Ok(settings) => settings,
        Err(e) => {
            println!("{} {}", out.err(), e);
            return Err(anyhow::anyhow!("Settings validation failed"));
        }
    };

    println!("\n{} Settings Summary:", out.glyph("📊", "[INFO]"));
    println!("   Sync folder: {}", settings.sync_folder.display());
    println!("   Repositories: {}", settings.repos.len());

    let mut has_errors = false;
    let mut has_warnings = false;

    println!("\n{} Checking repositories...", out.scan());
    for key in settings.repos.keys() {
        let repo = match settings.repo_settings(key) {
            Ok(repo) => repo,
            Err(e) => {
                println!("{} {}: {}", out.err(), key, e);
                has_errors = true;
                continue;
            }
        };

        match settings.build_spec(key) {
            Ok(spec) => {
                println!("{} {}", out.ok(), key);

                for (field, url) in [("from_repo_url", &spec.from_url), ("to_repo_url", &spec.to_url)] {
                    for placeholder in urls::unresolved_placeholders(url) {
                        println!(
                            "{} {}: unresolved placeholder '${}' in {} (variable not set?)",
                            out.warn(),
                            key,
                            placeholder,
                            field
                        );
                        has_warnings = true;
                    }
                }

                if spec.force_push && spec.branches.is_none() {
                    println!(
                        "{} {}: 'force_push' has no effect without a 'branches' list",
                        out.warn(),
                        key
                    );
                    has_warnings = true;
                }

                for point in repo.hooks.keys() {
                    if !hooks::EXTENSION_POINTS.contains(&point.as_str()) {
                        let did_you_mean = suggestions::similar_extension_point(point)
                            .map(|s| format!(" (did you mean '{}'?)", s))
                            .unwrap_or_default();
                        println!(
                            "{} {}: hooks for unknown extension point '{}' will never run{}",
                            out.warn(),
                            key,
                            point,
                            did_you_mean
                        );
                        has_warnings = true;
                    }
                }
            }
            Err(e) => {
                let did_you_mean = match &e {
                    Error::UnknownHook { name } => suggestions::similar_hook_name(name)
                        .map(|s| format!(" (did you mean '{}'?)", s))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                println!("{} {}: {}{}", out.err(), key, e, did_you_mean);
                has_errors = true;
            }
        }
    }

    println!("\n{} Validation Result:", out.glyph("🎯", "[RESULT]"));

    if has_errors {
        println!("{} Settings have errors that must be fixed", out.err());
        return Err(anyhow::anyhow!("Settings validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Settings have warnings (strict mode enabled)",
            out.err()
        );
        return Err(anyhow::anyhow!("Settings validation failed in strict mode"));
    }

    if has_warnings {
        println!("{} Settings are valid but have warnings", out.warn());
        println!(
            "\n{} Tip: Use --strict to treat warnings as errors",
            out.tip()
        );
    } else {
        println!("{} Settings are valid", out.ok());
    }

    Ok(())
}
