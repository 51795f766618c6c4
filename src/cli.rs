//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::commands;

/// Repo Sync - Mirror git repositories between remotes
#[derive(Parser, Debug)]
#[command(name = "repo-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync all configured repositories, or a single one by key
    Sync(commands::sync::SyncArgs),

    /// Validate the settings document without syncing anything
    Validate(commands::validate::ValidateArgs),

    /// Show the configured repositories and their staging state
    Info(commands::info::InfoArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // The flag sets the default filter; RUST_LOG still wins when set.
        env_logger::Builder::from_env(Env::default().default_filter_or(&self.log_level)).init();

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Info(args) => commands::info::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
