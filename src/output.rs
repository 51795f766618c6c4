//! # Output Configuration
//!
//! Controls the appearance of CLI output based on terminal capabilities and
//! user preferences. Log lines go through `env_logger`; this module only
//! covers the human-facing summary lines the commands print.
//!
//! ## Respecting User Preferences
//!
//! The following environment variables and flags are honoured:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

/// Output configuration for controlling colors and status glyphs.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and glyphs should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        // (https://no-color.org/)
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Use console crate's detection for TTY and color support
        console::Term::stdout().features().colors_supported()
    }

    /// Returns `symbol` when colors are enabled, `plain` otherwise.
    pub fn glyph<'a>(&self, symbol: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            symbol
        } else {
            plain
        }
    }

    /// Status glyph for a successful step.
    pub fn ok(&self) -> &'static str {
        self.glyph("✅", "[OK]")
    }

    /// Status glyph for a failed step.
    pub fn err(&self) -> &'static str {
        self.glyph("❌", "[ERROR]")
    }

    /// Status glyph for a non-fatal warning.
    pub fn warn(&self) -> &'static str {
        self.glyph("⚠️", "[WARN]")
    }

    /// Status glyph for an inspection in progress.
    pub fn scan(&self) -> &'static str {
        self.glyph("🔍", "[SCAN]")
    }

    /// Status glyph for a follow-up tip.
    pub fn tip(&self) -> &'static str {
        self.glyph("💡", "[TIP]")
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
