//! # Hooks
//!
//! Lifecycle hooks run around each repository sync. The settings document
//! attaches ordered hook lists to named extension points; the sync engine
//! invokes those points at fixed spots in the per-repo lifecycle.
//!
//! ## Key Components
//!
//! - **`Hook`**: the closed set of supported hooks. A hook is constructed
//!   once from its settings entry (`Hook::create`) and invoked with no
//!   arguments during a sync. Unknown hook names are rejected at
//!   construction, so a misconfigured hook can never surface mid-sync.
//!
//! - **`run_hooks`**: the pipeline that invokes every hook configured for an
//!   extension point, in order. The first failing hook stops the point and
//!   fails the repository being synced; an absent or empty point is a no-op.
//!
//! ## Extension points
//!
//! - `pre_sync` — before the staging folder is ensured.
//! - `pre_push` — after the staging clone is up to date, before pushing.
//! - `post_sync` — after a successful push, before cleanup.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use indexmap::IndexMap;
use serde_json::Value;

use crate::defaults;
use crate::error::{Error, Result};

/// Extension points invoked by the sync engine, in lifecycle order.
pub const EXTENSION_POINTS: &[&str] = &["pre_sync", "pre_push", "post_sync"];

/// Names accepted by `Hook::create`.
pub const HOOK_NAMES: &[&str] = &["sleep", "input", "print"];

/// A lifecycle hook attached to an extension point.
#[derive(Debug, Clone, PartialEq)]
pub enum Hook {
    /// Block the sync for a number of seconds.
    Sleep { seconds: f64 },
    /// Prompt on the terminal and wait for one line of input.
    Input { message: Option<String> },
    /// Write a message to stdout.
    Print { message: String },
}

impl Hook {
    /// Translate a settings entry (name + positional and keyword arguments)
    /// into a hook.
    ///
    /// - `sleep`: optional `seconds` (number, finite, non-negative; default
    ///   2).
    /// - `input`: optional `message` (string).
    /// - `print`: required `message` (string).
    ///
    /// An argument supplied both positionally and by keyword, or any surplus
    /// argument, is a settings error. Unknown names construct nothing.
    pub fn create(name: &str, args: &[Value], kwargs: &IndexMap<String, Value>) -> Result<Hook> {
        let mut reader = ArgReader::new(name, args, kwargs);
        let hook = match name {
            "sleep" => {
                let seconds = match reader.take("seconds")? {
                    Some(value) => number(name, "seconds", value)?,
                    None => defaults::DEFAULT_SLEEP_SECONDS,
                };
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(Error::settings(format!(
                        "hook 'sleep': 'seconds' must be finite and non-negative, got {}",
                        seconds
                    )));
                }
                Hook::Sleep { seconds }
            }
            "input" => {
                let message = match reader.take("message")? {
                    Some(value) => Some(string(name, "message", value)?),
                    None => None,
                };
                Hook::Input { message }
            }
            "print" => {
                let message = match reader.take("message")? {
                    Some(value) => string(name, "message", value)?,
                    None => {
                        return Err(Error::settings_with_hint(
                            "hook 'print': required argument 'message' is missing",
                            "pass it positionally or as the 'message' keyword",
                        ));
                    }
                };
                Hook::Print { message }
            }
            _ => {
                return Err(Error::UnknownHook {
                    name: name.to_string(),
                });
            }
        };
        reader.finish()?;
        Ok(hook)
    }

    /// The registry name of this hook.
    pub fn name(&self) -> &'static str {
        match self {
            Hook::Sleep { .. } => "sleep",
            Hook::Input { .. } => "input",
            Hook::Print { .. } => "print",
        }
    }

    /// Invoke the hook, returning its value (if it produces one).
    ///
    /// All failures are reported as `Error::Hook` carrying this hook's name.
    pub fn invoke(&self) -> Result<Option<String>> {
        match self {
            Hook::Sleep { seconds } => {
                log::debug!("sleeping for {}s", seconds);
                thread::sleep(Duration::from_secs_f64(*seconds));
                Ok(None)
            }
            Hook::Input { message } => {
                let mut prompt = dialoguer::Input::<String>::new().allow_empty(true);
                if let Some(message) = message {
                    prompt = prompt.with_prompt(message.as_str());
                }
                let line = prompt.interact_text().map_err(|e| Error::Hook {
                    name: "input".to_string(),
                    message: e.to_string(),
                })?;
                Ok(Some(line))
            }
            Hook::Print { message } => {
                let mut stdout = io::stdout();
                writeln!(stdout, "{}", message)
                    .and_then(|()| stdout.flush())
                    .map_err(|e| Error::Hook {
                        name: "print".to_string(),
                        message: e.to_string(),
                    })?;
                Ok(None)
            }
        }
    }
}

/// Invoke every hook configured for `point`, in order.
///
/// An absent or empty point succeeds without doing anything. The first hook
/// failure is returned immediately; later hooks at the point do not run.
/// Returned hook values are logged at debug level and otherwise ignored.
pub fn run_hooks(point: &str, hooks: &IndexMap<String, Vec<Hook>>) -> Result<()> {
    let configured = match hooks.get(point) {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(()),
    };

    for (index, hook) in configured.iter().enumerate() {
        log::info!(
            "running hook {} ({}/{}) at {}",
            hook.name(),
            index + 1,
            configured.len(),
            point
        );
        if let Some(value) = hook.invoke()? {
            log::debug!("hook {} returned: {}", hook.name(), value);
        }
    }
    Ok(())
}

/// Reads hook arguments with call semantics: each parameter may come from
/// the next positional slot or its keyword, but not both; anything left
/// over is an error.
struct ArgReader<'a> {
    hook: &'a str,
    args: &'a [Value],
    kwargs: &'a IndexMap<String, Value>,
    consumed_positional: usize,
    consumed_keys: Vec<&'a str>,
    parameters: Vec<&'a str>,
}

impl<'a> ArgReader<'a> {
    fn new(hook: &'a str, args: &'a [Value], kwargs: &'a IndexMap<String, Value>) -> Self {
        Self {
            hook,
            args,
            kwargs,
            consumed_positional: 0,
            consumed_keys: Vec::new(),
            parameters: Vec::new(),
        }
    }

    fn take(&mut self, parameter: &'a str) -> Result<Option<&'a Value>> {
        self.parameters.push(parameter);
        let positional = self.args.get(self.consumed_positional);
        let keyword = self.kwargs.get(parameter);

        match (positional, keyword) {
            (Some(_), Some(_)) => Err(Error::settings(format!(
                "hook '{}': argument '{}' given both positionally and as keyword",
                self.hook, parameter
            ))),
            (Some(value), None) => {
                self.consumed_positional += 1;
                Ok(Some(value))
            }
            (None, Some(value)) => {
                self.consumed_keys.push(parameter);
                Ok(Some(value))
            }
            (None, None) => Ok(None),
        }
    }

    fn finish(self) -> Result<()> {
        if self.args.len() > self.consumed_positional {
            return Err(Error::settings(format!(
                "hook '{}': too many positional arguments (expected at most {}, got {})",
                self.hook,
                self.parameters.len(),
                self.args.len()
            )));
        }
        for key in self.kwargs.keys() {
            if !self.consumed_keys.contains(&key.as_str()) {
                return Err(Error::settings_with_hint(
                    format!("hook '{}': unexpected keyword argument '{}'", self.hook, key),
                    format!("accepted keywords: {}", self.parameters.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

fn number(hook: &str, parameter: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        Error::settings(format!(
            "hook '{}': '{}' must be a number, got {}",
            hook, parameter, value
        ))
    })
}

fn string(hook: &str, parameter: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            Error::settings(format!(
                "hook '{}': '{}' must be a string, got {}",
                hook, parameter, value
            ))
        })
}
