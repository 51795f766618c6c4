//! # Settings
//!
//! Parsing and validation of the settings document that drives a sync run.
//! The document is JSON by default; files ending in `.yaml`/`.yml` are
//! parsed as YAML. Repositories are kept in an ordered map so sync order is
//! the configured order.
//!
//! Parsing happens in two stages with different blast radii:
//!
//! 1. **Document level** (`SettingsDoc` → `Settings`): an unreadable file,
//!    malformed JSON/YAML, a missing `sync_folder` or an empty `repos` map
//!    is fatal — nothing runs.
//! 2. **Per repository** (`Settings::build_specs`): each raw entry is
//!    converted to a [`SyncSpec`] independently. A bad entry (missing URL,
//!    empty branch list, invalid hook) is reported as a [`RepoIssue`] and
//!    excluded; the remaining repositories still sync.
//!
//! URL token substitution (`$GITHUB_TOKEN`, `$GITLAB_TOKEN`) is applied
//! while building specs, so a `SyncSpec` always carries prepared URLs.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::hooks::Hook;
use crate::urls;

/// Raw settings document, straight from disk.
///
/// Top-level fields are optional here so their absence can be reported as a
/// validation error with a hint instead of a bare deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsDoc {
    /// Root directory for staging clones.
    #[serde(default)]
    pub sync_folder: Option<String>,
    /// Configured repositories, in sync order. Entries stay raw so one bad
    /// repository cannot fail the whole document.
    #[serde(default)]
    pub repos: IndexMap<String, Value>,
}

/// One repository entry of the settings document.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSettings {
    #[serde(default)]
    pub from_repo_url: Option<String>,
    #[serde(default)]
    pub to_repo_url: Option<String>,
    /// Branches to push. Absent means mirror mode.
    #[serde(default)]
    pub branches: Option<Vec<String>>,
    #[serde(default)]
    pub force_push: bool,
    #[serde(default)]
    pub delete_after_sync: bool,
    /// Accepted for compatibility; carried but not enforced.
    #[serde(default = "default_check_base_name")]
    pub check_base_name: bool,
    /// Extension point name → ordered hook entries.
    #[serde(default)]
    pub hooks: IndexMap<String, Vec<HookConfig>>,
}

fn default_check_base_name() -> bool {
    true
}

/// A hook entry: either a bare name or the full form with arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookConfig {
    /// Bare hook name with default arguments, e.g. `"sleep"`.
    Name(String),
    /// Full form, e.g. `{"name": "sleep", "kwargs": {"seconds": 1.5}}`.
    Full {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
        #[serde(default)]
        kwargs: IndexMap<String, Value>,
    },
}

impl HookConfig {
    /// The configured hook name.
    pub fn name(&self) -> &str {
        match self {
            HookConfig::Name(name) => name,
            HookConfig::Full { name, .. } => name,
        }
    }

    /// Construct the hook this entry describes.
    pub fn build(&self) -> Result<Hook> {
        match self {
            HookConfig::Name(name) => Hook::create(name, &[], &IndexMap::new()),
            HookConfig::Full { name, args, kwargs } => Hook::create(name, args, kwargs),
        }
    }
}

/// One configured repository pairing, ready to sync.
///
/// Constructed once from settings, immutable afterwards. URLs are already
/// token-substituted.
#[derive(Debug, Clone)]
pub struct SyncSpec {
    /// Unique identifier; also the staging directory name.
    pub key: String,
    pub from_url: String,
    pub to_url: String,
    /// Branches to push; `None` selects mirror mode, `Some` is non-empty.
    pub branches: Option<Vec<String>>,
    pub force_push: bool,
    pub delete_after_sync: bool,
    /// Carried for compatibility, not enforced.
    pub check_base_name: bool,
    /// Extension point name → ordered hooks.
    pub hooks: IndexMap<String, Vec<Hook>>,
}

impl SyncSpec {
    /// Build a spec from a typed repository entry.
    pub fn from_settings(key: &str, repo: &RepoSettings) -> Result<SyncSpec> {
        validate_key(key)?;

        let from_url = required_url("from_repo_url", repo.from_repo_url.as_deref())?;
        let to_url = required_url("to_repo_url", repo.to_repo_url.as_deref())?;

        if let Some(branches) = &repo.branches {
            if branches.is_empty() {
                return Err(Error::settings_with_hint(
                    "'branches' must not be empty when present",
                    "remove the key to mirror all refs, or list at least one branch",
                ));
            }
            if branches.iter().any(|branch| branch.is_empty()) {
                return Err(Error::settings("branch names must not be empty"));
            }
        }

        let mut hooks = IndexMap::new();
        for (point, configs) in &repo.hooks {
            let mut built = Vec::with_capacity(configs.len());
            for config in configs {
                built.push(config.build()?);
            }
            hooks.insert(point.clone(), built);
        }

        Ok(SyncSpec {
            key: key.to_string(),
            from_url: urls::prepare_url(&from_url),
            to_url: urls::prepare_url(&to_url),
            branches: repo.branches.clone(),
            force_push: repo.force_push,
            delete_after_sync: repo.delete_after_sync,
            check_base_name: repo.check_base_name,
            hooks,
        })
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::settings("repository key must not be empty"));
    }
    if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(Error::settings_with_hint(
            format!("repository key '{}' is not a valid staging directory name", key),
            "keys become directory names under sync_folder",
        ));
    }
    Ok(())
}

fn required_url(field: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        Some(_) => Err(Error::settings(format!("'{}' must not be empty", field))),
        None => Err(Error::settings_with_hint(
            format!("missing '{}'", field),
            format!("add '{}' to the repo entry", field),
        )),
    }
}

/// A per-repository settings problem.
///
/// The repository it names is excluded from the run; the rest proceed.
#[derive(Debug)]
pub struct RepoIssue {
    pub key: String,
    pub error: Error,
}

/// Validated settings: the staging root plus raw repository entries.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sync_folder: PathBuf,
    pub repos: IndexMap<String, Value>,
}

impl Settings {
    /// Load and validate a settings file, dispatching on its extension.
    pub fn from_file(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)?;
        let doc = parse_document(path, &content)?;
        Settings::from_doc(doc)
    }

    /// Validate the document-level requirements.
    pub fn from_doc(doc: SettingsDoc) -> Result<Settings> {
        let sync_folder = match doc.sync_folder {
            Some(folder) if !folder.is_empty() => PathBuf::from(folder),
            Some(_) => return Err(Error::settings("'sync_folder' must not be empty")),
            None => {
                return Err(Error::settings_with_hint(
                    "missing 'sync_folder'",
                    "add a top-level 'sync_folder' path for staging clones",
                ));
            }
        };

        if doc.repos.is_empty() {
            return Err(Error::settings_with_hint(
                "no repositories configured",
                "add entries under the top-level 'repos' mapping",
            ));
        }

        Ok(Settings {
            sync_folder,
            repos: doc.repos,
        })
    }

    /// Typed view of one repository entry.
    pub fn repo_settings(&self, key: &str) -> Result<RepoSettings> {
        let raw = self.repos.get(key).ok_or_else(|| Error::UnknownRepo {
            key: key.to_string(),
        })?;
        serde_json::from_value(raw.clone())
            .map_err(|e| Error::settings(format!("invalid repository entry: {}", e)))
    }

    /// Build the spec for one repository key.
    pub fn build_spec(&self, key: &str) -> Result<SyncSpec> {
        let repo = self.repo_settings(key)?;
        SyncSpec::from_settings(key, &repo)
    }

    /// Build every spec, isolating per-repository problems.
    ///
    /// Returns the specs that built cleanly (in configured order) plus one
    /// issue per excluded repository.
    pub fn build_specs(&self) -> (Vec<SyncSpec>, Vec<RepoIssue>) {
        let mut specs = Vec::new();
        let mut issues = Vec::new();

        for key in self.repos.keys() {
            match self.build_spec(key) {
                Ok(spec) => specs.push(spec),
                Err(error) => issues.push(RepoIssue {
                    key: key.clone(),
                    error,
                }),
            }
        }

        (specs, issues)
    }
}

/// Parse a settings document: YAML for `.yaml`/`.yml` files, JSON otherwise.
pub fn parse_document(path: &Path, content: &str) -> Result<SettingsDoc> {
    let extension = path.extension().and_then(|e| e.to_str());
    if matches!(extension, Some("yaml") | Some("yml")) {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}
