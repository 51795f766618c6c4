//! # Push Strategy
//!
//! Decides how a staged repository reaches its destination and executes
//! that decision. A repository without a configured branch list is pushed
//! as a full mirror (`git push <url> --mirror`); a configured list pushes
//! each branch individually, optionally with `--force`.
//!
//! Branch pushes are independent of each other: a failing branch is logged
//! and the remaining branches are still attempted, then the first failure
//! is returned. There are no retries at this layer.

use std::path::Path;

use crate::error::{Error, Result};
use crate::git::GitRunner;
use crate::settings::SyncSpec;
use crate::urls;

/// How a staged repository is pushed to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStrategy {
    /// One `git push --mirror`, replicating the full ref set.
    Mirror,
    /// One push per listed branch, in order.
    Branches { branches: Vec<String>, force: bool },
}

impl PushStrategy {
    /// Select the strategy for a sync specification.
    ///
    /// Mirror mode iff no branch list is configured. `force_push` only
    /// applies to branch pushes; a mirror push already replaces the
    /// destination refs.
    pub fn from_spec(spec: &SyncSpec) -> Self {
        match &spec.branches {
            None => PushStrategy::Mirror,
            Some(branches) => PushStrategy::Branches {
                branches: branches.clone(),
                force: spec.force_push,
            },
        }
    }

    /// Execute the strategy from the staging clone at `staging`.
    pub fn execute(&self, git: &dyn GitRunner, to_url: &str, staging: &Path) -> Result<()> {
        match self {
            PushStrategy::Mirror => {
                log::info!("pushing mirror to {}", urls::redact(to_url));
                let output = git
                    .run(&["push", to_url, "--mirror"], Some(staging))
                    .map_err(|e| Error::Push {
                        branch: None,
                        message: e.to_string(),
                    })?;
                if !output.is_empty() {
                    log::debug!("push output: {}", output);
                }
                Ok(())
            }
            PushStrategy::Branches { branches, force } => {
                let mut first_failure = None;
                for branch in branches {
                    log::info!("pushing branch {} to {}", branch, urls::redact(to_url));
                    let mut args = vec!["push", to_url, branch.as_str()];
                    if *force {
                        args.push("--force");
                    }
                    match git.run(&args, Some(staging)) {
                        Ok(output) => {
                            if !output.is_empty() {
                                log::debug!("push output: {}", output);
                            }
                        }
                        Err(e) => {
                            let failure = Error::Push {
                                branch: Some(branch.clone()),
                                message: e.to_string(),
                            };
                            log::error!("{}", failure);
                            if first_failure.is_none() {
                                first_failure = Some(failure);
                            }
                        }
                    }
                }
                match first_failure {
                    Some(failure) => Err(failure),
                    None => Ok(()),
                }
            }
        }
    }
}
