//! # Scheduler
//!
//! Sequential dispatch over a batch of sync specs: a single pass, an
//! endless interval loop, and selection of one spec by key.
//!
//! The scheduler never spawns threads and never aborts a pass early; a
//! failed repository is reported through its [`SyncOutcome`] and the pass
//! moves on. Cancellation of [`run_forever`] is a process-boundary concern
//! (Ctrl-C), and no timeout wraps an individual sync: a hung git process
//! blocks the cycle until it is killed.

use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::settings::SyncSpec;
use crate::sync::{SyncEngine, SyncOutcome};

/// Run one sequential pass over all specs, in configured order.
///
/// Every spec is attempted regardless of earlier failures.
pub fn run_once(engine: &SyncEngine, specs: &[SyncSpec]) -> Vec<SyncOutcome> {
    let outcomes: Vec<SyncOutcome> = specs.iter().map(|spec| engine.sync_repo(spec)).collect();

    let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
    if failed == 0 {
        log::info!("cycle complete: {} repositories synced", outcomes.len());
    } else {
        log::warn!(
            "cycle complete: {} of {} repositories failed",
            failed,
            outcomes.len()
        );
    }

    outcomes
}

/// Run passes forever, sleeping `interval` between them.
pub fn run_forever(engine: &SyncEngine, interval: Duration, specs: &[SyncSpec]) -> ! {
    loop {
        run_once(engine, specs);
        log::info!("sleeping {:?} until the next cycle", interval);
        thread::sleep(interval);
    }
}

/// Find the spec for `key`, failing fast when it is not configured.
pub fn select_by_key<'a>(specs: &'a [SyncSpec], key: &str) -> Result<&'a SyncSpec> {
    specs.iter().find(|spec| spec.key == key).ok_or_else(|| Error::UnknownRepo {
        key: key.to_string(),
    })
}

/// Sync the single repository named by `key`.
pub fn run_one_by_key(engine: &SyncEngine, key: &str, specs: &[SyncSpec]) -> Result<SyncOutcome> {
    let spec = select_by_key(specs, key)?;
    Ok(engine.sync_repo(spec))
}
