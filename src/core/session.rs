//! Process-wide session state.
//!
//! Holds the most recent successfully configured [`Env`] and performs
//! process-environment injection. One mutex guards both the slot and the
//! injection, so concurrent configuration calls apply their key/value
//! sets atomically with respect to each other and never interleave
//! partial writes.

use std::sync::Mutex;

use tracing::debug;

use crate::core::env::Env;
use crate::error::{Error, Result};

static CURRENT: Mutex<Option<Env>> = Mutex::new(None);

/// Store a freshly configured environment and optionally inject it into
/// the process environment.
///
/// With `override_existing` false, keys already present in the process
/// environment are preserved; with it true, the fetched value replaces
/// them.
pub fn store(env: &Env, populate: bool, override_existing: bool) {
    let mut slot = CURRENT.lock().unwrap_or_else(|e| e.into_inner());

    if populate {
        let mut injected = 0usize;
        for (key, value) in env.iter() {
            if override_existing || std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
                injected += 1;
            }
        }
        debug!(total = env.len(), injected, "process environment populated");
    }

    *slot = Some(env.clone());
}

/// The environment from the last successful configuration call.
///
/// # Errors
///
/// Returns `Error::NotConfigured` before the first successful call.
pub fn current() -> Result<Env> {
    let slot = CURRENT.lock().unwrap_or_else(|e| e.into_inner());
    slot.clone().ok_or(Error::NotConfigured)
}

/// Look up a single value from the configured environment.
///
/// # Errors
///
/// Returns `Error::NotConfigured` before the first successful call; a
/// missing key is `Ok(None)`, not an error.
pub fn get(key: &str) -> Result<Option<String>> {
    let slot = CURRENT.lock().unwrap_or_else(|e| e.into_inner());
    match slot.as_ref() {
        Some(env) => Ok(env.get(key).map(str::to_string)),
        None => Err(Error::NotConfigured),
    }
}
