//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the string store contract the host application implements.
//! - Persist and hydrate exactly the profile/era/event payload.
//!
//! # Invariants
//! - Only the raw data payload is stored; the derived annotation index
//!   never is and is rebuilt after every load.
//! - A failed load leaves the calendar completely unchanged.

use crate::codec::{self, SnapshotResult};
use crate::state::{Clock, LifeCalendar};
use log::info;
use std::collections::HashMap;

/// Default key the calendar payload lives under.
pub const DEFAULT_STORE_KEY: &str = "lifeweeks.data";

/// Minimal string store contract (host-provided: browser storage, a file,
/// a settings registry). Implementations outside this crate own the
/// physical medium.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store used by tests and the CLI probe.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Persists the calendar's payload under `key`.
///
/// # Errors
/// - `Uninitialized` when no birth date has been set yet.
pub fn save_calendar<C: Clock>(
    calendar: &LifeCalendar<C>,
    store: &mut dyn SnapshotStore,
    key: &str,
) -> SnapshotResult<()> {
    let snapshot = calendar.export_snapshot()?;
    let json = codec::data_to_json(&snapshot.data)?;
    store.set(key, json);
    info!("event=calendar_saved module=store key={key}");
    Ok(())
}

/// Hydrates the calendar from a previously saved payload.
///
/// Returns `Ok(false)` when nothing is stored under `key`; the calendar
/// is untouched. On success the index is rebuilt from the loaded data.
///
/// # Errors
/// - Any parse or validation failure leaves the calendar unchanged.
pub fn load_calendar<C: Clock>(
    calendar: &mut LifeCalendar<C>,
    store: &dyn SnapshotStore,
    key: &str,
) -> SnapshotResult<bool> {
    let Some(json) = store.get(key) else {
        return Ok(false);
    };
    let data = codec::data_from_json(&json)?;
    let decoded = codec::decode_data(&data)?;
    calendar.restore(decoded);
    info!("event=calendar_loaded module=store key={key}");
    Ok(true)
}

/// Removes any stored payload under `key`.
pub fn erase_calendar(store: &mut dyn SnapshotStore, key: &str) {
    store.remove(key);
}
