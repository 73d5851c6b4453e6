//! Persisted Records
//!
//! State is persisted as whole-record overwrites in an opaque key-value
//! store: one JSON payload per record name. The engine reads records once at
//! startup and writes them back after every meaningful mutation and at
//! shutdown.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Record names used by the engine
pub const PLAYER_DATA_RECORD: &str = "quests_player_data";
pub const IGNORE_RECORD: &str = "quests_ignore";

/// An opaque record store. Implementations only move strings; the engine
/// owns the JSON encoding.
pub trait DataStore {
    fn read_record(&self, name: &str) -> Result<Option<String>, String>;
    fn write_record(&mut self, name: &str, payload: &str) -> Result<(), String>;
}

/// Read a record, falling back to the type's default when the record is
/// missing or unreadable. A corrupt record must never take the engine down.
pub fn read_object<T: DeserializeOwned + Default>(store: &dyn DataStore, name: &str) -> T {
    match store.read_record(name) {
        Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|e| {
            warn!("Record '{}' is unreadable, starting empty: {}", name, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to read record '{}': {}", name, e);
            T::default()
        }
    }
}

/// Serialize and write a record. Failures are logged, never fatal.
pub fn write_object<T: Serialize>(store: &mut dyn DataStore, name: &str, value: &T) {
    let payload = match serde_json::to_string(value) {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to serialize record '{}': {}", name, e);
            return;
        }
    };

    if let Err(e) = store.write_record(name, &payload) {
        warn!("Failed to write record '{}': {}", name, e);
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// One `<name>.json` file per record under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path) -> Result<Self, String> {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create data directory {:?}: {}", dir, e))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl DataStore for JsonFileStore {
    fn read_record(&self, name: &str) -> Result<Option<String>, String> {
        let path = self.record_path(name);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))
    }

    fn write_record(&mut self, name: &str, payload: &str) -> Result<(), String> {
        let path = self.record_path(name);
        std::fs::write(&path, payload).map_err(|e| format!("Failed to write {:?}: {}", path, e))
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Record store backed by a map. Used by tests and embedding hosts that
/// bring their own persistence.
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for MemoryStore {
    fn read_record(&self, name: &str) -> Result<Option<String>, String> {
        Ok(self.records.get(name).cloned())
    }

    fn write_record(&mut self, name: &str, payload: &str) -> Result<(), String> {
        self.records.insert(name.to_string(), payload.to_string());
        Ok(())
    }
}
