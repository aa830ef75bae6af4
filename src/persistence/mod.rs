//! Local record persistence
//!
//! Features:
//! - String key/value record store abstraction
//! - In-memory store (tests, headless runs)
//! - File-backed store (native)
//! - Corrupt or missing records load as defaults, never fail

pub mod error;
pub mod store;

pub use error::StorageError;
pub use store::{FileStore, MemoryStore, RecordStore};

/// Load and parse a JSON record, treating anything unreadable as absent
pub fn load_json<T: serde::de::DeserializeOwned>(store: &dyn RecordStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt record '{}': {}", key, e);
            None
        }
    }
}

/// Serialize and write a JSON record
pub fn save_json<T: serde::Serialize>(
    store: &mut dyn RecordStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
