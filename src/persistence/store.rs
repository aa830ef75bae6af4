//! Record store backends

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::StorageError;

/// A string key/value store (LocalStorage semantics)
pub trait RecordStore {
    /// Read a record; missing or unreadable records are `None`
    fn get(&self, key: &str) -> Option<String>;

    /// Write a record, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per record inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        // Atomic replace via rename
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{load_json, save_json};

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_corrupt_json_loads_as_none() {
        let mut store = MemoryStore::new();
        store.set("scores", "[{ not json").unwrap();
        assert!(load_json::<Vec<u32>>(&store, "scores").is_none());
    }

    #[test]
    fn test_save_json() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "nums", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(load_json::<Vec<u32>>(&store, "nums"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("quantum_shot_store_{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert!(store.get("quantum_player_name").is_none());
        store.set("quantum_player_name", "Ada").unwrap();
        assert_eq!(store.get("quantum_player_name").as_deref(), Some("Ada"));
        let _ = fs::remove_dir_all(&dir);
    }
}
