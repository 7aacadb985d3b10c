//! Key-value store abstraction
//!
//! The tracker persists each collection as one JSON value under a fixed key.
//! `JsonFileStore` keeps one file per key on disk; `MemoryStore` keeps raw
//! JSON text in memory and is used for tests and embedding.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};

use super::file_io::{read_json, remove_json, write_json_atomic};

/// Durable get/set of named JSON values
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> TrackerResult<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &Value) -> TrackerResult<()>;

    /// Remove every key
    fn clear(&mut self) -> TrackerResult<()>;
}

fn check_key(key: &str) -> TrackerResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(TrackerError::Storage(format!("Invalid storage key: {:?}", key)))
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> TrackerResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        read_json(self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &Value) -> TrackerResult<()> {
        write_json_atomic(self.path_for(key)?, value)
    }

    fn clear(&mut self) -> TrackerResult<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            TrackerError::Storage(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| TrackerError::Storage(format!("Failed to read entry: {}", e)))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                remove_json(&path)?;
            }
        }

        Ok(())
    }
}

/// In-memory store holding raw JSON text, like browser local storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a key without checking that it is valid JSON
    pub fn set_raw(&mut self, key: &str, text: impl Into<String>) {
        self.entries.insert(key.to_string(), text.into());
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        check_key(key)?;
        match self.entries.get(key) {
            None => Ok(None),
            Some(text) => serde_json::from_str(text).map(Some).map_err(|e| {
                TrackerError::Storage(format!("Failed to parse value for '{}': {}", key, e))
            }),
        }
    }

    fn set(&mut self, key: &str, value: &Value) -> TrackerResult<()> {
        check_key(key)?;
        let text = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), text);
        Ok(())
    }

    fn clear(&mut self) -> TrackerResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Memory store whose writes to one chosen key fail. Clones share state so a
/// test can keep a handle after moving the store into `Storage`.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct FlakyStore {
    inner: std::rc::Rc<std::cell::RefCell<MemoryStore>>,
    failing: std::rc::Rc<std::cell::Cell<Option<&'static str>>>,
}

#[cfg(test)]
impl FlakyStore {
    pub(crate) fn fail_writes_to(&self, key: Option<&'static str>) {
        self.failing.set(key);
    }

    pub(crate) fn set_raw(&self, key: &str, text: &str) {
        self.inner.borrow_mut().set_raw(key, text);
    }

    pub(crate) fn value(&self, key: &str) -> Option<Value> {
        self.inner.borrow().get(key).ok().flatten()
    }
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &Value) -> TrackerResult<()> {
        if self.failing.get() == Some(key) {
            return Err(TrackerError::Storage(format!("write to '{}' refused", key)));
        }
        self.inner.borrow_mut().set(key, value)
    }

    fn clear(&mut self) -> TrackerResult<()> {
        self.inner.borrow_mut().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get("budgets").unwrap(), None);

        let value = json!([{"category": 1, "amount": 200, "period": "monthly"}]);
        store.set("budgets", &value).unwrap();

        assert!(temp_dir.path().join("budgets.json").exists());
        assert_eq!(store.get("budgets").unwrap(), Some(value));
    }

    #[test]
    fn test_file_store_clear() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().to_path_buf());

        store.set("transactions", &json!([])).unwrap();
        store.set("categories", &json!([])).unwrap();
        store.clear().unwrap();

        assert_eq!(store.get("transactions").unwrap(), None);
        assert_eq!(store.get("categories").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", &json!(1)).is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("categories", &json!([{"id": 1, "name": "Food"}])).unwrap();
        assert_eq!(store.get_raw("categories"), Some(r#"[{"id":1,"name":"Food"}]"#));

        store.set_raw("budgets", "{not json");
        assert!(store.get("budgets").is_err());

        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
