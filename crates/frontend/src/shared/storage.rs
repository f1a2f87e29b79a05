//! Долговременное хранилище состояния представлений (localStorage).
//!
//! Controllers talk to [`KeyValueStore`] so list state can be exercised
//! against [`MemoryStore`] in tests.

use contracts::domain::a001_object::QueryPairs;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

// ============================================================================
// Browser
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

// ============================================================================
// Table view state
// ============================================================================

/// Last-used query of a table, stored as JSON under `itr-table-{table_key}`.
#[derive(Clone)]
pub struct TableViewStateStore {
    store: SharedStore,
    key: String,
}

impl TableViewStateStore {
    pub fn new(store: SharedStore, table_key: &str) -> Self {
        Self {
            store,
            key: format!("itr-table-{}", table_key),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Unreadable entries are treated as absent.
    pub fn load(&self) -> Option<QueryPairs> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str::<QueryPairs>(&raw) {
            Ok(pairs) => Some(pairs),
            Err(e) => {
                log::warn!("table state {} is unreadable: {}", self.key, e);
                None
            }
        }
    }

    pub fn save(&self, pairs: &QueryPairs) {
        match serde_json::to_string(pairs) {
            Ok(json) => self.store.set(&self.key, &json),
            Err(e) => log::warn!("table state {} not saved: {}", self.key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_state_roundtrip_under_prefixed_key() {
        let store: SharedStore = Arc::new(MemoryStore::default());
        let table = TableViewStateStore::new(store.clone(), "objects6");
        assert_eq!(table.storage_key(), "itr-table-objects6");
        assert_eq!(table.load(), None);

        let mut pairs = QueryPairs::new();
        pairs.insert("orderBy".into(), "object_name".into());
        pairs.insert("archive".into(), String::new());
        table.save(&pairs);

        assert_eq!(table.load(), Some(pairs));
        assert!(store.get("itr-table-objects6").is_some());
    }

    #[test]
    fn test_garbage_entry_reads_as_none() {
        let store: SharedStore = Arc::new(MemoryStore::default());
        store.set("itr-table-objects6", "null-ish{");
        let table = TableViewStateStore::new(store, "objects6");
        assert_eq!(table.load(), None);
    }
}
