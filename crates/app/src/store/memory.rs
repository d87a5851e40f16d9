//! Memory Store
//!
//! In-memory key-value store for tests and ephemeral sessions.

use rustc_hash::FxHashMap;

use super::{KeyValueStore, StoreError};

/// Map-backed key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_get_remove_cycle() -> TestResult {
        let mut store = MemoryStore::new();

        store.set("user", "{\"id\":\"admin-1\"}")?;

        assert_eq!(store.get("user")?, Some("{\"id\":\"admin-1\"}".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("user")?;

        assert!(store.is_empty());
        assert_eq!(store.get("user")?, None);

        Ok(())
    }
}
