//! The key-value persistence seam.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::CacheError;

/// String-keyed, string-valued storage with the semantics of browser local
/// storage: one value per key, whole-value overwrite, no expiry.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), CacheError>;

    /// Read and decode a JSON value.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        Self: Sized,
    {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and store it.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        (**self).remove_item(key)
    }
}

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        store
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: u64,
        amount: i64,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("cart").unwrap(), None);

        store.set_item("cart", "[]").unwrap();
        assert_eq!(store.get_item("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.remove_item("cart").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove_item("nope").is_ok());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let lines = vec![Line { id: 1, amount: 2 }];

        store.set_json("cart", &lines).unwrap();
        assert_eq!(
            store.get_item("cart").unwrap().as_deref(),
            Some(r#"[{"id":1,"amount":2}]"#)
        );

        let loaded: Option<Vec<Line>> = store.get_json("cart").unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_get_json_rejects_garbage() {
        let store = MemoryStore::with_item("cart", "{not json");
        let result: Result<Option<Vec<Line>>, _> = store.get_json("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_arc_store_shares_contents() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);

        other.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
