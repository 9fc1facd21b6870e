//! Spin Key-Value Store backend.

use crate::{CacheError, KeyValueStore};

/// Store backed by Spin's Key-Value Store, the server-side stand-in for
/// browser local storage when the storefront runs as a Spin component.
pub struct Cache {
    store: spin_sdk::key_value::Store,
}

impl Cache {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| CacheError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }
}

impl KeyValueStore for Cache {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CacheError::StoreError(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::StoreError(e.to_string())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        self.store
            .delete(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}
