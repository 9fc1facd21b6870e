//! JSON-file-backed store for native targets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::{CacheError, KeyValueStore};

/// A key-value store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// Parent directories are created up front; the file itself is created
    /// on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| CacheError::OpenError(format!("{}: {}", parent.display(), e)))?;
        }
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current entries for a read-modify-write.
    ///
    /// An unparseable file is copied aside to `<name>.corrupt` and treated as
    /// empty so the next write replaces it.
    fn read_for_write(&self) -> Result<BTreeMap<String, String>, CacheError> {
        match self.read_all() {
            Err(CacheError::SerializeError(error)) => {
                let backup = self.path.with_extension("corrupt");
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %error,
                    "replacing unreadable store file"
                );
                fs::copy(&self.path, &backup)?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_for_write()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("rocket-cache-{}-{}", std::process::id(), n))
            .join(name)
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = FileStore::open(scratch_path("store.json")).unwrap();
        assert_eq!(store.get_item("@RocketShoes:cart").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = scratch_path("store.json");
        {
            let store = FileStore::open(&path).unwrap();
            store.set_item("@RocketShoes:cart", r#"[{"id":1}]"#).unwrap();
            store.set_item("other", "x").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("@RocketShoes:cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("x"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_remove_item() {
        let path = scratch_path("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set_item("a", "1").unwrap();
        store.remove_item("a").unwrap();
        store.remove_item("never-set").unwrap();

        assert_eq!(store.get_item("a").unwrap(), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_path("store.json");
        let store = FileStore::open(&path).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(store.get_item("a"), Err(CacheError::SerializeError(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let path = scratch_path("store.json");
        let store = FileStore::open(&path).unwrap();
        fs::write(&path, "garbage{").unwrap();

        store.set_item("@RocketShoes:cart", "[]").unwrap();

        assert_eq!(
            store.get_item("@RocketShoes:cart").unwrap().as_deref(),
            Some("[]")
        );
        let backup = fs::read_to_string(path.with_extension("corrupt")).unwrap();
        assert_eq!(backup, "garbage{");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_remove_on_corrupt_file_leaves_valid_store() {
        let path = scratch_path("store.json");
        let store = FileStore::open(&path).unwrap();
        fs::write(&path, "garbage{").unwrap();

        store.remove_item("a").unwrap();
        store.set_item("b", "2").unwrap();

        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_open_rejects_directory() {
        let path = scratch_path("dir");
        fs::create_dir_all(&path).unwrap();

        assert!(matches!(FileStore::open(&path), Err(CacheError::OpenError(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
