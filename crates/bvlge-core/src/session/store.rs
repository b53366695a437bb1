use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Scratch file renamed over the session file on each write
const SESSION_TMP_FILE: &str = "session.json.tmp";

/// Durable key/value storage for session tokens.
///
/// Values survive restarts until removed. No expiry is tracked: a stored
/// token is trusted until the API rejects it.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Session values persisted as a JSON object on disk
pub struct FileSessionStore {
    cache_dir: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            lock: Mutex::new(()),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).context("Failed to parse session file")
    }

    /// Current values for a read-modify-write. An unreadable file is
    /// replaced rather than blocking every later login or sign out.
    fn read_for_update(&self) -> BTreeMap<String, String> {
        self.read_all().unwrap_or_else(|e| {
            warn!(error = %format!("{e:#}"), "Discarding unreadable session file");
            BTreeMap::new()
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let path = self.session_path();
        if values.is_empty() {
            if path.exists() {
                std::fs::remove_file(&path).context("Failed to remove session file")?;
            }
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(values)?;
        let tmp = self.cache_dir.join(SESSION_TMP_FILE);
        std::fs::write(&tmp, contents).context("Failed to write session file")?;
        std::fs::rename(&tmp, &path).context("Failed to replace session file")?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard();
        let mut values = self.read_for_update();
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.guard();
        let path = self.session_path();
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Removing unreadable session file");
                return std::fs::remove_file(&path).context("Failed to remove session file");
            }
        };
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// In-memory store, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip_and_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.get("access_token").unwrap(), None);
        store.set("access_token", "abc").unwrap();
        store.set("refresh_token", "def").unwrap();

        // A second instance over the same directory sees the same values
        let reopened = FileSessionStore::new(dir.path().join("nested"));
        assert_eq!(reopened.get("access_token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("refresh_token").unwrap().as_deref(), Some("def"));
    }

    #[test]
    fn test_file_store_remove_last_key_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        store.set("access_token", "abc").unwrap();
        assert!(dir.path().join(SESSION_FILE).exists());

        store.remove("access_token").unwrap();
        assert!(!dir.path().join(SESSION_FILE).exists());
        // Removing a missing key is a no-op
        store.remove("access_token").unwrap();
    }

    #[test]
    fn test_file_store_set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        store.set("access_token", "old").unwrap();
        store.set("access_token", "new").unwrap();
        assert_eq!(store.get("access_token").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        assert!(store.get("access_token").is_err());
    }

    #[test]
    fn test_file_store_recovers_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        std::fs::write(&path, r#"{"access_tok"#).unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());

        store.set("access_token", "A").unwrap();
        store.set("refresh_token", "B").unwrap();
        assert_eq!(store.get("access_token").unwrap().as_deref(), Some("A"));
        assert_eq!(store.get("refresh_token").unwrap().as_deref(), Some("B"));
        assert!(!dir.path().join(SESSION_TMP_FILE).exists());

        std::fs::write(&path, r#"{"access_tok"#).unwrap();
        store.remove("access_token").unwrap();
        assert!(!path.exists());
        assert_eq!(store.get("refresh_token").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
