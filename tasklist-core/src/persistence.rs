//! Persistence adapter: the task collection in a string-keyed store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.tasklist/
//!   config.yaml        (optional, see `config`)
//!   store/             (mode 0700)
//!     tasks.json       (JSON array of tasks, mode 0600)
//! ```
//!
//! [`save`] always rewrites the whole collection. [`load`] never fails: an
//! absent or unreadable slot is an empty list.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{io_err, StoreError};
use crate::types::Task;

/// Key under which the task collection is stored.
pub const TASKS_KEY: &str = "tasks";

/// A durable string-keyed key-value slot.
pub trait KvStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<K: KvStore + ?Sized> KvStore for &K {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<K: KvStore + ?Sized> KvStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// 1. Save / load
// ---------------------------------------------------------------------------

/// Serialize the full collection and overwrite the `tasks` slot.
pub fn save(kv: &impl KvStore, tasks: &[Task]) -> Result<(), StoreError> {
    let json = serde_json::to_string(tasks)?;
    kv.set(TASKS_KEY, &json)?;
    tracing::debug!(count = tasks.len(), "saved tasks");
    Ok(())
}

/// Read the `tasks` slot. Missing, unreadable or corrupt data yields `[]`.
pub fn load(kv: &impl KvStore) -> Vec<Task> {
    let raw = match kv.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "could not read stored tasks; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::warn!(error = %err, "stored tasks are not valid JSON; starting empty");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// 2. File-backed store
// ---------------------------------------------------------------------------

/// One file per key under a directory, written atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `<home>/.tasklist/store/`.
    pub fn at(home: &Path) -> Self {
        Self { dir: store_dir_at(home) }
    }

    /// Store rooted at the user's home directory.
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Ok(Self::at(&home))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<key>.json`. Pure, no I/O.
    pub fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
            set_dir_permissions(&self.dir)?;
        }
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| io_err(&path, e))
    }

    /// Write flow: `<key>.json.tmp` sibling → `chmod 0600` → `rename`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;
        let tmp_path = path.with_file_name(format!("{key}.json.tmp"));
        std::fs::write(&tmp_path, value).map_err(|e| io_err(&tmp_path, e))?;
        set_file_permissions(&tmp_path)?;
        std::fs::rename(&tmp_path, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }
}

/// `<home>/.tasklist/store/`. Pure, no I/O.
pub fn store_dir_at(home: &Path) -> PathBuf {
    home.join(".tasklist").join("store")
}

// ---------------------------------------------------------------------------
// 3. In-memory store
// ---------------------------------------------------------------------------

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
