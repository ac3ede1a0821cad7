//! Key-value storage backends.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::StoreError;

/// A key-value store of string slots.
pub trait Storage {
    /// Returns the slot's content, or `None` if it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the slot's content.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the slot. Missing slots are not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Directory-backed storage with one `<key>.json` file per slot.
///
/// An open `FileStorage` holds an exclusive lock on `<dir>/.lock` until it is
/// dropped, so a whole load-modify-save session excludes other processes
/// using the same directory. Slot files are replaced atomically.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    _lock: File,
}

impl FileStorage {
    /// Opens `dir`, creating it if needed, and blocks until the directory
    /// lock is acquired.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;

        let path = dir.join(".lock");
        let lock = File::create(&path).map_err(|source| io_error(&path, source))?;
        lock.lock_exclusive()
            .map_err(|source| io_error(&path, source))?;
        tracing::debug!(dir = %dir.display(), "acquired storage lock");

        Ok(Self { dir, _lock: lock })
    }

    /// Returns the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        temp.write_all(value.as_bytes())
            .map_err(|source| io_error(temp.path(), source))?;
        temp.persist(&path).map_err(|err| io_error(&path, err.error))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed storage slot");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(io_error(&path, source)),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
