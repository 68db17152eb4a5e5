//! Durable text key-value storage behind the schedule store.
//!
//! Writes are last-writer-wins. [`KeyValueStorage::write_all`] groups several
//! keys so that a failed write puts the earlier ones back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{PlanError, PlanResult};

/// A flat text key → text value store.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> PlanResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PlanResult<()>;
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> PlanResult<()>;

    /// Apply every entry in order: `Some` sets the key, `None` removes it.
    ///
    /// The previous values are read first. If any write fails, the keys
    /// already written are restored (or removed, if they were absent) and the
    /// first error is returned.
    fn write_all(&mut self, entries: &[(&str, Option<&str>)]) -> PlanResult<()> {
        let previous = entries
            .iter()
            .map(|(key, _)| self.get(key))
            .collect::<PlanResult<Vec<_>>>()?;

        for (applied, (key, value)) in entries.iter().enumerate() {
            let result = match value {
                Some(value) => self.set(key, value),
                None => self.remove(key),
            };
            if let Err(e) = result {
                for ((key, _), old) in entries[..applied].iter().zip(&previous[..applied]).rev() {
                    let undo = match old {
                        Some(old) => self.set(key, old),
                        None => self.remove(key),
                    };
                    if let Err(undo_err) = undo {
                        warn!(key, error = %undo_err, "could not restore previous value");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

/// In-process storage, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> PlanResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PlanResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PlanResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PlanResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PlanError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> PlanResult<Option<String>> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> PlanResult<()> {
        let path = self.path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling temp file first so a crash never leaves half a value
        let temp = self.dir.join(format!(".{}.tmp", key));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PlanResult<()> {
        let path = self.path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
