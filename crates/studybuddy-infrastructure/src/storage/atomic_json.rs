//! Atomic JSON document storage.
//!
//! Writes go through a temporary file in the same directory that is synced
//! and renamed over the target. Read-modify-write cycles hold an exclusive
//! `fs2` lock on a sibling `.lock` file so that several processes sharing
//! one data directory never interleave their updates.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use studybuddy_core::error::StudyBuddyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomicJsonError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Lock error on '{path}': {message}")]
    Lock { path: PathBuf, message: String },
}

impl From<AtomicJsonError> for StudyBuddyError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Json { .. } => StudyBuddyError::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            },
            AtomicJsonError::Io { .. } | AtomicJsonError::Lock { .. } => {
                StudyBuddyError::io(err.to_string())
            }
        }
    }
}

/// Handle to one JSON document on disk.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> Clone for AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> std::fmt::Debug for AtomicJsonFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicJsonFile").field("path", &self.path).finish()
    }
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file is missing or empty.
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data = serde_json::from_str(&content).map_err(|source| AtomicJsonError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(data))
    }

    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let json = serde_json::to_string_pretty(data).map_err(|source| AtomicJsonError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path).map_err(|source| self.io_error(source))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        tmp_file.sync_all().map_err(|source| self.io_error(source))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;
        tracing::debug!(path = %self.path.display(), "saved document");
        Ok(())
    }

    /// Loads the document (or `default_value`), applies `f` and saves the
    /// result while holding the exclusive lock. Nothing is written when `f`
    /// fails. Returns the document as written.
    pub fn update<F, E>(&self, default_value: T, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
        E: From<AtomicJsonError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;
        Ok(data)
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }

    fn io_error(&self, source: std::io::Error) -> AtomicJsonError {
        AtomicJsonError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Exclusive lock held until the guard is dropped. The lock file itself
/// stays on disk.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| AtomicJsonError::Io {
                    path: lock_path.clone(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| AtomicJsonError::Io {
                path: lock_path.clone(),
                source,
            })?;

        use fs2::FileExt;
        file.lock_exclusive().map_err(|e| AtomicJsonError::Lock {
            path: lock_path.clone(),
            message: e.to_string(),
        })?;

        Ok(FileLock { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("counter.json"));

        let counter = Counter {
            name: "test".to_string(),
            count: 42,
        };
        file.save(&counter).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter));
        assert!(!temp_dir.path().join(".counter.json.tmp").exists());
    }

    #[test]
    fn test_missing_and_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        let file = AtomicJsonFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        fs::write(&path, "{ not json").unwrap();

        let err = AtomicJsonFile::<Counter>::new(path).load().unwrap_err();
        assert!(matches!(err, AtomicJsonError::Json { .. }));
        assert!(StudyBuddyError::from(err).is_serialization());
    }

    #[test]
    fn test_update_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("nested/counter.json"));

        for _ in 0..3 {
            file.update(Counter::default(), |c| {
                c.count += 5;
                Ok::<(), AtomicJsonError>(())
            })
            .unwrap();
        }
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("counter.json"));
        file.save(&Counter::default()).unwrap();

        let result: Result<Counter, StudyBuddyError> = file.update(Counter::default(), |c| {
            c.count = 99;
            Err(StudyBuddyError::validation("rejected"))
        });
        assert!(result.unwrap_err().is_validation());
        assert_eq!(file.load().unwrap().unwrap().count, 0);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let file = AtomicJsonFile::<Counter>::new(path.clone());
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        file.update(Counter::default(), |c| {
                            c.count += 1;
                            Ok::<(), AtomicJsonError>(())
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicJsonFile::<Counter>::new(path);
        assert_eq!(file.load().unwrap().unwrap().count, 40);
    }
}
