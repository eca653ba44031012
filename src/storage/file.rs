use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::storage::{validate_key, KeyValueStorage, StorageError};

/// Directory-backed storage: one `<key>.json` file per key.
///
/// Writers take an exclusive lock on `<key>.lock`, write a temp file, and
/// rename it over the target, so readers never observe a partial record.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location: `<data_dir>/tally`, or `./.tally` when the platform
    /// has no data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("tally"))
            .unwrap_or_else(|| PathBuf::from(".tally"))
    }

    /// Path of the record file for `key`.
    pub fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.{}.tmp", key, std::process::id()))
    }

    /// Run `op` while holding the exclusive lock for `key`.
    fn with_lock<T>(
        &self,
        key: &str,
        op: impl FnOnce() -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let lock_path = self.lock_path(key);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| StorageError::Io {
                path: lock_path.clone(),
                source,
            })?;
        lock.lock_exclusive().map_err(|source| StorageError::Lock {
            path: lock_path.clone(),
            source,
        })?;

        let result = op();
        // Closing the handle releases the lock.
        drop(lock);
        result
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        self.with_lock(key, || {
            let tmp_path = self.temp_path(key);
            let write = |tmp: &Path| -> io::Result<()> {
                let mut file = File::create(tmp)?;
                file.write_all(value.as_bytes())?;
                file.sync_all()?;
                fs::rename(tmp, &path)
            };

            write(&tmp_path).map_err(|source| {
                let _ = fs::remove_file(&tmp_path);
                StorageError::Io {
                    path: path.clone(),
                    source,
                }
            })
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        if !self.dir.exists() {
            return Ok(());
        }
        self.with_lock(key, || match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: path.clone(),
                source,
            }),
        })
    }
}
