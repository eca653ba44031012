//! Durable key-value media for persisted stores.
//!
//! The [`KeyValueStorage`] trait mirrors a browser-style local storage slot
//! API: string keys, string values, last writer wins.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },
}

/// A string key-value medium.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value at `key`. A missing key is `Ok(None)`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that `key` is usable as a storage slot name.
///
/// Keys become file names in [`FileStorage`], so they are limited to ASCII
/// letters, digits, `.`, `_` and `-`, and may not be `.` or `..`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if key.is_empty() || key == "." || key == ".." || !valid_chars {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}
