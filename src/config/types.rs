use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persist::{PersistOptions, CURRENT_VERSION, DEFAULT_STORAGE_KEY};
use crate::storage::FileStorage;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Use the persisted store (default: true).
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Directory holding record files (default: `<data_dir>/tally`).
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Storage key (default: "counter-storage").
    #[serde(default = "default_key")]
    pub key: String,
    /// Record version (default: 0).
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: None,
            key: default_key(),
            version: default_version(),
        }
    }
}

impl StorageConfig {
    /// Configured directory, or the platform default.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(FileStorage::default_dir)
    }

    pub fn persist_options(&self) -> PersistOptions {
        PersistOptions {
            key: self.key.clone(),
            version: self.version,
        }
    }
}
