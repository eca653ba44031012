//! Shared test utilities.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use parking_lot::Mutex;
use tally::counter::CounterState;
use tempfile::TempDir;

/// Recorded `(new, prev)` notifications.
pub type Deliveries = Arc<Mutex<Vec<(CounterState, CounterState)>>>;

pub fn deliveries() -> Deliveries {
    Arc::new(Mutex::new(Vec::new()))
}

/// Build a listener that records into `log`.
pub fn recorder(log: &Deliveries) -> impl Fn(&CounterState, &CounterState) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |next, prev| log.lock().push((*next, *prev))
}

/// Scratch directory plus a config path inside it that does not exist,
/// so the binary never reads the user's real config.
pub fn temp_workspace() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("config.toml");
    (temp_dir, storage_dir, config_path)
}

/// `tally` binary pointed at an isolated config and storage directory.
pub fn tally_cmd(storage_dir: &Path, config_path: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tally"));
    cmd.arg("--config")
        .arg(config_path)
        .arg("--storage-dir")
        .arg(storage_dir)
        .env_remove("TALLY_LOG");
    cmd
}
