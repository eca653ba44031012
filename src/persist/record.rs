//! Wire format of the persisted record.
//!
//! ```json
//! {"state":{"count":5},"version":0}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::counter::CounterState;

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "counter-storage";

/// Record version written by this build. There are no migrations: a record
/// with any other version is discarded.
pub const CURRENT_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed counter record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Counter record version {found} does not match expected version {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: CounterState,
    #[serde(default)]
    version: u32,
}

/// Serialize `state` into a record tagged with `version`.
pub fn encode_record(state: &CounterState, version: u32) -> Result<String, RecordError> {
    let record = PersistedRecord {
        state: *state,
        version,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a record, rejecting anything not written with `expected_version`.
pub fn decode_record(text: &str, expected_version: u32) -> Result<CounterState, RecordError> {
    let record: PersistedRecord = serde_json::from_str(text)?;
    if record.version != expected_version {
        return Err(RecordError::VersionMismatch {
            found: record.version,
            expected: expected_version,
        });
    }
    Ok(record.state)
}
