//! Persisted counter store.
//!
//! [`PersistedStore`] decorates a [`CounterStore`](crate::store::CounterStore)
//! with a durable key-value slot: the slot is read once on construction and
//! overwritten after every successful mutation. Storage failures never reach
//! the caller; the in-memory store keeps working and the failure is logged.

mod record;
mod store;

pub use record::{decode_record, encode_record, RecordError, CURRENT_VERSION, DEFAULT_STORAGE_KEY};
pub use store::{PersistOptions, PersistedStore};
