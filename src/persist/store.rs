use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};

use crate::counter::{CounterIntent, CounterState, StoreError};
use crate::persist::record::{decode_record, encode_record, CURRENT_VERSION, DEFAULT_STORAGE_KEY};
use crate::storage::{KeyValueStorage, StorageError};
use crate::store::{CounterStore, Store, Subscription};

/// Where and how a [`PersistedStore`] keeps its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    /// Storage slot name.
    pub key: String,
    /// Record version to write and to accept on load.
    pub version: u32,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            version: CURRENT_VERSION,
        }
    }
}

/// A [`Store`] that mirrors its state into a [`KeyValueStorage`] slot.
///
/// Reads, subscriptions, and mutations are forwarded to a private
/// [`CounterStore`] that is never handed out, so every mutation passes
/// through this handle. After each successful mutation the state current at
/// write time is serialized and written, under a lock that orders writes
/// with mutations.
pub struct PersistedStore<S: KeyValueStorage> {
    inner: CounterStore,
    storage: Arc<S>,
    options: PersistOptions,
    write_lock: Arc<ReentrantMutex<()>>,
    hydrated: Arc<AtomicBool>,
}

impl<S: KeyValueStorage> Clone for PersistedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            storage: Arc::clone(&self.storage),
            options: self.options.clone(),
            write_lock: Arc::clone(&self.write_lock),
            hydrated: Arc::clone(&self.hydrated),
        }
    }
}

impl<S: KeyValueStorage> PersistedStore<S> {
    /// Build a store over `storage`, restoring a prior record when one exists.
    ///
    /// An absent, unreadable, malformed, or wrong-version record falls back
    /// to `count = 0`. Construction never fails.
    pub fn new(storage: S, options: PersistOptions) -> Self {
        let storage = Arc::new(storage);
        let restored = load_record(storage.as_ref(), &options);
        let hydrated = restored.is_some();

        Self {
            inner: CounterStore::with_state(restored.unwrap_or_default()),
            storage,
            options,
            write_lock: Arc::new(ReentrantMutex::new(())),
            hydrated: Arc::new(AtomicBool::new(hydrated)),
        }
    }

    /// Build a store with the default key and version.
    pub fn with_defaults(storage: S) -> Self {
        Self::new(storage, PersistOptions::default())
    }

    /// Re-read the record and, if valid, replace the in-memory state.
    ///
    /// Subscribers are notified of the replacement. Returns `true` when a
    /// record was applied.
    pub fn rehydrate(&self) -> bool {
        let _write = self.write_lock.lock();
        let Some(state) = load_record(self.storage.as_ref(), &self.options) else {
            return false;
        };

        match self.inner.replace_state(state) {
            Ok(_) => {
                self.hydrated.store(true, Ordering::SeqCst);
                true
            }
            Err(e) => {
                warn!(key = %self.options.key, error = %e, "rehydrate failed");
                false
            }
        }
    }

    /// Whether construction or [`rehydrate`](Self::rehydrate) applied a
    /// stored record.
    pub fn has_hydrated(&self) -> bool {
        self.hydrated.load(Ordering::SeqCst)
    }

    /// Delete the stored record. In-memory state is untouched and the next
    /// mutation writes a fresh record.
    pub fn clear_storage(&self) -> Result<(), StorageError> {
        let _write = self.write_lock.lock();
        self.storage.remove_item(&self.options.key)?;
        info!(key = %self.options.key, "counter record cleared");
        Ok(())
    }

    fn persist(&self) {
        let state = self.inner.get_state();
        let text = match encode_record(&state, self.options.version) {
            Ok(text) => text,
            Err(e) => {
                warn!(key = %self.options.key, error = %e, "failed to encode counter record");
                return;
            }
        };

        match self.storage.set_item(&self.options.key, &text) {
            Ok(()) => debug!(key = %self.options.key, count = state.count, "counter record written"),
            Err(e) => warn!(key = %self.options.key, error = %e, "failed to write counter record"),
        }
    }
}

impl<S: KeyValueStorage> Store for PersistedStore<S> {
    fn get_state(&self) -> CounterState {
        self.inner.get_state()
    }

    fn dispatch(&self, intent: CounterIntent) -> Result<CounterState, StoreError> {
        let _write = self.write_lock.lock();
        let next = self.inner.dispatch(intent)?;
        self.persist();
        Ok(next)
    }

    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CounterState, &CounterState) + Send + Sync + 'static,
    {
        self.inner.subscribe(listener)
    }
}

fn load_record<S: KeyValueStorage + ?Sized>(
    storage: &S,
    options: &PersistOptions,
) -> Option<CounterState> {
    let text = match storage.get_item(&options.key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(key = %options.key, "no stored counter record");
            return None;
        }
        Err(e) => {
            warn!(key = %options.key, error = %e, "failed to read counter record, using default state");
            return None;
        }
    };

    match decode_record(&text, options.version) {
        Ok(state) => {
            info!(key = %options.key, count = state.count, "restored counter from storage");
            Some(state)
        }
        Err(e) => {
            warn!(key = %options.key, error = %e, "discarding stored counter record");
            None
        }
    }
}
