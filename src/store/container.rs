//! In-memory counter container.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tracing::debug;

use crate::counter::{CounterIntent, CounterReducer, CounterState, StoreError};
use crate::mvi::Reducer;
use crate::store::{Store, Subscription};

type Listener = dyn Fn(&CounterState, &CounterState) + Send + Sync;

struct ListenerEntry {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Arc<Listener>,
}

/// Thread-safe counter container.
///
/// Cloning is cheap and yields another handle to the same store, so one
/// instance can be constructed at startup and handed to every component
/// that needs it.
///
/// All mutations are serialized by a re-entrant dispatch lock. Listeners run
/// while that lock is held but with the state lock released, so a listener
/// may read the store or dispatch a nested mutation from the same thread.
#[derive(Clone)]
pub struct CounterStore {
    shared: Arc<Shared>,
}

struct Shared {
    dispatch: ReentrantMutex<()>,
    state: RwLock<CounterState>,
    listeners: Mutex<Vec<ListenerEntry>>,
    next_id: AtomicU64,
}

impl CounterStore {
    /// Create a store starting at `count = 0`.
    pub fn new() -> Self {
        Self::with_state(CounterState::default())
    }

    /// Create a store starting from `state`.
    pub fn with_state(state: CounterState) -> Self {
        Self {
            shared: Arc::new(Shared {
                dispatch: ReentrantMutex::new(()),
                state: RwLock::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.lock().len()
    }

    fn notify(&self, next: &CounterState, prev: &CounterState) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<(Arc<AtomicBool>, Arc<Listener>)> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.listener)))
            .collect();

        for (active, listener) in snapshot {
            if active.load(Ordering::SeqCst) {
                listener(next, prev);
            }
        }
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for CounterStore {
    fn get_state(&self) -> CounterState {
        *self.shared.state.read()
    }

    fn dispatch(&self, intent: CounterIntent) -> Result<CounterState, StoreError> {
        let _dispatch = self.shared.dispatch.lock();
        let operation = intent.operation();

        let (prev, next) = {
            let mut state = self.shared.state.write();
            let prev = *state;
            let next = match CounterReducer::reduce(&prev, intent) {
                Ok(next) => next,
                Err(e) => {
                    debug!(operation, count = prev.count, error = %e, "counter mutation rejected");
                    return Err(e);
                }
            };
            *state = next;
            (prev, next)
        };

        debug!(operation, from = prev.count, to = next.count, "counter mutation");
        self.notify(&next, &prev);
        Ok(next)
    }

    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CounterState, &CounterState) + Send + Sync + 'static,
    {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        self.shared.listeners.lock().push(ListenerEntry {
            id,
            active: Arc::clone(&active),
            listener: Arc::new(listener),
        });

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            active.store(false, Ordering::SeqCst);
            if let Some(shared) = shared.upgrade() {
                // Waits out any notification running on another thread.
                let _dispatch = shared.dispatch.lock();
                shared.listeners.lock().retain(|entry| entry.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Amount;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn new_store_starts_at_zero() {
        assert_eq!(CounterStore::new().get_state().count, 0);
    }

    #[test]
    fn with_state_starts_from_given_state() {
        let store = CounterStore::with_state(CounterState::new(9));
        assert_eq!(store.get_state().count, 9);
    }

    #[test]
    fn clones_share_state() {
        let store = CounterStore::new();
        let handle = store.clone();
        handle.increment().unwrap();
        assert_eq!(store.get_state().count, 1);
    }

    #[test]
    fn rejected_mutation_does_not_notify() {
        let store = CounterStore::with_state(CounterState::new(i64::MAX));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _sub = store.subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.increment_by(Amount::new(1)).is_err());
        assert_eq!(store.get_state().count, i64::MAX);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_removes_listener_entry() {
        let store = CounterStore::new();
        let sub = store.subscribe(|_, _| {});
        assert_eq!(store.subscriber_count(), 1);
        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn detached_listener_stays_registered() {
        let store = CounterStore::new();
        store.subscribe(|_, _| {}).detach();
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = CounterStore::new();
        let sub = store.subscribe(|_, _| {});
        drop(store);
        sub.unsubscribe();
    }

    #[test]
    fn listener_can_read_state_during_notification() {
        let store = CounterStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let reader = store.clone();
        let log = Arc::clone(&seen);
        let _sub = store.subscribe(move |next, _| {
            log.lock().push((next.count, reader.get_state().count));
        });

        store.increment().unwrap();
        store.increment().unwrap();
        assert_eq!(*seen.lock(), vec![(1, 1), (2, 2)]);
    }
}
