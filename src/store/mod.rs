//! Observable counter container.
//!
//! [`Store`] is the interface shared by the in-memory [`CounterStore`] and
//! the persisted decorator in [`crate::persist`]. Mutations run through
//! [`CounterReducer`](crate::counter::CounterReducer) and notify subscribers
//! synchronously with `(new_state, previous_state)`.
//!
//! # Invariants
//!
//! 1. State is fully updated before any subscriber runs.
//! 2. Every subscriber of one mutation sees the same `(new, prev)` pair.
//! 3. Subscribers run in registration order.
//! 4. A rejected mutation changes nothing and notifies nobody.
//! 5. Once [`Subscription::unsubscribe`] returns, that listener is never
//!    invoked again.

mod container;
mod subscription;

pub use container::CounterStore;
pub use subscription::Subscription;

use crate::counter::{Amount, CounterIntent, CounterState, StoreError};

/// Operations every counter container provides.
pub trait Store {
    /// Current state. No side effects.
    fn get_state(&self) -> CounterState;

    /// Apply one intent, notify subscribers, return the new state.
    fn dispatch(&self, intent: CounterIntent) -> Result<CounterState, StoreError>;

    /// Register a listener called with `(new_state, previous_state)` after
    /// every successful mutation.
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CounterState, &CounterState) + Send + Sync + 'static;

    /// Register a listener that only fires when `selector`'s output changes.
    ///
    /// The listener receives `(new_slice, previous_slice)`.
    fn subscribe_with_selector<T, S, F>(&self, selector: S, listener: F) -> Subscription
    where
        T: PartialEq + Send + 'static,
        S: Fn(&CounterState) -> T + Send + Sync + 'static,
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        self.subscribe(move |next, prev| {
            let selected = selector(next);
            let previous = selector(prev);
            if selected != previous {
                listener(&selected, &previous);
            }
        })
    }

    fn increment(&self) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::Increment)
    }

    fn decrement(&self) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::Decrement)
    }

    fn reset(&self) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::Reset)
    }

    fn increment_by(&self, amount: Amount) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::IncrementBy(amount))
    }

    fn decrement_by(&self, amount: Amount) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::DecrementBy(amount))
    }

    /// Replace the whole state, notifying subscribers.
    fn replace_state(&self, state: CounterState) -> Result<CounterState, StoreError> {
        self.dispatch(CounterIntent::Restore(state))
    }
}
