//! Observable counter store with optional durable persistence.
//!
//! ```
//! use tally::counter::Amount;
//! use tally::store::{CounterStore, Store};
//!
//! let store = CounterStore::new();
//! store.increment().unwrap();
//! store.increment_by(Amount::new(5)).unwrap();
//! store.decrement_by(Amount::new(2)).unwrap();
//! assert_eq!(store.get_state().count, 4);
//! ```

pub mod config;
pub mod counter;
pub mod logging;
pub mod mvi;
pub mod persist;
pub mod storage;
pub mod store;
