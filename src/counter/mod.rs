//! Counter model: state, intents, and the reducer that applies them.

mod error;
mod intent;
mod reducer;
mod state;

pub use error::StoreError;
pub use intent::CounterIntent;
pub use reducer::CounterReducer;
pub use state::{Amount, CounterState};
