//! Reducer for counter mutations.

use crate::counter::error::StoreError;
use crate::counter::intent::CounterIntent;
use crate::counter::state::CounterState;
use crate::mvi::Reducer;

/// Pure reducer for [`CounterState`].
///
/// Arithmetic is checked: a step that would leave the `i64` range is
/// rejected with [`StoreError::Overflow`] instead of wrapping.
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;
    type Error = StoreError;

    fn reduce(state: &Self::State, intent: Self::Intent) -> Result<Self::State, Self::Error> {
        let operation = intent.operation();
        let overflow = || StoreError::Overflow {
            count: state.count,
            operation,
        };

        let count = match intent {
            CounterIntent::Increment => state.count.checked_add(1).ok_or_else(overflow)?,
            CounterIntent::Decrement => state.count.checked_sub(1).ok_or_else(overflow)?,
            CounterIntent::Reset => 0,
            CounterIntent::IncrementBy(amount) => {
                state.count.checked_add(amount.get()).ok_or_else(overflow)?
            }
            CounterIntent::DecrementBy(amount) => {
                state.count.checked_sub(amount.get()).ok_or_else(overflow)?
            }
            CounterIntent::Restore(restored) => restored.count,
        };

        Ok(CounterState { count })
    }
}
