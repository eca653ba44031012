use crate::counter::state::{Amount, CounterState};
use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum CounterIntent {
    Increment,
    Decrement,
    Reset,
    IncrementBy(Amount),
    DecrementBy(Amount),
    /// Replace the whole state. Used when hydrating from storage.
    Restore(CounterState),
}

impl CounterIntent {
    /// Short verb for logs and error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Reset => "reset",
            Self::IncrementBy(_) => "increment_by",
            Self::DecrementBy(_) => "decrement_by",
            Self::Restore(_) => "restore",
        }
    }
}

impl Intent for CounterIntent {}
