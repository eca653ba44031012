use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::counter::error::StoreError;
use crate::mvi::StoreState;

/// The counter record held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

impl StoreState for CounterState {}

impl CounterState {
    pub fn new(count: i64) -> Self {
        Self { count }
    }
}

/// A validated step for `increment_by` / `decrement_by`.
///
/// Any `i64` is a valid amount. Text input goes through [`Amount::parse`],
/// which is where non-numeric or missing quantities get rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Parse a quantity typed by a user.
    ///
    /// Surrounding whitespace is ignored. Empty input, fractions, and
    /// anything outside the `i64` range are rejected.
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidAmount {
                input: input.to_string(),
                reason: "amount is empty".to_string(),
            });
        }

        trimmed.parse::<i64>().map(Self).map_err(|e| {
            let reason = match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "amount is out of range",
                _ => "amount is not an integer",
            };
            StoreError::InvalidAmount {
                input: input.to_string(),
                reason: reason.to_string(),
            }
        })
    }
}
