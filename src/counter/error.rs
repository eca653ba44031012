use thiserror::Error;

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("Cannot {operation}: count {count} would overflow")]
    Overflow { count: i64, operation: &'static str },
}
