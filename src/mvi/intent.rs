//! Base trait for intents (requested mutations) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent a single mutation request: a button press in some
/// presentation layer, a CLI command, or a state restore from storage.
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
