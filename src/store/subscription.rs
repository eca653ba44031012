use std::fmt;

/// Handle for a registered listener.
///
/// Calling [`unsubscribe`](Self::unsubscribe) or dropping the handle removes
/// the listener. Keep the handle alive for as long as notifications are
/// wanted, or call [`detach`](Self::detach) to leave the listener registered
/// for the lifetime of the store.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new<F>(unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Stop delivery to this listener.
    pub fn unsubscribe(mut self) {
        self.run_unsubscribe();
    }

    /// Keep the listener registered without holding the handle.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }

    fn run_unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.unsubscribe.is_some())
            .finish()
    }
}
