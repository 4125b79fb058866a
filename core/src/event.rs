//! Typed callback registries.
//!
//! Each emitting component owns its registries; subscribers hold a
//! `Subscription` token and can unsubscribe explicitly. Callbacks run
//! synchronously on the emitting thread, under whatever lock the emitter
//! holds.

/// Token identifying a registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// An owned list of callbacks for one event type.
pub struct Callbacks<E> {
    next_id: u64,
    entries: Vec<(u64, Box<dyn Fn(&E) + Send>)>,
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Callbacks<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Register a callback and return its subscription token.
    pub fn subscribe(&mut self, callback: impl Fn(&E) + Send + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Remove a previously registered callback. Returns false if the token
    /// was unknown.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != subscription.0);
        self.entries.len() != before
    }

    /// Invoke every registered callback with the event.
    pub fn emit(&self, event: &E) {
        for (_, callback) in &self.entries {
            callback(event);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> std::fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("len", &self.entries.len())
            .finish()
    }
}
