//! Specialized collection types

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a registered callback
    pub struct HandlerId;
}

/// Handle-keyed storage for registered callbacks
///
/// Removing one handler never invalidates the handles of the others, and a
/// removed handle is never resolved to a newer handler that reused its slot.
pub struct HandlerMap<T> {
    handlers: SlotMap<HandlerId, T>,
}

impl<T> HandlerMap<T> {
    /// Create an empty handler map
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
        }
    }

    /// Register a handler and return its handle
    pub fn insert(&mut self, handler: T) -> HandlerId {
        self.handlers.insert(handler)
    }

    /// Remove a handler by handle
    pub fn remove(&mut self, id: HandlerId) -> Option<T> {
        self.handlers.remove(id)
    }

    /// Check whether a handle still refers to a registered handler
    pub fn contains(&self, id: HandlerId) -> bool {
        self.handlers.contains_key(id)
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate mutably over all registered handlers
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.handlers.values_mut()
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<T> Default for HandlerMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
