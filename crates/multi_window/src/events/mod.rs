//! Manager notification system
//!
//! Application logic observes the window manager through handlers registered
//! per [`ManagerEventType`]. Key principles:
//! - Registration system (only interested handlers are notified)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - A consumed [`ManagerEventType::CloseRequested`] vetoes the close

use std::collections::HashMap;

use crate::window::{WindowId, WindowStateEvent};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerEventType {
    /// A window was created and registered
    WindowCreated,
    /// The user asked to close a window
    CloseRequested,
    /// A window was destroyed and unregistered
    WindowDestroyed,
    /// Focus, geometry or display state of a window changed
    WindowStateChanged,
}

/// Notification delivered to manager observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerEvent {
    /// Type of event
    pub event_type: ManagerEventType,
    /// Window the event concerns
    pub window_id: WindowId,
    /// Normalized window event for [`ManagerEventType::WindowStateChanged`]
    pub state: Option<WindowStateEvent>,
}

impl ManagerEvent {
    /// Create an event without state payload
    pub const fn new(event_type: ManagerEventType, window_id: WindowId) -> Self {
        Self {
            event_type,
            window_id,
            state: None,
        }
    }

    /// Create a state change event
    pub const fn state_changed(window_id: WindowId, state: WindowStateEvent) -> Self {
        Self {
            event_type: ManagerEventType::WindowStateChanged,
            window_id,
            state: Some(state),
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait ManagerEventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &ManagerEvent) -> bool;
}

impl<F> ManagerEventHandler for F
where
    F: FnMut(&ManagerEvent) -> bool,
{
    fn on_event(&mut self, event: &ManagerEvent) -> bool {
        self(event)
    }
}

/// Handler registry with chain-of-responsibility dispatch
pub struct EventSystem {
    handlers: HashMap<ManagerEventType, Vec<Box<dyn ManagerEventHandler>>>,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a specific event type
    /// Handlers are asked in registration order
    pub fn register_handler(&mut self, event_type: ManagerEventType, handler: Box<dyn ManagerEventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Number of handlers registered for `event_type`
    pub fn handler_count(&self, event_type: ManagerEventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    /// Dispatch an event to its registered handlers
    /// Stops on first handler that returns true and reports whether that happened
    pub fn dispatch(&mut self, event: &ManagerEvent) -> bool {
        let Some(handlers) = self.handlers.get_mut(&event.event_type) else {
            return false;
        };
        for handler in handlers.iter_mut() {
            if handler.on_event(event) {
                return true;
            }
        }
        false
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestHandler {
        events_received: Rc<RefCell<Vec<ManagerEventType>>>,
        consume: bool,
    }

    impl ManagerEventHandler for TestHandler {
        fn on_event(&mut self, event: &ManagerEvent) -> bool {
            self.events_received.borrow_mut().push(event.event_type);
            self.consume
        }
    }

    #[test]
    fn test_only_registered_type_notified() {
        let mut system = EventSystem::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        system.register_handler(
            ManagerEventType::WindowCreated,
            Box::new(TestHandler {
                events_received: Rc::clone(&received),
                consume: false,
            }),
        );

        system.dispatch(&ManagerEvent::new(ManagerEventType::WindowCreated, WindowId(1)));
        system.dispatch(&ManagerEvent::new(ManagerEventType::WindowDestroyed, WindowId(1)));

        assert_eq!(*received.borrow(), vec![ManagerEventType::WindowCreated]);
    }

    #[test]
    fn test_event_consumption() {
        let mut system = EventSystem::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        // First handler consumes
        system.register_handler(
            ManagerEventType::CloseRequested,
            Box::new(TestHandler {
                events_received: Rc::clone(&first),
                consume: true,
            }),
        );
        // Second handler should not receive
        system.register_handler(
            ManagerEventType::CloseRequested,
            Box::new(TestHandler {
                events_received: Rc::clone(&second),
                consume: false,
            }),
        );

        let consumed = system.dispatch(&ManagerEvent::new(ManagerEventType::CloseRequested, WindowId(4)));

        assert!(consumed);
        assert_eq!(first.borrow().len(), 1);
        assert!(second.borrow().is_empty());
        assert_eq!(system.handler_count(ManagerEventType::CloseRequested), 2);
    }

    #[test]
    fn test_closure_handlers() {
        let mut system = EventSystem::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        system.register_handler(
            ManagerEventType::WindowStateChanged,
            Box::new(move |event: &ManagerEvent| {
                *sink.borrow_mut() = event.state;
                false
            }),
        );

        let consumed = system.dispatch(&ManagerEvent::state_changed(WindowId(2), WindowStateEvent::FocusGained));
        assert!(!consumed);
        assert_eq!(*seen.borrow(), Some(WindowStateEvent::FocusGained));
    }
}
