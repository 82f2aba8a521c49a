//! Per-window message channel
//!
//! The channel is the only path between application logic and the content a
//! window hosts. Outbound messages queue up until the hosted side drains
//! them; inbound messages from the hosted side are handed to every
//! registered handler as they arrive.
//!
//! Delivery is fire-and-forget. Request/response protocols put their own
//! correlation ids into `arguments`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{WindowError, WindowId, WindowResult};
use crate::foundation::collections::{HandlerId, HandlerMap};

/// Method name used for window events mirrored to hosted content
pub const EVENT_METHOD: &str = "onEvent";

/// Message envelope carried by a [`WindowChannel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Window the message originates from ([`WindowId::HOST`] for the controller)
    pub from_window_id: WindowId,
    /// Method name, interpreted by the receiver
    pub method: String,
    /// Opaque payload
    #[serde(default)]
    pub arguments: Value,
}

impl ChannelMessage {
    /// Create a message
    pub fn new(from_window_id: WindowId, method: impl Into<String>, arguments: Value) -> Self {
        Self {
            from_window_id,
            method: method.into(),
            arguments,
        }
    }

    /// Create a window event notification for hosted content
    pub fn event(from_window_id: WindowId, event_name: &str) -> Self {
        Self::new(from_window_id, EVENT_METHOD, serde_json::json!({ "eventName": event_name }))
    }

    /// Event name if this is a window event notification
    pub fn event_name(&self) -> Option<&str> {
        if self.method != EVENT_METHOD {
            return None;
        }
        self.arguments.get("eventName").and_then(Value::as_str)
    }
}

/// Callback for inbound messages
pub type MessageHandler = Box<dyn FnMut(&ChannelMessage)>;

/// Bidirectional message transport bound to one window
pub struct WindowChannel {
    window_id: WindowId,
    outbound: VecDeque<ChannelMessage>,
    handlers: HandlerMap<MessageHandler>,
    closed: bool,
}

impl WindowChannel {
    /// Create an open channel for `window_id`
    pub fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            outbound: VecDeque::new(),
            handlers: HandlerMap::new(),
            closed: false,
        }
    }

    /// Window this channel belongs to
    pub const fn window_id(&self) -> WindowId {
        self.window_id
    }

    /// Whether the owning window has been destroyed
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Queue a message for the hosted content
    pub fn send(&mut self, message: ChannelMessage) -> WindowResult<()> {
        if self.closed {
            return Err(WindowError::ChannelClosed(self.window_id));
        }
        log::trace!("Window {} <- {}", self.window_id, message.method);
        self.outbound.push_back(message);
        Ok(())
    }

    /// Register a handler for inbound messages
    pub fn on_receive<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&ChannelMessage) + 'static,
    {
        self.handlers.insert(Box::new(handler))
    }

    /// Unregister a handler; returns whether it was registered
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        self.handlers.remove(id).is_some()
    }

    /// Number of registered inbound handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Hand an inbound message from the hosted content to every handler
    pub fn deliver(&mut self, message: &ChannelMessage) -> WindowResult<()> {
        if self.closed {
            return Err(WindowError::ChannelClosed(self.window_id));
        }
        log::trace!("Window {} -> {}", self.window_id, message.method);
        for handler in self.handlers.values_mut() {
            handler(message);
        }
        Ok(())
    }

    /// Take every queued outbound message, oldest first
    pub fn drain_outbound(&mut self) -> Vec<ChannelMessage> {
        self.outbound.drain(..).collect()
    }

    /// Number of queued outbound messages
    pub fn pending_outbound(&self) -> usize {
        self.outbound.len()
    }

    /// Close the channel; undelivered messages and handlers are dropped
    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.outbound.clear();
        self.handlers.clear();
    }
}

impl std::fmt::Debug for WindowChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowChannel")
            .field("window_id", &self.window_id)
            .field("pending_outbound", &self.outbound.len())
            .field("handlers", &self.handlers.len())
            .field("closed", &self.closed)
            .finish()
    }
}
