//! Window Manager
//!
//! Central registry owning every [`Window`]: hands out identities, brokers
//! creation and destruction, routes native events and channel messages by
//! [`WindowId`], and tells application logic what happened through the
//! [`EventSystem`].
//!
//! Windows report back through a [`WindowListener`] they hold weakly. The
//! manager's listener is a small inbox that only records notifications; the
//! manager works through that inbox after each routing step. This keeps
//! window callbacks free of re-entrant access to the registry and makes the
//! destruction order fixed: the registry entry goes first, then observers
//! hear about it.
//!
//! Windows given a frame autosave name have their normal-state frame recorded
//! on every geometry change. The frames are written to the configured
//! autosave file when such a window is destroyed, and reapplied when a later
//! window takes the same name.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use crate::core::{Config, ConfigError, ManagerConfig, SavedFrames};
use crate::events::{EventSystem, ManagerEvent, ManagerEventHandler, ManagerEventType};
use crate::window::{
    ChannelMessage, DisplayState, HostedContent, NativeEvent, SurfaceFactory, Window, WindowArgs, WindowError,
    WindowFrame, WindowId, WindowListener, WindowResult, WindowStateEvent,
};

/// Builds the hosted content for a freshly created window
///
/// Receives the window id and the raw construction argument string.
pub type ContentFactory = Box<dyn FnMut(WindowId, &str) -> Option<Box<dyn HostedContent>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notification {
    Close(WindowId),
    Destroy(WindowId),
    State(WindowId, WindowStateEvent),
}

/// The manager's side of the window listener contract
#[derive(Default)]
struct ListenerInbox {
    pending: RefCell<VecDeque<Notification>>,
}

impl ListenerInbox {
    fn pop(&self) -> Option<Notification> {
        self.pending.borrow_mut().pop_front()
    }
}

impl WindowListener for ListenerInbox {
    fn on_window_close(&self, id: WindowId) {
        self.pending.borrow_mut().push_back(Notification::Close(id));
    }

    fn on_window_destroy(&self, id: WindowId) {
        self.pending.borrow_mut().push_back(Notification::Destroy(id));
    }

    fn on_window_event(&self, id: WindowId, event: &WindowStateEvent) {
        self.pending.borrow_mut().push_back(Notification::State(id, *event));
    }
}

/// Owner of all windows of the application
pub struct WindowManager {
    windows: BTreeMap<WindowId, Window>,
    next_id: u64,
    factory: Box<dyn SurfaceFactory>,
    inbox: Rc<ListenerInbox>,
    events: EventSystem,
    content_factory: Option<ContentFactory>,
    saved_frames: SavedFrames,
    config: ManagerConfig,
}

impl WindowManager {
    /// Create a manager with default configuration
    pub fn new(factory: Box<dyn SurfaceFactory>) -> Self {
        Self::with_config(factory, ManagerConfig::default())
    }

    /// Create a manager with explicit configuration
    ///
    /// Frames saved by earlier runs are read from the autosave file, if one is
    /// configured. An unreadable file is logged and treated as empty.
    pub fn with_config(factory: Box<dyn SurfaceFactory>, config: ManagerConfig) -> Self {
        let saved_frames = match config.frame_autosave_path.as_deref() {
            Some(path) => SavedFrames::load_or_default(path).unwrap_or_else(|e| {
                log::warn!("Ignoring saved frames in {}: {}", path.display(), e);
                SavedFrames::default()
            }),
            None => SavedFrames::default(),
        };

        Self {
            windows: BTreeMap::new(),
            next_id: WindowId::HOST.get() + 1,
            factory,
            inbox: Rc::new(ListenerInbox::default()),
            events: EventSystem::new(),
            content_factory: None,
            saved_frames,
            config,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Install the hook that builds hosted content for each new window
    pub fn set_content_factory(&mut self, factory: ContentFactory) {
        self.content_factory = Some(factory);
    }

    /// Register an observer for one event type
    ///
    /// Returning `true` from a [`ManagerEventType::CloseRequested`] handler
    /// vetoes the close.
    pub fn subscribe<H>(&mut self, event_type: ManagerEventType, handler: H)
    where
        H: ManagerEventHandler + 'static,
    {
        self.events.register_handler(event_type, Box::new(handler));
    }

    // Registry

    /// Create a window and register it
    ///
    /// # Errors
    /// [`WindowError::Creation`] if no native surface could be allocated. No
    /// id is registered in that case and other windows are unaffected.
    pub fn create_window(&mut self, args: WindowArgs) -> WindowResult<WindowId> {
        let id = WindowId(self.next_id);
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| WindowError::Creation("window ids exhausted".to_string()))?;

        let listener: Weak<dyn WindowListener> = Rc::downgrade(&self.inbox) as Weak<dyn WindowListener>;
        let mut window = Window::create(id, args, &self.config.defaults, listener, &mut *self.factory)?;
        // Ids are consumed even if something below fails, so they are never reused
        self.next_id = next_id;

        window.set_event_forwarding(self.config.forward_events_to_content);
        if let Some(factory) = self.content_factory.as_mut() {
            if let Some(content) = factory(id, window.args().raw()) {
                window.attach_content(content)?;
            }
        }

        self.windows.insert(id, window);
        self.events.dispatch(&ManagerEvent::new(ManagerEventType::WindowCreated, id));
        self.process_notifications();
        Ok(id)
    }

    /// Create a window from a serialized argument string
    ///
    /// # Errors
    /// [`WindowError::Creation`] for malformed arguments or surface failure.
    pub fn create_window_from_json(&mut self, raw: &str) -> WindowResult<WindowId> {
        self.create_window(WindowArgs::parse(raw)?)
    }

    /// Destroy a window
    ///
    /// Programmatic close cannot be vetoed. The id is unregistered before
    /// this returns.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown or already destroyed ids.
    pub fn close_window(&mut self, id: WindowId) -> WindowResult<()> {
        let result = self.window_mut(id)?.close();
        self.process_notifications();
        result
    }

    /// Destroy every window
    pub fn close_all(&mut self) {
        let ids = self.window_ids();
        for id in ids {
            if let Err(e) = self.close_window(id) {
                log::warn!("Failed to close window {}: {}", id, e);
            }
        }
    }

    /// Look up a live window
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown or destroyed ids.
    pub fn window(&self, id: WindowId) -> WindowResult<&Window> {
        self.windows.get(&id).ok_or(WindowError::NotFound(id))
    }

    /// Look up a live window for mutation
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown or destroyed ids.
    pub fn window_mut(&mut self, id: WindowId) -> WindowResult<&mut Window> {
        self.windows.get_mut(&id).ok_or(WindowError::NotFound(id))
    }

    /// Whether `id` names a live window
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Ids of all live windows, ascending
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    /// Number of live windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is alive
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    // Frame autosave

    /// Remember a window's frame under `name` across runs
    ///
    /// A frame saved under `name` before is applied right away; otherwise the
    /// current frame becomes the saved one.
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn set_frame_autosave_name(&mut self, id: WindowId, name: &str) -> WindowResult<()> {
        let window = self.windows.get_mut(&id).ok_or(WindowError::NotFound(id))?;
        window.set_frame_autosave_name(name)?;
        match self.saved_frames.get(name) {
            Some(frame) => {
                log::debug!("Restoring frame '{}' for window {}", name, id);
                window.set_frame(frame)?;
            }
            None => {
                self.saved_frames.record(name, window.frame()?);
            }
        }
        Ok(())
    }

    /// Frame currently remembered under `name`
    pub fn saved_frame(&self, name: &str) -> Option<WindowFrame> {
        self.saved_frames.get(name)
    }

    /// Write remembered frames to the autosave file
    ///
    /// Does nothing when no autosave file is configured.
    ///
    /// # Errors
    /// [`ConfigError`] if the file cannot be written.
    pub fn save_frames(&self) -> Result<(), ConfigError> {
        match self.config.frame_autosave_path.as_deref() {
            Some(path) => self.saved_frames.save_to_file(path),
            None => Ok(()),
        }
    }

    fn remember_frame(&mut self, id: WindowId) {
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        let Some(name) = window.frame_autosave_name() else {
            return;
        };
        // Maximized and fullscreen geometry is not worth restoring
        if window.display_state() != Ok(DisplayState::Normal) {
            return;
        }
        if let Ok(frame) = window.frame() {
            self.saved_frames.record(name, frame);
        }
    }

    // Messaging

    /// Queue a message on a window's channel
    ///
    /// # Errors
    /// [`WindowError::NotFound`] for unknown ids.
    pub fn send(&mut self, id: WindowId, message: ChannelMessage) -> WindowResult<()> {
        self.window_mut(id)?.send(message)
    }

    /// Send a method call from one window (or [`WindowId::HOST`]) to another
    ///
    /// # Errors
    /// [`WindowError::NotFound`] if the target is not a live window, or if the
    /// sender is neither the host nor a live window.
    pub fn post_message(
        &mut self,
        from: WindowId,
        to: WindowId,
        method: &str,
        arguments: serde_json::Value,
    ) -> WindowResult<()> {
        if from != WindowId::HOST && !self.contains(from) {
            return Err(WindowError::NotFound(from));
        }
        self.send(to, ChannelMessage::new(from, method, arguments))
    }

    /// Send a method call to every live window except `from`
    ///
    /// Returns the number of windows reached.
    pub fn broadcast(&mut self, from: WindowId, method: &str, arguments: &serde_json::Value) -> usize {
        let mut reached = 0;
        for (id, window) in &mut self.windows {
            if *id == from {
                continue;
            }
            match window.send(ChannelMessage::new(from, method, arguments.clone())) {
                Ok(()) => reached += 1,
                Err(e) => log::debug!("Broadcast skipped window {}: {}", id, e),
            }
        }
        reached
    }

    // Event routing

    /// Run one iteration of the toolkit event loop and route everything it reported
    pub fn pump_events(&mut self) {
        self.factory.poll_events();
        for id in self.window_ids() {
            if let Some(window) = self.windows.get_mut(&id) {
                window.process_native_events();
            }
            self.process_notifications();
        }
    }

    /// Route one native callback to a window
    ///
    /// Callbacks for ids without a live window are dropped; returns whether
    /// the callback had a target.
    pub fn dispatch_native(&mut self, id: WindowId, event: NativeEvent) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            log::debug!("No window {} for {:?}, ignoring", id, event);
            return false;
        };
        window.handle_native_event(event);
        self.process_notifications();
        true
    }

    fn process_notifications(&mut self) {
        while let Some(notification) = self.inbox.pop() {
            match notification {
                Notification::Close(id) => self.handle_close_request(id),
                Notification::Destroy(id) => {
                    let autosaved = self
                        .windows
                        .remove(&id)
                        .is_some_and(|window| window.frame_autosave_name().is_some());
                    log::debug!("Window {} unregistered, {} remaining", id, self.windows.len());
                    self.events.dispatch(&ManagerEvent::new(ManagerEventType::WindowDestroyed, id));
                    if autosaved {
                        if let Err(e) = self.save_frames() {
                            log::warn!("Failed to save window frames: {}", e);
                        }
                    }
                }
                Notification::State(id, event) => {
                    if matches!(
                        event,
                        WindowStateEvent::Resized { .. }
                            | WindowStateEvent::Moved { .. }
                            | WindowStateEvent::ResizeFinished { .. }
                            | WindowStateEvent::MoveFinished { .. }
                            | WindowStateEvent::StateChanged(DisplayState::Normal)
                    ) {
                        self.remember_frame(id);
                    }
                    self.events.dispatch(&ManagerEvent::state_changed(id, event));
                }
            }
        }
    }

    fn handle_close_request(&mut self, id: WindowId) {
        let vetoed = self.events.dispatch(&ManagerEvent::new(ManagerEventType::CloseRequested, id));
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };

        if vetoed || window.is_prevent_close() {
            log::info!("Close of window {} vetoed", id);
            return;
        }
        if let Err(e) = window.close() {
            log::warn!("Window {} could not be closed: {}", id, e);
        }
    }
}
