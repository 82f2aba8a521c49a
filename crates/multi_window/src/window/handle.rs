//! Managed top-level window
//!
//! A [`Window`] owns one native surface, the [`EventBridge`] translating that
//! surface's callbacks, and the [`WindowChannel`] to the content it hosts.
//! Application code normally reaches windows through the
//! [`WindowManager`](crate::manager::WindowManager), but a window works on
//! its own with any [`WindowListener`].
//!
//! # Liveness
//!
//! Once destroyed (natively or through [`Window::close`]) the surface is
//! released, the channel is closed, and every operation returns
//! [`WindowError::InvalidState`]. Native callbacks still queued for the
//! window after that point are discarded, so the listener never hears about
//! a window after its destroy notification.

use std::rc::Weak;

use super::{
    ChannelMessage, DisplayState, EventBridge, HostedContent, Lifecycle, NativeEvent, NativeSurface,
    SurfaceFactory, WindowArgs, WindowChannel, WindowError, WindowFrame, WindowId, WindowListener,
    WindowResult, WindowStateEvent,
};
use crate::core::WindowDefaults;

/// A native top-level window with its message channel
pub struct Window {
    id: WindowId,
    lifecycle: Lifecycle,
    surface: Option<Box<dyn NativeSurface>>,
    bridge: EventBridge,
    channel: WindowChannel,
    listener: Weak<dyn WindowListener>,
    content: Option<Box<dyn HostedContent>>,
    args: WindowArgs,
    prevent_close: bool,
    forward_events: bool,
    frame_autosave_name: Option<String>,
}

impl Window {
    /// Create a window and its native surface
    ///
    /// Options missing from `args` are taken from `defaults`. The listener is
    /// only referenced weakly.
    ///
    /// # Errors
    /// [`WindowError::Creation`] if the factory cannot allocate a surface.
    pub fn create(
        id: WindowId,
        args: WindowArgs,
        defaults: &WindowDefaults,
        listener: Weak<dyn WindowListener>,
        factory: &mut dyn SurfaceFactory,
    ) -> WindowResult<Self> {
        let options = args.resolve(defaults);
        let surface = factory.create_surface(id, &options)?;
        let bridge = EventBridge::new(surface.frame(), surface.state_flags());

        log::info!(
            "Created window {} '{}' ({}x{})",
            id,
            options.title,
            options.width,
            options.height
        );

        Ok(Self {
            id,
            lifecycle: Lifecycle::Live,
            surface: Some(surface),
            bridge,
            channel: WindowChannel::new(id),
            listener,
            content: None,
            args,
            prevent_close: false,
            forward_events: true,
            frame_autosave_name: None,
        })
    }

    /// Window identity
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Current lifecycle state
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the window has not been destroyed yet
    pub const fn is_live(&self) -> bool {
        self.lifecycle.is_operable()
    }

    /// Arguments the window was created from
    pub const fn args(&self) -> &WindowArgs {
        &self.args
    }

    /// The window's message channel
    pub const fn channel(&self) -> &WindowChannel {
        &self.channel
    }

    /// Mutable access to the window's message channel
    pub fn channel_mut(&mut self) -> &mut WindowChannel {
        &mut self.channel
    }

    /// Queue a message for the hosted content
    ///
    /// # Errors
    /// [`WindowError::ChannelClosed`] once the window is destroyed.
    pub fn send(&mut self, message: ChannelMessage) -> WindowResult<()> {
        self.channel.send(message)
    }

    /// Attach the embedding engine's content
    ///
    /// The content is immediately told the current size and visibility.
    pub fn attach_content(&mut self, mut content: Box<dyn HostedContent>) -> WindowResult<()> {
        let surface = self.live_surface("attach content")?;
        let (width, height) = surface.size();
        content.resize(width, height);
        content.set_visible(surface.is_visible());
        self.content = Some(content);
        Ok(())
    }

    /// Whether hosted content is attached
    pub const fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Mirror normalized events to the hosted content as `onEvent` messages
    pub fn set_event_forwarding(&mut self, enabled: bool) {
        self.forward_events = enabled;
    }

    /// Ask the owner not to close the window on user close requests
    pub fn set_prevent_close(&mut self, prevent_close: bool) -> WindowResult<()> {
        self.ensure_live("set prevent close")?;
        self.prevent_close = prevent_close;
        Ok(())
    }

    /// Whether user close requests should be ignored
    pub const fn is_prevent_close(&self) -> bool {
        self.prevent_close
    }

    /// Name under which the frame is remembered across runs
    ///
    /// The window only carries the name; the
    /// [`WindowManager`](crate::manager::WindowManager) restores and records
    /// the frame.
    pub fn set_frame_autosave_name(&mut self, name: impl Into<String>) -> WindowResult<()> {
        self.ensure_live("set frame autosave name")?;
        self.frame_autosave_name = Some(name.into());
        Ok(())
    }

    /// Frame autosave name, if one was set
    pub fn frame_autosave_name(&self) -> Option<&str> {
        self.frame_autosave_name.as_deref()
    }

    // Window operations

    /// Make the window visible
    pub fn show(&mut self) -> WindowResult<()> {
        self.live_surface("show")?.show();
        if let Some(content) = self.content.as_mut() {
            content.set_visible(true);
        }
        Ok(())
    }

    /// Hide the window
    pub fn hide(&mut self) -> WindowResult<()> {
        self.live_surface("hide")?.hide();
        if let Some(content) = self.content.as_mut() {
            content.set_visible(false);
        }
        Ok(())
    }

    /// Whether the window is visible
    pub fn is_visible(&self) -> WindowResult<bool> {
        Ok(self.surface_ref("query visibility")?.is_visible())
    }

    /// Restore, raise and focus the window
    ///
    /// Focusing shows a hidden window; attached content is told.
    pub fn focus(&mut self) -> WindowResult<()> {
        let surface = self.live_surface("focus")?;
        if surface.state_flags().display_state() == DisplayState::Minimized {
            surface.restore();
        }
        surface.focus();
        let visible = surface.is_visible();
        if let Some(content) = self.content.as_mut() {
            content.set_visible(visible);
        }
        Ok(())
    }

    /// Whether the window has keyboard focus
    pub fn has_focus(&self) -> WindowResult<bool> {
        Ok(self.surface_ref("query focus")?.has_focus())
    }

    /// Destroy the window
    ///
    /// Unlike a user close request this cannot be vetoed. The native window
    /// is closed first; the listener is notified before the surface handle is
    /// dropped.
    pub fn close(&mut self) -> WindowResult<()> {
        self.live_surface("close")?.close();
        self.destroy();
        Ok(())
    }

    /// Center the window on the primary monitor
    pub fn center(&mut self) -> WindowResult<()> {
        self.live_surface("center")?.center();
        Ok(())
    }

    /// Start a user drag of the window
    ///
    /// Call from a primary-button press inside the content, for windows
    /// without a title bar.
    pub fn start_dragging(&mut self) -> WindowResult<()> {
        self.live_surface("start dragging")?.start_dragging();
        Ok(())
    }

    /// Current client size
    pub fn size(&self) -> WindowResult<(u32, u32)> {
        Ok(self.surface_ref("query size")?.size())
    }

    /// Resize the client area
    pub fn set_size(&mut self, width: u32, height: u32) -> WindowResult<()> {
        self.live_surface("resize")?.set_size(width, height);
        Ok(())
    }

    /// Current position
    pub fn position(&self) -> WindowResult<(i32, i32)> {
        Ok(self.surface_ref("query position")?.position())
    }

    /// Move the window
    pub fn set_position(&mut self, x: i32, y: i32) -> WindowResult<()> {
        self.live_surface("move")?.set_position(x, y);
        Ok(())
    }

    /// Position and size in one snapshot
    pub fn frame(&self) -> WindowResult<WindowFrame> {
        Ok(self.surface_ref("query frame")?.frame())
    }

    /// Move and resize in one call
    pub fn set_frame(&mut self, frame: WindowFrame) -> WindowResult<()> {
        let surface = self.live_surface("set frame")?;
        surface.set_position(frame.x, frame.y);
        surface.set_size(frame.width, frame.height);
        Ok(())
    }

    /// Current title
    pub fn title(&self) -> WindowResult<String> {
        Ok(self.surface_ref("query title")?.title())
    }

    /// Set the title bar text
    pub fn set_title(&mut self, title: &str) -> WindowResult<()> {
        self.live_surface("set title")?.set_title(title);
        Ok(())
    }

    /// Keep the window above other windows
    pub fn set_always_on_top(&mut self, always_on_top: bool) -> WindowResult<()> {
        self.live_surface("set always on top")?.set_always_on_top(always_on_top);
        Ok(())
    }

    /// Whether the window floats above others
    pub fn is_always_on_top(&self) -> WindowResult<bool> {
        Ok(self.surface_ref("query always on top")?.is_always_on_top())
    }

    /// Show or hide the title bar and borders
    pub fn set_decorated(&mut self, decorated: bool) -> WindowResult<()> {
        self.live_surface("set decorated")?.set_decorated(decorated);
        Ok(())
    }

    /// Maximize unless already maximized
    pub fn maximize(&mut self) -> WindowResult<()> {
        let surface = self.live_surface("maximize")?;
        if surface.state_flags().display_state() != DisplayState::Maximized {
            surface.maximize();
        }
        Ok(())
    }

    /// Leave the maximized state if maximized
    pub fn unmaximize(&mut self) -> WindowResult<()> {
        let surface = self.live_surface("unmaximize")?;
        if surface.state_flags().display_state() == DisplayState::Maximized {
            surface.unmaximize();
        }
        Ok(())
    }

    /// Minimize
    pub fn minimize(&mut self) -> WindowResult<()> {
        self.live_surface("minimize")?.minimize();
        Ok(())
    }

    /// Restore from the minimized state
    pub fn restore(&mut self) -> WindowResult<()> {
        self.live_surface("restore")?.restore();
        Ok(())
    }

    /// Enter or leave fullscreen
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> WindowResult<()> {
        let surface = self.live_surface("set fullscreen")?;
        let is_fullscreen = surface.state_flags().display_state() == DisplayState::Fullscreen;
        if is_fullscreen != fullscreen {
            surface.set_fullscreen(fullscreen);
        }
        Ok(())
    }

    /// Current display state as reported by the surface
    pub fn display_state(&self) -> WindowResult<DisplayState> {
        Ok(self.surface_ref("query display state")?.state_flags().display_state())
    }

    /// Whether the window is maximized
    pub fn is_maximized(&self) -> WindowResult<bool> {
        Ok(self.display_state()? == DisplayState::Maximized)
    }

    /// Whether the window is minimized
    pub fn is_minimized(&self) -> WindowResult<bool> {
        Ok(self.display_state()? == DisplayState::Minimized)
    }

    /// Whether the window is fullscreen
    pub fn is_fullscreen(&self) -> WindowResult<bool> {
        Ok(self.display_state()? == DisplayState::Fullscreen)
    }

    /// Native surface, for backend-specific access through `as_any_mut`
    pub fn native_surface_mut(&mut self) -> WindowResult<&mut dyn NativeSurface> {
        self.live_surface("access native surface")
    }

    // Event bridge

    /// Route the callbacks the surface queued since the last call
    pub fn process_native_events(&mut self) {
        let events = match self.surface.as_mut() {
            Some(surface) if self.lifecycle.is_operable() => surface.drain_events(),
            _ => return,
        };
        for event in events {
            self.handle_native_event(event);
        }
    }

    /// Route one native callback through the bridge
    ///
    /// Ignored once the window is destroyed.
    pub fn handle_native_event(&mut self, event: NativeEvent) {
        if !self.lifecycle.is_operable() {
            log::trace!("Window {} is destroyed, dropping {:?}", self.id, event);
            return;
        }

        let previous = self.bridge.display_state();
        for state_event in self.bridge.translate(event) {
            match state_event {
                WindowStateEvent::Closing => self.close_requested(previous),
                WindowStateEvent::Destroyed => {
                    self.destroy();
                    return;
                }
                other => self.state_changed(other, previous),
            }
        }
    }

    fn close_requested(&mut self, previous: DisplayState) {
        log::debug!("Window {} close requested", self.id);
        self.lifecycle = Lifecycle::ClosingRequested;
        self.mirror_to_content(&WindowStateEvent::Closing, previous);

        if let Some(listener) = self.listener.upgrade() {
            listener.on_window_close(self.id);
        }

        if self.lifecycle == Lifecycle::ClosingRequested {
            self.lifecycle = Lifecycle::Live;
        }
    }

    fn state_changed(&mut self, event: WindowStateEvent, previous: DisplayState) {
        log::debug!("Window {} {:?}", self.id, event);
        if let (WindowStateEvent::Resized { width, height }, Some(content)) = (event, self.content.as_mut()) {
            content.resize(width, height);
        }
        self.mirror_to_content(&event, previous);

        if let Some(listener) = self.listener.upgrade() {
            listener.on_window_event(self.id, &event);
        }
    }

    fn destroy(&mut self) {
        log::info!("Window {} destroyed", self.id);
        self.lifecycle = Lifecycle::Destroyed;
        self.channel.close();

        if let Some(listener) = self.listener.upgrade() {
            listener.on_window_destroy(self.id);
        }

        self.content = None;
        self.surface = None;
    }

    fn mirror_to_content(&mut self, event: &WindowStateEvent, previous: DisplayState) {
        if !self.forward_events {
            return;
        }
        if let Some(name) = event.content_event_name(previous) {
            if let Err(e) = self.channel.send(ChannelMessage::event(WindowId::HOST, name)) {
                log::debug!("Dropping '{}' for window {}: {}", name, self.id, e);
            }
        }
    }

    fn ensure_live(&self, operation: &'static str) -> WindowResult<()> {
        if self.lifecycle.is_operable() {
            Ok(())
        } else {
            Err(WindowError::InvalidState { id: self.id, operation })
        }
    }

    fn live_surface(&mut self, operation: &'static str) -> WindowResult<&mut dyn NativeSurface> {
        self.ensure_live(operation)?;
        match self.surface.as_mut() {
            Some(surface) => Ok(&mut **surface),
            None => Err(WindowError::InvalidState { id: self.id, operation }),
        }
    }

    fn surface_ref(&self, operation: &'static str) -> WindowResult<&dyn NativeSurface> {
        self.ensure_live(operation)?;
        match self.surface.as_ref() {
            Some(surface) => Ok(&**surface),
            None => Err(WindowError::InvalidState { id: self.id, operation }),
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("channel", &self.channel)
            .field("prevent_close", &self.prevent_close)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::headless::{HeadlessSurface, HeadlessSurfaceFactory};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingListener {
        closes: RefCell<Vec<WindowId>>,
        destroys: RefCell<Vec<WindowId>>,
        events: RefCell<Vec<WindowStateEvent>>,
    }

    impl WindowListener for RecordingListener {
        fn on_window_close(&self, id: WindowId) {
            self.closes.borrow_mut().push(id);
        }

        fn on_window_destroy(&self, id: WindowId) {
            self.destroys.borrow_mut().push(id);
        }

        fn on_window_event(&self, _id: WindowId, event: &WindowStateEvent) {
            self.events.borrow_mut().push(*event);
        }
    }

    fn create_window(listener: &Rc<RecordingListener>, args: WindowArgs) -> Window {
        let weak: Weak<dyn WindowListener> = Rc::downgrade(listener) as Weak<dyn WindowListener>;
        let mut factory = HeadlessSurfaceFactory::new();
        Window::create(WindowId(1), args, &WindowDefaults::default(), weak, &mut factory).unwrap()
    }

    #[test]
    fn test_create_uses_args_geometry() {
        let listener = Rc::new(RecordingListener::default());
        let window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        assert_eq!(window.lifecycle(), Lifecycle::Live);
        assert_eq!(window.size().unwrap(), (800, 600));
        assert_eq!(window.title().unwrap(), "Main");
        assert!(!window.is_visible().unwrap());
    }

    #[test]
    fn test_creation_failure() {
        let listener = Rc::new(RecordingListener::default());
        let weak: Weak<dyn WindowListener> = Rc::downgrade(&listener) as Weak<dyn WindowListener>;
        let mut factory = HeadlessSurfaceFactory::new().with_surface_limit(0);

        let result = Window::create(WindowId(1), WindowArgs::default(), &WindowDefaults::default(), weak, &mut factory);
        assert!(matches!(result, Err(WindowError::Creation(_))));
    }

    #[test]
    fn test_resize_forwarded_exactly_once() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));
        window.set_event_forwarding(false);

        window.handle_native_event(NativeEvent::Resize { width: 1024, height: 768 });
        window.handle_native_event(NativeEvent::Resize { width: 1024, height: 768 });

        assert_eq!(
            *listener.events.borrow(),
            vec![WindowStateEvent::Resized { width: 1024, height: 768 }]
        );
    }

    #[test]
    fn test_unchanged_size_produces_no_event() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.handle_native_event(NativeEvent::Resize { width: 800, height: 600 });
        assert!(listener.events.borrow().is_empty());
    }

    #[test]
    fn test_close_request_without_destroy_keeps_window_live() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.handle_native_event(NativeEvent::CloseRequested);

        assert_eq!(*listener.closes.borrow(), vec![WindowId(1)]);
        assert!(listener.destroys.borrow().is_empty());
        assert_eq!(window.lifecycle(), Lifecycle::Live);
        window.set_title("Still here").unwrap();
        window.send(ChannelMessage::new(WindowId::HOST, "ping", serde_json::Value::Null)).unwrap();
    }

    #[test]
    fn test_native_destroy_invalidates_operations() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.handle_native_event(NativeEvent::Destroyed);

        assert_eq!(*listener.destroys.borrow(), vec![WindowId(1)]);
        assert_eq!(window.lifecycle(), Lifecycle::Destroyed);
        assert!(matches!(window.show(), Err(WindowError::InvalidState { .. })));
        assert!(matches!(window.set_size(10, 10), Err(WindowError::InvalidState { .. })));
        assert!(matches!(window.size(), Err(WindowError::InvalidState { .. })));
        assert!(matches!(window.close(), Err(WindowError::InvalidState { .. })));
        assert_eq!(
            window.send(ChannelMessage::new(WindowId::HOST, "late", serde_json::Value::Null)),
            Err(WindowError::ChannelClosed(WindowId(1)))
        );
    }

    #[test]
    fn test_no_events_after_destroy() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.handle_native_event(NativeEvent::Destroyed);
        window.handle_native_event(NativeEvent::FocusIn);
        window.handle_native_event(NativeEvent::Destroyed);
        window.handle_native_event(NativeEvent::CloseRequested);

        assert_eq!(listener.destroys.borrow().len(), 1);
        assert!(listener.events.borrow().is_empty());
        assert!(listener.closes.borrow().is_empty());
    }

    #[test]
    fn test_programmatic_close_skips_close_request() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::default());

        window.close().unwrap();

        assert!(listener.closes.borrow().is_empty());
        assert_eq!(*listener.destroys.borrow(), vec![WindowId(1)]);
        assert!(!window.is_live());
    }

    #[test]
    fn test_dropped_listener_is_silent() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::default());
        drop(listener);

        window.handle_native_event(NativeEvent::FocusIn);
        window.handle_native_event(NativeEvent::CloseRequested);
        window.handle_native_event(NativeEvent::Destroyed);
        assert_eq!(window.lifecycle(), Lifecycle::Destroyed);
    }

    #[test]
    fn test_events_mirrored_to_channel() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.handle_native_event(NativeEvent::FocusIn);
        window.handle_native_event(NativeEvent::StateChanged(crate::window::NativeStateFlags::MAXIMIZED));
        window.handle_native_event(NativeEvent::StateChanged(crate::window::NativeStateFlags::empty()));
        window.handle_native_event(NativeEvent::FocusOut);

        let names: Vec<String> = window
            .channel_mut()
            .drain_outbound()
            .iter()
            .filter_map(|m| m.event_name().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["focus", "maximize", "unmaximize", "blur"]);
    }

    #[test]
    fn test_operations_reach_headless_surface() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));

        window.set_frame(WindowFrame::new(5, 6, 300, 200)).unwrap();
        window.set_always_on_top(true).unwrap();
        window.maximize().unwrap();

        assert_eq!(window.frame().unwrap(), WindowFrame::new(5, 6, 300, 200));
        assert!(window.is_always_on_top().unwrap());
        assert!(window.is_maximized().unwrap());

        window.process_native_events();
        assert!(listener.events.borrow().contains(&WindowStateEvent::Moved { x: 5, y: 6 }));
        assert!(listener
            .events
            .borrow()
            .contains(&WindowStateEvent::StateChanged(DisplayState::Maximized)));

        let surface = window.native_surface_mut().unwrap();
        assert!(surface.as_any_mut().downcast_mut::<HeadlessSurface>().is_some());
    }

    #[test]
    fn test_hosted_content_follows_size_and_visibility() {
        struct Content(Rc<RefCell<(u32, u32, bool)>>);
        impl HostedContent for Content {
            fn resize(&mut self, width: u32, height: u32) {
                let mut state = self.0.borrow_mut();
                state.0 = width;
                state.1 = height;
            }
            fn set_visible(&mut self, visible: bool) {
                self.0.borrow_mut().2 = visible;
            }
        }

        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main"));
        let state = Rc::new(RefCell::new((0, 0, true)));
        window.attach_content(Box::new(Content(Rc::clone(&state)))).unwrap();
        assert_eq!(*state.borrow(), (800, 600, false));

        window.show().unwrap();
        window.handle_native_event(NativeEvent::Resize { width: 1024, height: 768 });
        assert_eq!(*state.borrow(), (1024, 768, true));
    }

    #[test]
    fn test_focus_shows_hidden_content() {
        struct Visibility(Rc<RefCell<bool>>);
        impl HostedContent for Visibility {
            fn resize(&mut self, _width: u32, _height: u32) {}
            fn set_visible(&mut self, visible: bool) {
                *self.0.borrow_mut() = visible;
            }
        }

        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(800, 600, "Main").with_visible(true));
        let visible = Rc::new(RefCell::new(false));
        window.attach_content(Box::new(Visibility(Rc::clone(&visible)))).unwrap();
        assert!(*visible.borrow());

        window.hide().unwrap();
        assert!(!*visible.borrow());

        window.focus().unwrap();
        assert!(window.is_visible().unwrap());
        assert!(*visible.borrow());
    }

    #[test]
    fn test_event_messages_come_from_host() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::default());

        window.handle_native_event(NativeEvent::FocusIn);

        let messages = window.channel_mut().drain_outbound();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from_window_id, WindowId::HOST);
        assert_eq!(messages[0].event_name(), Some("focus"));
    }

    #[test]
    fn test_drag_reports_move_and_end() {
        let listener = Rc::new(RecordingListener::default());
        let mut window = create_window(&listener, WindowArgs::sized(400, 300, "Frameless"));
        window.set_frame_autosave_name("palette").unwrap();
        assert_eq!(window.frame_autosave_name(), Some("palette"));

        window.start_dragging().unwrap();
        let surface = window.native_surface_mut().unwrap();
        let headless = surface.as_any_mut().downcast_mut::<HeadlessSurface>().unwrap();
        assert!(headless.is_dragging());
        headless.release_drag(120, 80);
        window.process_native_events();

        assert_eq!(
            *listener.events.borrow(),
            vec![
                WindowStateEvent::Moved { x: 120, y: 80 },
                WindowStateEvent::MoveFinished { x: 120, y: 80 },
            ]
        );
        let names: Vec<String> = window
            .channel_mut()
            .drain_outbound()
            .iter()
            .filter_map(|m| m.event_name().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["move", "moved"]);
    }
}
