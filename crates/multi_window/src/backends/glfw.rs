//! Native surfaces using GLFW
//!
//! One [`GlfwSurfaceFactory`] owns the GLFW context; every surface it creates
//! has its own event receiver, so callbacks are routed per window without any
//! global lookup table. GLFW has no destroy callback: a window lives until its
//! handle is dropped, which happens when the owning
//! [`Window`](crate::window::Window) is destroyed.
//!
//! GLFW also lacks end-of-operation callbacks. A resize or move counts as
//! finished once a poll brings no further geometry change for it, which is
//! when [`NativeEvent::ResizeEnded`] / [`NativeEvent::MoveEnded`] are
//! reported.

use std::any::Any;

use glfw::{Action, MouseButton, WindowEvent, WindowHint, WindowMode};

use crate::window::{
    NativeEvent, NativeStateFlags, NativeSurface, SurfaceFactory, SurfaceOptions, WindowError, WindowFrame,
    WindowId, WindowResult,
};

/// Factory owning the GLFW context
pub struct GlfwSurfaceFactory {
    glfw: glfw::Glfw,
}

impl GlfwSurfaceFactory {
    /// Initialize GLFW
    ///
    /// # Errors
    /// [`WindowError::Creation`] if GLFW cannot be initialized (no display,
    /// missing platform libraries).
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::Creation(format!("GLFW initialization failed: {e:?}")))?;
        Ok(Self { glfw })
    }
}

impl SurfaceFactory for GlfwSurfaceFactory {
    fn create_surface(&mut self, id: WindowId, options: &SurfaceOptions) -> WindowResult<Box<dyn NativeSurface>> {
        self.glfw.default_window_hints();
        // Contents are painted by the embedding engine, not through a GL context
        self.glfw.window_hint(WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw.window_hint(WindowHint::Resizable(true));
        self.glfw.window_hint(WindowHint::Visible(false));
        self.glfw.window_hint(WindowHint::Floating(options.always_on_top));
        self.glfw.window_hint(WindowHint::Decorated(options.decorated));

        let (mut window, events) = self
            .glfw
            .create_window(options.width, options.height, &options.title, WindowMode::Windowed)
            .ok_or_else(|| WindowError::Creation(format!("GLFW could not create window {id}")))?;

        window.set_close_polling(true);
        window.set_focus_polling(true);
        window.set_size_polling(true);
        window.set_pos_polling(true);
        window.set_iconify_polling(true);
        window.set_maximize_polling(true);

        let mut surface = GlfwSurface {
            window,
            events,
            title: options.title.clone(),
            fullscreen: false,
            windowed_frame: None,
            reported_flags: NativeStateFlags::empty(),
            reported_frame: WindowFrame::default(),
            resizing: false,
            moving: false,
            drag_anchor: None,
            pending: Vec::new(),
        };

        if let Some((x, y)) = options.position {
            surface.window.set_pos(x, y);
        } else if options.center {
            surface.center();
        }
        if options.visible {
            surface.window.show();
        }
        surface.reported_frame = surface.frame();

        log::debug!("GLFW surface for window {} ready", id);
        Ok(Box::new(surface))
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }
}

/// One GLFW top-level window
pub struct GlfwSurface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    title: String,
    fullscreen: bool,
    windowed_frame: Option<WindowFrame>,
    // State as carried by the callbacks, which can lag the live window
    reported_flags: NativeStateFlags,
    reported_frame: WindowFrame,
    resizing: bool,
    moving: bool,
    drag_anchor: Option<(f64, f64)>,
    pending: Vec<NativeEvent>,
}

impl GlfwSurface {
    fn translate(&mut self, event: WindowEvent) -> Option<NativeEvent> {
        match event {
            WindowEvent::Close => {
                // Closing is the owner's decision, keep GLFW from acting on it
                self.window.set_should_close(false);
                Some(NativeEvent::CloseRequested)
            }
            WindowEvent::Focus(true) => Some(NativeEvent::FocusIn),
            WindowEvent::Focus(false) => Some(NativeEvent::FocusOut),
            WindowEvent::Size(width, height) => {
                let (width, height) = (clamp_dimension(width), clamp_dimension(height));
                self.reported_frame.width = width;
                self.reported_frame.height = height;
                Some(NativeEvent::Resize { width, height })
            }
            WindowEvent::Pos(x, y) => {
                self.reported_frame.x = x;
                self.reported_frame.y = y;
                Some(NativeEvent::Move { x, y })
            }
            WindowEvent::Iconify(iconified) => {
                self.reported_flags.set(NativeStateFlags::MINIMIZED, iconified);
                Some(NativeEvent::StateChanged(self.reported_flags))
            }
            WindowEvent::Maximize(maximized) => {
                self.reported_flags.set(NativeStateFlags::MAXIMIZED, maximized);
                Some(NativeEvent::StateChanged(self.reported_flags))
            }
            _ => None,
        }
    }

    /// Move the window along with the pointer while a drag is active
    fn follow_drag(&mut self) {
        let Some((anchor_x, anchor_y)) = self.drag_anchor else {
            return;
        };
        if self.window.get_mouse_button(MouseButton::Button1) != Action::Press {
            self.drag_anchor = None;
            return;
        }

        // Cursor coordinates are window-relative, so the anchor stays fixed
        let (cursor_x, cursor_y) = self.window.get_cursor_pos();
        let dx = (cursor_x - anchor_x).round() as i32;
        let dy = (cursor_y - anchor_y).round() as i32;
        if dx != 0 || dy != 0 {
            let (x, y) = self.window.get_pos();
            self.window.set_pos(x + dx, y + dy);
        }
    }

    fn primary_monitor_size(&self) -> Option<(u32, u32)> {
        let mut glfw = self.window.glfw.clone();
        glfw.with_primary_monitor(|_, monitor| {
            monitor
                .and_then(|m| m.get_video_mode())
                .map(|mode| (mode.width, mode.height))
        })
    }
}

fn clamp_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl NativeSurface for GlfwSurface {
    fn show(&mut self) {
        self.window.show();
    }

    fn hide(&mut self) {
        self.window.hide();
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible()
    }

    fn focus(&mut self) {
        self.window.show();
        self.window.focus();
    }

    fn has_focus(&self) -> bool {
        self.window.is_focused()
    }

    fn close(&mut self) {
        self.window.hide();
        self.drag_anchor = None;
        self.pending.clear();
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.window.set_size(to_i32(width), to_i32(height));
    }

    fn position(&self) -> (i32, i32) {
        self.window.get_pos()
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_pos(x, y);
    }

    fn center(&mut self) {
        if let Some((monitor_width, monitor_height)) = self.primary_monitor_size() {
            let (width, height) = self.size();
            let x = (to_i32(monitor_width) - to_i32(width)) / 2;
            let y = (to_i32(monitor_height) - to_i32(height)) / 2;
            self.window.set_pos(x.max(0), y.max(0));
        } else {
            log::warn!("No primary monitor, cannot center window");
        }
    }

    fn start_dragging(&mut self) {
        if self.window.get_mouse_button(MouseButton::Button1) == Action::Press {
            self.drag_anchor = Some(self.window.get_cursor_pos());
        } else {
            log::debug!("Primary button not held, ignoring drag request");
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.title = title.to_string();
    }

    fn set_always_on_top(&mut self, always_on_top: bool) {
        self.window.set_floating(always_on_top);
    }

    fn is_always_on_top(&self) -> bool {
        self.window.is_floating()
    }

    fn set_decorated(&mut self, decorated: bool) {
        self.window.set_decorated(decorated);
    }

    fn maximize(&mut self) {
        self.window.maximize();
    }

    fn unmaximize(&mut self) {
        self.window.restore();
    }

    fn minimize(&mut self) {
        self.window.iconify();
    }

    fn restore(&mut self) {
        self.window.restore();
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }

        if fullscreen {
            let frame = self.frame();
            let window = &mut self.window;
            let mut glfw = window.glfw.clone();
            let entered = glfw.with_primary_monitor(|_, monitor| {
                let Some(monitor) = monitor else { return false };
                let Some(mode) = monitor.get_video_mode() else { return false };
                window.set_monitor(
                    WindowMode::FullScreen(monitor),
                    0,
                    0,
                    mode.width,
                    mode.height,
                    Some(mode.refresh_rate),
                );
                true
            });
            if !entered {
                log::warn!("No primary monitor, cannot enter fullscreen");
                return;
            }
            self.windowed_frame = Some(frame);
        } else {
            let frame = self.windowed_frame.take().unwrap_or_default();
            self.window
                .set_monitor(WindowMode::Windowed, frame.x, frame.y, frame.width, frame.height, None);
        }

        self.fullscreen = fullscreen;
        // GLFW has no fullscreen callback, report the transition ourselves
        self.reported_flags.set(NativeStateFlags::FULLSCREEN, fullscreen);
        self.pending.push(NativeEvent::StateChanged(self.reported_flags));
    }

    fn state_flags(&self) -> NativeStateFlags {
        let mut flags = NativeStateFlags::empty();
        flags.set(NativeStateFlags::MAXIMIZED, self.window.is_maximized());
        flags.set(NativeStateFlags::MINIMIZED, self.window.is_iconified());
        flags.set(NativeStateFlags::FULLSCREEN, self.fullscreen);
        flags
    }

    fn drain_events(&mut self) -> Vec<NativeEvent> {
        self.follow_drag();

        let mut events = std::mem::take(&mut self.pending);
        let before = self.reported_frame;
        let received: Vec<WindowEvent> = glfw::flush_messages(&self.events).map(|(_, event)| event).collect();
        events.extend(received.into_iter().filter_map(|event| self.translate(event)));

        let resized = self.reported_frame.size() != before.size();
        let moved = self.reported_frame.position() != before.position();
        let dragging = self.drag_anchor.is_some();
        if self.resizing && !resized {
            events.push(NativeEvent::ResizeEnded);
        }
        if self.moving && !moved && !dragging {
            events.push(NativeEvent::MoveEnded);
        }
        self.resizing = resized;
        self.moving = moved || (self.moving && dragging);
        events
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
