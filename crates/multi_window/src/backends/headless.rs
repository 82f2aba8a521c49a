//! In-memory native surfaces
//!
//! A headless surface keeps its state in plain fields and queues the
//! callbacks a real toolkit would send in response to each operation: a
//! resize reports the new size, focusing reports focus-in, and so on. Tests
//! inject user-driven callbacks (close button, window-manager destroy)
//! through [`HeadlessSurface::push_event`].

use std::any::Any;

use crate::window::{
    NativeEvent, NativeStateFlags, NativeSurface, SurfaceFactory, SurfaceOptions, WindowError, WindowFrame,
    WindowId, WindowResult,
};

/// Size of the virtual monitor headless windows are centered on
pub const VIRTUAL_MONITOR_SIZE: (u32, u32) = (1920, 1080);

/// Factory for [`HeadlessSurface`]s
#[derive(Debug, Default)]
pub struct HeadlessSurfaceFactory {
    created: usize,
    limit: Option<usize>,
}

impl HeadlessSurfaceFactory {
    /// Create a factory without limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every creation after `limit` surfaces have been allocated
    pub fn with_surface_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of surfaces allocated so far
    pub const fn created(&self) -> usize {
        self.created
    }

}

impl SurfaceFactory for HeadlessSurfaceFactory {
    fn create_surface(&mut self, id: WindowId, options: &SurfaceOptions) -> WindowResult<Box<dyn NativeSurface>> {
        if self.limit.is_some_and(|limit| self.created >= limit) {
            return Err(WindowError::Creation(format!(
                "headless surface limit of {} reached",
                self.created
            )));
        }
        self.created += 1;

        let mut surface = HeadlessSurface {
            id,
            frame: WindowFrame::new(0, 0, options.width, options.height),
            title: options.title.clone(),
            visible: options.visible,
            focused: false,
            always_on_top: options.always_on_top,
            decorated: options.decorated,
            flags: NativeStateFlags::empty(),
            closed: false,
            dragging: false,
            pending: Vec::new(),
        };
        if let Some((x, y)) = options.position {
            surface.frame.x = x;
            surface.frame.y = y;
        } else if options.center {
            (surface.frame.x, surface.frame.y) = surface.centered_position();
        }

        Ok(Box::new(surface))
    }
}

/// In-memory native surface
#[derive(Debug)]
pub struct HeadlessSurface {
    id: WindowId,
    frame: WindowFrame,
    title: String,
    visible: bool,
    focused: bool,
    always_on_top: bool,
    decorated: bool,
    flags: NativeStateFlags,
    closed: bool,
    dragging: bool,
    pending: Vec<NativeEvent>,
}

impl HeadlessSurface {
    /// Window this surface was allocated for
    pub const fn window_id(&self) -> WindowId {
        self.id
    }

    /// Queue a callback as if the toolkit had reported it
    pub fn push_event(&mut self, event: NativeEvent) {
        self.pending.push(event);
    }

    /// Number of queued callbacks
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Whether `close` was called
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether title bar and borders are shown
    pub const fn is_decorated(&self) -> bool {
        self.decorated
    }

    /// Whether a drag started by `start_dragging` is in progress
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// End a drag with the pointer released at `(x, y)`
    ///
    /// Does nothing unless a drag is in progress.
    pub fn release_drag(&mut self, x: i32, y: i32) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.frame.position() != (x, y) {
            self.set_position(x, y);
        }
        self.pending.push(NativeEvent::MoveEnded);
    }

    fn centered_position(&self) -> (i32, i32) {
        let (monitor_width, monitor_height) = VIRTUAL_MONITOR_SIZE;
        let x = (i64::from(monitor_width) - i64::from(self.frame.width)) / 2;
        let y = (i64::from(monitor_height) - i64::from(self.frame.height)) / 2;
        (
            i32::try_from(x).unwrap_or(0),
            i32::try_from(y).unwrap_or(0),
        )
    }

    fn set_flag(&mut self, flag: NativeStateFlags, value: bool) {
        self.flags.set(flag, value);
        self.pending.push(NativeEvent::StateChanged(self.flags));
    }
}

impl NativeSurface for HeadlessSurface {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        if self.focused {
            self.focused = false;
            self.pending.push(NativeEvent::FocusOut);
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn focus(&mut self) {
        self.visible = true;
        if !self.focused {
            self.focused = true;
            self.pending.push(NativeEvent::FocusIn);
        }
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn close(&mut self) {
        self.closed = true;
        self.dragging = false;
        self.visible = false;
        self.focused = false;
        self.pending.clear();
    }

    fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.frame.width = width;
        self.frame.height = height;
        self.pending.push(NativeEvent::Resize { width, height });
    }

    fn position(&self) -> (i32, i32) {
        self.frame.position()
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.frame.x = x;
        self.frame.y = y;
        self.pending.push(NativeEvent::Move { x, y });
    }

    fn center(&mut self) {
        let (x, y) = self.centered_position();
        self.set_position(x, y);
    }

    fn start_dragging(&mut self) {
        self.dragging = true;
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_always_on_top(&mut self, always_on_top: bool) {
        self.always_on_top = always_on_top;
    }

    fn is_always_on_top(&self) -> bool {
        self.always_on_top
    }

    fn set_decorated(&mut self, decorated: bool) {
        self.decorated = decorated;
    }

    fn maximize(&mut self) {
        self.set_flag(NativeStateFlags::MAXIMIZED, true);
    }

    fn unmaximize(&mut self) {
        self.set_flag(NativeStateFlags::MAXIMIZED, false);
    }

    fn minimize(&mut self) {
        if self.focused {
            self.focused = false;
            self.pending.push(NativeEvent::FocusOut);
        }
        self.set_flag(NativeStateFlags::MINIMIZED, true);
    }

    fn restore(&mut self) {
        self.set_flag(NativeStateFlags::MINIMIZED, false);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.set_flag(NativeStateFlags::FULLSCREEN, fullscreen);
    }

    fn state_flags(&self) -> NativeStateFlags {
        self.flags
    }

    fn drain_events(&mut self) -> Vec<NativeEvent> {
        std::mem::take(&mut self.pending)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WindowDefaults;
    use crate::window::WindowArgs;

    fn surface(args: &WindowArgs) -> Box<dyn NativeSurface> {
        let mut factory = HeadlessSurfaceFactory::new();
        factory
            .create_surface(WindowId(1), &args.resolve(&WindowDefaults::default()))
            .unwrap()
    }

    #[test]
    fn test_operations_queue_native_callbacks() {
        let mut surface = surface(&WindowArgs::sized(800, 600, "Main"));
        surface.set_size(1024, 768);
        surface.focus();
        surface.focus();
        surface.minimize();

        assert_eq!(
            surface.drain_events(),
            vec![
                NativeEvent::Resize { width: 1024, height: 768 },
                NativeEvent::FocusIn,
                NativeEvent::FocusOut,
                NativeEvent::StateChanged(NativeStateFlags::MINIMIZED),
            ]
        );
        assert!(surface.drain_events().is_empty());
    }

    #[test]
    fn test_centered_creation() {
        let args = WindowArgs::parse(r#"{"width": 800, "height": 600, "center": true}"#).unwrap();
        let surface = surface(&args);
        assert_eq!(surface.position(), (560, 240));
    }

    #[test]
    fn test_surface_limit() {
        let mut factory = HeadlessSurfaceFactory::new().with_surface_limit(1);
        let options = WindowArgs::default().resolve(&WindowDefaults::default());
        assert!(factory.create_surface(WindowId(1), &options).is_ok());
        assert!(matches!(
            factory.create_surface(WindowId(2), &options),
            Err(WindowError::Creation(_))
        ));
        assert_eq!(factory.created(), 1);
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let mut surface = surface(&WindowArgs::sized(400, 300, "Palette"));
        let headless = surface.as_any_mut().downcast_mut::<HeadlessSurface>().unwrap();
        headless.release_drag(50, 50);
        assert_eq!(headless.pending_events(), 0);

        headless.start_dragging();
        headless.release_drag(0, 0);
        assert!(!headless.is_dragging());
        assert_eq!(surface.drain_events(), vec![NativeEvent::MoveEnded]);
    }
}
