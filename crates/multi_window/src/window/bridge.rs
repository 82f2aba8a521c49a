//! Native event bridge
//!
//! Translates raw toolkit callbacks into [`WindowStateEvent`]s. Each
//! [`Window`](crate::window::Window) owns one bridge, so routing is implicit:
//! whatever surface reported the callback, its owning window is the target.
//!
//! The bridge remembers the last geometry and display state it reported.
//! Toolkits fire configure callbacks for many reasons (a move also
//! re-announces the unchanged size, a restacking re-announces both), and
//! only real changes become events.

use super::{DisplayState, NativeEvent, NativeStateFlags, WindowFrame, WindowStateEvent};

/// Per-window translator from native callbacks to normalized events
#[derive(Debug, Clone)]
pub struct EventBridge {
    size: (u32, u32),
    position: (i32, i32),
    display: DisplayState,
}

impl EventBridge {
    /// Create a bridge seeded with the surface's state at creation time
    pub fn new(frame: WindowFrame, flags: NativeStateFlags) -> Self {
        Self {
            size: frame.size(),
            position: frame.position(),
            display: flags.display_state(),
        }
    }

    /// Last reported size
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Last reported position
    pub const fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Last reported display state
    pub const fn display_state(&self) -> DisplayState {
        self.display
    }

    /// Translate one native callback
    ///
    /// Returns the normalized events in the order they should be delivered:
    /// at most one for every callback kind except `Configure`, which may
    /// yield a resize followed by a move. End-of-operation callbacks are never
    /// suppressed and carry the last known geometry.
    pub fn translate(&mut self, event: NativeEvent) -> Vec<WindowStateEvent> {
        match event {
            NativeEvent::CloseRequested => vec![WindowStateEvent::Closing],
            NativeEvent::Destroyed => vec![WindowStateEvent::Destroyed],
            NativeEvent::FocusIn => vec![WindowStateEvent::FocusGained],
            NativeEvent::FocusOut => vec![WindowStateEvent::FocusLost],
            NativeEvent::Configure { x, y, width, height } => {
                let mut events = Vec::with_capacity(2);
                events.extend(self.resize(width, height));
                events.extend(self.reposition(x, y));
                events
            }
            NativeEvent::Resize { width, height } => self.resize(width, height).into_iter().collect(),
            NativeEvent::Move { x, y } => self.reposition(x, y).into_iter().collect(),
            NativeEvent::ResizeEnded => vec![WindowStateEvent::ResizeFinished {
                width: self.size.0,
                height: self.size.1,
            }],
            NativeEvent::MoveEnded => vec![WindowStateEvent::MoveFinished {
                x: self.position.0,
                y: self.position.1,
            }],
            NativeEvent::StateChanged(flags) => {
                let display = flags.display_state();
                if display == self.display {
                    Vec::new()
                } else {
                    self.display = display;
                    vec![WindowStateEvent::StateChanged(display)]
                }
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Option<WindowStateEvent> {
        if self.size == (width, height) {
            return None;
        }
        self.size = (width, height);
        Some(WindowStateEvent::Resized { width, height })
    }

    fn reposition(&mut self, x: i32, y: i32) -> Option<WindowStateEvent> {
        if self.position == (x, y) {
            return None;
        }
        self.position = (x, y);
        Some(WindowStateEvent::Moved { x, y })
    }
}
