//! Window identity, geometry and the normalized event model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process-unique window identifier
///
/// Ids are handed out by the [`WindowManager`](crate::manager::WindowManager)
/// and are never reused while the process runs. [`WindowId::HOST`] (`0`)
/// names the controlling application itself and never belongs to a managed
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl WindowId {
    /// The host application, used as the sender of controller-originated messages
    pub const HOST: Self = Self(0);

    /// Raw integer value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WindowId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Outer window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowFrame {
    /// Left edge in screen coordinates
    pub x: i32,
    /// Top edge in screen coordinates
    pub y: i32,
    /// Client width in pixels
    pub width: u32,
    /// Client height in pixels
    pub height: u32,
}

impl WindowFrame {
    /// Create a frame from position and size
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Size component
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Position component
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Logical display state of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayState {
    /// Regular windowed state
    #[default]
    Normal,
    /// Zoomed to fill the work area
    Maximized,
    /// Iconified
    Minimized,
    /// Covering the whole monitor
    Fullscreen,
}

/// Lifecycle of a [`Window`](crate::window::Window)
///
/// ```text
/// Uninitialized -> Live <-> ClosingRequested
///                   |            |
///                   +--> Destroyed <--+
/// ```
///
/// `ClosingRequested` only lasts while the listener is being told about a
/// close request. It falls back to `Live` unless the window was destroyed in
/// the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Native surface not allocated yet
    Uninitialized,
    /// Fully operational
    Live,
    /// A close request is being dispatched
    ClosingRequested,
    /// Terminal; every operation fails
    Destroyed,
}

impl Lifecycle {
    /// Whether window operations are still permitted
    pub const fn is_operable(self) -> bool {
        matches!(self, Self::Live | Self::ClosingRequested)
    }
}

/// Normalized window event
///
/// Produced by the [`EventBridge`](crate::window::EventBridge) from native
/// callbacks, one per callback, in the order the toolkit emitted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowStateEvent {
    /// The user asked to close the window
    Closing,
    /// The native surface is gone
    Destroyed,
    /// Keyboard focus arrived
    FocusGained,
    /// Keyboard focus left
    FocusLost,
    /// Client area changed size
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// Window moved
    Moved {
        /// New left edge
        x: i32,
        /// New top edge
        y: i32,
    },
    /// Display state changed
    StateChanged(DisplayState),
    /// An interactive resize finished at this size
    ResizeFinished {
        /// Final width in pixels
        width: u32,
        /// Final height in pixels
        height: u32,
    },
    /// An interactive move finished at this position
    MoveFinished {
        /// Final left edge
        x: i32,
        /// Final top edge
        y: i32,
    },
}

impl WindowStateEvent {
    /// Name under which hosted content receives this event
    ///
    /// State changes are named after the transition, so the previous display
    /// state is needed (leaving maximized is `unmaximize`, leaving minimized is
    /// `restore`, ...). `Destroyed` has no content-facing name because the
    /// channel is already closed when it fires.
    pub fn content_event_name(&self, previous: DisplayState) -> Option<&'static str> {
        let name = match self {
            Self::Closing => "close",
            Self::Destroyed => return None,
            Self::FocusGained => "focus",
            Self::FocusLost => "blur",
            Self::Resized { .. } => "resize",
            Self::Moved { .. } => "move",
            Self::ResizeFinished { .. } => "resized",
            Self::MoveFinished { .. } => "moved",
            Self::StateChanged(state) => match (previous, state) {
                (_, DisplayState::Maximized) => "maximize",
                (_, DisplayState::Minimized) => "minimize",
                (_, DisplayState::Fullscreen) => "enter-full-screen",
                (DisplayState::Fullscreen, DisplayState::Normal) => "leave-full-screen",
                (DisplayState::Maximized, DisplayState::Normal) => "unmaximize",
                (_, DisplayState::Normal) => "restore",
            },
        };
        Some(name)
    }
}
