//! Native windowing backend contract
//!
//! This module defines what a windowing toolkit has to provide so a
//! [`Window`](crate::window::Window) can sit on top of it:
//!
//! - [`SurfaceFactory`] allocates one native top-level surface per window and
//!   pumps the toolkit's event loop.
//! - [`NativeSurface`] is the surface itself: synchronous window operations
//!   plus a queue of raw [`NativeEvent`]s the toolkit reported for it.
//! - [`HostedContent`] is the embedding engine living inside a window. The
//!   window only tells it about size and visibility.
//!
//! All of this runs on the toolkit's UI thread, so none of the traits require
//! `Send`.

use std::any::Any;

use bitflags::bitflags;

use super::{DisplayState, SurfaceOptions, WindowFrame, WindowId, WindowResult};

bitflags! {
    /// Window-state bits as reported by the toolkit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NativeStateFlags: u8 {
        /// Zoomed to the work area
        const MAXIMIZED = 1 << 0;
        /// Iconified
        const MINIMIZED = 1 << 1;
        /// Covering the monitor
        const FULLSCREEN = 1 << 2;
    }
}

impl NativeStateFlags {
    /// Reduce the bit set to a single display state
    ///
    /// A fullscreen window that is also flagged maximized is reported as
    /// fullscreen; a minimized window is minimized regardless of what it will
    /// return to.
    pub fn display_state(self) -> DisplayState {
        if self.contains(Self::FULLSCREEN) {
            DisplayState::Fullscreen
        } else if self.contains(Self::MINIMIZED) {
            DisplayState::Minimized
        } else if self.contains(Self::MAXIMIZED) {
            DisplayState::Maximized
        } else {
            DisplayState::Normal
        }
    }
}

/// Raw callback from the windowing toolkit
///
/// Toolkits differ in how they report geometry: some send one configure
/// callback carrying position and size, others send separate size and
/// position callbacks. Both shapes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    /// Close button, Alt+F4, window-manager close
    CloseRequested,
    /// The native surface was destroyed
    Destroyed,
    /// Keyboard focus in
    FocusIn,
    /// Keyboard focus out
    FocusOut,
    /// Combined geometry callback
    Configure {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
        /// Client width
        width: u32,
        /// Client height
        height: u32,
    },
    /// Size-only callback
    Resize {
        /// Client width
        width: u32,
        /// Client height
        height: u32,
    },
    /// Position-only callback
    Move {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
    },
    /// Window-state callback with the complete new state
    StateChanged(NativeStateFlags),
    /// The user finished an interactive resize
    ResizeEnded,
    /// The user finished an interactive move
    MoveEnded,
}

/// One native top-level surface
///
/// Every method is a direct translation to the toolkit call of the same
/// meaning. Liveness checks happen in [`Window`](crate::window::Window); a
/// surface is never used after [`NativeSurface::close`].
pub trait NativeSurface {
    /// Make the window visible
    fn show(&mut self);

    /// Hide the window without destroying it
    fn hide(&mut self);

    /// Whether the window is currently visible
    fn is_visible(&self) -> bool;

    /// Raise the window and give it keyboard focus
    fn focus(&mut self);

    /// Whether the window currently has keyboard focus
    fn has_focus(&self) -> bool;

    /// Close the native window
    ///
    /// Called at most once, for programmatic destruction. A surface the
    /// toolkit destroyed by itself is dropped without this call. Must not
    /// report a [`NativeEvent::Destroyed`] afterwards.
    fn close(&mut self);

    /// Current client size in pixels
    fn size(&self) -> (u32, u32);

    /// Resize the client area
    fn set_size(&mut self, width: u32, height: u32);

    /// Current top-left position in screen coordinates
    fn position(&self) -> (i32, i32);

    /// Move the window
    fn set_position(&mut self, x: i32, y: i32);

    /// Center the window on the primary monitor
    fn center(&mut self);

    /// Let the user move the window by dragging with the primary button held
    ///
    /// Called while the button is down. The surface follows the pointer until
    /// release, reporting moves as usual and [`NativeEvent::MoveEnded`] at the
    /// end.
    fn start_dragging(&mut self);

    /// Current title
    fn title(&self) -> String;

    /// Set the title bar text
    fn set_title(&mut self, title: &str);

    /// Keep the window above other windows
    fn set_always_on_top(&mut self, always_on_top: bool);

    /// Whether the window floats above other windows
    fn is_always_on_top(&self) -> bool;

    /// Show or hide title bar and borders
    fn set_decorated(&mut self, decorated: bool);

    /// Zoom to the work area
    fn maximize(&mut self);

    /// Leave the maximized state
    fn unmaximize(&mut self);

    /// Iconify
    fn minimize(&mut self);

    /// Leave the minimized state
    fn restore(&mut self);

    /// Enter or leave fullscreen
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Complete state bits
    fn state_flags(&self) -> NativeStateFlags;

    /// Take every native event reported since the last call, in emission order
    fn drain_events(&mut self) -> Vec<NativeEvent>;

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Outer frame snapshot
    fn frame(&self) -> WindowFrame {
        let (x, y) = self.position();
        let (width, height) = self.size();
        WindowFrame::new(x, y, width, height)
    }
}

/// Allocates native surfaces and drives the toolkit's event loop
pub trait SurfaceFactory {
    /// Allocate a surface for window `id`
    ///
    /// Fails with [`WindowError::Creation`](crate::window::WindowError::Creation)
    /// if the toolkit cannot provide one.
    fn create_surface(&mut self, id: WindowId, options: &SurfaceOptions) -> WindowResult<Box<dyn NativeSurface>>;

    /// Let the toolkit process pending native events
    ///
    /// Events end up in the per-surface queues read by
    /// [`NativeSurface::drain_events`]. Never blocks.
    fn poll_events(&mut self) {}
}

/// Content embedded in a window by the rendering engine
pub trait HostedContent {
    /// The window's client area changed size
    fn resize(&mut self, width: u32, height: u32);

    /// The window was shown or hidden
    fn set_visible(&mut self, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_state_priority() {
        assert_eq!(NativeStateFlags::empty().display_state(), DisplayState::Normal);
        assert_eq!(NativeStateFlags::MAXIMIZED.display_state(), DisplayState::Maximized);
        assert_eq!(
            (NativeStateFlags::MAXIMIZED | NativeStateFlags::MINIMIZED).display_state(),
            DisplayState::Minimized
        );
        assert_eq!(
            (NativeStateFlags::MAXIMIZED | NativeStateFlags::FULLSCREEN).display_state(),
            DisplayState::Fullscreen
        );
    }
}
