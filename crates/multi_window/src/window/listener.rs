//! Window → owner notification capability

use super::{WindowId, WindowStateEvent};

/// Receiver of a window's lifecycle notifications
///
/// A [`Window`](crate::window::Window) holds its listener through a `Weak`
/// reference and never keeps it alive. If the listener has been dropped by
/// the time something happens, the notification is skipped.
pub trait WindowListener {
    /// The user asked to close window `id`
    ///
    /// Informational only: the window stays alive until someone destroys it,
    /// which is what makes confirm-before-close flows possible.
    fn on_window_close(&self, id: WindowId);

    /// Window `id` was destroyed; no further notification will follow
    fn on_window_destroy(&self, id: WindowId);

    /// Focus, geometry or display state of window `id` changed
    fn on_window_event(&self, _id: WindowId, _event: &WindowStateEvent) {}
}
