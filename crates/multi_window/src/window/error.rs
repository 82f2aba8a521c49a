//! Window subsystem errors

use thiserror::Error;

use super::WindowId;

/// Errors surfaced by windows, channels and the manager
///
/// None of these are fatal to the process; each one only concerns the
/// window named in it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The native surface could not be allocated
    #[error("Window creation failed: {0}")]
    Creation(String),

    /// Operation on a window whose native surface is already destroyed
    #[error("Window {id} is destroyed, cannot {operation}")]
    InvalidState {
        /// Window the operation targeted
        id: WindowId,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// No live window is registered under this id
    #[error("Window {0} not found")]
    NotFound(WindowId),

    /// Message sent on the channel of a destroyed window
    #[error("Channel of window {0} is closed")]
    ChannelClosed(WindowId),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;
