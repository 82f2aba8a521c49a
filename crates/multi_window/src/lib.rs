//! # Multi Window
//!
//! Lifecycle management for multiple native top-level windows, each hosting
//! independently rendered content.
//!
//! ## Features
//!
//! - **Window Registry**: unique, never reused ids for every window
//! - **Event Bridge**: native callbacks normalized into deduplicated window events
//! - **Message Channels**: one ordered, asynchronous channel per window
//! - **Close Veto**: user close requests can be intercepted before destruction
//! - **Pluggable Backends**: GLFW surfaces, or headless surfaces for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multi_window::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut manager = WindowManager::new(Box::new(HeadlessSurfaceFactory::new()));
//!
//!     let main_window = manager.create_window(WindowArgs::sized(800, 600, "Main").with_visible(true))?;
//!     let tools = manager.create_window_from_json(r#"{"width": 320, "height": 480, "title": "Tools"}"#)?;
//!
//!     manager.subscribe(ManagerEventType::CloseRequested, |event: &ManagerEvent| {
//!         // Returning true keeps the window open
//!         event.window_id == WindowId(1)
//!     });
//!
//!     manager.post_message(main_window, tools, "selectTool", serde_json::json!("brush"))?;
//!
//!     while !manager.is_empty() {
//!         manager.pump_events();
//!         # break;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

// Shared infrastructure
pub mod config;
pub mod core;
pub mod foundation;

// Window lifecycle
pub mod backends;
pub mod events;
pub mod manager;
pub mod window;

pub use manager::{ContentFactory, WindowManager};
pub use window::{WindowError, WindowId, WindowResult};

/// Common imports for multi-window users
pub mod prelude {
    pub use crate::{
        backends::{HeadlessSurface, HeadlessSurfaceFactory},
        core::{Config, ManagerConfig, WindowDefaults},
        events::{ManagerEvent, ManagerEventHandler, ManagerEventType},
        manager::WindowManager,
        window::{
            ChannelMessage, DisplayState, HostedContent, Lifecycle, NativeEvent, Window, WindowArgs, WindowChannel,
            WindowError, WindowFrame, WindowId, WindowListener, WindowResult, WindowStateEvent,
        },
    };

    #[cfg(feature = "glfw-backend")]
    pub use crate::backends::{GlfwSurface, GlfwSurfaceFactory};
}

#[cfg(test)]
mod tests;
