//! Window subsystem
//!
//! Everything a single managed window consists of.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     WindowManager               │
//! └─────────────┬───────────▲───────┘
//!               │ owns      │ WindowListener (weak)
//!         ┌─────▼───────────┴─┐
//!         │ Window            │ ← handle.rs
//!         ├───────────────────┤
//!         │ WindowChannel     │ ← channel.rs
//!         │ EventBridge       │ ← bridge.rs
//!         └─────┬─────────▲───┘
//!               │ ops     │ NativeEvent
//!      ┌────────▼─────────┴──┐
//!      │ NativeSurface trait │ ← backend.rs
//!      └────────┬────────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ backends::glfw        │
//!   │ backends::headless    │
//!   └───────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **`handle`**: the [`Window`] itself
//! - **`channel`**: per-window message transport
//! - **`bridge`**: native callback → [`WindowStateEvent`] translation
//! - **`backend`**: the contract a windowing toolkit implements
//! - **`listener`**: the weak back-reference capability
//! - **`args`**: construction arguments
//! - **`types`** / **`error`**: shared vocabulary

pub mod args;
pub mod backend;
pub mod bridge;
pub mod channel;
pub mod error;
pub mod handle;
pub mod listener;
pub mod types;

pub use args::{SurfaceOptions, WindowArgs};
pub use backend::{HostedContent, NativeEvent, NativeStateFlags, NativeSurface, SurfaceFactory};
pub use bridge::EventBridge;
pub use channel::{ChannelMessage, MessageHandler, WindowChannel, EVENT_METHOD};
pub use error::{WindowError, WindowResult};
pub use handle::Window;
pub use listener::WindowListener;
pub use types::{DisplayState, Lifecycle, WindowFrame, WindowId, WindowStateEvent};
