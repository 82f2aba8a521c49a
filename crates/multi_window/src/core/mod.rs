//! # Core Module
//!
//! Shared configuration for the window manager and the windows it creates.

pub mod config;

pub use crate::config::{Config, ConfigError};
pub use config::{ManagerConfig, SavedFrames, WindowDefaults};
