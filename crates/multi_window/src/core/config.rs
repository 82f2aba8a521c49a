//! # Manager Configuration
//!
//! Configuration consumed by [`WindowManager`](crate::manager::WindowManager):
//! logging, the fallback geometry used when construction arguments leave
//! something out, and whether window events are mirrored to hosted content.
//! [`SavedFrames`] holds the frames of windows with an autosave name.
//!
//! All of them serialize to TOML and RON through the [`Config`] trait.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::window::WindowFrame;

/// # Window Defaults
///
/// Fallback values applied to every option that construction arguments do
/// not set (or set to an unusable value such as a zero width).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowDefaults {
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Initial title
    pub title: String,
    /// Whether new windows are shown immediately
    pub visible: bool,
    /// Whether new windows float above other windows
    pub always_on_top: bool,
    /// Whether new windows have a title bar and borders
    pub decorated: bool,
}

impl WindowDefaults {
    /// Create defaults with the given initial size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the default title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set whether windows start visible
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Validate the defaults
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Default window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            width: 480,
            height: 270,
            title: String::new(),
            visible: false,
            always_on_top: false,
            decorated: true,
        }
    }
}

/// # Manager Configuration
///
/// Top-level configuration for a window manager instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Log filter passed to the logger (`env_logger` syntax)
    pub log_level: String,
    /// Mirror normalized window events to each window's channel as `onEvent` messages
    pub forward_events_to_content: bool,
    /// File the frames of autosaved windows persist to (`.toml` or `.ron`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_autosave_path: Option<PathBuf>,
    /// Fallback window options
    pub defaults: WindowDefaults,
}

impl ManagerConfig {
    /// Create a new manager configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            forward_events_to_content: true,
            frame_autosave_path: None,
            defaults: WindowDefaults::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set window defaults
    pub fn with_defaults(mut self, defaults: WindowDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Enable or disable event forwarding to hosted content
    pub fn with_event_forwarding(mut self, enabled: bool) -> Self {
        self.forward_events_to_content = enabled;
        self
    }

    /// Persist autosaved window frames to `path`
    pub fn with_frame_autosave(mut self, path: impl Into<PathBuf>) -> Self {
        self.frame_autosave_path = Some(path.into());
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        self.defaults.validate()
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ManagerConfig {}

/// # Saved Frames
///
/// Last known frame of every window that has a frame autosave name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedFrames {
    /// Frames by autosave name
    pub frames: BTreeMap<String, WindowFrame>,
}

impl SavedFrames {
    /// Frame remembered under `name`
    pub fn get(&self, name: &str) -> Option<WindowFrame> {
        self.frames.get(name).copied()
    }

    /// Remember `frame` under `name`; returns whether anything changed
    pub fn record(&mut self, name: &str, frame: WindowFrame) -> bool {
        if self.get(name) == Some(frame) {
            return false;
        }
        self.frames.insert(name.to_string(), frame);
        true
    }
}

impl Config for SavedFrames {}
