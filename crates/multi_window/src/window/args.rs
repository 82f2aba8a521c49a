//! Window construction arguments
//!
//! Windows are created from a serialized argument string (a JSON object).
//! The raw string is kept alongside the parsed options so it can be handed
//! unchanged to the content the window hosts.

use serde::{Deserialize, Serialize};

use super::{WindowError, WindowResult};
use crate::core::WindowDefaults;

/// Recognized construction options
///
/// Every option is optional. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowArgs {
    /// Initial client width
    pub width: Option<u32>,
    /// Initial client height
    pub height: Option<u32>,
    /// Initial left edge
    pub x: Option<i32>,
    /// Initial top edge
    pub y: Option<i32>,
    /// Initial title
    pub title: Option<String>,
    /// Show the window right after creation
    pub visible: Option<bool>,
    /// Keep the window above other windows
    #[serde(alias = "alwaysOnTop")]
    pub always_on_top: Option<bool>,
    /// Center on the primary monitor (ignored when `x`/`y` are given)
    pub center: Option<bool>,
    /// Show title bar and borders
    pub decorated: Option<bool>,
    #[serde(skip)]
    raw: String,
}

impl WindowArgs {
    /// Parse a serialized argument string
    ///
    /// An empty (or whitespace-only) string yields all defaults. Malformed
    /// JSON is a creation error, since no window can be built from it.
    pub fn parse(raw: &str) -> WindowResult<Self> {
        let mut args = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str::<Self>(raw)
                .map_err(|e| WindowError::Creation(format!("invalid construction arguments: {e}")))?
        };
        args.raw = raw.to_string();
        Ok(args)
    }

    /// Build arguments for a window of the given size and title
    pub fn sized(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set initial visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Set initial position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the always-on-top flag
    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = Some(always_on_top);
        self
    }

    /// The serialized form these arguments were parsed from
    ///
    /// Empty for arguments built in code.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Fill every unset option from `defaults`
    pub fn resolve(&self, defaults: &WindowDefaults) -> SurfaceOptions {
        let width = self.width.filter(|w| *w > 0).unwrap_or(defaults.width);
        let height = self.height.filter(|h| *h > 0).unwrap_or(defaults.height);
        let position = match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };

        SurfaceOptions {
            width,
            height,
            position,
            center: position.is_none() && self.center.unwrap_or(false),
            title: self.title.clone().unwrap_or_else(|| defaults.title.clone()),
            visible: self.visible.unwrap_or(defaults.visible),
            always_on_top: self.always_on_top.unwrap_or(defaults.always_on_top),
            decorated: self.decorated.unwrap_or(defaults.decorated),
        }
    }
}

/// Fully resolved options handed to a [`SurfaceFactory`](crate::window::SurfaceFactory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Client width
    pub width: u32,
    /// Client height
    pub height: u32,
    /// Explicit position, if any
    pub position: Option<(i32, i32)>,
    /// Center on the primary monitor
    pub center: bool,
    /// Title
    pub title: String,
    /// Show after creation
    pub visible: bool,
    /// Float above other windows
    pub always_on_top: bool,
    /// Title bar and borders
    pub decorated: bool,
}
