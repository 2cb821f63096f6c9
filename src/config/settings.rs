//! User settings and preferences for SplitMark
//!
//! This module defines the theme preference and the `Settings` struct that
//! holds window and layout state, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Stored color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the operating system's preference
    #[default]
    System,
}

impl Theme {
    /// Resolve the preference to a concrete light/dark choice.
    pub fn is_dark(&self, system_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_dark,
        }
    }

    /// The explicit preference that flips what is currently shown.
    pub fn toggled(&self, system_dark: bool) -> Theme {
        if self.is_dark(system_dark) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Window and layout settings restored between runs.
///
/// Missing fields take their defaults and unknown fields are ignored, so
/// older or newer records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window geometry
    pub window_size: WindowSize,

    /// Whether the preview pane is shown next to the editor
    pub preview_visible: bool,

    /// Preview share of the split area, in percent
    pub split_position: f32,

    /// Width of the document sidebar in pixels
    pub sidebar_width: f32,

    /// Directory last used by the import/export dialogs
    pub last_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: WindowSize::default(),
            preview_visible: true,
            split_position: Self::DEFAULT_SPLIT_POSITION,
            sidebar_width: 224.0,
            last_directory: None,
        }
    }
}

impl Settings {
    /// Initial split between preview and editor.
    pub const DEFAULT_SPLIT_POSITION: f32 = 50.0;
    /// Narrowest the preview may be, in percent.
    pub const MIN_SPLIT_POSITION: f32 = 20.0;
    /// Widest the preview may be, in percent.
    pub const MAX_SPLIT_POSITION: f32 = 80.0;
    /// Minimum sidebar width.
    pub const MIN_SIDEBAR_WIDTH: f32 = 160.0;
    /// Maximum sidebar width.
    pub const MAX_SIDEBAR_WIDTH: f32 = 400.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 300.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Clamp values to their valid ranges.
    pub fn sanitize(&mut self) {
        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.split_position = if self.split_position.is_finite() {
            self.split_position
                .clamp(Self::MIN_SPLIT_POSITION, Self::MAX_SPLIT_POSITION)
        } else {
            Self::DEFAULT_SPLIT_POSITION
        };

        self.sidebar_width = self
            .sidebar_width
            .clamp(Self::MIN_SIDEBAR_WIDTH, Self::MAX_SIDEBAR_WIDTH);
    }

    /// Deserialize and then sanitize.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
