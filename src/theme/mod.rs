//! Theme System for SplitMark
//!
//! This module defines the light and dark color palettes and converts them
//! into egui `Visuals`. The stored preference (`config::Theme`) selects a
//! palette at runtime, with `System` following the operating system.
//!
//! - `light.rs` - Light palette applied to egui Visuals
//! - `dark.rs` - Dark palette applied to egui Visuals
//! - `manager.rs` - Preference tracking, toggling, and application to the context

pub mod dark;
pub mod light;
pub mod manager;

pub use manager::ThemeManager;

use eframe::egui::{Color32, Rounding, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Every color the UI paints with, for one light/dark variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Backgrounds and borders
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// Accent and feedback colors
    pub ui: UiColors,
}

impl ThemeColors {
    /// Colors for a concrete light/dark choice.
    pub fn for_dark_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            ui: UiColors::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            ui: UiColors::dark(),
        }
    }

    /// Check if this is a dark palette.
    pub fn is_dark(&self) -> bool {
        self.base.background.r() < 128
    }

    /// Convert to egui Visuals.
    pub fn to_visuals(&self) -> Visuals {
        if self.is_dark() {
            dark::create_dark_visuals()
        } else {
            light::create_light_visuals()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Editor and preview background
    pub background: Color32,
    /// Toolbar and sidebar background
    pub panel: Color32,
    /// Inputs and code blocks
    pub inset: Color32,
    /// Borders and dividers
    pub border: Color32,
    /// Hovered rows and buttons
    pub hover: Color32,
}

impl BaseColors {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            panel: Color32::from_rgb(249, 250, 251),
            inset: Color32::from_rgb(243, 244, 246),
            border: Color32::from_rgb(229, 231, 235),
            hover: Color32::from_rgb(243, 244, 246),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(17, 24, 39),
            panel: Color32::from_rgb(31, 41, 55),
            inset: Color32::from_rgb(31, 41, 55),
            border: Color32::from_rgb(55, 65, 81),
            hover: Color32::from_rgb(55, 65, 81),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Text colors for various contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    /// Body text and headings
    pub primary: Color32,
    /// Secondary labels and snippets
    pub secondary: Color32,
    /// Timestamps and placeholders
    pub muted: Color32,
    /// Hyperlinks in the preview
    pub link: Color32,
    /// Inline code in the preview
    pub code: Color32,
}

impl TextColors {
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(17, 24, 39),
            secondary: Color32::from_rgb(107, 114, 128),
            muted: Color32::from_rgb(156, 163, 175),
            link: Color32::from_rgb(37, 99, 235),
            code: Color32::from_rgb(190, 24, 93),
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(229, 231, 235),
            secondary: Color32::from_rgb(156, 163, 175),
            muted: Color32::from_rgb(107, 114, 128),
            link: Color32::from_rgb(96, 165, 250),
            code: Color32::from_rgb(244, 114, 182),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Accent and feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    /// Active document row, primary buttons, drop indicator
    pub accent: Color32,
    /// Accent under the pointer
    pub accent_hover: Color32,
    /// Text on an accent background
    pub on_accent: Color32,
    /// Secondary text on an accent background
    pub on_accent_muted: Color32,
    /// Search hit background
    pub highlight_bg: Color32,
    /// Search hit text
    pub highlight_text: Color32,
    /// Error messages
    pub error: Color32,
}

impl UiColors {
    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(37, 99, 235),
            accent_hover: Color32::from_rgb(29, 78, 216),
            on_accent: Color32::WHITE,
            on_accent_muted: Color32::from_rgb(219, 234, 254),
            highlight_bg: Color32::from_rgb(254, 240, 138),
            highlight_text: Color32::from_rgb(113, 63, 18),
            error: Color32::from_rgb(220, 38, 38),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(37, 99, 235),
            accent_hover: Color32::from_rgb(29, 78, 216),
            on_accent: Color32::WHITE,
            on_accent_muted: Color32::from_rgb(219, 234, 254),
            highlight_bg: Color32::from_rgb(202, 138, 4),
            highlight_text: Color32::from_rgb(254, 249, 195),
            error: Color32::from_rgb(248, 113, 113),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Visuals Setup
// ─────────────────────────────────────────────────────────────────────────────

/// Corner radius shared by widgets.
const WIDGET_ROUNDING: f32 = 4.0;

/// Paint a palette onto egui's base visuals.
fn apply_palette(visuals: &mut Visuals, colors: &ThemeColors) {
    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.background;
    visuals.extreme_bg_color = colors.base.inset;
    visuals.faint_bg_color = colors.base.panel;
    visuals.code_bg_color = colors.base.inset;

    visuals.override_text_color = None;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.text.link;

    visuals.selection.bg_fill = colors.ui.accent.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    let rounding = Rounding::same(WIDGET_ROUNDING);

    visuals.widgets.noninteractive.bg_fill = colors.base.panel;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);
    visuals.widgets.noninteractive.rounding = rounding;

    visuals.widgets.inactive.bg_fill = colors.base.panel;
    visuals.widgets.inactive.weak_bg_fill = colors.base.panel;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);
    visuals.widgets.inactive.rounding = rounding;

    visuals.widgets.hovered.bg_fill = colors.base.hover;
    visuals.widgets.hovered.weak_bg_fill = colors.base.hover;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);
    visuals.widgets.hovered.rounding = rounding;

    visuals.widgets.active.bg_fill = colors.ui.accent;
    visuals.widgets.active.weak_bg_fill = colors.ui.accent_hover;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, colors.ui.on_accent);
    visuals.widgets.active.rounding = rounding;

    visuals.window_rounding = Rounding::same(WIDGET_ROUNDING * 2.0);
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.interact_cursor = Some(eframe::egui::CursorIcon::PointingHand);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_report_their_mode() {
        assert!(ThemeColors::dark().is_dark());
        assert!(!ThemeColors::light().is_dark());
        assert!(ThemeColors::for_dark_mode(true).is_dark());
    }

    #[test]
    fn test_to_visuals_matches_palette() {
        assert!(ThemeColors::dark().to_visuals().dark_mode);
        assert!(!ThemeColors::light().to_visuals().dark_mode);
    }

    #[test]
    fn test_highlight_differs_from_background() {
        for colors in [ThemeColors::light(), ThemeColors::dark()] {
            assert_ne!(colors.ui.highlight_bg, colors.base.background);
            assert_ne!(colors.ui.accent, colors.base.panel);
        }
    }
}
