//! Dark Theme Configuration
//!
//! Slate backgrounds with light text, using the same blue accent as the
//! light theme.

use eframe::egui::{self, Color32, Visuals};

use super::{apply_palette, ThemeColors};

/// Create egui Visuals configured for the dark theme.
pub fn create_dark_visuals() -> Visuals {
    let colors = ThemeColors::dark();
    let mut visuals = Visuals::dark();
    apply_palette(&mut visuals, &colors);

    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 16.0,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    visuals.dark_mode = true;
    visuals
}
