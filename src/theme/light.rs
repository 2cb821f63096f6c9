//! Light Theme Configuration
//!
//! White editing surfaces with gray panels and a blue accent.

use eframe::egui::{self, Color32, Visuals};

use super::{apply_palette, ThemeColors};

/// Create egui Visuals configured for the light theme.
pub fn create_light_visuals() -> Visuals {
    let colors = ThemeColors::light();
    let mut visuals = Visuals::light();
    apply_palette(&mut visuals, &colors);

    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: Color32::from_black_alpha(25),
    };
    visuals.dark_mode = false;
    visuals
}
