//! Modal dialogs: delete confirmation and the error window.

use crate::theme::ThemeColors;
use eframe::egui::{self, Key, RichText};

/// Result from showing a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// No action taken (dialog still open)
    None,
    /// Dialog was cancelled or dismissed
    Cancelled,
    /// The user confirmed
    Confirmed,
}

fn dialog_window(title: &str, ctx: &egui::Context, colors: &ThemeColors) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(colors.base.panel)
                .stroke(egui::Stroke::new(1.0, colors.base.border))
                .rounding(8.0),
        )
}

/// Ask whether the document titled `title` should be deleted.
pub fn show_delete_dialog(ctx: &egui::Context, title: &str, colors: &ThemeColors) -> DialogResult {
    let mut result = DialogResult::None;

    // Handle escape key
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return DialogResult::Cancelled;
    }

    dialog_window("🗑 Delete Document", ctx, colors).show(ctx, |ui| {
        ui.set_min_width(320.0);
        ui.add_space(8.0);
        ui.label("Are you sure you want to delete this document?");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("📄").size(16.0));
            ui.label(RichText::new(title).strong().color(colors.text.primary));
        });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let delete_button =
                    egui::Button::new(RichText::new("Delete").color(colors.ui.on_accent))
                        .fill(colors.ui.error);
                if ui.add(delete_button).clicked() {
                    result = DialogResult::Confirmed;
                }

                ui.add_space(8.0);

                if ui.button("Cancel").clicked() {
                    result = DialogResult::Cancelled;
                }
            });
        });

        ui.add_space(4.0);
    });

    result
}

/// Show an error message until dismissed.
pub fn show_error_dialog(ctx: &egui::Context, message: &str, colors: &ThemeColors) -> DialogResult {
    let mut result = DialogResult::None;

    if ctx.input(|i| i.key_pressed(Key::Escape) || i.key_pressed(Key::Enter)) {
        return DialogResult::Cancelled;
    }

    dialog_window("⚠ Error", ctx, colors).show(ctx, |ui| {
        ui.set_min_width(320.0);
        ui.set_max_width(480.0);
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(colors.ui.error));
        ui.add_space(12.0);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("OK").clicked() {
                result = DialogResult::Cancelled;
            }
        });
        ui.add_space(4.0);
    });

    result
}
