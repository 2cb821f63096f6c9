//! Editor and preview panes.

use crate::markdown::{render_document, PreviewCache};
use crate::theme::ThemeColors;
use eframe::egui::{self, FontId, Margin, ScrollArea, Ui};

/// Editor font size.
const EDITOR_FONT_SIZE: f32 = 15.0;

/// Multiline editor over `content`. Returns `true` if the text changed.
pub fn show_editor(ui: &mut Ui, content: &mut String, colors: &ThemeColors) -> bool {
    let mut changed = false;
    egui::Frame::none()
        .fill(colors.base.background)
        .inner_margin(Margin::same(12.0))
        .show(ui, |ui| {
            ScrollArea::vertical()
                .id_source("editor_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(content)
                            .id_source("markdown_editor")
                            .font(FontId::monospace(EDITOR_FONT_SIZE))
                            .text_color(colors.text.primary)
                            .frame(false)
                            .lock_focus(true)
                            .desired_width(f32::INFINITY),
                    );
                    changed = response.changed();
                });
        });
    changed
}

/// Rendered preview of `content`.
pub fn show_preview(ui: &mut Ui, cache: &mut PreviewCache, content: &str, colors: &ThemeColors) {
    egui::Frame::none()
        .fill(colors.base.panel)
        .inner_margin(Margin::symmetric(20.0, 16.0))
        .show(ui, |ui| {
            ScrollArea::vertical()
                .id_source("preview_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    render_document(ui, cache.document_for(content), colors);
                });
        });
}
