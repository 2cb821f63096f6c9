//! Top toolbar
//!
//! Shows the app name and active document title, the search box, and the
//! import/export and view toggle buttons.

use crate::theme::ThemeColors;
use eframe::egui::{self, Key, Response, RichText, Ui, Vec2};

/// Application name shown at the left of the toolbar.
pub const APP_NAME: &str = "SplitMark";

/// Size of the square toolbar buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(28.0, 28.0);

/// Width of the search box.
const SEARCH_WIDTH: f32 = 260.0;

/// Actions triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Import,
    Export,
    TogglePreview,
    ToggleFullscreen,
    ToggleTheme,
    /// The search text was edited
    SearchChanged,
    /// The search clear button was clicked, or Escape pressed in the box
    ClearSearch,
}

/// What the toolbar needs to know about the rest of the app.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarView<'a> {
    pub active_title: &'a str,
    pub preview_visible: bool,
    pub fullscreen: bool,
    pub can_export: bool,
}

/// Draw the toolbar. `focus_search` moves keyboard focus into the search box.
pub fn show_toolbar(
    ui: &mut Ui,
    colors: &ThemeColors,
    view: ToolbarView<'_>,
    query: &mut String,
    focus_search: bool,
) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;

        ui.label(RichText::new("📝").size(16.0).color(colors.ui.accent));
        ui.label(
            RichText::new(APP_NAME)
                .size(15.0)
                .strong()
                .color(colors.text.primary),
        );
        ui.label(RichText::new("/").color(colors.text.muted));
        ui.add(
            egui::Label::new(RichText::new(view.active_title).color(colors.text.secondary))
                .truncate(),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (theme_icon, theme_tip) = if colors.is_dark() {
                ("☀", "Switch to Light Mode")
            } else {
                ("🌙", "Switch to Dark Mode")
            };
            if icon_button(ui, theme_icon, theme_tip, colors).clicked() {
                action = Some(ToolbarAction::ToggleTheme);
            }

            let fullscreen_tip = if view.fullscreen {
                "Exit Fullscreen (F11)"
            } else {
                "Enter Fullscreen (F11)"
            };
            if icon_button(ui, "⛶", fullscreen_tip, colors).clicked() {
                action = Some(ToolbarAction::ToggleFullscreen);
            }

            let preview_tip = if view.preview_visible {
                "Hide Preview"
            } else {
                "Show Preview"
            };
            if icon_button(ui, "👁", preview_tip, colors).clicked() {
                action = Some(ToolbarAction::TogglePreview);
            }

            let export = ui.add_enabled_ui(view.can_export, |ui| {
                icon_button(ui, "💾", "Export as Markdown (Ctrl+S)", colors)
            });
            if export.inner.clicked() {
                action = Some(ToolbarAction::Export);
            }

            if icon_button(ui, "📂", "Import Markdown file (Ctrl+O)", colors).clicked() {
                action = Some(ToolbarAction::Import);
            }

            ui.add_space(12.0);

            if !query.is_empty()
                && ui
                    .add(egui::Button::new(RichText::new("✖").color(colors.text.muted)).frame(false))
                    .on_hover_text("Clear search")
                    .clicked()
            {
                action = Some(ToolbarAction::ClearSearch);
            }

            let search = ui.add(
                egui::TextEdit::singleline(query)
                    .hint_text("🔍 Search...")
                    .desired_width(SEARCH_WIDTH),
            );
            if focus_search {
                search.request_focus();
            }
            // TextEdit gives up focus on Escape, so check both states
            if (search.has_focus() || search.lost_focus())
                && ui.input(|i| i.key_pressed(Key::Escape))
            {
                action = Some(ToolbarAction::ClearSearch);
            } else if search.changed() && action.is_none() {
                action = Some(ToolbarAction::SearchChanged);
            }
        });
    });

    action
}

fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, colors: &ThemeColors) -> Response {
    ui.add(
        egui::Button::new(RichText::new(icon).size(15.0).color(colors.text.secondary))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    )
    .on_hover_text(tooltip)
}
