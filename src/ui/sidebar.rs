//! Document list sidebar
//!
//! Lists documents (or only the matching ones while searching), and turns
//! row clicks, delete clicks and drag gestures into [`SidebarAction`]s.

use crate::documents::Document;
use crate::reorder::DragState;
use crate::search::{highlight_segments, SearchState};
use crate::theme::ThemeColors;
use chrono::{Local, TimeZone};
use eframe::egui::{
    self, pos2, text::LayoutJob, Align2, Color32, FontId, Rect, RichText, ScrollArea, Sense,
    Stroke, TextFormat, Ui, Vec2,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Row height without a search snippet.
const ROW_HEIGHT: f32 = 46.0;

/// Extra height for the snippet line while searching.
const SNIPPET_HEIGHT: f32 = 16.0;

/// Horizontal padding inside a row.
const ROW_PADDING: f32 = 8.0;

/// Width reserved for the drag grip.
const GRIP_WIDTH: f32 = 12.0;

/// Size of the delete button hit area.
const DELETE_SIZE: f32 = 18.0;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// User actions reported by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    Select(String),
    New,
    RequestDelete(String),
    DragStart(String),
    DragOver(usize),
    DragLeave,
    Drop(usize),
    DragEnd,
}

/// Inputs the sidebar renders from.
pub struct SidebarView<'a> {
    pub documents: &'a [Document],
    pub active_id: Option<&'a str>,
    pub search: &'a SearchState,
    pub drag: &'a DragState,
    /// Current time for relative dates
    pub now_ms: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Draw the sidebar contents into `ui` and collect actions.
pub fn show_sidebar(ui: &mut Ui, colors: &ThemeColors, view: &SidebarView<'_>) -> Vec<SidebarAction> {
    let mut actions = Vec::new();
    let searching = view.search.is_active();
    let visible = view.search.visible_documents(view.documents);

    // Header
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.add_space(ROW_PADDING);
        let header = if searching { "Search Results" } else { "Documents" };
        ui.label(
            RichText::new(header)
                .size(12.0)
                .strong()
                .color(colors.text.primary),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(ROW_PADDING);
            ui.label(
                RichText::new(visible.len().to_string())
                    .size(11.0)
                    .color(colors.text.secondary)
                    .background_color(colors.base.hover),
            );
        });
    });

    if !searching {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add_space(ROW_PADDING);
            let button = egui::Button::new(RichText::new("＋ New").color(colors.ui.on_accent))
                .fill(colors.ui.accent)
                .min_size(Vec2::new(ui.available_width() - ROW_PADDING, 26.0));
            if ui.add(button).on_hover_text("New document (Ctrl+N)").clicked() {
                actions.push(SidebarAction::New);
            }
        });
    }

    ui.add_space(6.0);
    ui.separator();

    if visible.is_empty() {
        show_empty_state(ui, colors, searching);
        return actions;
    }

    let mut hovered_slot = None;
    let pointer = ui.ctx().pointer_latest_pos();
    let can_delete = !searching && view.documents.len() > 1;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(0.0, 4.0);
            for (index, doc) in visible.iter().enumerate() {
                let row = RowContext {
                    searching,
                    can_delete,
                    active: view.active_id == Some(doc.id.as_str()),
                    dragged: view.drag.dragged_id() == Some(doc.id.as_str()),
                    drop_target: !searching && view.drag.highlighted_slot() == Some(index),
                };
                let rect = show_row(ui, colors, view, doc, &row, &mut actions);
                if view.drag.is_dragging() && pointer.is_some_and(|p| rect.contains(p)) {
                    hovered_slot = Some(index);
                }
            }
        });

    if view.drag.is_dragging() {
        collect_drag_events(ui, view.drag, hovered_slot, &mut actions);
    }

    actions
}

fn collect_drag_events(ui: &Ui, drag: &DragState, hovered: Option<usize>, actions: &mut Vec<SidebarAction>) {
    if ui.input(|i| i.pointer.any_released()) {
        actions.push(match hovered {
            Some(index) => SidebarAction::Drop(index),
            None => SidebarAction::DragEnd,
        });
        return;
    }
    match hovered {
        Some(index) if drag.highlighted_slot() != Some(index) => {
            actions.push(SidebarAction::DragOver(index));
        }
        None if drag.highlighted_slot().is_some() => actions.push(SidebarAction::DragLeave),
        _ => {}
    }
}

struct RowContext {
    searching: bool,
    can_delete: bool,
    active: bool,
    dragged: bool,
    drop_target: bool,
}

fn show_row(
    ui: &mut Ui,
    colors: &ThemeColors,
    view: &SidebarView<'_>,
    doc: &Document,
    row: &RowContext,
    actions: &mut Vec<SidebarAction>,
) -> Rect {
    let matches = view.search.matches_for(&doc.id);
    let has_snippet = row.searching && !matches.is_empty();
    let height = if has_snippet {
        ROW_HEIGHT + SNIPPET_HEIGHT
    } else {
        ROW_HEIGHT
    };

    let sense = if row.searching {
        Sense::click()
    } else {
        Sense::click_and_drag()
    };
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, height), sense);
    let rect = rect.shrink2(Vec2::new(4.0, 0.0));

    // Background
    let (title_color, detail_color) = if row.active {
        (colors.ui.on_accent, colors.ui.on_accent_muted)
    } else {
        (colors.text.primary, colors.text.muted)
    };
    let mut background = if row.active {
        colors.ui.accent
    } else if response.hovered() {
        colors.base.hover
    } else {
        Color32::TRANSPARENT
    };
    if row.dragged {
        background = background.gamma_multiply(0.5);
    }
    ui.painter().rect_filled(rect, 4.0, background);
    if row.drop_target {
        ui.painter().hline(
            rect.x_range(),
            rect.top(),
            Stroke::new(2.0, colors.ui.accent),
        );
    }

    // Content
    let mut x = rect.left() + ROW_PADDING;
    if !row.searching {
        ui.painter().text(
            pos2(x, rect.top() + 8.0),
            Align2::LEFT_TOP,
            "⠿",
            FontId::proportional(11.0),
            detail_color,
        );
        x += GRIP_WIDTH;
    }
    ui.painter().text(
        pos2(x, rect.top() + 7.0),
        Align2::LEFT_TOP,
        "📄",
        FontId::proportional(12.0),
        title_color,
    );
    x += 18.0;

    let text_width = (rect.right() - x - DELETE_SIZE - ROW_PADDING).max(10.0);
    let query = if row.searching { view.search.query() } else { "" };
    let mut y = rect.top() + 6.0;

    let title = single_line_job(&doc.title, query, 12.5, title_color, text_width, colors);
    paint_job(ui, pos2(x, y), title, title_color);
    y += 19.0;

    if has_snippet {
        let mut snippet = single_line_job(&matches[0].text, query, 11.0, detail_color, text_width, colors);
        if matches.len() > 1 {
            snippet.append(
                &format!("  +{}", matches.len() - 1),
                0.0,
                TextFormat::simple(FontId::proportional(10.0), detail_color),
            );
        }
        paint_job(ui, pos2(x, y), snippet, detail_color);
        y += SNIPPET_HEIGHT;
    }

    ui.painter().text(
        pos2(x, y),
        Align2::LEFT_TOP,
        format_updated_at(doc.updated_at, view.now_ms),
        FontId::proportional(10.5),
        detail_color,
    );

    // Delete button, interacted after the row so it takes the click
    let mut delete_clicked = false;
    if row.can_delete && (response.hovered() || row.active) {
        let delete_rect = Rect::from_min_size(
            pos2(rect.right() - DELETE_SIZE - 4.0, rect.top() + 4.0),
            Vec2::splat(DELETE_SIZE),
        );
        let delete = ui
            .interact(delete_rect, ui.id().with(("delete", &doc.id)), Sense::click())
            .on_hover_text("Delete document");
        if delete.hovered() {
            ui.painter().rect_filled(delete_rect, 3.0, colors.base.hover);
        }
        ui.painter().text(
            delete_rect.center(),
            Align2::CENTER_CENTER,
            "🗑",
            FontId::proportional(11.0),
            if delete.hovered() { colors.ui.error } else { detail_color },
        );
        if delete.clicked() {
            delete_clicked = true;
            actions.push(SidebarAction::RequestDelete(doc.id.clone()));
        }
    }

    if response.drag_started() {
        actions.push(SidebarAction::DragStart(doc.id.clone()));
    } else if response.clicked() && !delete_clicked && !row.dragged {
        actions.push(SidebarAction::Select(doc.id.clone()));
    }
    if response.hovered() && !row.searching {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    rect
}

fn show_empty_state(ui: &mut Ui, colors: &ThemeColors, searching: bool) {
    let (headline, hint) = if searching {
        ("No results found", "Try a different keyword")
    } else {
        ("No documents", "Create a new one to start")
    };
    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("📄").size(22.0).color(colors.text.muted));
        ui.label(RichText::new(headline).size(12.0).color(colors.text.secondary));
        ui.label(RichText::new(hint).size(11.0).color(colors.text.muted));
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// One-line layout of `text` with `query` occurrences highlighted,
/// truncated with an ellipsis at `max_width`.
fn single_line_job(
    text: &str,
    query: &str,
    size: f32,
    color: Color32,
    max_width: f32,
    colors: &ThemeColors,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    for segment in highlight_segments(text, query) {
        let format = if segment.is_match {
            TextFormat {
                font_id: FontId::proportional(size),
                color: colors.ui.highlight_text,
                background: colors.ui.highlight_bg,
                ..Default::default()
            }
        } else {
            TextFormat::simple(FontId::proportional(size), color)
        };
        job.append(&segment.text, 0.0, format);
    }
    job.wrap.max_width = max_width;
    job.wrap.max_rows = 1;
    job.wrap.break_anywhere = true;
    job
}

fn paint_job(ui: &Ui, pos: egui::Pos2, job: LayoutJob, fallback: Color32) {
    let galley = ui.fonts(|f| f.layout_job(job));
    ui.painter().galley(pos, galley, fallback);
}

/// Relative date for the list: `HH:MM` within the last day, otherwise an
/// abbreviated month and day such as `Mar 5`.
pub fn format_updated_at(updated_ms: i64, now_ms: i64) -> String {
    let Some(updated) = Local.timestamp_millis_opt(updated_ms).single() else {
        return String::new();
    };
    if now_ms - updated_ms < DAY_MS {
        updated.format("%H:%M").to_string()
    } else {
        updated.format("%b %-d").to_string()
    }
}
