//! Resizable two-pane split
//!
//! The divider position is kept as a percentage of the container width and
//! clamped so neither pane collapses.

use crate::config::Settings;
use eframe::egui::{self, pos2, Color32, CursorIcon, Rect, Sense, Ui};
use log::debug;

/// Width of the draggable divider in points.
const DIVIDER_WIDTH: f32 = 4.0;

/// Split between the preview (left) and the editor (right).
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPane {
    position_percent: f32,
    resizing: bool,
}

impl Default for SplitPane {
    fn default() -> Self {
        Self::new(Settings::DEFAULT_SPLIT_POSITION)
    }
}

impl SplitPane {
    pub fn new(position_percent: f32) -> Self {
        Self {
            position_percent: clamp_position(position_percent),
            resizing: false,
        }
    }

    /// Width of the left pane as a percentage of the container.
    pub fn position_percent(&self) -> f32 {
        self.position_percent
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// The divider was grabbed.
    pub fn start_resize(&mut self) {
        self.resizing = true;
    }

    /// Move the divider under the pointer at `pointer_x`, for a container
    /// starting at `left` and `width` wide. Ignored unless resizing.
    pub fn drag_to(&mut self, pointer_x: f32, left: f32, width: f32) {
        if !self.resizing || width <= 0.0 {
            return;
        }
        let percent = (pointer_x - left) / width * 100.0;
        self.position_percent = clamp_position(percent);
    }

    /// The divider was released.
    pub fn stop_resize(&mut self) {
        if self.resizing {
            debug!("Split position now {:.1}%", self.position_percent);
        }
        self.resizing = false;
    }

    /// Lay out `left` and `right` side by side in the remaining space.
    ///
    /// When `show_left` is false only `right` is drawn, filling the area.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        show_left: bool,
        divider_color: Color32,
        active_color: Color32,
        left: impl FnOnce(&mut Ui),
        right: impl FnOnce(&mut Ui),
    ) {
        let area = ui.available_rect_before_wrap();

        if !show_left {
            ui.allocate_ui_at_rect(area, right);
            return;
        }

        let split_x = area.left() + area.width() * self.position_percent / 100.0;
        let left_rect = Rect::from_min_max(area.min, pos2(split_x - DIVIDER_WIDTH / 2.0, area.bottom()));
        let divider_rect = Rect::from_min_max(
            pos2(split_x - DIVIDER_WIDTH / 2.0, area.top()),
            pos2(split_x + DIVIDER_WIDTH / 2.0, area.bottom()),
        );
        let right_rect = Rect::from_min_max(pos2(split_x + DIVIDER_WIDTH / 2.0, area.top()), area.max);

        let response = ui.interact(divider_rect, ui.id().with("split_divider"), Sense::drag());
        if response.drag_started() {
            self.start_resize();
        }
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.drag_to(pointer.x, area.left(), area.width());
            }
        }
        if response.drag_stopped() {
            self.stop_resize();
        }
        if response.hovered() || self.resizing {
            ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
        }

        let color = if self.resizing || response.hovered() {
            active_color
        } else {
            divider_color
        };
        ui.painter().rect_filled(divider_rect, 0.0, color);

        ui.allocate_ui_at_rect(left_rect, |ui| {
            ui.set_clip_rect(left_rect);
            left(ui);
        });
        ui.allocate_ui_at_rect(right_rect, |ui| {
            ui.set_clip_rect(right_rect);
            right(ui);
        });
    }
}

fn clamp_position(percent: f32) -> f32 {
    if percent.is_nan() {
        return Settings::DEFAULT_SPLIT_POSITION;
    }
    percent.clamp(Settings::MIN_SPLIT_POSITION, Settings::MAX_SPLIT_POSITION)
}
