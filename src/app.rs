//! Main application module for SplitMark
//!
//! This module implements the eframe App trait, wiring the toolbar, sidebar,
//! preview and editor to [`AppState`] and handling keyboard shortcuts,
//! window state and file dialogs.

use crate::config::{Settings, WindowSize};
use crate::documents::{Clock, SystemClock};
use crate::files::dialogs::{export_file_dialog, import_file_dialog};
use crate::markdown::PreviewCache;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::ui::{
    show_delete_dialog, show_editor, show_error_dialog, show_preview, show_sidebar, show_toolbar,
    DialogResult, SidebarAction, SidebarView, ToolbarAction, ToolbarView, APP_NAME,
};
use eframe::egui;
use log::{debug, info};

/// Keyboard shortcut actions that need to be deferred.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// New document (Ctrl+N)
    New,
    /// Import a file (Ctrl+O)
    Import,
    /// Export the active document (Ctrl+S)
    Export,
    /// Focus the search box (Ctrl+F)
    FocusSearch,
    /// Toggle fullscreen (F11)
    ToggleFullscreen,
    /// Clear the search (Escape)
    ClearSearch,
}

/// The main application struct.
pub struct SplitMarkApp {
    state: AppState,
    preview_cache: PreviewCache,
    clock: SystemClock,
    /// Last known window size, for change detection
    last_window_size: Option<egui::Vec2>,
    /// Last known window position, for change detection
    last_window_pos: Option<egui::Pos2>,
}

impl SplitMarkApp {
    /// Create the app over `store`, applying the saved theme preference.
    pub fn new<S>(cc: &eframe::CreationContext<'_>, store: S) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        info!("Initializing {}", APP_NAME);

        let mut state = AppState::new(store, Box::new(SystemClock));
        state
            .theme
            .set_system_dark(cc.integration_info.system_theme.map(|t| t == eframe::Theme::Dark));
        state.theme.apply_if_needed(&cc.egui_ctx);
        info!("Applied initial theme: {:?}", state.theme.preference());

        Self {
            state,
            preview_cache: PreviewCache::new(),
            clock: SystemClock,
            last_window_size: None,
            last_window_pos: None,
        }
    }

    /// Get the window title based on the active document.
    fn window_title(&self) -> String {
        format!("{} - {}", self.state.active_title(), APP_NAME)
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        if self.state.ui.fullscreen {
            return false;
        }

        let (inner, outer, maximized) = ctx.input(|i| {
            let viewport = i.viewport();
            (
                viewport.inner_rect,
                viewport.outer_rect,
                viewport.maximized.unwrap_or(false),
            )
        });
        let Some(inner) = inner else {
            return false;
        };
        let size = inner.size();
        let pos = outer.map(|r| r.min);

        let size_changed = self
            .last_window_size
            .map(|s| (s - size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = match (self.last_window_pos, pos) {
            (Some(last), Some(now)) => (last - now).length() > 1.0,
            (None, Some(_)) => true,
            _ => false,
        };
        if !size_changed && !pos_changed {
            return false;
        }

        self.last_window_size = Some(size);
        self.last_window_pos = pos;
        self.state.settings.window_size = WindowSize {
            width: size.x,
            height: size.y,
            x: pos.map(|p| p.x),
            y: pos.map(|p| p.y),
            maximized,
        };
        debug!(
            "Window state updated: {}x{}, maximized: {}",
            size.x, size.y, maximized
        );
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_ui(&mut self, ctx: &egui::Context) {
        let colors = self.state.theme.colors();

        // Toolbar
        let focus_search = std::mem::take(&mut self.state.ui.focus_search);
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::none()
                    .fill(colors.base.panel)
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                    .stroke(egui::Stroke::new(1.0, colors.base.border)),
            )
            .show(ctx, |ui| {
                let view = ToolbarView {
                    active_title: self.state.active_title(),
                    preview_visible: self.state.settings.preview_visible,
                    fullscreen: self.state.ui.fullscreen,
                    can_export: self.state.documents.active_document().is_some(),
                };
                // Query is edited in a copy so the title can stay borrowed
                let mut query = self.state.search.query().to_string();
                let action = show_toolbar(ui, &colors, view, &mut query, focus_search);
                (action, query)
            })
            .inner;
        match toolbar_action {
            (Some(ToolbarAction::SearchChanged), query) => self.state.set_search_query(query),
            (Some(action), _) => self.handle_toolbar_action(action, ctx),
            (None, _) => {}
        }

        // Sidebar
        let sidebar = egui::SidePanel::left("documents_sidebar")
            .resizable(true)
            .default_width(self.state.settings.sidebar_width)
            .width_range(Settings::MIN_SIDEBAR_WIDTH..=Settings::MAX_SIDEBAR_WIDTH)
            .frame(
                egui::Frame::none()
                    .fill(colors.base.inset)
                    .stroke(egui::Stroke::new(1.0, colors.base.border)),
            )
            .show(ctx, |ui| {
                let view = SidebarView {
                    documents: self.state.documents.documents(),
                    active_id: self.state.documents.active_document().map(|d| d.id.as_str()),
                    search: &self.state.search,
                    drag: &self.state.drag,
                    now_ms: self.clock.now_ms(),
                };
                show_sidebar(ui, &colors, &view)
            });
        let sidebar_width = sidebar.response.rect.width();
        if (sidebar_width - self.state.settings.sidebar_width).abs() > 1.0 {
            self.state.settings.sidebar_width = sidebar_width;
        }
        for action in sidebar.inner {
            self.handle_sidebar_action(action);
        }

        // Preview and editor
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(colors.base.background))
            .show(ctx, |ui| {
                let Some(active) = self.state.documents.active_document() else {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No document selected").color(colors.text.muted),
                        );
                    });
                    return;
                };
                let content = active.content.clone();
                let mut text = content.clone();
                let mut changed = false;

                let preview_cache = &mut self.preview_cache;
                self.state.split.show(
                    ui,
                    self.state.settings.preview_visible,
                    colors.base.border,
                    colors.ui.accent,
                    |ui| show_preview(ui, preview_cache, &content, &colors),
                    |ui| changed = show_editor(ui, &mut text, &colors),
                );

                if changed {
                    self.state.edit_active(text);
                }
            });

        self.render_dialogs(ctx);
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let colors = self.state.theme.colors();

        if let Some(title) = self.state.pending_delete_title().map(str::to_owned) {
            match show_delete_dialog(ctx, &title, &colors) {
                DialogResult::Confirmed => self.state.confirm_delete(),
                DialogResult::Cancelled => self.state.cancel_delete(),
                DialogResult::None => {}
            }
        } else if self.state.ui.pending_delete.is_some() {
            // Target vanished while the dialog was open
            self.state.cancel_delete();
        }

        if let Some(message) = self.state.ui.error_message.clone() {
            if show_error_dialog(ctx, &message, &colors) != DialogResult::None {
                self.state.dismiss_error();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_toolbar_action(&mut self, action: ToolbarAction, ctx: &egui::Context) {
        match action {
            ToolbarAction::Import => self.handle_import(),
            ToolbarAction::Export => self.handle_export(),
            ToolbarAction::TogglePreview => self.state.toggle_preview(),
            ToolbarAction::ToggleFullscreen => self.handle_toggle_fullscreen(ctx),
            ToolbarAction::ToggleTheme => {
                self.state.toggle_theme();
                self.state.theme.apply_if_needed(ctx);
            }
            ToolbarAction::ClearSearch => self.state.clear_search(),
            // Applied by the caller, which owns the edited text
            ToolbarAction::SearchChanged => {}
        }
    }

    fn handle_sidebar_action(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Select(id) => self.state.select_document(&id),
            SidebarAction::New => {
                self.state.new_document();
            }
            SidebarAction::RequestDelete(id) => self.state.request_delete(&id),
            SidebarAction::DragStart(id) => self.state.drag_start(&id),
            SidebarAction::DragOver(index) => self.state.drag_over(index),
            SidebarAction::DragLeave => self.state.drag.drag_leave(),
            SidebarAction::Drop(index) => self.state.drop_at(index),
            SidebarAction::DragEnd => self.state.drag.drag_end(),
        }
    }

    fn handle_import(&mut self) {
        if let Some(path) = import_file_dialog(self.state.last_directory()) {
            self.state.import_path(&path);
        }
    }

    fn handle_export(&mut self) {
        let Some(artifact) = self.state.active_export() else {
            debug!("Export ignored, no active document");
            return;
        };
        let Some(path) = export_file_dialog(self.state.last_directory(), &artifact.file_name)
        else {
            return;
        };
        if let Err(e) = self.state.export_to(&path, &artifact) {
            self.state.show_error(e.to_string());
        }
    }

    fn handle_toggle_fullscreen(&mut self, ctx: &egui::Context) {
        let fullscreen = self.state.toggle_fullscreen();
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }

    /// Handle keyboard shortcuts.
    ///
    /// - Ctrl+N: New document
    /// - Ctrl+O: Import
    /// - Ctrl+S: Export
    /// - Ctrl+F: Focus search
    /// - F11: Toggle fullscreen
    /// - Escape: Clear search
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let modal_open =
            self.state.ui.pending_delete.is_some() || self.state.ui.error_message.is_some();
        let searching = self.state.search.is_active();

        let action = ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(egui::Key::N) {
                debug!("Keyboard shortcut: Ctrl+N (New)");
                return Some(KeyboardAction::New);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::O) {
                debug!("Keyboard shortcut: Ctrl+O (Import)");
                return Some(KeyboardAction::Import);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+S (Export)");
                return Some(KeyboardAction::Export);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::F) {
                debug!("Keyboard shortcut: Ctrl+F (Search)");
                return Some(KeyboardAction::FocusSearch);
            }
            if i.key_pressed(egui::Key::F11) {
                debug!("Keyboard shortcut: F11 (Fullscreen)");
                return Some(KeyboardAction::ToggleFullscreen);
            }
            if searching && i.key_pressed(egui::Key::Escape) {
                debug!("Keyboard shortcut: Escape (Clear Search)");
                return Some(KeyboardAction::ClearSearch);
            }
            None
        });

        let Some(action) = action else {
            return;
        };
        if modal_open {
            return;
        }

        match action {
            KeyboardAction::New => {
                self.state.new_document();
            }
            KeyboardAction::Import => self.handle_import(),
            KeyboardAction::Export => self.handle_export(),
            KeyboardAction::FocusSearch => self.state.ui.focus_search = true,
            KeyboardAction::ToggleFullscreen => self.handle_toggle_fullscreen(ctx),
            KeyboardAction::ClearSearch => self.state.clear_search(),
        }
    }
}

impl eframe::App for SplitMarkApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Follow the operating system theme when the preference is System
        let system_dark = frame.info().system_theme.map(|t| t == eframe::Theme::Dark);
        self.state.theme.set_system_dark(system_dark);
        self.state.theme.apply_if_needed(ctx);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));
        self.update_window_state(ctx);

        self.handle_keyboard_shortcuts(ctx);
        self.render_ui(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }
}
