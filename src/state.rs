//! Application state management for SplitMark
//!
//! `AppState` ties the document store, search, drag-reorder machine, split
//! layout, theme and settings together. The egui layer only reads from it
//! and calls its methods, so every user-visible flow can be driven in tests
//! without a window.

use crate::config::{load_settings, load_theme, save_settings_silent, save_theme, Settings};
use crate::documents::{write_export, Clock, DocumentStore, ExportArtifact};
use crate::error::Result;
use crate::reorder::DragState;
use crate::search::SearchState;
use crate::storage::KeyValueStore;
use crate::theme::ThemeManager;
use crate::ui::SplitPane;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Transient UI flags that are not persisted.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Document awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// Error shown in the error window
    pub error_message: Option<String>,
    /// Whether the window is fullscreen
    pub fullscreen: bool,
    /// Focus the search box on the next frame
    pub focus_search: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
pub struct AppState {
    pub documents: DocumentStore,
    pub search: SearchState,
    pub drag: DragState,
    pub split: SplitPane,
    pub settings: Settings,
    pub theme: ThemeManager,
    pub ui: UiState,
    /// Store for settings and the theme preference
    store: Box<dyn KeyValueStore>,
}

impl AppState {
    /// Load everything from `store`.
    ///
    /// The store is cloned so documents and preferences share the same
    /// backing records.
    pub fn new<S>(store: S, clock: Box<dyn Clock>) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        let settings = load_settings(&store);
        let theme = ThemeManager::new(load_theme(&store));
        let documents = DocumentStore::load(Box::new(store.clone()), clock);

        Self {
            documents,
            search: SearchState::new(),
            drag: DragState::default(),
            split: SplitPane::new(settings.split_position),
            settings,
            theme,
            ui: UiState::default(),
            store: Box::new(store),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Title shown in the toolbar.
    pub fn active_title(&self) -> &str {
        self.documents
            .active_document()
            .map(|d| d.title.as_str())
            .unwrap_or("No Document")
    }

    /// Create a new document and make it active.
    pub fn new_document(&mut self) -> String {
        let id = self.documents.add();
        self.refresh_search();
        id
    }

    pub fn select_document(&mut self, id: &str) {
        self.documents.select(id);
    }

    /// Replace the active document's content.
    pub fn edit_active(&mut self, content: String) {
        let Some(id) = self.documents.active_document().map(|d| d.id.clone()) else {
            return;
        };
        self.documents.update(&id, content);
        self.refresh_search();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete Confirmation
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask to delete `id`. Ignored while only one document remains.
    pub fn request_delete(&mut self, id: &str) {
        if self.documents.len() <= 1 {
            return;
        }
        self.ui.pending_delete = Some(id.to_string());
    }

    /// Delete the document awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.ui.pending_delete.take() {
            self.documents.delete(&id);
            self.refresh_search();
        }
    }

    /// Dismiss the confirmation without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.ui.pending_delete = None;
    }

    /// Title of the document awaiting confirmation.
    pub fn pending_delete_title(&self) -> Option<&str> {
        self.ui
            .pending_delete
            .as_deref()
            .and_then(|id| self.documents.get(id))
            .map(|d| d.title.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drag Reorder
    // ─────────────────────────────────────────────────────────────────────────

    pub fn drag_start(&mut self, id: &str) {
        self.drag.drag_start(id, self.search.is_active());
    }

    /// Highlight row `index` as the drop slot. A search that became active
    /// mid-drag cancels the drag instead.
    pub fn drag_over(&mut self, index: usize) {
        if self.search.is_active() {
            self.drag.drag_end();
            return;
        }
        self.drag.drag_over(index);
    }

    /// Drop the dragged document onto row `index` and commit the new order.
    ///
    /// Row indices refer to the full list, so nothing is committed while a
    /// search filters it.
    pub fn drop_at(&mut self, index: usize) {
        if self.search.is_active() {
            debug!("Drop ignored while searching");
            self.drag.drag_end();
            return;
        }
        let Some(reordered) = self.drag.drop(index, self.documents.documents()) else {
            return;
        };
        if let Err(e) = self.documents.reorder(reordered) {
            self.show_error(e.to_string());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query, self.documents.documents());
        if self.search.is_active() && self.drag.is_dragging() {
            debug!("Search started mid-drag, cancelling the drag");
            self.drag.drag_end();
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Recompute results after the documents changed.
    pub fn refresh_search(&mut self) {
        self.search.refresh(self.documents.documents());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Import / Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Import a file as a new active document.
    pub fn import_path(&mut self, path: &Path) {
        match self.documents.import_file(path) {
            Ok(id) => {
                info!("Imported {} as {}", path.display(), id);
                self.remember_directory(path);
                self.refresh_search();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Export artifact for the active document.
    pub fn active_export(&self) -> Option<ExportArtifact> {
        let id = &self.documents.active_document()?.id;
        self.documents.export(id)
    }

    /// Write `artifact` to `path`.
    pub fn export_to(&mut self, path: &Path, artifact: &ExportArtifact) -> Result<()> {
        write_export(path, artifact)?;
        info!("Exported {} to {}", artifact.file_name, path.display());
        self.remember_directory(path);
        Ok(())
    }

    /// Directory the file pickers open in.
    pub fn last_directory(&self) -> Option<&Path> {
        self.settings.last_directory.as_deref()
    }

    fn remember_directory(&mut self, path: &Path) {
        self.settings.last_directory = path.parent().map(PathBuf::from);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View Toggles
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip light/dark and persist the explicit preference.
    pub fn toggle_theme(&mut self) {
        let next = self.theme.toggle();
        save_theme(self.store.as_mut(), next);
    }

    pub fn toggle_preview(&mut self) {
        self.settings.preview_visible = !self.settings.preview_visible;
    }

    /// Flip fullscreen. Returns the new value.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.ui.fullscreen = !self.ui.fullscreen;
        self.ui.fullscreen
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Errors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.ui.error_message = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.ui.error_message = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shutdown
    // ─────────────────────────────────────────────────────────────────────────

    /// Persist settings before exit.
    pub fn shutdown(&mut self) {
        self.settings.split_position = self.split.position_percent();
        if save_settings_silent(self.store.as_mut(), &self.settings) {
            info!("Settings saved");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
