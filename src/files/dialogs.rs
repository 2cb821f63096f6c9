//! Native file dialog integration using the rfd crate
//!
//! This module opens the native pickers used to import a markdown file and
//! to choose where an exported document is written.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extensions offered when importing.
const IMPORT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Opens a native file dialog for picking a file to import.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn import_file_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Import Markdown")
        .add_filter("Markdown or Text", IMPORT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Opens a native save dialog for an exported document.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn export_file_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export Markdown")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
