//! UI components for SplitMark
//!
//! Each component draws into egui and reports user intent back to the app
//! as plain values; none of them mutate application state directly.

mod dialogs;
mod panes;
mod sidebar;
mod split_pane;
mod toolbar;

pub use dialogs::{show_delete_dialog, show_error_dialog, DialogResult};
pub use panes::{show_editor, show_preview};
pub use sidebar::{show_sidebar, SidebarAction, SidebarView};
pub use split_pane::SplitPane;
pub use toolbar::{show_toolbar, ToolbarAction, ToolbarView, APP_NAME};
