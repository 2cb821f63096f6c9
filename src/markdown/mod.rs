//! Markdown preview module
//!
//! Markdown source is parsed with comrak (CommonMark + GFM) into an owned
//! node tree, which the renderer turns into egui widgets for the preview
//! pane. Raw HTML in the source is displayed as text and never interpreted.
//!
//! # Example
//! ```ignore
//! let doc = parse_markdown("# Hello\n\nThis is **bold** text.");
//! render_document(ui, &doc, &colors);
//! ```

mod parser;
mod render;

pub use parser::{parse_markdown, MarkdownDocument, MarkdownNode, NodeKind, TableAlignment};
pub use render::{render_document, PreviewCache};
