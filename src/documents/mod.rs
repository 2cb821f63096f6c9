//! Document model for SplitMark
//!
//! This module defines the `Document` record, the persisted
//! `DocumentState`, and the `DocumentStore` that owns and mutates them.

mod clock;
mod export;
mod store;
mod title;

pub use clock::{Clock, SystemClock};
pub use export::{sanitize_file_name, write_export, ExportArtifact};
pub use store::DocumentStore;
pub use title::{derive_title, UNTITLED};

#[cfg(test)]
pub(crate) use clock::testing::ManualClock;

use serde::{Deserialize, Serialize};

/// Id of the document seeded into a fresh collection.
pub const WELCOME_DOCUMENT_ID: &str = "default";

/// A single markdown document.
///
/// The title is always derived from the content; see [`derive_title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque, immutable identifier
    pub id: String,
    /// Display title derived from the first content line
    pub title: String,
    /// Markdown source
    pub content: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
    /// Last content change in milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl Document {
    /// Create a document with an explicit title, stamped at `now`.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a document whose title is derived from its content.
    pub fn from_content(id: impl Into<String>, content: impl Into<String>, now: i64) -> Self {
        let content = content.into();
        let title = derive_title(&content);
        Self::new(id, title, content, now)
    }

    /// The welcome document a fresh collection starts with.
    pub fn welcome(now: i64) -> Self {
        Self::from_content(WELCOME_DOCUMENT_ID, WELCOME_CONTENT, now)
    }
}

/// The persisted record: ordered documents plus the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentState {
    /// Documents in display order
    pub documents: Vec<Document>,
    /// Currently active document, `None` only when `documents` is empty
    pub active_document_id: Option<String>,
}

impl DocumentState {
    /// A collection holding only the welcome document, which is active.
    pub fn welcome(now: i64) -> Self {
        let doc = Document::welcome(now);
        Self {
            active_document_id: Some(doc.id.clone()),
            documents: vec![doc],
        }
    }

    /// Point the active id at an existing document.
    ///
    /// A missing or dangling active id is moved to the first document, or
    /// cleared when there are no documents. Returns `true` if anything changed.
    pub fn repair_active(&mut self) -> bool {
        let valid = match &self.active_document_id {
            Some(id) => self.documents.iter().any(|d| &d.id == id),
            None => self.documents.is_empty(),
        };
        if valid {
            return false;
        }
        self.active_document_id = self.documents.first().map(|d| d.id.clone());
        true
    }
}

const WELCOME_CONTENT: &str = r#"# Welcome to SplitMark! 🚀

SplitMark is a **live Markdown editor**. Start typing in the editor and the preview updates as you write.

## Features ✨

- **Live preview**: see rendered Markdown while you type
- **Dark mode**: easy on the eyes during long writing sessions
- **Export / import**: save and load documents as `.md` files
- **Multiple documents**: keep several documents side by side
- **Auto-save**: your work is stored locally after every change
- **Drag & drop**: reorder documents in the sidebar

## Markdown samples

### Text styles

- **Bold**: `**bold**`
- *Italic*: `*italic*`
- `Inline code`: wrap in backticks
- ~~Strikethrough~~: `~~text~~`

### Lists

1. First item
2. Second item
   - Nested item
   - Another nested item

### Tables

| Feature  | Status  | Priority |
|----------|---------|----------|
| Editor   | ✅ Done | High     |
| Preview  | ✅ Done | High     |
| Export   | ✅ Done | Medium   |
| Reorder  | ✅ Done | Medium   |

### Quotes

> "The best way to predict the future is to create it."
> — Peter Drucker

### Links

[Visit the website](https://example.com)

---

Happy writing! 📝"#;
