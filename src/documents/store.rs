//! Document store
//!
//! `DocumentStore` owns the ordered document collection and the active
//! selection. Every mutation runs to completion and is then written through
//! the injected `KeyValueStore` under [`DOCUMENTS_KEY`]. Persistence failures
//! are logged and never roll back the in-memory change.

use super::{derive_title, Clock, Document, DocumentState, ExportArtifact};
use crate::error::{Error, Result};
use crate::storage::{load_json, save_json, KeyValueStore, DOCUMENTS_KEY};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Title given to documents created with [`DocumentStore::add`].
pub const NEW_DOCUMENT_TITLE: &str = "New Document";

/// Content given to documents created with [`DocumentStore::add`].
pub const NEW_DOCUMENT_CONTENT: &str = "# New Document\n\nStart writing here...";

/// Ordered document collection with an active selection.
pub struct DocumentStore {
    state: DocumentState,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl DocumentStore {
    /// Load the collection from `storage`.
    ///
    /// A missing record yields the welcome collection. An unreadable record is
    /// logged and replaced by the welcome collection. A loaded record whose
    /// active id does not name a document is repaired.
    pub fn load(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        let now = clock.now_ms();
        let state = match load_json::<DocumentState>(storage.as_ref(), DOCUMENTS_KEY) {
            Ok(Some(mut state)) => {
                if state.repair_active() {
                    warn!(
                        "Stored active document was invalid, now {:?}",
                        state.active_document_id
                    );
                }
                info!("Loaded {} documents", state.documents.len());
                state
            }
            Ok(None) => {
                debug!("No stored documents, starting with welcome document");
                DocumentState::welcome(now)
            }
            Err(e) => {
                warn!("Failed to load documents: {}. Using welcome document.", e);
                DocumentState::welcome(now)
            }
        };

        Self {
            state,
            storage,
            clock,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Documents in display order.
    pub fn documents(&self) -> &[Document] {
        &self.state.documents
    }

    /// The active id as stored, which may be dangling after [`select`](Self::select).
    #[cfg(test)]
    pub fn active_document_id(&self) -> Option<&str> {
        self.state.active_document_id.as_deref()
    }

    /// The active document, falling back to the first document when the
    /// active id names nothing.
    pub fn active_document(&self) -> Option<&Document> {
        self.state
            .active_document_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.state.documents.first())
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.state.documents.iter().find(|d| d.id == id)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.state.documents.len()
    }

    /// Whether the collection is empty.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.state.documents.is_empty()
    }

    /// The full persisted record.
    #[cfg(test)]
    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a placeholder document and make it active. Returns its id.
    pub fn add(&mut self) -> String {
        let now = self.clock.now_ms();
        let doc = Document::new(
            self.next_id(now),
            NEW_DOCUMENT_TITLE,
            NEW_DOCUMENT_CONTENT,
            now,
        );
        info!("Added document {}", doc.id);
        self.append_and_activate(doc)
    }

    /// Remove a document. Unknown ids are ignored.
    ///
    /// When the active document is removed, the first remaining document
    /// becomes active, or none if the collection is now empty.
    pub fn delete(&mut self, id: &str) {
        let Some(position) = self.state.documents.iter().position(|d| d.id == id) else {
            debug!("Delete ignored, no document {}", id);
            return;
        };
        self.state.documents.remove(position);

        if self.state.documents.is_empty() {
            self.state.active_document_id = None;
        } else if self.state.active_document_id.as_deref() == Some(id) {
            self.state.active_document_id = Some(self.state.documents[0].id.clone());
        }

        info!("Deleted document {}", id);
        self.persist();
    }

    /// Replace a document's content, re-deriving its title. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, content: impl Into<String>) {
        let now = self.clock.now_ms();
        let Some(doc) = self.state.documents.iter_mut().find(|d| d.id == id) else {
            debug!("Update ignored, no document {}", id);
            return;
        };
        let content = content.into();
        doc.title = derive_title(&content);
        doc.content = content;
        doc.updated_at = now.max(doc.updated_at);
        self.persist();
    }

    /// Replace the collection order.
    ///
    /// The supplied documents must be a permutation of the current ones
    /// (same ids, each exactly once).
    ///
    /// # Errors
    ///
    /// Returns `Error::ReorderMismatch` and leaves the collection unchanged
    /// if the ids do not match.
    pub fn reorder(&mut self, documents: Vec<Document>) -> Result<()> {
        if !is_permutation(&self.state.documents, &documents) {
            warn!(
                "Rejected reorder of {} documents into {}",
                self.state.documents.len(),
                documents.len()
            );
            return Err(Error::ReorderMismatch {
                expected: self.state.documents.len(),
                supplied: documents.len(),
            });
        }
        self.state.documents = documents;
        debug!("Reordered {} documents", self.state.documents.len());
        self.persist();
        Ok(())
    }

    /// Make `id` the active document. The id is not checked.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!("Selected document {}", id);
        self.state.active_document_id = Some(id);
        self.persist();
    }

    /// Prepare a document for export as `<sanitized title>.md`.
    pub fn export(&self, id: &str) -> Option<ExportArtifact> {
        self.get(id)
            .map(|doc| ExportArtifact::new(&doc.title, &doc.content))
    }

    /// Append a document holding `raw_text` and make it active. Returns its id.
    pub fn import(&mut self, raw_text: impl Into<String>) -> String {
        let now = self.clock.now_ms();
        let doc = Document::from_content(self.next_id(now), raw_text, now);
        info!("Imported document {} ({})", doc.id, doc.title);
        self.append_and_activate(doc)
    }

    /// Read a file and [`import`](Self::import) its contents.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Import` if the file cannot be read; the collection is
    /// left unchanged.
    pub fn import_file(&mut self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| Error::Import {
            path: path.to_path_buf(),
            source: e,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "{} is not valid UTF-8, replacing invalid bytes",
                    path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(self.import(text))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn append_and_activate(&mut self, doc: Document) -> String {
        let id = doc.id.clone();
        self.state.documents.push(doc);
        self.state.active_document_id = Some(id.clone());
        self.persist();
        id
    }

    /// `doc-<now>`, suffixed with a counter if that id is already taken.
    fn next_id(&self, now: i64) -> String {
        let base = format!("doc-{}", now);
        if self.get(&base).is_none() {
            return base;
        }
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }

    fn persist(&mut self) {
        if let Err(e) = save_json(self.storage.as_mut(), DOCUMENTS_KEY, &self.state) {
            warn!("Failed to save documents: {}", e);
        }
    }
}

/// Whether `candidate` holds exactly the ids of `current`, each once.
fn is_permutation(current: &[Document], candidate: &[Document]) -> bool {
    if current.len() != candidate.len() {
        return false;
    }
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for doc in current {
        *counts.entry(doc.id.as_str()).or_default() += 1;
    }
    for doc in candidate {
        *counts.entry(doc.id.as_str()).or_default() -= 1;
    }
    counts.values().all(|&count| count == 0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{ManualClock, UNTITLED, WELCOME_DOCUMENT_ID};
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn new_store() -> (DocumentStore, MemoryStore, ManualClock) {
        let storage = MemoryStore::new();
        let clock = ManualClock::at(1_000);
        let store = DocumentStore::load(Box::new(storage.clone()), Box::new(clock.clone()));
        (store, storage, clock)
    }

    fn ids(store: &DocumentStore) -> Vec<String> {
        store.documents().iter().map(|d| d.id.clone()).collect()
    }

    /// Active id is either a member of the collection or absent with an empty collection.
    fn assert_active_invariant(store: &DocumentStore) {
        match store.active_document_id() {
            Some(id) => assert!(store.get(id).is_some(), "active id {} not in collection", id),
            None => assert!(store.is_empty()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fresh_store_has_welcome_document() {
        let (store, _, _) = new_store();
        assert_eq!(ids(&store), vec![WELCOME_DOCUMENT_ID]);
        assert_eq!(store.active_document_id(), Some(WELCOME_DOCUMENT_ID));
    }

    #[test]
    fn test_corrupt_record_falls_back_to_welcome() {
        let mut storage = MemoryStore::new();
        storage.save(DOCUMENTS_KEY, "{ broken").unwrap();
        let store = DocumentStore::load(Box::new(storage), Box::new(ManualClock::at(0)));
        assert_eq!(ids(&store), vec![WELCOME_DOCUMENT_ID]);
    }

    #[test]
    fn test_loaded_dangling_active_is_repaired() {
        let mut storage = MemoryStore::new();
        let state = DocumentState {
            documents: vec![Document::from_content("a", "A", 1), Document::from_content("b", "B", 1)],
            active_document_id: Some("zzz".to_string()),
        };
        save_json(&mut storage, DOCUMENTS_KEY, &state).unwrap();

        let store = DocumentStore::load(Box::new(storage), Box::new(ManualClock::at(0)));
        assert_eq!(store.active_document_id(), Some("a"));
    }

    #[test]
    fn test_state_survives_reload() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let clock = ManualClock::at(10);
        let mut store = DocumentStore::load(
            Box::new(FileStore::new(temp_dir.path())),
            Box::new(clock.clone()),
        );
        let id = store.import("# Kept\nbody");

        let reloaded = DocumentStore::load(
            Box::new(FileStore::new(temp_dir.path())),
            Box::new(clock),
        );
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.active_document_id(), Some(id.as_str()));
        assert_eq!(reloaded.get(&id).map(|d| d.title.as_str()), Some("Kept"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // add / import
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_appends_and_activates() {
        let (mut store, storage, _) = new_store();
        let id = store.add();

        assert_eq!(ids(&store), vec![WELCOME_DOCUMENT_ID.to_string(), id.clone()]);
        assert_eq!(store.active_document_id(), Some(id.as_str()));

        let doc = store.get(&id).unwrap();
        assert_eq!(doc.title, NEW_DOCUMENT_TITLE);
        assert_eq!(doc.content, NEW_DOCUMENT_CONTENT);
        assert_eq!(doc.created_at, 1_000);
        assert_eq!(doc.updated_at, 1_000);

        let saved: DocumentState = load_json(&storage, DOCUMENTS_KEY).unwrap().unwrap();
        assert_eq!(&saved, store.state());
    }

    #[test]
    fn test_add_in_same_millisecond_gets_unique_ids() {
        let (mut store, _, _) = new_store();
        let first = store.add();
        let second = store.add();
        let third = store.add();
        assert_eq!(first, "doc-1000");
        assert_eq!(second, "doc-1000-1");
        assert_eq!(third, "doc-1000-2");
    }

    #[test]
    fn test_import_derives_title() {
        let (mut store, _, clock) = new_store();
        clock.set(2_000);
        let id = store.import("## *Imported* notes\n\ntext");

        let doc = store.get(&id).unwrap();
        assert_eq!(doc.title, "Imported notes");
        assert_eq!(doc.content, "## *Imported* notes\n\ntext");
        assert_eq!(store.active_document_id(), Some(id.as_str()));
        assert_eq!(store.documents().last().map(|d| d.id.as_str()), Some(id.as_str()));
    }

    #[test]
    fn test_import_empty_text_is_untitled() {
        let (mut store, _, _) = new_store();
        let id = store.import("");
        assert_eq!(store.get(&id).unwrap().title, UNTITLED);
    }

    #[test]
    fn test_import_file_reads_contents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# From disk\ncontent").unwrap();

        let (mut store, _, _) = new_store();
        let id = store.import_file(&path).unwrap();
        assert_eq!(store.get(&id).unwrap().title, "From disk");
    }

    #[test]
    fn test_import_file_lossy_utf8() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("latin1.md");
        fs::write(&path, b"caf\xe9").unwrap();

        let (mut store, _, _) = new_store();
        let id = store.import_file(&path).unwrap();
        assert_eq!(store.get(&id).unwrap().content, "caf\u{FFFD}");
    }

    #[test]
    fn test_import_file_missing_is_error_without_mutation() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nope.md");

        let (mut store, _, _) = new_store();
        let before = store.state().clone();
        let err = store.import_file(&path).unwrap_err();

        assert!(matches!(err, Error::Import { .. }));
        assert_eq!(store.state(), &before);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // delete
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_delete_active_moves_to_first_remaining() {
        let (mut store, _, _) = new_store();
        let a = store.add();
        let b = store.add();
        store.select(a.clone());

        store.delete(&a);

        assert_eq!(ids(&store), vec![WELCOME_DOCUMENT_ID.to_string(), b]);
        assert_eq!(store.active_document_id(), Some(WELCOME_DOCUMENT_ID));
        assert_active_invariant(&store);
    }

    #[test]
    fn test_delete_first_active_moves_to_new_first() {
        let (mut store, _, _) = new_store();
        let a = store.add();
        store.select(WELCOME_DOCUMENT_ID);

        store.delete(WELCOME_DOCUMENT_ID);

        assert_eq!(store.active_document_id(), Some(a.as_str()));
    }

    #[test]
    fn test_delete_inactive_keeps_selection_and_order() {
        let (mut store, _, _) = new_store();
        let a = store.add();
        let b = store.add();
        let c = store.add();

        store.delete(&a);

        assert_eq!(ids(&store), vec![WELCOME_DOCUMENT_ID.to_string(), b, c.clone()]);
        assert_eq!(store.active_document_id(), Some(c.as_str()));
    }

    #[test]
    fn test_delete_last_document_clears_active() {
        let (mut store, _, _) = new_store();
        store.delete(WELCOME_DOCUMENT_ID);
        assert!(store.is_empty());
        assert!(store.active_document_id().is_none());
        assert!(store.active_document().is_none());
        assert_active_invariant(&store);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut store, _, _) = new_store();
        let before = store.state().clone();
        store.delete("missing");
        assert_eq!(store.state(), &before);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // update
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_update_rederives_title_and_touches() {
        let (mut store, _, clock) = new_store();
        let id = store.add();
        clock.advance(500);

        store.update(&id, "# **Hello** World\nmore");

        let doc = store.get(&id).unwrap();
        assert_eq!(doc.title, "Hello World");
        assert_eq!(doc.content, "# **Hello** World\nmore");
        assert_eq!(doc.created_at, 1_000);
        assert_eq!(doc.updated_at, 1_500);
    }

    #[test]
    fn test_update_never_moves_updated_at_backwards() {
        let (mut store, _, clock) = new_store();
        let id = store.add();
        clock.set(400);

        store.update(&id, "text");

        let doc = store.get(&id).unwrap();
        assert!(doc.updated_at >= doc.created_at);
        assert_eq!(doc.updated_at, 1_000);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let (mut store, _, _) = new_store();
        let before = store.state().clone();
        store.update("missing", "x");
        assert_eq!(store.state(), &before);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // reorder / select / export
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_reorder_accepts_permutation() {
        let (mut store, storage, _) = new_store();
        store.add();
        store.add();
        let mut reversed = store.documents().to_vec();
        reversed.reverse();
        let expected: Vec<String> = reversed.iter().map(|d| d.id.clone()).collect();

        store.reorder(reversed).unwrap();

        assert_eq!(ids(&store), expected);
        let saved: DocumentState = load_json(&storage, DOCUMENTS_KEY).unwrap().unwrap();
        assert_eq!(&saved, store.state());
    }

    #[test]
    fn test_reorder_rejects_missing_entry() {
        let (mut store, _, _) = new_store();
        store.add();
        let before = store.state().clone();
        let truncated = store.documents()[..1].to_vec();

        let err = store.reorder(truncated).unwrap_err();

        assert!(matches!(err, Error::ReorderMismatch { expected: 2, supplied: 1 }));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_reorder_rejects_duplicate_entry() {
        let (mut store, _, _) = new_store();
        store.add();
        let first = store.documents()[0].clone();
        let duplicated = vec![first.clone(), first];

        assert!(store.reorder(duplicated).is_err());
    }

    #[test]
    fn test_select_is_unchecked_and_active_document_falls_back() {
        let (mut store, _, _) = new_store();
        store.add();
        store.select("ghost");

        assert_eq!(store.active_document_id(), Some("ghost"));
        assert_eq!(
            store.active_document().map(|d| d.id.as_str()),
            Some(WELCOME_DOCUMENT_ID)
        );
    }

    #[test]
    fn test_export_uses_sanitized_title() {
        let (mut store, _, _) = new_store();
        let id = store.import("My Doc! #1\nbody");

        let artifact = store.export(&id).unwrap();
        assert_eq!(artifact.file_name, "My_Doc___1.md");
        assert_eq!(artifact.content, "My Doc! #1\nbody");
    }

    #[test]
    fn test_export_unknown_is_none() {
        let (store, _, _) = new_store();
        assert!(store.export("missing").is_none());
    }
}
