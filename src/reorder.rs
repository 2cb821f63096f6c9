//! Drag-to-reorder interaction for the document list
//!
//! The sidebar feeds pointer gestures into [`DragState`] as discrete events
//! (start, over, leave, drop, end). A drop onto a different row produces the
//! new document order, which the caller commits to the document store.

use crate::documents::Document;
use log::debug;

/// Where a drag gesture currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// A document is being dragged, optionally over an insertion slot
    Dragging {
        source_id: String,
        over: Option<usize>,
    },
}

impl DragState {
    /// Begin dragging `id`. Ignored while a search is active or a drag is
    /// already running. Returns `true` if the drag started.
    pub fn drag_start(&mut self, id: impl Into<String>, search_active: bool) -> bool {
        if search_active || !matches!(self, DragState::Idle) {
            return false;
        }
        let id = id.into();
        debug!("Drag started on {}", id);
        *self = DragState::Dragging {
            source_id: id,
            over: None,
        };
        true
    }

    /// The pointer entered row `index`.
    pub fn drag_over(&mut self, index: usize) {
        if let DragState::Dragging { over, .. } = self {
            *over = Some(index);
        }
    }

    /// The pointer left the highlighted row; the drag stays active.
    pub fn drag_leave(&mut self) {
        if let DragState::Dragging { over, .. } = self {
            *over = None;
        }
    }

    /// Drop onto row `index`.
    ///
    /// Returns the new order when the dragged document moves, or `None` when
    /// it is dropped onto its own row (or is no longer in `documents`). The
    /// state returns to `Idle` either way.
    pub fn drop(&mut self, index: usize, documents: &[Document]) -> Option<Vec<Document>> {
        let DragState::Dragging { source_id, .. } = std::mem::take(self) else {
            return None;
        };

        let from = documents.iter().position(|d| d.id == source_id)?;
        if from == index {
            debug!("Dropped {} onto its own row", source_id);
            return None;
        }

        debug!("Moving {} from {} to {}", source_id, from, index);
        Some(move_item(documents, from, index))
    }

    /// The gesture ended without a drop on a row.
    pub fn drag_end(&mut self) {
        *self = DragState::Idle;
    }

    /// Id of the document being dragged.
    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            DragState::Dragging { source_id, .. } => Some(source_id),
            DragState::Idle => None,
        }
    }

    /// Row currently highlighted as the insertion slot.
    pub fn highlighted_slot(&self) -> Option<usize> {
        match self {
            DragState::Dragging { over, .. } => *over,
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Remove the item at `from` and reinsert it at `to` in the remaining
/// sequence. `to` past the end appends.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut reordered = items.to_vec();
    if from >= reordered.len() {
        return reordered;
    }
    let item = reordered.remove(from);
    let to = to.min(reordered.len());
    reordered.insert(to, item);
    reordered
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document::from_content(*id, format!("# {}", id), 0))
            .collect()
    }

    fn ids(documents: &[Document]) -> Vec<&str> {
        documents.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_move_item_to_front() {
        let moved = move_item(&["a", "b", "c", "d"], 2, 0);
        assert_eq!(moved, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_move_item_forward_uses_remaining_sequence() {
        let moved = move_item(&["a", "b", "c", "d"], 0, 2);
        assert_eq!(moved, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_move_item_past_end_appends() {
        let moved = move_item(&["a", "b", "c"], 0, 10);
        assert_eq!(moved, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_full_drag_cycle_commits_new_order() {
        let documents = docs(&["a", "b", "c", "d"]);
        let mut drag = DragState::default();

        assert!(drag.drag_start("c", false));
        drag.drag_over(1);
        drag.drag_over(0);
        assert_eq!(drag.highlighted_slot(), Some(0));

        let reordered = drag.drop(0, &documents).expect("order should change");
        assert_eq!(ids(&reordered), vec!["c", "a", "b", "d"]);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drop_on_own_row_commits_nothing() {
        let documents = docs(&["a", "b", "c"]);
        let mut drag = DragState::default();
        drag.drag_start("b", false);
        drag.drag_over(1);

        assert!(drag.drop(1, &documents).is_none());
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drag_disabled_while_searching() {
        let mut drag = DragState::default();
        assert!(!drag.drag_start("a", true));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drag_leave_clears_slot_but_keeps_drag() {
        let mut drag = DragState::default();
        drag.drag_start("a", false);
        drag.drag_over(2);
        drag.drag_leave();

        assert!(drag.is_dragging());
        assert_eq!(drag.dragged_id(), Some("a"));
        assert_eq!(drag.highlighted_slot(), None);
    }

    #[test]
    fn test_drag_end_discards_without_commit() {
        let mut drag = DragState::default();
        drag.drag_start("a", false);
        drag.drag_over(1);
        drag.drag_end();
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let documents = docs(&["a", "b"]);
        let mut drag = DragState::default();
        drag.drag_over(1);
        drag.drag_leave();
        assert_eq!(drag, DragState::Idle);
        assert!(drag.drop(1, &documents).is_none());
    }

    #[test]
    fn test_drop_of_vanished_document_returns_to_idle() {
        let documents = docs(&["a", "b"]);
        let mut drag = DragState::default();
        drag.drag_start("gone", false);
        assert!(drag.drop(0, &documents).is_none());
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_machine_cycles() {
        let documents = docs(&["a", "b", "c"]);
        let mut drag = DragState::default();

        drag.drag_start("a", false);
        let first = drag.drop(2, &documents).unwrap();
        assert_eq!(ids(&first), vec!["b", "c", "a"]);

        assert!(drag.drag_start("a", false));
        let second = drag.drop(0, &first).unwrap();
        assert_eq!(ids(&second), vec!["a", "b", "c"]);
    }
}
