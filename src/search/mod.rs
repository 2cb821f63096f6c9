//! Search across documents
//!
//! Searching is a pure function of the document collection and the query:
//! nothing is indexed or cached, and results are recomputed in full whenever
//! either changes. Matching is case-insensitive. Offsets and context windows
//! are measured in characters of the original (unfolded) text.

mod highlight;

pub use highlight::{highlight_segments, HighlightSegment};

use crate::documents::Document;
use log::debug;

/// Characters of context kept on each side of a match.
pub const CONTEXT_CHARS: usize = 5;

/// Maximum matches reported for a single document.
pub const MAX_MATCHES_PER_DOCUMENT: usize = 5;

/// Extra distance, beyond the query length, within which a content hit is
/// folded into an already reported match.
pub const CLUSTER_PADDING: usize = 10;

/// A located occurrence with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Context snippet around the occurrence
    pub text: String,
    /// Character offset into the source field (see [`search_documents`])
    pub index: usize,
}

/// All matches for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Id of the matching document
    pub document_id: String,
    /// Matches in discovery order, at most [`MAX_MATCHES_PER_DOCUMENT`]
    pub matches: Vec<SearchMatch>,
}

/// Search every document for `query`.
///
/// Returns one result per document with at least one match, in collection
/// order. A blank query returns nothing.
///
/// Per document:
/// - the title is checked first; its first occurrence yields a match whose
///   `index` is where the snippet starts in the title
/// - the content is then scanned left to right, resuming one character past
///   each occurrence, so overlapping occurrences are all visited; a content
///   match's `index` is the occurrence offset
/// - an occurrence within `query length + CLUSTER_PADDING` of an accepted
///   match's index is dropped as part of the same cluster
/// - scanning stops once [`MAX_MATCHES_PER_DOCUMENT`] matches are accepted
pub fn search_documents(documents: &[Document], query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = fold(query);
    let results: Vec<SearchResult> = documents
        .iter()
        .filter_map(|doc| {
            let matches = search_document(doc, &needle);
            (!matches.is_empty()).then(|| SearchResult {
                document_id: doc.id.clone(),
                matches,
            })
        })
        .collect();

    debug!(
        "Search '{}' matched {} of {} documents",
        query,
        results.len(),
        documents.len()
    );
    results
}

fn search_document(doc: &Document, needle: &[char]) -> Vec<SearchMatch> {
    let mut matches = Vec::new();

    let title: Vec<char> = doc.title.chars().collect();
    if let Some(found) = find_folded(&title, needle, 0) {
        let (start, end) = context_window(found, needle.len(), title.len());
        matches.push(SearchMatch {
            text: title[start..end].iter().collect(),
            index: start,
        });
    }

    let content: Vec<char> = doc.content.chars().collect();
    let cluster_distance = needle.len() + CLUSTER_PADDING;
    let mut from = 0;
    while from < content.len() {
        let Some(found) = find_folded(&content, needle, from) else {
            break;
        };

        let clustered = matches
            .iter()
            .any(|m| m.index.abs_diff(found) < cluster_distance);
        if !clustered {
            let (start, end) = context_window(found, needle.len(), content.len());
            matches.push(SearchMatch {
                text: content[start..end].iter().collect(),
                index: found,
            });
        }

        from = found + 1;
        if matches.len() >= MAX_MATCHES_PER_DOCUMENT {
            break;
        }
    }

    matches
}

/// `[start, end)` of the snippet around an occurrence, clamped to the field.
fn context_window(found: usize, needle_len: usize, field_len: usize) -> (usize, usize) {
    let start = found.saturating_sub(CONTEXT_CHARS);
    let end = (found + needle_len + CONTEXT_CHARS).min(field_len);
    (start, end)
}

/// First position at or after `from` where `needle` occurs in `haystack`,
/// ignoring case. `needle` must already be folded.
pub(crate) fn find_folded(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| {
            window
                .iter()
                .zip(needle)
                .all(|(&c, &n)| fold_char(c) == n)
        })
        .map(|offset| from + offset)
}

/// Fold text to lower case one character at a time, so offsets in the folded
/// text line up with the original.
pub(crate) fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

// ─────────────────────────────────────────────────────────────────────────────
// Search State
// ─────────────────────────────────────────────────────────────────────────────

/// The current query and the results it produced.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    results: Vec<SearchResult>,
}

impl SearchState {
    /// Create an inactive search.
    pub fn new() -> Self {
        Self::default()
    }

    /// The query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and recompute the results.
    pub fn set_query(&mut self, query: impl Into<String>, documents: &[Document]) {
        self.query = query.into();
        self.refresh(documents);
    }

    /// Clear the query and results.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    /// Recompute the results against the current documents.
    pub fn refresh(&mut self, documents: &[Document]) {
        self.results = search_documents(documents, &self.query);
    }

    /// Whether a non-blank query is in effect.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Current results in collection order.
    #[cfg(test)]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Matches for one document, empty if it has none.
    pub fn matches_for(&self, document_id: &str) -> &[SearchMatch] {
        self.results
            .iter()
            .find(|r| r.document_id == document_id)
            .map(|r| r.matches.as_slice())
            .unwrap_or(&[])
    }

    /// Documents to list: all of them when inactive, otherwise only those
    /// with matches.
    pub fn visible_documents<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        if !self.is_active() {
            return documents.iter().collect();
        }
        documents
            .iter()
            .filter(|doc| self.results.iter().any(|r| r.document_id == doc.id))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document::new(id, title, content, 0)
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let docs = vec![doc("a", "Alpha", "alpha beta")];
        assert!(search_documents(&docs, "").is_empty());
        assert!(search_documents(&docs, "   \t").is_empty());
    }

    #[test]
    fn test_clustered_hits_are_merged() {
        let docs = vec![doc("a", "Pets", "concatenate cats category")];
        let results = search_documents(&docs, "cat");

        assert_eq!(results.len(), 1);
        let matches = &results[0].matches;
        assert_eq!(
            matches,
            &vec![
                SearchMatch {
                    text: "concatenate".to_string(),
                    index: 3,
                },
                SearchMatch {
                    text: "cats category".to_string(),
                    index: 17,
                },
            ]
        );
        for m in matches {
            assert!(m.text.chars().count() <= 3 + 2 * CONTEXT_CHARS);
        }
        assert!(matches[0].index.abs_diff(matches[1].index) >= 3 + CLUSTER_PADDING);
    }

    #[test]
    fn test_case_insensitive() {
        let docs = vec![doc("a", "Notes", "Rust is GREAT")];
        let results = search_documents(&docs, "great");
        assert_eq!(results[0].matches[0].text, "t is GREAT");
        assert_eq!(results[0].matches[0].index, 8);

        let upper = search_documents(&docs, "RUST");
        assert_eq!(upper[0].matches[0].index, 0);
    }

    #[test]
    fn test_title_match_comes_first_with_window_start_index() {
        let docs = vec![doc("a", "Weekly planning notes", "")];
        let results = search_documents(&docs, "planning");
        assert_eq!(
            results[0].matches,
            vec![SearchMatch {
                text: "ekly planning note".to_string(),
                index: 2,
            }]
        );
    }

    #[test]
    fn test_title_match_suppresses_nearby_content_hit() {
        // The title match is recorded at index 0, which clusters with an
        // early content hit.
        let docs = vec![doc("a", "Todo", "# Todo\n\nlater: todo again")];
        let results = search_documents(&docs, "todo");
        let indices: Vec<usize> = results[0].matches.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 15]);
    }

    #[test]
    fn test_match_cap_per_document() {
        let content = (0..20).map(|_| "needle").collect::<Vec<_>>().join(" padding padding ");
        let docs = vec![doc("a", "Haystack", &content)];
        let results = search_documents(&docs, "needle");
        assert_eq!(results[0].matches.len(), MAX_MATCHES_PER_DOCUMENT);
    }

    #[test]
    fn test_documents_without_matches_are_omitted() {
        let docs = vec![
            doc("a", "First", "apples"),
            doc("b", "Second", "oranges"),
            doc("c", "Third", "more apples"),
        ];
        let results = search_documents(&docs, "apple");
        let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_overlapping_occurrences_visited() {
        // Occurrences at 0, 1, 2 cluster together; the one at 20 is reported.
        let docs = vec![doc("a", "x", "aaaa________________aaa")];
        let results = search_documents(&docs, "aa");
        let indices: Vec<usize> = results[0].matches.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 20]);
    }

    #[test]
    fn test_offsets_are_character_based() {
        let docs = vec![doc("a", "x", "日本語のテキストです")];
        let results = search_documents(&docs, "テキスト");
        assert_eq!(results[0].matches[0].index, 4);
        assert_eq!(results[0].matches[0].text, "日本語のテキストです");
    }

    #[test]
    fn test_query_longer_than_field() {
        let docs = vec![doc("a", "ab", "abc")];
        assert!(search_documents(&docs, "abcdef").is_empty());
    }

    #[test]
    fn test_search_is_pure() {
        let docs = vec![doc("a", "Alpha", "alpha")];
        let before = docs.clone();
        let first = search_documents(&docs, "alp");
        let second = search_documents(&docs, "alp");
        assert_eq!(first, second);
        assert_eq!(docs, before);
    }

    #[test]
    fn test_search_state_lifecycle() {
        let docs = vec![doc("a", "Alpha", "one"), doc("b", "Beta", "two")];
        let mut state = SearchState::new();
        assert!(!state.is_active());
        assert_eq!(state.visible_documents(&docs).len(), 2);

        state.set_query("beta", &docs);
        assert!(state.is_active());
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.matches_for("b").len(), 1);
        assert!(state.matches_for("a").is_empty());
        let visible: Vec<&str> = state
            .visible_documents(&docs)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(visible, vec!["b"]);

        state.clear();
        assert!(!state.is_active());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_search_state_refresh_tracks_document_changes() {
        let mut docs = vec![doc("a", "Alpha", "one")];
        let mut state = SearchState::new();
        state.set_query("two", &docs);
        assert!(state.results().is_empty());

        docs[0].content = "one two".to_string();
        state.refresh(&docs);
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn test_whitespace_query_is_inactive() {
        let docs = vec![doc("a", "Alpha", "one")];
        let mut state = SearchState::new();
        state.set_query("   ", &docs);
        assert!(!state.is_active());
        assert_eq!(state.visible_documents(&docs).len(), 1);
    }
}
