//! Case-insensitive highlighting of query occurrences in display text.

use super::{find_folded, fold};

/// A run of text that either matches the query or does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub is_match: bool,
}

impl HighlightSegment {
    fn new(chars: &[char], is_match: bool) -> Self {
        Self {
            text: chars.iter().collect(),
            is_match,
        }
    }
}

/// Split `text` into alternating plain and matching segments.
///
/// Occurrences are taken left to right without overlap. An empty query
/// yields the whole text as a single plain segment; empty segments are never
/// produced.
pub fn highlight_segments(text: &str, query: &str) -> Vec<HighlightSegment> {
    let chars: Vec<char> = text.chars().collect();
    let needle = fold(query);
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(found) = find_folded(&chars, &needle, cursor) {
        if found > cursor {
            segments.push(HighlightSegment::new(&chars[cursor..found], false));
        }
        let end = found + needle.len();
        segments.push(HighlightSegment::new(&chars[found..end], true));
        cursor = end;
    }

    if cursor < chars.len() {
        segments.push(HighlightSegment::new(&chars[cursor..], false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[HighlightSegment]) -> String {
        segments
            .iter()
            .map(|s| {
                if s.is_match {
                    format!("[{}]", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect()
    }

    #[test]
    fn test_highlight_preserves_original_case() {
        let segments = highlight_segments("Cat and CAT and cat", "cat");
        assert_eq!(render(&segments), "[Cat] and [CAT] and [cat]");
    }

    #[test]
    fn test_highlight_without_match() {
        let segments = highlight_segments("nothing here", "xyz");
        assert_eq!(segments, vec![HighlightSegment::new(&"nothing here".chars().collect::<Vec<_>>(), false)]);
    }

    #[test]
    fn test_highlight_empty_query() {
        assert_eq!(render(&highlight_segments("text", "")), "text");
    }

    #[test]
    fn test_highlight_non_overlapping() {
        assert_eq!(render(&highlight_segments("aaaa", "aa")), "[aa][aa]");
        assert_eq!(render(&highlight_segments("aaa", "aa")), "[aa]a");
    }

    #[test]
    fn test_highlight_empty_text() {
        assert!(highlight_segments("", "a").is_empty());
    }
}
