//! Title derivation for documents
//!
//! A document's title is never edited directly; it is recomputed from the
//! first line of its content whenever the content changes. The transform is
//! a small fixed pipeline over that line:
//!
//! 1. trim surrounding whitespace
//! 2. strip a leading run of `#` heading markers and the whitespace after it
//! 3. unwrap `**bold**`, then `*italic*`, then `` `code` `` spans
//! 4. trim again, falling back to [`UNTITLED`] when nothing is left
//!
//! This is not a markdown parser. Nested or unbalanced emphasis is handled
//! on a best-effort basis: spans are paired left to right, shortest first.

/// Title used when the first line yields no text.
pub const UNTITLED: &str = "Untitled Document";

/// Derive a display title from document content.
///
/// # Example
///
/// ```ignore
/// assert_eq!(derive_title("# **Hello** World\nbody"), "Hello World");
/// assert_eq!(derive_title("   \nbody"), UNTITLED);
/// ```
pub fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }

    let line = strip_heading_markers(first_line);
    let line = unwrap_spans(line, "**");
    let line = unwrap_spans(&line, "*");
    let line = unwrap_spans(&line, "`");

    let title = line.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Remove a leading `#` run and any whitespace that follows it.
fn strip_heading_markers(line: &str) -> &str {
    let without_hashes = line.trim_start_matches('#');
    if without_hashes.len() == line.len() {
        line
    } else {
        without_hashes.trim_start()
    }
}

/// Replace every `<delim>X<delim>` span with `X`, pairing delimiters left to
/// right with the nearest closing delimiter.
///
/// An opening delimiter without a partner is kept verbatim, along with the
/// rest of the line.
fn unwrap_spans(line: &str, delim: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(delim) {
        let after_open = &rest[open + delim.len()..];
        let Some(close) = after_open.find(delim) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&after_open[..close]);
        rest = &after_open[close + delim.len()..];
    }

    out.push_str(rest);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
