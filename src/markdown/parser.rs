//! Markdown parser implementation using comrak
//!
//! This module wraps comrak's parser and converts its arena-allocated AST
//! into an owned tree the preview can keep between frames.

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue, TableAlignment as ComrakTableAlignment},
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Table cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<ComrakTableAlignment> for TableAlignment {
    fn from(align: ComrakTableAlignment) -> Self {
        match align {
            ComrakTableAlignment::None => TableAlignment::None,
            ComrakTableAlignment::Left => TableAlignment::Left,
            ComrakTableAlignment::Center => TableAlignment::Center,
            ComrakTableAlignment::Right => TableAlignment::Right,
        }
    }
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root document node
    Document,
    /// Block quote (>)
    BlockQuote,
    /// List container; `start` is set for ordered lists
    List { start: Option<usize>, tight: bool },
    /// List item
    Item,
    /// Task list item (- [ ] / - [x])
    TaskItem { checked: bool },
    /// Fenced or indented code block
    CodeBlock { info: String, literal: String },
    /// Raw HTML block, shown as text
    HtmlBlock(String),
    Paragraph,
    /// Heading, level 1-6
    Heading(u8),
    /// Horizontal rule
    ThematicBreak,
    Table { alignments: Vec<TableAlignment> },
    TableRow { header: bool },
    TableCell,
    Text(String),
    SoftBreak,
    LineBreak,
    /// Inline code
    Code(String),
    /// Raw inline HTML, shown as text
    HtmlInline(String),
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String },
    Image { url: String },
    /// Anything the preview does not render specially
    Other,
}

/// A node in the markdown tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownNode {
    pub kind: NodeKind,
    pub children: Vec<MarkdownNode>,
    /// Start line in source (1-indexed)
    pub start_line: usize,
}

impl MarkdownNode {
    /// All text in this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.kind {
            NodeKind::Text(t) | NodeKind::Code(t) => output.push_str(t),
            NodeKind::SoftBreak => output.push(' '),
            NodeKind::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    pub root: MarkdownNode,
}

impl MarkdownDocument {
    /// Top-level blocks.
    pub fn blocks(&self) -> &[MarkdownNode] {
        &self.root.children
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text with GFM tables, strikethrough, autolinks and task lists.
pub fn parse_markdown(markdown: &str) -> MarkdownDocument {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &comrak_options());
    MarkdownDocument {
        root: convert_node(root),
    }
}

fn comrak_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

fn convert_node<'a>(node: &'a AstNode<'a>) -> MarkdownNode {
    let ast = node.data.borrow();
    MarkdownNode {
        kind: convert_value(&ast.value),
        children: node.children().map(convert_node).collect(),
        start_line: ast.sourcepos.start.line,
    }
}

fn convert_value(value: &NodeValue) -> NodeKind {
    match value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::List(list) => NodeKind::List {
            start: match list.list_type {
                ComrakListType::Bullet => None,
                ComrakListType::Ordered => Some(list.start),
            },
            tight: list.tight,
        },
        NodeValue::Item(_) => NodeKind::Item,
        NodeValue::TaskItem(mark) => NodeKind::TaskItem {
            checked: matches!(mark, Some('x') | Some('X')),
        },
        NodeValue::CodeBlock(code) => NodeKind::CodeBlock {
            info: code.info.clone(),
            literal: code.literal.clone(),
        },
        NodeValue::HtmlBlock(html) => NodeKind::HtmlBlock(html.literal.clone()),
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::Heading(heading) => NodeKind::Heading(heading.level),
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::Table(table) => NodeKind::Table {
            alignments: table.alignments.iter().map(|a| TableAlignment::from(*a)).collect(),
        },
        NodeValue::TableRow(header) => NodeKind::TableRow { header: *header },
        NodeValue::TableCell => NodeKind::TableCell,
        NodeValue::Text(text) => NodeKind::Text(text.clone()),
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::LineBreak,
        NodeValue::Code(code) => NodeKind::Code(code.literal.clone()),
        NodeValue::HtmlInline(html) => NodeKind::HtmlInline(html.clone()),
        NodeValue::Emph => NodeKind::Emphasis,
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Strikethrough => NodeKind::Strikethrough,
        NodeValue::Link(link) => NodeKind::Link {
            url: link.url.clone(),
        },
        NodeValue::Image(image) => NodeKind::Image {
            url: image.url.clone(),
        },
        _ => NodeKind::Other,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_markdown("");
        assert_eq!(doc.root.kind, NodeKind::Document);
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn test_parse_heading_levels() {
        let doc = parse_markdown("# One\n\n### Three");
        assert_eq!(doc.blocks()[0].kind, NodeKind::Heading(1));
        assert_eq!(doc.blocks()[1].kind, NodeKind::Heading(3));
        assert_eq!(doc.blocks()[1].start_line, 3);
    }

    #[test]
    fn test_parse_inline_formatting() {
        let doc = parse_markdown("Some **bold**, *italic* and `code`.");
        let paragraph = &doc.blocks()[0];
        assert_eq!(paragraph.kind, NodeKind::Paragraph);
        assert!(paragraph.children.iter().any(|n| n.kind == NodeKind::Strong));
        assert!(paragraph.children.iter().any(|n| n.kind == NodeKind::Emphasis));
        assert!(paragraph
            .children
            .iter()
            .any(|n| n.kind == NodeKind::Code("code".to_string())));
        assert_eq!(paragraph.text_content(), "Some bold, italic and code.");
    }

    #[test]
    fn test_parse_lists() {
        let doc = parse_markdown("- a\n- b\n\n3. x\n4. y");
        assert_eq!(
            doc.blocks()[0].kind,
            NodeKind::List {
                start: None,
                tight: true
            }
        );
        assert_eq!(doc.blocks()[0].children.len(), 2);
        assert!(matches!(
            doc.blocks()[1].kind,
            NodeKind::List { start: Some(3), .. }
        ));
    }

    #[test]
    fn test_parse_task_items() {
        let doc = parse_markdown("- [x] done\n- [ ] todo");
        let items = &doc.blocks()[0].children;
        assert_eq!(items[0].kind, NodeKind::TaskItem { checked: true });
        assert_eq!(items[1].kind, NodeKind::TaskItem { checked: false });
    }

    #[test]
    fn test_parse_table() {
        let doc = parse_markdown("| A | B |\n|:--|--:|\n| 1 | 2 |");
        let table = &doc.blocks()[0];
        assert_eq!(
            table.kind,
            NodeKind::Table {
                alignments: vec![TableAlignment::Left, TableAlignment::Right]
            }
        );
        assert_eq!(table.children.len(), 2);
        assert_eq!(table.children[0].kind, NodeKind::TableRow { header: true });
    }

    #[test]
    fn test_parse_code_block() {
        let doc = parse_markdown("```rust\nfn main() {}\n```");
        assert_eq!(
            doc.blocks()[0].kind,
            NodeKind::CodeBlock {
                info: "rust".to_string(),
                literal: "fn main() {}\n".to_string()
            }
        );
    }

    #[test]
    fn test_raw_html_kept_as_text() {
        let doc = parse_markdown("<script>alert(1)</script>");
        assert!(matches!(&doc.blocks()[0].kind, NodeKind::HtmlBlock(html) if html.contains("<script>")));
    }

    #[test]
    fn test_parse_link_and_strikethrough() {
        let doc = parse_markdown("[site](https://example.com) ~~old~~");
        let children = &doc.blocks()[0].children;
        assert_eq!(
            children[0].kind,
            NodeKind::Link {
                url: "https://example.com".to_string()
            }
        );
        assert!(children.iter().any(|n| n.kind == NodeKind::Strikethrough));
    }
}
