//! egui rendering of parsed markdown for the preview pane.

use super::parser::{parse_markdown, MarkdownDocument, MarkdownNode, NodeKind, TableAlignment};
use crate::theme::ThemeColors;
use eframe::egui::{
    self, text::LayoutJob, Align, Color32, FontFamily, FontId, Layout, Margin, RichText, Stroke,
    TextFormat, Ui,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Body text size.
const BODY_SIZE: f32 = 14.0;

/// Indentation of list bodies and block quotes.
const INDENT: f32 = 18.0;

// ─────────────────────────────────────────────────────────────────────────────
// Parse Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Holds the parsed form of the last previewed source so it is only
/// re-parsed when the text changes.
#[derive(Debug, Default)]
pub struct PreviewCache {
    source_hash: Option<u64>,
    document: Option<MarkdownDocument>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The parsed document for `source`, parsing only if it changed.
    pub fn document_for(&mut self, source: &str) -> &MarkdownDocument {
        let hash = hash_source(source);
        if self.source_hash != Some(hash) || self.document.is_none() {
            self.source_hash = Some(hash);
            self.document = Some(parse_markdown(source));
        }
        self.document.get_or_insert_with(|| parse_markdown(source))
    }
}

fn hash_source(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render a whole document into `ui`.
pub fn render_document(ui: &mut Ui, document: &MarkdownDocument, colors: &ThemeColors) {
    for block in document.blocks() {
        render_block(ui, block, colors);
    }
}

fn render_block(ui: &mut Ui, node: &MarkdownNode, colors: &ThemeColors) {
    match &node.kind {
        NodeKind::Heading(level) => {
            let style = InlineStyle {
                size: heading_size(*level),
                strong: true,
                ..InlineStyle::body()
            };
            ui.add_space(if *level <= 2 { 10.0 } else { 6.0 });
            ui.label(inline_job(&node.children, style, colors));
            if *level <= 2 {
                ui.separator();
            }
            ui.add_space(4.0);
        }
        NodeKind::Paragraph => {
            ui.label(inline_job(&node.children, InlineStyle::body(), colors));
            ui.add_space(6.0);
        }
        NodeKind::List { start, tight } => {
            for (i, item) in node.children.iter().enumerate() {
                if i > 0 && !tight {
                    ui.add_space(4.0);
                }
                let marker = match (&item.kind, start) {
                    (NodeKind::TaskItem { checked: true }, _) => "☑".to_string(),
                    (NodeKind::TaskItem { checked: false }, _) => "☐".to_string(),
                    (_, Some(first)) => format!("{}.", first + i),
                    (_, None) => "•".to_string(),
                };
                ui.horizontal_top(|ui| {
                    ui.add_space(4.0);
                    ui.add_sized(
                        [INDENT, BODY_SIZE + 4.0],
                        egui::Label::new(RichText::new(marker).color(colors.text.secondary)),
                    );
                    ui.vertical(|ui| {
                        for child in &item.children {
                            render_block(ui, child, colors);
                        }
                    });
                });
            }
            ui.add_space(4.0);
        }
        NodeKind::BlockQuote => {
            egui::Frame::none()
                .fill(colors.base.inset)
                .stroke(Stroke::new(1.0, colors.base.border))
                .inner_margin(Margin::symmetric(INDENT / 2.0, 6.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    for child in &node.children {
                        render_block(ui, child, colors);
                    }
                });
            ui.add_space(6.0);
        }
        NodeKind::CodeBlock { info, literal } => {
            egui::Frame::none()
                .fill(colors.base.inset)
                .rounding(4.0)
                .inner_margin(Margin::same(8.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let language = info.split_whitespace().next().unwrap_or("");
                    if !language.is_empty() {
                        ui.label(RichText::new(language).small().color(colors.text.muted));
                    }
                    ui.label(
                        RichText::new(literal.trim_end_matches('\n'))
                            .monospace()
                            .color(colors.text.primary),
                    );
                });
            ui.add_space(6.0);
        }
        NodeKind::HtmlBlock(html) => {
            ui.label(
                RichText::new(html.trim_end())
                    .monospace()
                    .color(colors.text.muted),
            );
            ui.add_space(6.0);
        }
        NodeKind::ThematicBreak => {
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);
        }
        NodeKind::Table { alignments } => {
            render_table(ui, node, alignments, colors);
            ui.add_space(6.0);
        }
        _ => {
            ui.label(inline_job(std::slice::from_ref(node), InlineStyle::body(), colors));
        }
    }
}

fn render_table(
    ui: &mut Ui,
    table: &MarkdownNode,
    alignments: &[TableAlignment],
    colors: &ThemeColors,
) {
    egui::Grid::new(ui.id().with(("preview_table", table.start_line)))
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for row in &table.children {
                let header = matches!(row.kind, NodeKind::TableRow { header: true });
                let style = InlineStyle {
                    strong: header,
                    ..InlineStyle::body()
                };
                for (column, cell) in row.children.iter().enumerate() {
                    let align = match alignments.get(column) {
                        Some(TableAlignment::Center) => Align::Center,
                        Some(TableAlignment::Right) => Align::Max,
                        _ => Align::Min,
                    };
                    ui.with_layout(Layout::top_down(align), |ui| {
                        ui.label(inline_job(&cell.children, style, colors));
                    });
                }
                ui.end_row();
            }
        });
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 21.0,
        3 => 18.0,
        4 => 16.0,
        _ => BODY_SIZE,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct InlineStyle {
    size: f32,
    strong: bool,
    italics: bool,
    strikethrough: bool,
    link: bool,
}

impl InlineStyle {
    fn body() -> Self {
        Self {
            size: BODY_SIZE,
            strong: false,
            italics: false,
            strikethrough: false,
            link: false,
        }
    }
}

fn inline_job(nodes: &[MarkdownNode], style: InlineStyle, colors: &ThemeColors) -> LayoutJob {
    let mut job = LayoutJob::default();
    append_inlines(&mut job, nodes, style, colors);
    job
}

fn append_inlines(job: &mut LayoutJob, nodes: &[MarkdownNode], style: InlineStyle, colors: &ThemeColors) {
    for node in nodes {
        match &node.kind {
            NodeKind::Text(text) | NodeKind::HtmlInline(text) => append_text(job, text, style, colors),
            NodeKind::SoftBreak => append_text(job, " ", style, colors),
            NodeKind::LineBreak => append_text(job, "\n", style, colors),
            NodeKind::Code(code) => {
                job.append(
                    code,
                    0.0,
                    TextFormat {
                        font_id: FontId::new(style.size - 1.0, FontFamily::Monospace),
                        color: colors.text.code,
                        background: colors.base.inset,
                        ..Default::default()
                    },
                );
            }
            NodeKind::Emphasis => append_inlines(job, &node.children, InlineStyle { italics: true, ..style }, colors),
            NodeKind::Strong => append_inlines(job, &node.children, InlineStyle { strong: true, ..style }, colors),
            NodeKind::Strikethrough => append_inlines(
                job,
                &node.children,
                InlineStyle {
                    strikethrough: true,
                    ..style
                },
                colors,
            ),
            NodeKind::Link { .. } => append_inlines(job, &node.children, InlineStyle { link: true, ..style }, colors),
            NodeKind::Image { url } => {
                let alt = node.text_content();
                let label = if alt.is_empty() { url.as_str() } else { alt.as_str() };
                append_text(job, &format!("🖼 {}", label), InlineStyle { link: true, ..style }, colors);
            }
            _ => append_inlines(job, &node.children, style, colors),
        }
    }
}

fn append_text(job: &mut LayoutJob, text: &str, style: InlineStyle, colors: &ThemeColors) {
    let color = if style.link {
        colors.text.link
    } else if style.strong {
        colors.text.primary
    } else {
        body_color(colors)
    };
    let line = |on: bool| {
        if on {
            Stroke::new(1.0, color)
        } else {
            Stroke::NONE
        }
    };

    job.append(
        text,
        0.0,
        TextFormat {
            font_id: FontId::new(style.size, FontFamily::Proportional),
            color,
            italics: style.italics,
            underline: line(style.link),
            strikethrough: line(style.strikethrough),
            ..Default::default()
        },
    );
}

/// Body text is a step softer than headings and bold text so emphasis reads
/// without a bold font face.
fn body_color(colors: &ThemeColors) -> Color32 {
    colors.text.primary.gamma_multiply(0.85)
}
