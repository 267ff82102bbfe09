//! The print node tree: what the print dispatch table produces and what an
//! [`ArtifactProducer`](crate::ArtifactProducer) consumes.
//!
//! Nodes are already styled. Colors are resolved, fonts are chosen, chart
//! geometry is computed; only line breaking and pagination are left to the
//! producer. Chart coordinates are local to the chart box with y pointing
//! down.

use quire_chart::PathSegment;
use quire_style::{BorderStyle, FontStyle, FontWeight, Margins, TextAlign};
use quire_types::{Color, Point, Size};

/// A base-14 font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub monospace: bool,
    pub strikethrough: bool,
    /// Overrides the block color.
    pub color: Option<Color>,
    /// Target of a URI link annotation.
    pub href: Option<String>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            monospace: false,
            strikethrough: false,
            color: None,
            href: None,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.weight = if bold { FontWeight::Bold } else { FontWeight::Regular };
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A paragraph of styled runs that the producer wraps to the slot width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub runs: Vec<TextRun>,
    pub family: FontFamily,
    pub font_size: f32,
    /// Multiple of `font_size`.
    pub line_height: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Drawn in the hanging indent before the first line, e.g. a bullet.
    pub marker: Option<String>,
    pub indent: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxBorder {
    pub width: f32,
    pub color: Color,
    pub style: BorderStyle,
}

/// A container with optional decoration around vertically stacked children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintBlock {
    pub background: Option<Color>,
    pub padding: Margins,
    pub border: Option<BoxBorder>,
    /// A solid bar down the left edge, inside the padding.
    pub accent_bar: Option<(Color, f32)>,
    pub children: Vec<PrintNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintColumn {
    pub fraction: f32,
    pub children: Vec<PrintNode>,
}

/// Side-by-side columns. Rows never split across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintRow {
    pub gap: f32,
    pub columns: Vec<PrintColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub family: FontFamily,
    pub font_size: f32,
    pub header_background: Color,
    pub header_color: Color,
    pub header_bold: bool,
    pub cell_color: Color,
    pub border_color: Color,
    pub stripe: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        origin: Point,
        size: Size,
        fill: Color,
    },
    Path {
        segments: Vec<PathSegment>,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    /// `at` is the baseline point the anchor refers to.
    Label {
        at: Point,
        text: String,
        font_size: f32,
        color: Color,
        anchor: TextAnchor,
    },
}

/// Vector drawing in a box of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub size: Size,
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub color: Color,
    pub thickness: f32,
    pub style: BorderStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintKind {
    Block(PrintBlock),
    Row(PrintRow),
    Text(TextBlock),
    Table(PrintTable),
    Drawing(Drawing),
    Rule(Rule),
    Spacer(f32),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintNode {
    pub kind: PrintKind,
    /// Space left below the node.
    pub margin_bottom: f32,
}

impl PrintNode {
    pub fn new(kind: PrintKind, margin_bottom: f32) -> Self {
        Self {
            kind,
            margin_bottom: margin_bottom.max(0.0),
        }
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self.kind, PrintKind::PageBreak)
    }

    /// Concatenated text of every text block, table cell and label below
    /// this node.
    pub fn text_content(&self) -> String {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out.join(" ")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match &self.kind {
            PrintKind::Block(block) => block.children.iter().for_each(|c| c.collect_text(out)),
            PrintKind::Row(row) => row
                .columns
                .iter()
                .flat_map(|c| &c.children)
                .for_each(|c| c.collect_text(out)),
            PrintKind::Text(text) => {
                out.push(text.runs.iter().map(|r| r.text.as_str()).collect());
            }
            PrintKind::Table(table) => {
                out.extend(table.headers.iter().cloned());
                out.extend(table.rows.iter().flatten().cloned());
            }
            PrintKind::Drawing(drawing) => {
                for shape in &drawing.shapes {
                    if let Shape::Label { text, .. } = shape {
                        out.push(text.clone());
                    }
                }
            }
            PrintKind::Rule(_) | PrintKind::Spacer(_) | PrintKind::PageBreak => {}
        }
    }
}

/// Document information written to the PDF Info dictionary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
}

/// Everything a producer needs to write the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub info: DocumentInfo,
    pub page_size: Size,
    pub margins: Margins,
    pub header: Vec<PrintNode>,
    pub footer: Vec<PrintNode>,
    /// With `{page}` and `{total}` placeholders.
    pub page_number_template: Option<String>,
    pub footer_color: Color,
    /// Family for producer-drawn text such as page numbers.
    pub family: FontFamily,
    pub body: Vec<PrintNode>,
}
