//! The element tree: one tagged union on `type`, recursive through
//! `section.children` and `columns[].children`.

use quire_style::{Border, BorderStyle, Margins, TextAlign};
use quire_types::ElementId;
use serde::{Deserialize, Serialize};

/// Every tag the schema accepts, in declaration order.
pub const ELEMENT_TAGS: &[&str] = &[
    "section",
    "columns",
    "heading",
    "paragraph",
    "list",
    "caption",
    "callout",
    "codeBlock",
    "table",
    "keyValue",
    "barChart",
    "pieChart",
    "lineChart",
    "image",
    "divider",
    "spacer",
    "pageBreak",
];

/// A node of the instruction tree. The optional `id` is assigned by the
/// editing layer and carried through to the interactive output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self { id: None, kind }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().map(ElementId::as_str)
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementKind {
    Section(Section),
    Columns(Columns),
    Heading(Heading),
    Paragraph(Paragraph),
    List(ListBlock),
    Caption(Caption),
    Callout(Callout),
    CodeBlock(CodeBlock),
    Table(Table),
    KeyValue(KeyValue),
    BarChart(BarChart),
    PieChart(PieChart),
    LineChart(LineChart),
    Image(Image),
    Divider(Divider),
    Spacer(Spacer),
    PageBreak,
    /// Placeholder for an element the lenient loader could not accept.
    /// Strict validation never yields it.
    Unknown(UnknownElement),
}

impl ElementKind {
    /// The `type` tag as written in documents.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Section(_) => "section",
            ElementKind::Columns(_) => "columns",
            ElementKind::Heading(_) => "heading",
            ElementKind::Paragraph(_) => "paragraph",
            ElementKind::List(_) => "list",
            ElementKind::Caption(_) => "caption",
            ElementKind::Callout(_) => "callout",
            ElementKind::CodeBlock(_) => "codeBlock",
            ElementKind::Table(_) => "table",
            ElementKind::KeyValue(_) => "keyValue",
            ElementKind::BarChart(_) => "barChart",
            ElementKind::PieChart(_) => "pieChart",
            ElementKind::LineChart(_) => "lineChart",
            ElementKind::Image(_) => "image",
            ElementKind::Divider(_) => "divider",
            ElementKind::Spacer(_) => "spacer",
            ElementKind::PageBreak => "pageBreak",
            ElementKind::Unknown(_) => "unknown",
        }
    }

    /// Bottom spacing requested by the element, if any.
    pub fn margin_bottom(&self) -> Option<f32> {
        match self {
            ElementKind::Section(e) => e.margin_bottom,
            ElementKind::Columns(e) => e.margin_bottom,
            ElementKind::Heading(e) => e.margin_bottom,
            ElementKind::Paragraph(e) => e.margin_bottom,
            ElementKind::List(e) => e.margin_bottom,
            ElementKind::Caption(e) => e.margin_bottom,
            ElementKind::Callout(e) => e.margin_bottom,
            ElementKind::CodeBlock(e) => e.margin_bottom,
            ElementKind::Table(e) => e.margin_bottom,
            ElementKind::KeyValue(e) => e.margin_bottom,
            ElementKind::BarChart(e) => e.margin_bottom,
            ElementKind::PieChart(e) => e.margin_bottom,
            ElementKind::LineChart(e) => e.margin_bottom,
            ElementKind::Image(e) => e.margin_bottom,
            ElementKind::Divider(e) => e.margin_bottom,
            ElementKind::Spacer(e) => e.margin_bottom,
            ElementKind::PageBreak | ElementKind::Unknown(_) => None,
        }
    }
}

// --- Composites ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

/// One column slot. `width` is a proportional weight, not a length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub width: f32,
    pub children: Vec<Element>,
}

// --- Text ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub level: u8,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    #[serde(default)]
    pub ordered: bool,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    #[default]
    Info,
    Warning,
    Success,
    Error,
    Quote,
}

impl CalloutVariant {
    pub const NAMES: &'static [&'static str] = &["info", "warning", "success", "error", "quote"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalloutVariant::Info => "info",
            CalloutVariant::Warning => "warning",
            CalloutVariant::Success => "success",
            CalloutVariant::Error => "error",
            CalloutVariant::Quote => "quote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callout {
    pub variant: CalloutVariant,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub show_line_numbers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

// --- Data ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

/// A grid of plain-text cells. Every row has exactly `headers.len()` cells;
/// validation rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_style: Option<HeaderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_style: Option<CellStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_row_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueItem {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyValueLayout {
    Horizontal,
    #[default]
    Vertical,
    Grid,
}

impl KeyValueLayout {
    pub const NAMES: &'static [&'static str] = &["horizontal", "vertical", "grid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyValueLayout::Horizontal => "horizontal",
            KeyValueLayout::Vertical => "vertical",
            KeyValueLayout::Grid => "grid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub items: Vec<KeyValueItem>,
    #[serde(default)]
    pub layout: KeyValueLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

// --- Charts ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl ChartOrientation {
    pub const NAMES: &'static [&'static str] = &["horizontal", "vertical"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub data: Vec<ChartDatum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub orientation: ChartOrientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub show_values: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub data: Vec<ChartDatum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub donut: bool,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub values: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub series: Vec<LineSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub show_points: bool,
    #[serde(default)]
    pub show_grid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

// --- Media and spacing ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacer {
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownElement {
    /// The `type` the input carried, when it had a string one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub reason: String,
}
