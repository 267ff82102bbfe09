//! Turns a [`PrintDocument`] into PDF bytes.
//!
//! Pagination is greedy and top-down. Text splits between lines, tables
//! between rows (repeating the header), and blocks between children with
//! their decoration drawn once per page fragment. Rows, drawings and rules
//! never split.

use crate::canvas::PageCanvas;
use crate::draw::{
    PageNumbers, block_inner, block_vertical, draw_block_decoration, draw_line, draw_marker,
    draw_node, draw_table_row, measure, stack,
};
use crate::error::{ProducerError, RenderError};
use crate::fonts::{FACES, resource_name, styled_font_name, to_win_ansi};
use crate::layout::{line_height, table_layout, wrap};
use crate::node::{PrintBlock, PrintDocument, PrintKind, PrintNode, PrintTable, TextBlock, TextRun};
use log::{debug, info};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use quire_render_core::presets::{CAPTION_FONT_SIZE, LINE_HEIGHT};
use quire_style::TextAlign;

/// Space between the header or footer and the body.
const BAND_GAP: f32 = 8.0;
const EPSILON: f32 = 1e-3;
const PRODUCER: &str = "quire";

/// Writes the final artifact for a projected document.
///
/// Implementations must be deterministic for a given document; the pipeline
/// runs them on a blocking thread.
pub trait ArtifactProducer: Send + Sync {
    fn name(&self) -> &str;

    fn produce(&self, doc: &PrintDocument) -> Result<Vec<u8>, ProducerError>;
}

/// The built-in producer over the PDF base-14 fonts.
#[derive(Debug, Clone, Default)]
pub struct LopdfProducer {
    compress: bool,
}

impl LopdfProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

impl ArtifactProducer for LopdfProducer {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn produce(&self, doc: &PrintDocument) -> Result<Vec<u8>, ProducerError> {
        let pages = paginate(doc);
        info!("Paginated '{}' into {} page(s)", doc.info.title, pages.len());
        Ok(write_pdf(doc, pages, self.compress)?)
    }
}

/// The vertical band the body may use on every page.
#[derive(Debug, Clone, Copy)]
struct Bands {
    header_height: f32,
    footer_height: f32,
    top: f32,
    bottom: f32,
}

fn page_number_block(doc: &PrintDocument, template: &str) -> TextBlock {
    TextBlock {
        runs: vec![TextRun::plain(template)],
        family: doc.family,
        font_size: CAPTION_FONT_SIZE,
        line_height: LINE_HEIGHT,
        color: doc.footer_color,
        align: TextAlign::Center,
        marker: None,
        indent: 0.0,
    }
}

fn footer_nodes(doc: &PrintDocument) -> Vec<PrintNode> {
    let mut nodes = doc.footer.clone();
    if let Some(template) = doc.page_number_template.as_deref().filter(|t| !t.trim().is_empty()) {
        nodes.push(PrintNode::new(PrintKind::Text(page_number_block(doc, template)), 0.0));
    }
    nodes
}

fn band_height(nodes: &[PrintNode], width: f32) -> f32 {
    let mut scratch = PageCanvas::new(0.0);
    stack(&mut scratch, nodes, 0.0, 0.0, width, None)
}

fn bands(doc: &PrintDocument, footer: &[PrintNode]) -> Bands {
    let width = content_width(doc);
    let header_height = band_height(&doc.header, width);
    let footer_height = band_height(footer, width);
    let mut top = doc.margins.top;
    if header_height > 0.0 {
        top += header_height + BAND_GAP;
    }
    let mut bottom = doc.page_size.height - doc.margins.bottom;
    if footer_height > 0.0 {
        bottom -= footer_height + BAND_GAP;
    }
    Bands {
        header_height,
        footer_height,
        top,
        bottom: bottom.max(top + 1.0),
    }
}

fn content_width(doc: &PrintDocument) -> f32 {
    (doc.page_size.width - doc.margins.horizontal()).max(1.0)
}

/// A block whose children are being flowed across pages.
struct OpenBlock<'a> {
    block: &'a PrintBlock,
    x: f32,
    width: f32,
    start_y: f32,
    /// Where this page's fragment starts in the page's operations, so the
    /// decoration can be slid beneath the children afterwards.
    op_index: usize,
}

struct Paginator<'a> {
    page_height: f32,
    bands: Bands,
    pages: Vec<PageCanvas>,
    current: PageCanvas,
    cursor: f32,
    has_content: bool,
    open: Vec<OpenBlock<'a>>,
}

impl<'a> Paginator<'a> {
    fn new(page_height: f32, bands: Bands) -> Self {
        Self {
            page_height,
            bands,
            pages: Vec::new(),
            current: PageCanvas::new(page_height),
            cursor: bands.top,
            has_content: false,
            open: Vec::new(),
        }
    }

    fn remaining(&self) -> f32 {
        self.bands.bottom - self.cursor
    }

    fn fits(&self, height: f32) -> bool {
        height <= self.remaining() + EPSILON
    }

    fn fresh_page_room(&self) -> f32 {
        let insets: f32 = self.open.iter().map(|o| block_vertical(o.block).0).sum();
        self.bands.bottom - self.bands.top - insets
    }

    fn new_page(&mut self) {
        for open in self.open.iter().rev() {
            splice_decoration(&mut self.current, open, self.cursor);
        }
        let finished = std::mem::replace(&mut self.current, PageCanvas::new(self.page_height));
        self.pages.push(finished);
        debug!("Starting page {}", self.pages.len() + 1);

        self.cursor = self.bands.top;
        self.has_content = false;
        for open in &mut self.open {
            open.start_y = self.cursor;
            open.op_index = 0;
            self.cursor += block_vertical(open.block).0;
        }
    }

    fn flow(&mut self, nodes: &'a [PrintNode], x: f32, width: f32) {
        for (i, node) in nodes.iter().enumerate() {
            self.place(node, x, width);
            if i + 1 < nodes.len() {
                self.cursor += node.margin_bottom;
            }
        }
    }

    fn place(&mut self, node: &'a PrintNode, x: f32, width: f32) {
        match &node.kind {
            // Leading and consecutive breaks never produce blank pages.
            PrintKind::PageBreak => {
                if self.has_content {
                    self.new_page();
                }
            }
            PrintKind::Spacer(height) => {
                if self.fits(*height) {
                    self.cursor += height;
                } else {
                    self.new_page();
                }
            }
            kind => {
                let height = measure(node, width, None);
                if self.fits(height) {
                    self.draw_atomic(node, x, width);
                    return;
                }
                let fits_fresh = height <= self.fresh_page_room() + EPSILON;
                match kind {
                    PrintKind::Text(block) => self.split_text(block, x, width),
                    PrintKind::Block(block) if !fits_fresh => self.split_block(block, x, width),
                    PrintKind::Table(table) if !fits_fresh => self.split_table(table, x, width),
                    _ => {
                        if self.has_content {
                            self.new_page();
                        }
                        self.draw_atomic(node, x, width);
                    }
                }
            }
        }
    }

    fn draw_atomic(&mut self, node: &PrintNode, x: f32, width: f32) {
        self.cursor += draw_node(&mut self.current, node, x, self.cursor, width, None);
        self.has_content = true;
    }

    fn split_text(&mut self, block: &TextBlock, x: f32, width: f32) {
        let available = (width - block.indent).max(1.0);
        let lh = line_height(block);
        for (i, line) in wrap(block, available).iter().enumerate() {
            if !self.fits(lh) && self.has_content {
                self.new_page();
            }
            if i == 0 {
                draw_marker(&mut self.current, block, x, self.cursor);
            }
            draw_line(&mut self.current, block, line, x + block.indent, self.cursor, available);
            self.cursor += lh;
            self.has_content = true;
        }
    }

    fn split_table(&mut self, table: &PrintTable, x: f32, width: f32) {
        let (column_width, rows) = table_layout(table, width);
        let Some((header, body)) = rows.split_first() else {
            return;
        };
        let lead = header.height + body.first().map_or(0.0, |r| r.height);
        if !self.fits(lead) && self.has_content {
            self.new_page();
        }
        self.cursor += draw_table_row(&mut self.current, table, header, column_width, x, self.cursor);
        self.has_content = true;

        let mut rows_on_page = 0;
        for row in body {
            if !self.fits(row.height) && rows_on_page > 0 {
                self.new_page();
                self.cursor += draw_table_row(&mut self.current, table, header, column_width, x, self.cursor);
                self.has_content = true;
                rows_on_page = 0;
            }
            self.cursor += draw_table_row(&mut self.current, table, row, column_width, x, self.cursor);
            rows_on_page += 1;
        }
    }

    fn split_block(&mut self, block: &'a PrintBlock, x: f32, width: f32) {
        let (inner_x, inner_w) = block_inner(block, x, width);
        let (top, bottom) = block_vertical(block);
        if !self.fits(top) && self.has_content {
            self.new_page();
        }
        self.open.push(OpenBlock {
            block,
            x,
            width,
            start_y: self.cursor,
            op_index: self.current.ops.len(),
        });
        self.cursor += top;
        self.flow(&block.children, inner_x, inner_w);
        self.cursor += bottom;
        if let Some(open) = self.open.pop() {
            splice_decoration(&mut self.current, &open, self.cursor);
        }
        self.has_content = true;
    }

    fn finish(mut self) -> Vec<PageCanvas> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Draws one fragment's decoration beneath what was drawn since it opened.
fn splice_decoration(canvas: &mut PageCanvas, open: &OpenBlock<'_>, bottom_y: f32) {
    let mut decoration = canvas.scratch();
    draw_block_decoration(&mut decoration, open.block, open.x, open.start_y, open.width, bottom_y - open.start_y);
    let at = open.op_index.min(canvas.ops.len());
    canvas.ops.splice(at..at, decoration.ops);
}

/// Lays the body out on pages, then draws the header and footer on each.
/// Always returns at least one page.
pub fn paginate(doc: &PrintDocument) -> Vec<PageCanvas> {
    let footer = footer_nodes(doc);
    let bands = bands(doc, &footer);
    let x = doc.margins.left;
    let width = content_width(doc);

    let mut paginator = Paginator::new(doc.page_size.height, bands);
    paginator.flow(&doc.body, x, width);
    let mut pages = paginator.finish();

    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let numbers = Some(PageNumbers { page: i + 1, total });
        if bands.header_height > 0.0 {
            stack(page, &doc.header, x, doc.margins.top, width, numbers);
        }
        if bands.footer_height > 0.0 {
            let y = doc.page_size.height - doc.margins.bottom - bands.footer_height;
            stack(page, &footer, x, y, width, numbers);
        }
    }
    pages
}

fn info_string(value: &str) -> Object {
    Object::String(to_win_ansi(value), StringFormat::Literal)
}

fn info_dictionary(doc: &PrintDocument) -> Dictionary {
    let mut info = dictionary! {
        "Title" => info_string(&doc.info.title),
        "Producer" => info_string(PRODUCER),
    };
    let optional = [
        ("Author", &doc.info.author),
        ("Subject", &doc.info.subject),
        ("Keywords", &doc.info.keywords),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            info.set(key, info_string(value));
        }
    }
    info
}

fn font_resources(pdf: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for (family, weight, style) in FACES {
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => styled_font_name(family, weight, style),
            "Encoding" => "WinAnsiEncoding",
        };
        fonts.set(resource_name(family, weight, style), pdf.add_object(font));
    }
    fonts
}

fn link_annotation(rect: [f32; 4], uri: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|v| Object::Real(*v)).collect::<Vec<Object>>(),
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        },
    }
}

fn write_page(pdf: &mut Document, page: PageCanvas, pages_id: ObjectId, resources_id: ObjectId, media_box: &[Object]) -> Result<ObjectId, RenderError> {
    let content = Content { operations: page.ops };
    let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));

    let mut page_dict = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.to_vec(),
        "Contents" => content_id,
        "Resources" => resources_id,
    };
    if !page.links.is_empty() {
        let mut annots = Vec::with_capacity(page.links.len());
        for link in &page.links {
            annots.push(Object::Reference(pdf.add_object(link_annotation(link.rect, &link.uri))));
        }
        page_dict.set("Annots", Object::Array(annots));
    }
    Ok(pdf.add_object(page_dict))
}

/// Serializes finished pages into a PDF 1.7 file.
pub fn write_pdf(doc: &PrintDocument, pages: Vec<PageCanvas>, compress: bool) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let fonts = font_resources(&mut pdf);
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        doc.page_size.width.into(),
        doc.page_size.height.into(),
    ];

    let pages = if pages.is_empty() { vec![PageCanvas::new(doc.page_size.height)] } else { pages };
    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        kids.push(Object::Reference(write_page(&mut pdf, page, pages_id, resources_id, &media_box)?));
    }
    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    pdf.trailer.set("Root", catalog_id);
    let info_id = pdf.add_object(info_dictionary(doc));
    pdf.trailer.set("Info", info_id);

    if compress {
        pdf.compress();
    }
    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;
    Ok(buffer)
}
