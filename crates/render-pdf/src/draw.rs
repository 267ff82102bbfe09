//! Draws print nodes at fixed positions. Every function returns the height
//! it used, so drawing onto a scratch canvas doubles as measuring.

use crate::canvas::PageCanvas;
use crate::fonts::{resource_name, run_family, text_width};
use crate::layout::{CELL_PADDING, RowLayout, line_height, run_size, table_layout, wrap};
use crate::node::{
    Drawing, FontFamily, PrintBlock, PrintKind, PrintNode, PrintRow, PrintTable, Rule, Shape,
    TextAnchor, TextBlock,
};
use quire_style::{BorderStyle, FontStyle, FontWeight};
use quire_types::Point;
use std::borrow::Cow;

/// Current and total page numbers for `{page}` / `{total}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumbers {
    pub page: usize,
    pub total: usize,
}

impl PageNumbers {
    pub fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.contains('{') {
            return Cow::Borrowed(text);
        }
        Cow::Owned(
            text.replace("{page}", &self.page.to_string())
                .replace("{total}", &self.total.to_string()),
        )
    }
}

fn with_numbers<'b>(block: &'b TextBlock, numbers: Option<PageNumbers>) -> Cow<'b, TextBlock> {
    let Some(numbers) = numbers else {
        return Cow::Borrowed(block);
    };
    let mut owned = block.clone();
    for run in &mut owned.runs {
        if let Cow::Owned(text) = numbers.substitute(&run.text) {
            run.text = text;
        }
    }
    Cow::Owned(owned)
}

/// Height of a node drawn `width` wide.
pub fn measure(node: &PrintNode, width: f32, numbers: Option<PageNumbers>) -> f32 {
    let mut scratch = PageCanvas::new(0.0);
    draw_node(&mut scratch, node, 0.0, 0.0, width, numbers)
}

pub fn draw_node(canvas: &mut PageCanvas, node: &PrintNode, x: f32, y: f32, width: f32, numbers: Option<PageNumbers>) -> f32 {
    match &node.kind {
        PrintKind::Block(block) => draw_block(canvas, block, x, y, width, numbers),
        PrintKind::Row(row) => draw_row(canvas, row, x, y, width, numbers),
        PrintKind::Text(text) => draw_text(canvas, text, x, y, width, numbers),
        PrintKind::Table(table) => draw_table(canvas, table, x, y, width),
        PrintKind::Drawing(drawing) => draw_drawing(canvas, drawing, x, y),
        PrintKind::Rule(rule) => draw_rule(canvas, rule, x, y, width),
        PrintKind::Spacer(height) => *height,
        PrintKind::PageBreak => 0.0,
    }
}

/// Draws nodes top to bottom. Margins separate siblings; the last node's
/// margin is not counted.
pub fn stack(canvas: &mut PageCanvas, nodes: &[PrintNode], x: f32, y: f32, width: f32, numbers: Option<PageNumbers>) -> f32 {
    let mut cursor = y;
    for (i, node) in nodes.iter().enumerate() {
        cursor += draw_node(canvas, node, x, cursor, width, numbers);
        if i + 1 < nodes.len() {
            cursor += node.margin_bottom;
        }
    }
    cursor - y
}

/// Left offset and width of a block's content box.
pub fn block_inner(block: &PrintBlock, x: f32, width: f32) -> (f32, f32) {
    let border = block.border.as_ref().map_or(0.0, |b| b.width);
    let left = border + block.padding.left;
    let right = border + block.padding.right;
    (x + left, (width - left - right).max(0.0))
}

/// Top and bottom insets of a block's content box.
pub fn block_vertical(block: &PrintBlock) -> (f32, f32) {
    let border = block.border.as_ref().map_or(0.0, |b| b.width);
    (border + block.padding.top, border + block.padding.bottom)
}

/// Background, border and accent bar of a block `height` tall.
pub fn draw_block_decoration(canvas: &mut PageCanvas, block: &PrintBlock, x: f32, y: f32, width: f32, height: f32) {
    if let Some(background) = block.background {
        canvas.fill_rect(x, y, width, height, background);
    }
    if let Some((color, bar)) = block.accent_bar {
        canvas.fill_rect(x, y, bar, height, color);
    }
    if let Some(border) = &block.border {
        canvas.stroke_rect(x, y, width, height, border.width, border.color, border.style);
    }
}

fn draw_block(canvas: &mut PageCanvas, block: &PrintBlock, x: f32, y: f32, width: f32, numbers: Option<PageNumbers>) -> f32 {
    let (inner_x, inner_w) = block_inner(block, x, width);
    let (top, bottom) = block_vertical(block);
    // Children go on their own canvas so the decoration lands beneath them.
    let mut children = canvas.scratch();
    let content = stack(&mut children, &block.children, inner_x, y + top, inner_w, numbers);
    let height = top + content + bottom;
    draw_block_decoration(canvas, block, x, y, width, height);
    canvas.append(children);
    height
}

fn draw_row(canvas: &mut PageCanvas, row: &PrintRow, x: f32, y: f32, width: f32, numbers: Option<PageNumbers>) -> f32 {
    let gaps = row.gap * row.columns.len().saturating_sub(1) as f32;
    let usable = (width - gaps).max(0.0);
    let mut column_x = x;
    let mut height: f32 = 0.0;
    for column in &row.columns {
        let column_width = usable * column.fraction;
        height = height.max(stack(canvas, &column.children, column_x, y, column_width, numbers));
        column_x += column_width + row.gap;
    }
    height
}

/// Draws one wrapped line with its top at `top`.
pub fn draw_line(canvas: &mut PageCanvas, block: &TextBlock, line: &crate::layout::Line, x: f32, top: f32, available: f32) {
    let lh = line_height(block);
    let baseline = top + (lh - block.font_size) / 2.0 + block.font_size * 0.8;
    let start = x + line.offset(block.align, available);
    for span in &line.spans {
        let Some(run) = block.runs.get(span.run) else {
            continue;
        };
        let size = run_size(run, block);
        let family = run_family(run, block.family);
        let color = run.color.unwrap_or(block.color);
        let span_x = start + span.x;
        let visible = span.text.trim_end();
        canvas.text(span_x, baseline, visible, &resource_name(family, run.weight, run.style), size, color);
        let visible_width = text_width(visible, family, run.weight, size);
        if run.strikethrough {
            let y = baseline - size * 0.3;
            canvas.line(Point::new(span_x, y), Point::new(span_x + visible_width, y), 0.6, color, BorderStyle::Solid);
        }
        if let Some(href) = &run.href {
            let y = baseline + 1.5;
            canvas.line(Point::new(span_x, y), Point::new(span_x + visible_width, y), 0.5, color, BorderStyle::Solid);
            canvas.link(span_x, top, visible_width, lh, href);
        }
    }
}

/// Draws the list marker in the hanging indent of the first line.
pub fn draw_marker(canvas: &mut PageCanvas, block: &TextBlock, x: f32, top: f32) {
    if let Some(marker) = &block.marker {
        let baseline = top + (line_height(block) - block.font_size) / 2.0 + block.font_size * 0.8;
        let font = resource_name(block.family, FontWeight::Regular, FontStyle::Normal);
        canvas.text(x, baseline, marker, &font, block.font_size, block.color);
    }
}

fn draw_text(canvas: &mut PageCanvas, block: &TextBlock, x: f32, y: f32, width: f32, numbers: Option<PageNumbers>) -> f32 {
    let block = with_numbers(block, numbers);
    let available = (width - block.indent).max(1.0);
    let lines = wrap(&block, available);
    let lh = line_height(&block);
    if !lines.is_empty() {
        draw_marker(canvas, &block, x, y);
    }
    for (i, line) in lines.iter().enumerate() {
        draw_line(canvas, &block, line, x + block.indent, y + i as f32 * lh, available);
    }
    lines.len() as f32 * lh
}

/// Draws one table row and returns its height.
pub fn draw_table_row(canvas: &mut PageCanvas, table: &PrintTable, row: &RowLayout, column_width: f32, x: f32, y: f32) -> f32 {
    let width = column_width * row.cells.len() as f32;
    if row.header {
        canvas.fill_rect(x, y, width, row.height, table.header_background);
    } else if let Some(stripe) = table.stripe.filter(|_| row.striped) {
        canvas.fill_rect(x, y, width, row.height, stripe);
    }
    let inner = (column_width - CELL_PADDING * 2.0).max(1.0);
    for (i, cell) in row.cells.iter().enumerate() {
        let cell_x = x + i as f32 * column_width;
        canvas.stroke_rect(cell_x, y, column_width, row.height, 0.5, table.border_color, BorderStyle::Solid);
        draw_text(canvas, cell, cell_x + CELL_PADDING, y + CELL_PADDING, inner, None);
    }
    row.height
}

fn draw_table(canvas: &mut PageCanvas, table: &PrintTable, x: f32, y: f32, width: f32) -> f32 {
    let (column_width, rows) = table_layout(table, width);
    let mut cursor = y;
    for row in &rows {
        cursor += draw_table_row(canvas, table, row, column_width, x, cursor);
    }
    cursor - y
}

fn draw_drawing(canvas: &mut PageCanvas, drawing: &Drawing, x: f32, y: f32) -> f32 {
    let at = |p: Point| Point::new(x + p.x, y + p.y);
    for shape in &drawing.shapes {
        match shape {
            Shape::Rect { origin, size, fill } => {
                let o = at(*origin);
                canvas.fill_rect(o.x, o.y, size.width, size.height, *fill);
            }
            Shape::Path { segments, fill, stroke } => {
                canvas.path(Point::new(x, y), segments, *fill, *stroke);
            }
            Shape::Line { from, to, color, width } => {
                canvas.line(at(*from), at(*to), *width, *color, BorderStyle::Solid);
            }
            Shape::Label { at: point, text, font_size, color, anchor } => {
                let family = FontFamily::Helvetica;
                let w = text_width(text, family, FontWeight::Regular, *font_size);
                let shift = match anchor {
                    TextAnchor::Start => 0.0,
                    TextAnchor::Middle => w / 2.0,
                    TextAnchor::End => w,
                };
                let p = at(*point);
                let font = resource_name(family, FontWeight::Regular, FontStyle::Normal);
                canvas.text(p.x - shift, p.y, text, &font, *font_size, *color);
            }
        }
    }
    drawing.size.height
}

fn draw_rule(canvas: &mut PageCanvas, rule: &Rule, x: f32, y: f32, width: f32) -> f32 {
    let mid = y + rule.thickness / 2.0;
    canvas.line(Point::new(x, mid), Point::new(x + width, mid), rule.thickness, rule.color, rule.style);
    rule.thickness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BoxBorder, TextRun};
    use quire_style::{Margins, TextAlign};
    use quire_types::Color;

    fn text(s: &str) -> PrintNode {
        PrintNode::new(
            PrintKind::Text(TextBlock {
                runs: vec![TextRun::plain(s)],
                family: FontFamily::Courier,
                font_size: 10.0,
                line_height: 1.0,
                color: Color::BLACK,
                align: TextAlign::Left,
                marker: None,
                indent: 0.0,
            }),
            5.0,
        )
    }

    #[test]
    fn stack_skips_last_margin() {
        let mut canvas = PageCanvas::new(500.0);
        let h = stack(&mut canvas, &[text("a"), text("b")], 0.0, 0.0, 100.0, None);
        assert_eq!(h, 25.0);
    }

    #[test]
    fn block_height_includes_padding_and_border() {
        let block = PrintNode::new(
            PrintKind::Block(PrintBlock {
                padding: Margins::all(4.0),
                border: Some(BoxBorder { width: 1.0, color: Color::BLACK, style: BorderStyle::Solid }),
                background: Some(Color::WHITE),
                children: vec![text("a")],
                ..PrintBlock::default()
            }),
            0.0,
        );
        assert_eq!(measure(&block, 100.0, None), 20.0);
    }

    #[test]
    fn decoration_is_drawn_before_children() {
        let mut canvas = PageCanvas::new(500.0);
        let block = PrintBlock {
            background: Some(Color::WHITE),
            children: vec![text("a")],
            ..PrintBlock::default()
        };
        draw_block(&mut canvas, &block, 0.0, 0.0, 100.0, None);
        let fill = canvas.ops.iter().position(|o| o.operator == "f").unwrap();
        let text = canvas.ops.iter().position(|o| o.operator == "Tj").unwrap();
        assert!(fill < text);
    }

    #[test]
    fn page_numbers_substitute() {
        let numbers = PageNumbers { page: 2, total: 5 };
        assert_eq!(numbers.substitute("Page {page} of {total}"), "Page 2 of 5");
        assert!(matches!(numbers.substitute("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn row_is_as_tall_as_tallest_column() {
        use crate::node::{PrintColumn, PrintRow};
        let row = PrintNode::new(
            PrintKind::Row(PrintRow {
                gap: 10.0,
                columns: vec![
                    PrintColumn { fraction: 0.5, children: vec![text("a")] },
                    PrintColumn { fraction: 0.5, children: vec![text("a"), text("b")] },
                ],
            }),
            0.0,
        );
        assert_eq!(measure(&row, 110.0, None), 25.0);
    }
}
