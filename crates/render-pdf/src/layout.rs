//! Greedy line breaking over estimated glyph widths, and table row sizing.

use crate::fonts::{run_family, text_width};
use crate::node::{PrintTable, TextBlock, TextRun};
use quire_style::{FontWeight, TextAlign};

/// A stretch of one run on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub run: usize,
    pub text: String,
    /// Offset from the line start.
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Width without trailing spaces.
    pub fn width(&self) -> f32 {
        self.spans
            .last()
            .map_or(0.0, |last| last.x + last.width - trailing_space_width(last))
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Offset of the line start inside `available` for the given alignment.
    pub fn offset(&self, align: TextAlign, available: f32) -> f32 {
        let free = (available - self.width()).max(0.0);
        match align {
            TextAlign::Center => free / 2.0,
            TextAlign::Right => free,
            TextAlign::Left | TextAlign::Justify => 0.0,
        }
    }
}

fn trailing_space_width(span: &Span) -> f32 {
    let chars = span.text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let spaces = chars - span.text.trim_end().chars().count();
    span.width * spaces as f32 / chars as f32
}

pub fn run_size(run: &TextRun, block: &TextBlock) -> f32 {
    if run.monospace && run_family(run, block.family) != block.family {
        block.font_size * 0.95
    } else {
        block.font_size
    }
}

fn piece_width(piece: &str, run: &TextRun, block: &TextBlock) -> f32 {
    text_width(piece, run_family(run, block.family), run.weight, run_size(run, block))
}

struct LineBuilder<'b> {
    block: &'b TextBlock,
    width: f32,
    lines: Vec<Line>,
    current: Line,
    x: f32,
}

impl<'b> LineBuilder<'b> {
    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.x = 0.0;
    }

    fn push(&mut self, run_index: usize, piece: &str, width: f32) {
        match self.current.spans.last_mut() {
            Some(last) if last.run == run_index => {
                last.text.push_str(piece);
                last.width += width;
            }
            _ => self.current.spans.push(Span {
                run: run_index,
                text: piece.to_string(),
                x: self.x,
                width,
            }),
        }
        self.x += width;
    }

    fn word(&mut self, run_index: usize, run: &TextRun, piece: &str) {
        let full = piece_width(piece, run, self.block);
        let visible = piece_width(piece.trim_end(), run, self.block);
        if self.x + visible <= self.width + 1e-3 {
            self.push(run_index, piece, full);
            return;
        }
        if !self.current.is_empty() {
            self.break_line();
        }
        if visible <= self.width + 1e-3 {
            self.push(run_index, piece, full);
            return;
        }
        // Longer than a whole line: hard-split by characters.
        let char_w = piece_width("M", run, self.block).max(f32::EPSILON);
        let per_line = ((self.width / char_w + 1e-3).floor() as usize).max(1);
        let chars: Vec<char> = piece.chars().collect();
        for chunk in chars.chunks(per_line) {
            if !self.current.is_empty() {
                self.break_line();
            }
            let text: String = chunk.iter().collect();
            let w = piece_width(&text, run, self.block);
            self.push(run_index, &text, w);
        }
    }
}

/// Breaks a text block into lines no wider than `width`, splitting at spaces
/// and at explicit newlines. Empty text yields no lines.
pub fn wrap(block: &TextBlock, width: f32) -> Vec<Line> {
    let mut builder = LineBuilder {
        block,
        width: width.max(1.0),
        lines: Vec::new(),
        current: Line::default(),
        x: 0.0,
    };
    for (run_index, run) in block.runs.iter().enumerate() {
        for (i, segment) in run.text.split('\n').enumerate() {
            if i > 0 {
                builder.break_line();
            }
            for piece in segment.split_inclusive(' ') {
                builder.word(run_index, run, piece);
            }
        }
    }
    if !builder.current.is_empty() {
        builder.break_line();
    }
    builder.lines
}

pub fn line_height(block: &TextBlock) -> f32 {
    block.font_size * block.line_height
}

/// Height of a wrapped text block.
pub fn text_height(block: &TextBlock, width: f32) -> f32 {
    wrap(block, (width - block.indent).max(1.0)).len() as f32 * line_height(block)
}

pub const CELL_PADDING: f32 = 5.0;
const CELL_LINE_HEIGHT: f32 = 1.3;

/// One table row with its cells already wrapped.
#[derive(Debug, Clone)]
pub struct RowLayout {
    pub cells: Vec<TextBlock>,
    pub height: f32,
    pub header: bool,
    pub striped: bool,
}

pub fn cell_block(table: &PrintTable, text: &str, header: bool) -> TextBlock {
    let mut run = TextRun::plain(text);
    if header && table.header_bold {
        run.weight = FontWeight::Bold;
    }
    TextBlock {
        runs: vec![run],
        family: table.family,
        font_size: table.font_size,
        line_height: CELL_LINE_HEIGHT,
        color: if header { table.header_color } else { table.cell_color },
        align: TextAlign::Left,
        marker: None,
        indent: 0.0,
    }
}

fn row_layout(table: &PrintTable, cells: &[String], column_width: f32, header: bool, striped: bool) -> RowLayout {
    let inner = (column_width - CELL_PADDING * 2.0).max(1.0);
    let cells: Vec<TextBlock> = cells.iter().map(|c| cell_block(table, c, header)).collect();
    let content = cells
        .iter()
        .map(|c| text_height(c, inner).max(line_height(c)))
        .fold(0.0, f32::max);
    RowLayout {
        cells,
        height: content + CELL_PADDING * 2.0,
        header,
        striped,
    }
}

/// Equal-width columns; returns the column width and every row, header first.
pub fn table_layout(table: &PrintTable, width: f32) -> (f32, Vec<RowLayout>) {
    let columns = table.headers.len().max(1);
    let column_width = width / columns as f32;
    let mut rows = vec![row_layout(table, &table.headers, column_width, true, false)];
    rows.extend(table.rows.iter().enumerate().map(|(i, row)| {
        row_layout(table, row, column_width, false, table.stripe.is_some() && i % 2 == 1)
    }));
    (column_width, rows)
}
