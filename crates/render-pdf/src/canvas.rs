//! Drawing primitives over one page's content stream.
//!
//! Callers work top-down in points from the page's top-left corner; every
//! primitive flips to PDF's bottom-up space on the way out.

use crate::fonts::to_win_ansi;
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use quire_chart::PathSegment;
use quire_style::BorderStyle;
use quire_types::{Color, Point};

/// Convert a top-down y coordinate to PDF's bottom-up space.
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// A URI link area in PDF coordinates: `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub rect: [f32; 4],
    pub uri: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageCanvas {
    page_height: f32,
    pub ops: Vec<Operation>,
    pub links: Vec<LinkArea>,
}

fn rgb(color: Color) -> Vec<Object> {
    color.to_unit_rgb().into_iter().map(Object::Real).collect()
}

fn dash_pattern(style: BorderStyle, width: f32) -> Vec<Object> {
    let unit = width.max(1.0);
    match style {
        BorderStyle::Dashed => vec![Object::Real(unit * 3.0), Object::Real(unit * 2.0)],
        BorderStyle::Dotted => vec![Object::Real(unit), Object::Real(unit * 2.0)],
        BorderStyle::Solid | BorderStyle::None => vec![],
    }
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
            links: Vec::new(),
        }
    }

    /// A blank canvas with the same geometry, for drawing that is measured
    /// or reordered before it lands here.
    pub fn scratch(&self) -> Self {
        Self::new(self.page_height)
    }

    /// Appends everything drawn on `other`.
    pub fn append(&mut self, other: PageCanvas) {
        self.ops.extend(other.ops);
        self.links.extend(other.links);
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn y(&self, y: f32) -> f32 {
        flip_y(y, self.page_height)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let bottom = self.y(y + height);
        self.op("q", vec![]);
        self.op("rg", rgb(color));
        self.op("re", vec![x.into(), bottom.into(), width.into(), height.into()]);
        self.op("f", vec![]);
        self.op("Q", vec![]);
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line: f32, color: Color, style: BorderStyle) {
        if style == BorderStyle::None || line <= 0.0 {
            return;
        }
        // Stroke centered on the inset edge so the border stays inside the box.
        let half = line / 2.0;
        let bottom = self.y(y + height - half);
        self.op("q", vec![]);
        self.op("w", vec![line.into()]);
        self.op("RG", rgb(color));
        self.op("d", vec![Object::Array(dash_pattern(style, line)), Object::Integer(0)]);
        self.op(
            "re",
            vec![
                (x + half).into(),
                bottom.into(),
                (width - line).max(0.0).into(),
                (height - line).max(0.0).into(),
            ],
        );
        self.op("S", vec![]);
        self.op("Q", vec![]);
    }

    pub fn line(&mut self, from: Point, to: Point, width: f32, color: Color, style: BorderStyle) {
        if style == BorderStyle::None || width <= 0.0 {
            return;
        }
        let (y1, y2) = (self.y(from.y), self.y(to.y));
        self.op("q", vec![]);
        self.op("w", vec![width.into()]);
        self.op("RG", rgb(color));
        self.op("d", vec![Object::Array(dash_pattern(style, width)), Object::Integer(0)]);
        self.op("m", vec![from.x.into(), y1.into()]);
        self.op("l", vec![to.x.into(), y2.into()]);
        self.op("S", vec![]);
        self.op("Q", vec![]);
    }

    /// One run of text with its baseline at `baseline`.
    pub fn text(&mut self, x: f32, baseline: f32, text: &str, font: &str, size: f32, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        let y = self.y(baseline);
        self.op("BT", vec![]);
        self.op("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]);
        self.op("rg", rgb(color));
        self.op("Td", vec![x.into(), y.into()]);
        self.op("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.op("ET", vec![]);
    }

    /// Fills and/or strokes a path whose points are relative to `origin`.
    pub fn path(&mut self, origin: Point, segments: &[PathSegment], fill: Option<Color>, stroke: Option<(Color, f32)>) {
        if segments.is_empty() || (fill.is_none() && stroke.is_none()) {
            return;
        }
        let at = |p: Point| -> [Object; 2] { [(origin.x + p.x).into(), flip_y(origin.y + p.y, self.page_height).into()] };
        let mut body = Vec::with_capacity(segments.len());
        for segment in segments {
            body.push(match *segment {
                PathSegment::MoveTo(p) => Operation::new("m", at(p).to_vec()),
                PathSegment::LineTo(p) => Operation::new("l", at(p).to_vec()),
                PathSegment::CurveTo(c1, c2, p) => {
                    let mut operands = at(c1).to_vec();
                    operands.extend(at(c2));
                    operands.extend(at(p));
                    Operation::new("c", operands)
                }
                PathSegment::Close => Operation::new("h", vec![]),
            });
        }
        self.op("q", vec![]);
        if let Some(color) = fill {
            self.op("rg", rgb(color));
        }
        if let Some((color, width)) = stroke {
            self.op("w", vec![width.into()]);
            self.op("RG", rgb(color));
            self.op("J", vec![Object::Integer(1)]);
            self.op("j", vec![Object::Integer(1)]);
        }
        self.ops.extend(body);
        let paint = match (fill, stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            _ => "S",
        };
        self.op(paint, vec![]);
        self.op("Q", vec![]);
    }

    /// Registers a URI link over a top-down box.
    pub fn link(&mut self, x: f32, y: f32, width: f32, height: f32, uri: &str) {
        let rect = [x, self.y(y + height), x + width, self.y(y)];
        self.links.push(LinkArea { rect, uri: uri.to_string() });
    }
}
