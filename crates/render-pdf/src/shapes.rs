//! Print renderers for charts. Shapes are laid out in the chart's own box,
//! y pointing down; the producer places and flips them.

use crate::node::{
    BoxBorder, Drawing, PrintBlock, PrintKind, PrintNode, Shape, TextAnchor, TextBlock, TextRun,
};
use crate::project::family;
use kurbo::{BezPath, Circle, Shape as _};
use quire_chart::{
    ChartGeometry, NO_DATA_LABEL, format_value, horizontal_bars, line_geometry, pick_color,
    pie_geometry, to_segments, vertical_bars,
};
use quire_model::{BarChart, ChartOrientation, LineChart, PieChart};
use quire_render_core::presets::{
    AXIS_LABEL_HEIGHT, AXIS_LABEL_WIDTH, BAR_LABEL_WIDTH, BAR_ROW_GAP, BAR_THICKNESS,
    BAR_VALUE_WIDTH, BODY_FONT_SIZE, CAPTION_FONT_SIZE, DEFAULT_BLOCK_GAP, LINE_HEIGHT, chart_box,
};
use quire_render_core::{RenderContext, RenderFallback};
use quire_style::{BorderStyle, Margins, TextAlign};
use quire_types::{Color, Point, Size};

const LABEL_SIZE: f32 = 8.0;
const GRID_COLOR: Color = Color::rgb(0xe5, 0xe7, 0xeb);

fn pt(x: f64, y: f64) -> Point {
    Point::new(x as f32, y as f32)
}

fn label(x: f64, y: f64, text: impl Into<String>, color: Color, anchor: TextAnchor) -> Shape {
    Shape::Label {
        at: pt(x, y),
        text: text.into(),
        font_size: LABEL_SIZE,
        color,
        anchor,
    }
}

fn rect(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Shape {
    Shape::Rect {
        origin: pt(x, y),
        size: Size::new(width as f32, height as f32),
        fill,
    }
}

fn path(path: &BezPath, fill: Option<Color>, stroke: Option<(Color, f32)>) -> Shape {
    Shape::Path {
        segments: to_segments(path),
        fill,
        stroke,
    }
}

/// Title above the drawing, when there is one.
fn chart_node(title: Option<&String>, body: PrintNode, ctx: &RenderContext<'_>) -> PrintNode {
    let margin = ctx.margin_bottom.unwrap_or(DEFAULT_BLOCK_GAP);
    let Some(title) = title else {
        return PrintNode { margin_bottom: margin, ..body };
    };
    let heading = TextBlock {
        runs: vec![TextRun::plain(title.clone()).bold(true)],
        family: family(ctx),
        font_size: BODY_FONT_SIZE,
        line_height: LINE_HEIGHT,
        color: ctx.theme.text,
        align: TextAlign::Left,
        marker: None,
        indent: 0.0,
    };
    let block = PrintBlock {
        children: vec![PrintNode::new(PrintKind::Text(heading), 6.0), PrintNode { margin_bottom: 0.0, ..body }],
        ..PrintBlock::default()
    };
    PrintNode::new(PrintKind::Block(block), margin)
}

fn drawing(width: f64, height: f64, shapes: Vec<Shape>) -> PrintNode {
    let drawing = Drawing {
        size: Size::new(width as f32, height as f32),
        shapes,
    };
    PrintNode::new(PrintKind::Drawing(drawing), 0.0)
}

fn no_data(tag: &'static str, title: Option<&String>, height: f32, ctx: &RenderContext<'_>) -> PrintNode {
    RenderFallback::EmptyChart { tag }.report();
    let text = TextBlock {
        runs: vec![TextRun::plain(NO_DATA_LABEL)],
        family: family(ctx),
        font_size: CAPTION_FONT_SIZE,
        line_height: LINE_HEIGHT,
        color: ctx.theme.muted,
        align: TextAlign::Center,
        marker: None,
        indent: 0.0,
    };
    let vertical = ((height.min(120.0) - CAPTION_FONT_SIZE * LINE_HEIGHT) / 2.0).max(0.0);
    let block = PrintBlock {
        padding: Margins { top: vertical, right: 0.0, bottom: vertical, left: 0.0 },
        border: Some(BoxBorder {
            width: 1.0,
            color: ctx.theme.muted,
            style: BorderStyle::Dashed,
        }),
        children: vec![PrintNode::new(PrintKind::Text(text), 0.0)],
        ..PrintBlock::default()
    };
    chart_node(title, PrintNode::new(PrintKind::Block(block), 0.0), ctx)
}

pub(crate) fn bar_chart(chart: &BarChart, ctx: &RenderContext<'_>) -> PrintNode {
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let values: Vec<f64> = chart.data.iter().map(|d| d.value).collect();
    let element_colors = chart.colors.as_deref().unwrap_or(&[]);
    let color_of = |i: usize| pick_color(i, chart.data[i].color.as_deref(), element_colors, &ctx.theme.chart_palette);
    let text = ctx.theme.text;
    let (w, h) = (width as f64, height as f64);
    let mut shapes = Vec::new();

    let body = match chart.orientation {
        ChartOrientation::Horizontal => {
            let label_w = BAR_LABEL_WIDTH as f64;
            let thickness = BAR_THICKNESS as f64;
            let track = (w - label_w - BAR_VALUE_WIDTH as f64).max(0.0);
            let ChartGeometry::Plotted(g) = horizontal_bars(&values, track, thickness, BAR_ROW_GAP as f64) else {
                return no_data("barChart", chart.title.as_ref(), height, ctx);
            };
            for bar in &g.bars {
                let baseline = bar.y + thickness * 0.7;
                shapes.push(label(label_w - 6.0, baseline, chart.data[bar.index].label.clone(), text, TextAnchor::End));
                shapes.push(rect(label_w + bar.x, bar.y, bar.width, bar.height, color_of(bar.index)));
                if chart.show_values {
                    shapes.push(label(label_w + bar.width + 4.0, baseline, format_value(bar.value), text, TextAnchor::Start));
                }
            }
            let rows = values.len() as f64 * (thickness + BAR_ROW_GAP as f64);
            drawing(w, rows, shapes)
        }
        ChartOrientation::Vertical => {
            let plot_h = (h - AXIS_LABEL_HEIGHT as f64).max(0.0);
            let ChartGeometry::Plotted(g) = vertical_bars(&values, w, plot_h) else {
                return no_data("barChart", chart.title.as_ref(), height, ctx);
            };
            shapes.push(Shape::Line {
                from: pt(0.0, plot_h),
                to: pt(w, plot_h),
                color: GRID_COLOR,
                width: 1.0,
            });
            for bar in &g.bars {
                let center = bar.x + bar.width / 2.0;
                shapes.push(rect(bar.x, bar.y, bar.width, bar.height, color_of(bar.index)));
                shapes.push(label(center, plot_h + 12.0, chart.data[bar.index].label.clone(), text, TextAnchor::Middle));
                if chart.show_values {
                    shapes.push(label(center, (bar.y - 3.0).max(LABEL_SIZE as f64), format_value(bar.value), text, TextAnchor::Middle));
                }
            }
            drawing(w, h, shapes)
        }
    };
    chart_node(chart.title.as_ref(), body, ctx)
}

pub(crate) fn pie_chart(chart: &PieChart, ctx: &RenderContext<'_>) -> PrintNode {
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let (w, h) = (width as f64, height as f64);
    let diameter = h.min(w);
    let radius = (diameter / 2.0 - 4.0).max(0.0);
    let center = kurbo::Point::new(diameter / 2.0, h / 2.0);
    let values: Vec<f64> = chart.data.iter().map(|d| d.value).collect();
    let element_colors = chart.colors.as_deref().unwrap_or(&[]);
    let color_of = |i: usize| pick_color(i, chart.data[i].color.as_deref(), element_colors, &ctx.theme.chart_palette);

    let ChartGeometry::Plotted(g) = pie_geometry(&values, center, radius, chart.donut) else {
        return no_data("pieChart", chart.title.as_ref(), height, ctx);
    };

    let mut shapes = Vec::new();
    for slice in &g.slices {
        shapes.push(path(&slice.path, Some(color_of(slice.index)), Some((Color::WHITE, 1.0))));
    }
    for slice in g.slices.iter().filter(|s| s.sweep >= 20.0) {
        shapes.push(label(
            slice.label_anchor.x,
            slice.label_anchor.y + 3.0,
            format!("{:.0}%", slice.percentage),
            Color::WHITE,
            TextAnchor::Middle,
        ));
    }
    if chart.show_legend {
        let x = diameter + 16.0;
        for (i, datum) in chart.data.iter().enumerate() {
            let y = 12.0 + i as f64 * 16.0;
            shapes.push(rect(x, y - 8.0, 9.0, 9.0, color_of(i)));
            shapes.push(label(
                x + 14.0,
                y,
                format!("{} ({})", datum.label, format_value(datum.value)),
                ctx.theme.text,
                TextAnchor::Start,
            ));
        }
    }
    chart_node(chart.title.as_ref(), drawing(w, h, shapes), ctx)
}

pub(crate) fn line_chart(chart: &LineChart, ctx: &RenderContext<'_>) -> PrintNode {
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let (w, h) = (width as f64, height as f64);
    let left = AXIS_LABEL_WIDTH as f64;
    let top = 6.0;
    let plot_w = (w - left - 8.0).max(0.0);
    let plot_h = (h - top - AXIS_LABEL_HEIGHT as f64).max(0.0);
    let series: Vec<Vec<f64>> = chart
        .series
        .iter()
        .map(|s| s.values.iter().map(|p| p.y).collect())
        .collect();

    let ChartGeometry::Plotted(g) = line_geometry(&series, plot_w, plot_h) else {
        return no_data("lineChart", chart.title.as_ref(), height, ctx);
    };

    let muted = ctx.theme.muted;
    let mut shapes = Vec::new();
    for tick in &g.ticks {
        let y = top + tick.y;
        if chart.show_grid {
            shapes.push(Shape::Line {
                from: pt(left, y),
                to: pt(left + plot_w, y),
                color: GRID_COLOR,
                width: 0.5,
            });
        }
        shapes.push(label(left - 5.0, y + 3.0, format_value((tick.value * 100.0).round() / 100.0), muted, TextAnchor::End));
    }
    if let Some(longest) = chart.series.iter().max_by_key(|s| s.values.len()) {
        for (slot, point) in g.slots.iter().zip(&longest.values) {
            shapes.push(label(left + slot, top + plot_h + 12.0, format_value(point.x), muted, TextAnchor::Middle));
        }
    }

    let offset = kurbo::Vec2::new(left, top);
    for geometry in &g.series {
        let color = pick_color(geometry.index, chart.series[geometry.index].color.as_deref(), &[], &ctx.theme.chart_palette);
        let mut line = geometry.polyline();
        line.apply_affine(kurbo::Affine::translate(offset));
        shapes.push(path(&line, None, Some((color, 1.5))));
        if chart.show_points {
            for p in &geometry.points {
                let dot = BezPath::from_iter(Circle::new(*p + offset, 2.5).path_elements(0.1));
                shapes.push(path(&dot, Some(color), None));
            }
        }
    }
    let mut total_h = h;
    if chart.series.len() > 1 {
        total_h += 14.0;
        let mut x = left;
        for (i, s) in chart.series.iter().enumerate() {
            let color = pick_color(i, s.color.as_deref(), &[], &ctx.theme.chart_palette);
            shapes.push(rect(x, h + 5.0, 8.0, 8.0, color));
            shapes.push(label(x + 12.0, h + 12.0, s.label.clone(), ctx.theme.text, TextAnchor::Start));
            x += 24.0 + s.label.chars().count() as f64 * LABEL_SIZE as f64 * 0.5;
        }
    }
    chart_node(chart.title.as_ref(), drawing(w, total_h, shapes), ctx)
}
