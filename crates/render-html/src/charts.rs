//! Charts as inline SVG. Geometry comes from `quire-chart`; this module only
//! turns shapes into SVG nodes.

use crate::blocks::{px, wrapper};
use crate::node::{HtmlElement, HtmlNode};
use quire_chart::{
    ChartGeometry, NO_DATA_LABEL, format_value, horizontal_bars, line_geometry, pick_color,
    pie_geometry, vertical_bars,
};
use quire_model::{BarChart, ChartOrientation, LineChart, PieChart};
use quire_render_core::presets::{
    AXIS_LABEL_HEIGHT, AXIS_LABEL_WIDTH, BAR_LABEL_WIDTH, BAR_ROW_GAP, BAR_THICKNESS,
    BAR_VALUE_WIDTH, DEFAULT_BLOCK_GAP, chart_box,
};
use quire_render_core::{RenderContext, RenderFallback};

const LABEL_FONT_SIZE: f32 = 10.0;

fn num(value: f64) -> String {
    format_value((value * 100.0).round() / 100.0)
}

fn svg(width: f64, height: f64) -> HtmlElement {
    HtmlElement::new("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", num(width))
        .attr("height", num(height))
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
}

fn svg_text(x: f64, y: f64, anchor: &str, fill: &str, content: impl Into<String>) -> HtmlNode {
    HtmlElement::new("text")
        .attr("x", num(x))
        .attr("y", num(y))
        .attr("text-anchor", anchor)
        .attr("font-size", LABEL_FONT_SIZE.to_string())
        .attr("fill", fill)
        .text(content)
        .into()
}

fn chart_frame(tag: &str, title: Option<&String>, ctx: &RenderContext<'_>) -> HtmlElement {
    let mut frame = wrapper(tag, ctx, DEFAULT_BLOCK_GAP);
    if let Some(title) = title {
        frame = frame.child(
            HtmlElement::new("div")
                .attr("class", "quire-chart-title")
                .style("font-weight", "600")
                .style("margin-bottom", "6px")
                .style("color", ctx.theme.text.to_hex())
                .text(title.clone()),
        );
    }
    frame
}

fn no_data(tag: &'static str, frame: HtmlElement, height: f32, ctx: &RenderContext<'_>) -> HtmlNode {
    RenderFallback::EmptyChart { tag }.report();
    frame
        .child(
            HtmlElement::new("div")
                .attr("class", "quire-chart-empty")
                .style("height", px(height.min(120.0)))
                .style("display", "flex")
                .style("align-items", "center")
                .style("justify-content", "center")
                .style("border", format!("1px dashed {}", ctx.theme.muted.to_hex()))
                .style("color", ctx.theme.muted.to_hex())
                .text(NO_DATA_LABEL),
        )
        .into()
}

pub(crate) fn bar_chart(chart: &BarChart, ctx: &RenderContext<'_>) -> HtmlNode {
    let frame = chart_frame("barChart", chart.title.as_ref(), ctx);
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let values: Vec<f64> = chart.data.iter().map(|d| d.value).collect();
    let element_colors = chart.colors.as_deref().unwrap_or(&[]);
    let color_of = |i: usize| {
        pick_color(i, chart.data[i].color.as_deref(), element_colors, &ctx.theme.chart_palette).to_hex()
    };
    let text_fill = ctx.theme.text.to_hex();
    let (width, height) = (width as f64, height as f64);

    let svg_node = match chart.orientation {
        ChartOrientation::Horizontal => {
            let label_w = BAR_LABEL_WIDTH as f64;
            let track = (width - label_w - BAR_VALUE_WIDTH as f64).max(0.0);
            let thickness = BAR_THICKNESS as f64;
            let geometry = horizontal_bars(&values, track, thickness, BAR_ROW_GAP as f64);
            let ChartGeometry::Plotted(g) = geometry else {
                return no_data("barChart", frame, height as f32, ctx);
            };
            let rows_height = values.len() as f64 * (thickness + BAR_ROW_GAP as f64);
            let mut svg = svg(width, rows_height);
            for bar in &g.bars {
                let baseline = bar.y + thickness * 0.75;
                svg = svg
                    .child(svg_text(label_w - 6.0, baseline, "end", &text_fill, chart.data[bar.index].label.clone()))
                    .child(
                        HtmlElement::new("rect")
                            .attr("x", num(label_w + bar.x))
                            .attr("y", num(bar.y))
                            .attr("width", num(bar.width))
                            .attr("height", num(bar.height))
                            .attr("fill", color_of(bar.index)),
                    );
                if chart.show_values {
                    svg = svg.child(svg_text(
                        label_w + bar.width + 4.0,
                        baseline,
                        "start",
                        &text_fill,
                        format_value(bar.value),
                    ));
                }
            }
            svg
        }
        ChartOrientation::Vertical => {
            let plot_h = (height - AXIS_LABEL_HEIGHT as f64).max(0.0);
            let ChartGeometry::Plotted(g) = vertical_bars(&values, width, plot_h) else {
                return no_data("barChart", frame, height as f32, ctx);
            };
            let mut svg = svg(width, height);
            for bar in &g.bars {
                let center = bar.x + bar.width / 2.0;
                svg = svg
                    .child(
                        HtmlElement::new("rect")
                            .attr("x", num(bar.x))
                            .attr("y", num(bar.y))
                            .attr("width", num(bar.width))
                            .attr("height", num(bar.height))
                            .attr("fill", color_of(bar.index)),
                    )
                    .child(svg_text(center, plot_h + 14.0, "middle", &text_fill, chart.data[bar.index].label.clone()));
                if chart.show_values {
                    svg = svg.child(svg_text(center, (bar.y - 4.0).max(10.0), "middle", &text_fill, format_value(bar.value)));
                }
            }
            svg
        }
    };
    frame.child(svg_node).into()
}

pub(crate) fn pie_chart(chart: &PieChart, ctx: &RenderContext<'_>) -> HtmlNode {
    let frame = chart_frame("pieChart", chart.title.as_ref(), ctx);
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let (width, height) = (width as f64, height as f64);
    let diameter = height.min(width);
    let radius = (diameter / 2.0 - 4.0).max(0.0);
    let center = kurbo::Point::new(diameter / 2.0, height / 2.0);
    let values: Vec<f64> = chart.data.iter().map(|d| d.value).collect();
    let element_colors = chart.colors.as_deref().unwrap_or(&[]);

    let ChartGeometry::Plotted(g) = pie_geometry(&values, center, radius, chart.donut) else {
        return no_data("pieChart", frame, height as f32, ctx);
    };

    let mut svg = svg(width, height);
    for slice in &g.slices {
        let datum = &chart.data[slice.index];
        let color = pick_color(slice.index, datum.color.as_deref(), element_colors, &ctx.theme.chart_palette);
        svg = svg.child(
            HtmlElement::new("path")
                .attr("d", slice.svg_path())
                .attr("fill", color.to_hex())
                .attr("stroke", "#ffffff")
                .attr("stroke-width", "1")
                .child(HtmlElement::new("title").text(format!(
                    "{}: {} ({:.1}%)",
                    datum.label,
                    format_value(slice.value),
                    slice.percentage
                ))),
        );
        if slice.sweep >= 20.0 {
            svg = svg.child(svg_text(
                slice.label_anchor.x,
                slice.label_anchor.y + 3.0,
                "middle",
                "#ffffff",
                format!("{:.0}%", slice.percentage),
            ));
        }
    }

    if chart.show_legend {
        let x = diameter + 16.0;
        for (i, datum) in chart.data.iter().enumerate() {
            let y = 12.0 + i as f64 * 18.0;
            let color = pick_color(i, datum.color.as_deref(), element_colors, &ctx.theme.chart_palette);
            svg = svg
                .child(
                    HtmlElement::new("rect")
                        .attr("x", num(x))
                        .attr("y", num(y - 9.0))
                        .attr("width", "10")
                        .attr("height", "10")
                        .attr("fill", color.to_hex()),
                )
                .child(svg_text(
                    x + 16.0,
                    y,
                    "start",
                    &ctx.theme.text.to_hex(),
                    format!("{} ({})", datum.label, format_value(datum.value)),
                ));
        }
    }
    frame.child(svg).into()
}

pub(crate) fn line_chart(chart: &LineChart, ctx: &RenderContext<'_>) -> HtmlNode {
    let frame = chart_frame("lineChart", chart.title.as_ref(), ctx);
    let (width, height) = chart_box(chart.width, chart.height, ctx.width);
    let (width, height) = (width as f64, height as f64);
    let left = AXIS_LABEL_WIDTH as f64;
    let top = 8.0;
    let plot_w = (width - left - 8.0).max(0.0);
    let plot_h = (height - top - AXIS_LABEL_HEIGHT as f64).max(0.0);
    let series: Vec<Vec<f64>> = chart
        .series
        .iter()
        .map(|s| s.values.iter().map(|p| p.y).collect())
        .collect();

    let ChartGeometry::Plotted(g) = line_geometry(&series, plot_w, plot_h) else {
        return no_data("lineChart", frame, height as f32, ctx);
    };

    let muted = ctx.theme.muted.to_hex();
    let mut plot = HtmlElement::new("g").attr("transform", format!("translate({},{})", num(left), num(top)));
    for tick in &g.ticks {
        if chart.show_grid {
            plot = plot.child(
                HtmlElement::new("line")
                    .attr("x1", "0")
                    .attr("x2", num(plot_w))
                    .attr("y1", num(tick.y))
                    .attr("y2", num(tick.y))
                    .attr("stroke", "#e5e7eb"),
            );
        }
        plot = plot.child(svg_text(-6.0, tick.y + 3.0, "end", &muted, format_value((tick.value * 100.0).round() / 100.0)));
    }

    if let Some(longest) = chart.series.iter().max_by_key(|s| s.values.len()) {
        for (slot, point) in g.slots.iter().zip(&longest.values) {
            plot = plot.child(svg_text(*slot, plot_h + 14.0, "middle", &muted, format_value(point.x)));
        }
    }

    for geometry in &g.series {
        let source = &chart.series[geometry.index];
        let color = pick_color(geometry.index, source.color.as_deref(), &[], &ctx.theme.chart_palette).to_hex();
        plot = plot.child(
            HtmlElement::new("path")
                .attr("d", geometry.polyline().to_svg())
                .attr("fill", "none")
                .attr("stroke", color.clone())
                .attr("stroke-width", "2"),
        );
        if chart.show_points {
            for p in &geometry.points {
                plot = plot.child(
                    HtmlElement::new("circle")
                        .attr("cx", num(p.x))
                        .attr("cy", num(p.y))
                        .attr("r", "3")
                        .attr("fill", color.clone()),
                );
            }
        }
    }

    let mut frame = frame.child(svg(width, height).child(plot));
    if chart.series.len() > 1 {
        let legend = chart.series.iter().enumerate().map(|(i, s)| {
            let color = pick_color(i, s.color.as_deref(), &[], &ctx.theme.chart_palette);
            HtmlNode::from(
                HtmlElement::new("span")
                    .style("margin-right", "12px")
                    .style("font-size", px(LABEL_FONT_SIZE))
                    .child(
                        HtmlElement::new("span")
                            .style("display", "inline-block")
                            .style("width", "10px")
                            .style("height", "10px")
                            .style("margin-right", "4px")
                            .style("background-color", color.to_hex()),
                    )
                    .text(s.label.clone()),
            )
        });
        frame = frame.child(HtmlElement::new("div").attr("class", "quire-chart-legend").children(legend));
    }
    frame.into()
}
