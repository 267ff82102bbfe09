use crate::blocks::{px, wrapper};
use crate::node::{HtmlElement, HtmlNode};
use quire_model::{KeyValue, KeyValueLayout, Table};
use quire_render_core::RenderContext;
use quire_render_core::presets::{BODY_FONT_SIZE, DEFAULT_BLOCK_GAP, table_rows};
use quire_types::Color;

const CELL_PADDING: &str = "6px 8px";

pub(crate) fn table(table: &Table, ctx: &RenderContext<'_>) -> HtmlNode {
    let theme = ctx.theme;
    let header_style = table.header_style.clone().unwrap_or_default();
    let cell_style = table.cell_style.clone().unwrap_or_default();

    let header_bg = ctx.color(header_style.background_color.as_deref(), theme.primary);
    let header_fg = ctx.color(header_style.color.as_deref(), Color::WHITE);
    let header_weight = if header_style.bold.unwrap_or(true) { "700" } else { "400" };
    let cell_fg = ctx.color(cell_style.color.as_deref(), theme.text);
    let border = ctx.color(cell_style.border_color.as_deref(), Color::gray(0xe5));
    let border_css = format!("1px solid {}", border.to_hex());
    let stripe = table
        .alternate_row_color
        .as_deref()
        .map(|c| ctx.color(Some(c), theme.background));

    let header_row = HtmlElement::new("tr").children(table.headers.iter().map(|h| {
        HtmlNode::from(
            HtmlElement::new("th")
                .style("background-color", header_bg.to_hex())
                .style("color", header_fg.to_hex())
                .style("font-weight", header_weight)
                .style("text-align", "left")
                .style("padding", CELL_PADDING)
                .style("border", border_css.clone())
                .text(h.clone()),
        )
    }));

    let body_rows = table_rows(table).into_iter().enumerate().map(|(i, row)| {
        let mut tr = HtmlElement::new("tr");
        if let Some(stripe) = stripe.filter(|_| i % 2 == 1) {
            tr.set_style("background-color", stripe.to_hex());
        }
        let cells = row.iter().map(|cell| {
            HtmlNode::from(
                HtmlElement::new("td")
                    .style("color", cell_fg.to_hex())
                    .style("padding", CELL_PADDING)
                    .style("border", border_css.clone())
                    .text(cell.clone()),
            )
        });
        HtmlNode::from(tr.children(cells.collect::<Vec<_>>()))
    });

    let t = HtmlElement::new("table")
        .style("border-collapse", "collapse")
        .style("width", "100%")
        .style("font-size", px(cell_style.font_size.unwrap_or(BODY_FONT_SIZE)))
        .child(HtmlElement::new("thead").child(header_row))
        .child(HtmlElement::new("tbody").children(body_rows));
    wrapper("table", ctx, DEFAULT_BLOCK_GAP).child(t).into()
}

fn key_value_pair(key: &str, value: &str, ctx: &RenderContext<'_>) -> [HtmlElement; 2] {
    [
        HtmlElement::new("dt")
            .style("font-weight", "600")
            .style("color", ctx.theme.muted.to_hex())
            .text(key),
        HtmlElement::new("dd")
            .style("margin", "0")
            .style("color", ctx.theme.text.to_hex())
            .text(value),
    ]
}

pub(crate) fn key_value(kv: &KeyValue, ctx: &RenderContext<'_>) -> HtmlNode {
    let pairs = kv.items.iter().map(|item| key_value_pair(&item.key, &item.value, ctx));
    let dl = HtmlElement::new("dl")
        .attr("data-layout", kv.layout.as_str())
        .style("margin", "0")
        .style("font-size", px(BODY_FONT_SIZE));

    let dl = match kv.layout {
        KeyValueLayout::Vertical => dl
            .style("display", "grid")
            .style("grid-template-columns", "minmax(120px, max-content) 1fr")
            .style("gap", "4px 16px")
            .children(pairs.flatten().map(HtmlNode::from)),
        KeyValueLayout::Horizontal | KeyValueLayout::Grid => {
            let dl = if kv.layout == KeyValueLayout::Grid {
                dl.style("display", "grid")
                    .style("grid-template-columns", "repeat(3, 1fr)")
                    .style("gap", "12px")
            } else {
                dl.style("display", "flex")
                    .style("flex-wrap", "wrap")
                    .style("gap", "24px")
            };
            dl.children(pairs.map(|[dt, dd]| HtmlNode::from(HtmlElement::new("div").child(dt).child(dd))))
        }
    };
    wrapper("keyValue", ctx, DEFAULT_BLOCK_GAP).child(dl).into()
}
