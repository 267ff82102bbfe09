//! Containers, text blocks, media and markers.

use crate::inline::inline_nodes;
use crate::node::{HtmlElement, HtmlNode};
use quire_model::{
    Callout, CalloutVariant, Caption, CodeBlock, Columns, Divider, Heading, Image, ListBlock,
    Paragraph, Section, Spacer, UnknownElement,
};
use quire_render_core::presets::{
    BODY_FONT_SIZE, CAPTION_FONT_SIZE, CODE_FONT_SIZE, DEFAULT_BLOCK_GAP, DEFAULT_COLUMN_GAP,
    DEFAULT_DIVIDER_THICKNESS, LINE_HEIGHT, callout_colors, heading_font_size,
};
use quire_render_core::{ColumnOutput, RenderContext};
use quire_style::{BorderStyle, TextAlign};
use quire_types::Color;

pub(crate) fn px(value: f32) -> String {
    format!("{}px", value)
}

pub(crate) fn percent(fraction: f32) -> String {
    format!("{}%", (fraction * 10000.0).round() / 100.0)
}

/// The per-element wrapper: carries identity, tag and bottom spacing.
pub(crate) fn wrapper(tag: &str, ctx: &RenderContext<'_>, default_gap: f32) -> HtmlElement {
    let mut el = HtmlElement::new("div")
        .attr("class", format!("quire-element quire-{}", tag))
        .attr("data-element-type", tag);
    if let Some(id) = ctx.element_id {
        el.set_attr("data-element-id", id);
    }
    el.style("margin-bottom", px(ctx.margin_bottom.unwrap_or(default_gap)))
}

fn with_align(el: HtmlElement, align: Option<TextAlign>) -> HtmlElement {
    match align {
        Some(align) => el.style("text-align", align.as_css()),
        None => el,
    }
}

// --- Composites ---

pub(crate) fn section(section: &Section, children: Vec<HtmlNode>, ctx: &RenderContext<'_>) -> HtmlNode {
    let theme = ctx.theme;
    let mut el = wrapper("section", ctx, DEFAULT_BLOCK_GAP);
    if section.background_color.is_some() {
        let bg = ctx.color(section.background_color.as_deref(), theme.background);
        el.set_style("background-color", bg.to_hex());
    }
    if let Some(p) = section.padding {
        el.set_style(
            "padding",
            format!("{} {} {} {}", px(p.top), px(p.right), px(p.bottom), px(p.left)),
        );
    }
    if let Some(border) = section.border.as_ref().filter(|b| b.is_visible()) {
        let color = ctx.color(border.color.as_deref(), theme.muted);
        el.set_style(
            "border",
            format!("{} {} {}", px(border.width), border.style.as_css(), color.to_hex()),
        );
        if let Some(radius) = border.radius {
            el.set_style("border-radius", px(radius));
        }
    }
    if let Some(title) = &section.title {
        el = el.child(
            HtmlElement::new("h3")
                .attr("class", "quire-section-title")
                .style("color", theme.primary.to_hex())
                .style("margin", "0 0 8px 0")
                .children(inline_nodes(title)),
        );
    }
    el.children(children).into()
}

pub(crate) fn columns(
    columns: &Columns,
    outputs: Vec<ColumnOutput<HtmlNode>>,
    ctx: &RenderContext<'_>,
) -> HtmlNode {
    let gap = columns.gap.unwrap_or(DEFAULT_COLUMN_GAP);
    let row = wrapper("columns", ctx, DEFAULT_BLOCK_GAP)
        .style("display", "flex")
        .style("gap", px(gap));
    row.children(outputs.into_iter().map(|output| {
        HtmlNode::from(
            HtmlElement::new("div")
                .attr("class", "quire-column")
                .style("flex", format!("0 1 {}", percent(output.fraction)))
                .style("min-width", "0")
                .children(output.children),
        )
    }))
    .into()
}

// --- Text ---

pub(crate) fn heading(heading: &Heading, ctx: &RenderContext<'_>) -> HtmlNode {
    let level = heading.level.clamp(1, 6);
    let h = HtmlElement::new(format!("h{}", level))
        .style("color", ctx.color(heading.color.as_deref(), ctx.theme.text).to_hex())
        .style("font-size", px(heading_font_size(level)))
        .style("margin", "0")
        .children(inline_nodes(&heading.content));
    wrapper("heading", ctx, DEFAULT_BLOCK_GAP)
        .child(with_align(h, heading.align))
        .into()
}

pub(crate) fn paragraph(paragraph: &Paragraph, ctx: &RenderContext<'_>) -> HtmlNode {
    let p = HtmlElement::new("p")
        .style("color", ctx.color(paragraph.color.as_deref(), ctx.theme.text).to_hex())
        .style("font-size", px(paragraph.font_size.unwrap_or(BODY_FONT_SIZE)))
        .style("line-height", LINE_HEIGHT.to_string())
        .style("margin", "0")
        .children(inline_nodes(&paragraph.content));
    wrapper("paragraph", ctx, DEFAULT_BLOCK_GAP)
        .child(with_align(p, paragraph.align))
        .into()
}

pub(crate) fn list(list: &ListBlock, ctx: &RenderContext<'_>) -> HtmlNode {
    let tag = if list.ordered { "ol" } else { "ul" };
    let items = list
        .items
        .iter()
        .map(|item| HtmlNode::from(HtmlElement::new("li").children(inline_nodes(item))));
    let l = HtmlElement::new(tag)
        .style("color", ctx.color(list.color.as_deref(), ctx.theme.text).to_hex())
        .style("font-size", px(BODY_FONT_SIZE))
        .style("margin", "0")
        .children(items);
    wrapper("list", ctx, DEFAULT_BLOCK_GAP).child(l).into()
}

pub(crate) fn caption(caption: &Caption, ctx: &RenderContext<'_>) -> HtmlNode {
    let p = HtmlElement::new("p")
        .style("color", ctx.color(caption.color.as_deref(), ctx.theme.muted).to_hex())
        .style("font-size", px(CAPTION_FONT_SIZE))
        .style("font-style", "italic")
        .style("margin", "0")
        .children(inline_nodes(&caption.content));
    wrapper("caption", ctx, DEFAULT_BLOCK_GAP)
        .child(with_align(p, caption.align))
        .into()
}

pub(crate) fn callout(callout: &Callout, ctx: &RenderContext<'_>) -> HtmlNode {
    let (accent, tint) = callout_colors(callout.variant);
    let tag = if callout.variant == CalloutVariant::Quote { "blockquote" } else { "div" };
    let mut body = HtmlElement::new(tag)
        .attr("data-variant", callout.variant.as_str())
        .style("border-left", format!("4px solid {}", accent.to_hex()))
        .style("background-color", tint.to_hex())
        .style("padding", "10px 14px")
        .style("margin", "0");
    if let Some(title) = &callout.title {
        body = body.child(
            HtmlElement::new("div")
                .attr("class", "quire-callout-title")
                .style("font-weight", "600")
                .style("color", accent.to_hex())
                .children(inline_nodes(title)),
        );
    }
    let content = HtmlElement::new("div")
        .style("color", ctx.theme.text.to_hex())
        .style("font-size", px(BODY_FONT_SIZE))
        .children(inline_nodes(&callout.content));
    wrapper("callout", ctx, DEFAULT_BLOCK_GAP)
        .child(body.child(content))
        .into()
}

pub(crate) fn code_block(block: &CodeBlock, ctx: &RenderContext<'_>) -> HtmlNode {
    let mut code = HtmlElement::new("code");
    if let Some(language) = &block.language {
        code.set_attr("class", format!("language-{}", language));
    }
    if block.show_line_numbers {
        let lines: Vec<&str> = block.code.lines().collect();
        let digits = lines.len().to_string().len();
        for (i, line) in lines.iter().enumerate() {
            code = code
                .child(
                    HtmlElement::new("span")
                        .attr("class", "quire-line-number")
                        .style("color", ctx.theme.muted.to_hex())
                        .style("user-select", "none")
                        .text(format!("{:>width$}  ", i + 1, width = digits)),
                )
                .text(format!("{}\n", line));
        }
    } else {
        code = code.text(block.code.clone());
    }
    let pre = HtmlElement::new("pre")
        .style("background-color", Color::gray(0xf3).to_hex())
        .style("padding", "10px 12px")
        .style("font-family", "ui-monospace, Menlo, monospace")
        .style("font-size", px(CODE_FONT_SIZE))
        .style("overflow-x", "auto")
        .style("margin", "0")
        .child(code);
    wrapper("codeBlock", ctx, DEFAULT_BLOCK_GAP).child(pre).into()
}

// --- Media and spacing ---

pub(crate) fn image(image: &Image, ctx: &RenderContext<'_>) -> HtmlNode {
    let mut img = HtmlElement::new("img")
        .attr("src", image.src.clone())
        .attr("alt", image.alt.clone().unwrap_or_default())
        .style("max-width", "100%");
    if let Some(w) = image.width {
        img.set_style("width", px(w));
    }
    if let Some(h) = image.height {
        img.set_style("height", px(h));
    }
    with_align(wrapper("image", ctx, DEFAULT_BLOCK_GAP), image.align)
        .child(img)
        .into()
}

pub(crate) fn divider(divider: &Divider, ctx: &RenderContext<'_>) -> HtmlNode {
    let style = divider.style.unwrap_or(BorderStyle::Solid);
    let color = ctx.color(divider.color.as_deref(), ctx.theme.muted);
    let hr = HtmlElement::new("hr")
        .style("border", "none")
        .style(
            "border-top",
            format!(
                "{} {} {}",
                px(divider.thickness.unwrap_or(DEFAULT_DIVIDER_THICKNESS)),
                style.as_css(),
                color.to_hex()
            ),
        )
        .style("margin", "0");
    wrapper("divider", ctx, DEFAULT_BLOCK_GAP).child(hr).into()
}

pub(crate) fn spacer(spacer: &Spacer, ctx: &RenderContext<'_>) -> HtmlNode {
    wrapper("spacer", ctx, 0.0)
        .style("height", px(spacer.height))
        .into()
}

pub(crate) fn page_break(ctx: &RenderContext<'_>) -> HtmlNode {
    let mut el = wrapper("pageBreak", ctx, DEFAULT_BLOCK_GAP);
    el.set_attr("class", "quire-element quire-pageBreak quire-page-break");
    el.style("border-top", format!("1px dashed {}", ctx.theme.muted.to_hex()))
        .style("text-align", "center")
        .child(
            HtmlElement::new("span")
                .style("font-size", "10px")
                .style("color", ctx.theme.muted.to_hex())
                .text("Page break"),
        )
        .into()
}

pub(crate) fn unknown(unknown: &UnknownElement, ctx: &RenderContext<'_>) -> HtmlNode {
    let tag = unknown.tag.as_deref().unwrap_or("unknown");
    wrapper("unknown", ctx, DEFAULT_BLOCK_GAP)
        .attr("title", unknown.reason.clone())
        .style("border", "1px dashed #dc2626")
        .style("padding", "8px")
        .style("color", "#dc2626")
        .text(format!("Unsupported element: {}", tag))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_two_decimals() {
        assert_eq!(percent(0.25), "25%");
        assert_eq!(percent(1.0 / 3.0), "33.33%");
    }
}
