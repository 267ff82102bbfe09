//! Print renderers for containers, text, data and media.

use crate::node::{
    BoxBorder, Drawing, FontFamily, PrintBlock, PrintColumn, PrintKind, PrintNode, PrintRow,
    PrintTable, Rule, Shape, TextAnchor, TextBlock, TextRun,
};
use log::warn;
use quire_model::{
    Callout, Caption, CodeBlock, Columns, Divider, Heading, Image, KeyValue, KeyValueLayout,
    ListBlock, Paragraph, Section, Spacer, Table, UnknownElement,
};
use quire_render_core::presets::{
    BODY_FONT_SIZE, CAPTION_FONT_SIZE, CODE_FONT_SIZE, DEFAULT_BLOCK_GAP, DEFAULT_COLUMN_GAP,
    DEFAULT_DIVIDER_THICKNESS, LINE_HEIGHT, callout_colors, heading_font_size, table_rows,
};
use quire_render_core::{ColumnOutput, RenderContext};
use quire_richtext::{InlineKind, tokenize};
use quire_style::{BorderStyle, FontStyle, FontWeight, Margins, TextAlign};
use quire_chart::PathSegment;
use quire_types::{Color, Point, Size};

const KEY_VALUE_GRID_COLUMNS: usize = 3;

pub(crate) fn family(ctx: &RenderContext<'_>) -> FontFamily {
    FontFamily::from_css(&ctx.theme.font_family)
}

fn gap(ctx: &RenderContext<'_>, default_gap: f32) -> f32 {
    ctx.margin_bottom.unwrap_or(default_gap)
}

/// Rich text as styled runs. Links take `link_color`.
pub fn inline_runs(text: &str, link_color: Color) -> Vec<TextRun> {
    tokenize(text)
        .into_iter()
        .map(|token| {
            let mut run = TextRun::plain(token.content);
            match token.kind {
                InlineKind::Text => {}
                InlineKind::Bold => run.weight = FontWeight::Bold,
                InlineKind::Italic => run.style = FontStyle::Italic,
                InlineKind::Code => run.monospace = true,
                InlineKind::Strikethrough => run.strikethrough = true,
                InlineKind::Link => {
                    run.href = token.href;
                    run.color = Some(link_color);
                }
            }
            run
        })
        .collect()
}

fn text_block(runs: Vec<TextRun>, font_size: f32, color: Color, ctx: &RenderContext<'_>) -> TextBlock {
    TextBlock {
        runs,
        family: family(ctx),
        font_size,
        line_height: LINE_HEIGHT,
        color,
        align: TextAlign::Left,
        marker: None,
        indent: 0.0,
    }
}

fn text_node(block: TextBlock, margin_bottom: f32) -> PrintNode {
    PrintNode::new(PrintKind::Text(block), margin_bottom)
}

// Composites

pub(crate) fn section(section: &Section, children: Vec<PrintNode>, ctx: &RenderContext<'_>) -> PrintNode {
    let theme = ctx.theme;
    let mut block = PrintBlock {
        padding: section.padding.unwrap_or_default(),
        ..PrintBlock::default()
    };
    if section.background_color.is_some() {
        block.background = Some(ctx.color(section.background_color.as_deref(), theme.background));
    }
    if let Some(border) = section.border.as_ref().filter(|b| b.is_visible()) {
        block.border = Some(BoxBorder {
            width: border.width,
            color: ctx.color(border.color.as_deref(), theme.muted),
            style: border.style,
        });
    }
    if let Some(title) = &section.title {
        let runs = inline_runs(title, theme.primary)
            .into_iter()
            .map(|r| r.bold(true))
            .collect();
        block.children.push(text_node(text_block(runs, heading_font_size(3), theme.primary, ctx), 8.0));
    }
    block.children.extend(children);
    PrintNode::new(PrintKind::Block(block), gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn columns(
    columns: &Columns,
    outputs: Vec<ColumnOutput<PrintNode>>,
    ctx: &RenderContext<'_>,
) -> PrintNode {
    let row = PrintRow {
        gap: columns.gap.unwrap_or(DEFAULT_COLUMN_GAP),
        columns: outputs
            .into_iter()
            .map(|output| PrintColumn {
                fraction: output.fraction,
                children: output.children,
            })
            .collect(),
    };
    PrintNode::new(PrintKind::Row(row), gap(ctx, DEFAULT_BLOCK_GAP))
}

// Text

pub(crate) fn heading(heading: &Heading, ctx: &RenderContext<'_>) -> PrintNode {
    let color = ctx.color(heading.color.as_deref(), ctx.theme.text);
    let runs = inline_runs(&heading.content, ctx.theme.primary)
        .into_iter()
        .map(|r| r.bold(true))
        .collect();
    let mut block = text_block(runs, heading_font_size(heading.level.clamp(1, 6)), color, ctx);
    block.line_height = 1.2;
    block.align = heading.align.unwrap_or_default();
    text_node(block, gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn paragraph(paragraph: &Paragraph, ctx: &RenderContext<'_>) -> PrintNode {
    let color = ctx.color(paragraph.color.as_deref(), ctx.theme.text);
    let runs = inline_runs(&paragraph.content, ctx.theme.primary);
    let mut block = text_block(runs, paragraph.font_size.unwrap_or(BODY_FONT_SIZE), color, ctx);
    block.align = paragraph.align.unwrap_or_default();
    text_node(block, gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn list(list: &ListBlock, ctx: &RenderContext<'_>) -> PrintNode {
    let color = ctx.color(list.color.as_deref(), ctx.theme.text);
    let items = list
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut block = text_block(inline_runs(item, ctx.theme.primary), BODY_FONT_SIZE, color, ctx);
            block.marker = Some(if list.ordered { format!("{}.", i + 1) } else { "\u{2022}".to_string() });
            block.indent = 16.0;
            text_node(block, 3.0)
        })
        .collect();
    let block = PrintBlock {
        children: items,
        ..PrintBlock::default()
    };
    PrintNode::new(PrintKind::Block(block), gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn caption(caption: &Caption, ctx: &RenderContext<'_>) -> PrintNode {
    let color = ctx.color(caption.color.as_deref(), ctx.theme.muted);
    let runs = inline_runs(&caption.content, ctx.theme.primary)
        .into_iter()
        .map(|mut r| {
            r.style = FontStyle::Italic;
            r
        })
        .collect();
    let mut block = text_block(runs, CAPTION_FONT_SIZE, color, ctx);
    block.align = caption.align.unwrap_or_default();
    text_node(block, gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn callout(callout: &Callout, ctx: &RenderContext<'_>) -> PrintNode {
    let (accent, tint) = callout_colors(callout.variant);
    let mut children = Vec::new();
    if let Some(title) = &callout.title {
        let runs = inline_runs(title, accent).into_iter().map(|r| r.bold(true)).collect();
        children.push(text_node(text_block(runs, BODY_FONT_SIZE, accent, ctx), 4.0));
    }
    let runs = inline_runs(&callout.content, ctx.theme.primary);
    children.push(text_node(text_block(runs, BODY_FONT_SIZE, ctx.theme.text, ctx), 0.0));
    let block = PrintBlock {
        background: Some(tint),
        padding: Margins { top: 10.0, right: 14.0, bottom: 10.0, left: 18.0 },
        accent_bar: Some((accent, 4.0)),
        children,
        ..PrintBlock::default()
    };
    PrintNode::new(PrintKind::Block(block), gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn code_block(block: &CodeBlock, ctx: &RenderContext<'_>) -> PrintNode {
    let lines: Vec<&str> = block.code.lines().collect();
    let digits = lines.len().to_string().len();
    let children = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut runs = Vec::new();
            if block.show_line_numbers {
                runs.push(TextRun::plain(format!("{:>width$}  ", i + 1, width = digits)).colored(ctx.theme.muted));
            }
            runs.push(TextRun::plain(*line));
            let mut text = text_block(runs, CODE_FONT_SIZE, ctx.theme.text, ctx);
            text.family = FontFamily::Courier;
            text.line_height = 1.3;
            text_node(text, 0.0)
        })
        .collect();
    let block = PrintBlock {
        background: Some(Color::gray(0xf3)),
        padding: Margins { top: 10.0, right: 12.0, bottom: 10.0, left: 12.0 },
        children,
        ..PrintBlock::default()
    };
    PrintNode::new(PrintKind::Block(block), gap(ctx, DEFAULT_BLOCK_GAP))
}

// Data

pub(crate) fn table(table: &Table, ctx: &RenderContext<'_>) -> PrintNode {
    let theme = ctx.theme;
    let header_style = table.header_style.clone().unwrap_or_default();
    let cell_style = table.cell_style.clone().unwrap_or_default();
    let node = PrintTable {
        headers: table.headers.clone(),
        rows: table_rows(table).into_iter().map(|row| row.into_owned()).collect(),
        family: family(ctx),
        font_size: cell_style.font_size.unwrap_or(BODY_FONT_SIZE),
        header_background: ctx.color(header_style.background_color.as_deref(), theme.primary),
        header_color: ctx.color(header_style.color.as_deref(), Color::WHITE),
        header_bold: header_style.bold.unwrap_or(true),
        cell_color: ctx.color(cell_style.color.as_deref(), theme.text),
        border_color: ctx.color(cell_style.border_color.as_deref(), Color::gray(0xe5)),
        stripe: table
            .alternate_row_color
            .as_deref()
            .map(|c| ctx.color(Some(c), theme.background)),
    };
    PrintNode::new(PrintKind::Table(node), gap(ctx, DEFAULT_BLOCK_GAP))
}

fn key_value_text(key: &str, value: &str, ctx: &RenderContext<'_>) -> TextBlock {
    let runs = vec![
        TextRun::plain(format!("{}: ", key)).bold(true).colored(ctx.theme.muted),
        TextRun::plain(value),
    ];
    text_block(runs, BODY_FONT_SIZE, ctx.theme.text, ctx)
}

pub(crate) fn key_value(kv: &KeyValue, ctx: &RenderContext<'_>) -> PrintNode {
    let pair = |i: usize| {
        let item = &kv.items[i];
        text_node(key_value_text(&item.key, &item.value, ctx), 4.0)
    };
    let kind = match kv.layout {
        KeyValueLayout::Vertical => PrintKind::Block(PrintBlock {
            children: (0..kv.items.len()).map(pair).collect(),
            ..PrintBlock::default()
        }),
        KeyValueLayout::Horizontal => {
            let mut runs = Vec::new();
            for (i, item) in kv.items.iter().enumerate() {
                if i > 0 {
                    runs.push(TextRun::plain("    "));
                }
                runs.extend(key_value_text(&item.key, &item.value, ctx).runs);
            }
            PrintKind::Text(text_block(runs, BODY_FONT_SIZE, ctx.theme.text, ctx))
        }
        KeyValueLayout::Grid => {
            let columns = (0..KEY_VALUE_GRID_COLUMNS)
                .map(|c| PrintColumn {
                    fraction: 1.0 / KEY_VALUE_GRID_COLUMNS as f32,
                    children: (c..kv.items.len()).step_by(KEY_VALUE_GRID_COLUMNS).map(pair).collect(),
                })
                .collect();
            PrintKind::Row(PrintRow { gap: 12.0, columns })
        }
    };
    PrintNode::new(kind, gap(ctx, DEFAULT_BLOCK_GAP))
}

// Media and markers

/// Images are not fetched; the print output keeps their outlined box, placed
/// by `align` like the preview, with the alt text in the middle.
pub(crate) fn image(image: &Image, ctx: &RenderContext<'_>) -> PrintNode {
    warn!("Images are not embedded in print output yet: {}", image.src);
    let label = image.alt.clone().filter(|a| !a.trim().is_empty()).unwrap_or_else(|| image.src.clone());
    let width = image.width.map_or(ctx.width, |w| w.min(ctx.width)).max(1.0);
    let height = image.height.unwrap_or(80.0).max(CAPTION_FONT_SIZE * 2.0);
    let left = image_offset(image.align, ctx.width, width);
    let (right, bottom) = (left + width, height);

    let outline = vec![
        PathSegment::MoveTo(Point::new(left, 0.0)),
        PathSegment::LineTo(Point::new(right, 0.0)),
        PathSegment::LineTo(Point::new(right, bottom)),
        PathSegment::LineTo(Point::new(left, bottom)),
        PathSegment::Close,
    ];
    let shapes = vec![
        Shape::Path { segments: outline, fill: None, stroke: Some((ctx.theme.muted, 1.0)) },
        Shape::Label {
            at: Point::new(left + width / 2.0, height / 2.0 + CAPTION_FONT_SIZE * 0.35),
            text: label,
            font_size: CAPTION_FONT_SIZE,
            color: ctx.theme.muted,
            anchor: TextAnchor::Middle,
        },
    ];
    let drawing = Drawing { size: Size::new(ctx.width, height), shapes };
    PrintNode::new(PrintKind::Drawing(drawing), gap(ctx, DEFAULT_BLOCK_GAP))
}

/// Left edge of a box of `width` aligned within `available`.
fn image_offset(align: Option<TextAlign>, available: f32, width: f32) -> f32 {
    let free = (available - width).max(0.0);
    match align {
        Some(TextAlign::Center) => free / 2.0,
        Some(TextAlign::Right) => free,
        Some(TextAlign::Left | TextAlign::Justify) | None => 0.0,
    }
}

pub(crate) fn divider(divider: &Divider, ctx: &RenderContext<'_>) -> PrintNode {
    let rule = Rule {
        color: ctx.color(divider.color.as_deref(), ctx.theme.muted),
        thickness: divider.thickness.unwrap_or(DEFAULT_DIVIDER_THICKNESS),
        style: divider.style.unwrap_or(BorderStyle::Solid),
    };
    PrintNode::new(PrintKind::Rule(rule), gap(ctx, DEFAULT_BLOCK_GAP))
}

pub(crate) fn spacer(spacer: &Spacer, ctx: &RenderContext<'_>) -> PrintNode {
    PrintNode::new(PrintKind::Spacer(spacer.height.max(0.0)), gap(ctx, 0.0))
}

pub(crate) fn page_break(_ctx: &RenderContext<'_>) -> PrintNode {
    PrintNode::new(PrintKind::PageBreak, 0.0)
}

pub(crate) fn unknown(unknown: &UnknownElement, ctx: &RenderContext<'_>) -> PrintNode {
    let tag = unknown.tag.as_deref().unwrap_or("unknown");
    let error = Color::rgb(0xdc, 0x26, 0x26);
    let text = text_block(
        vec![TextRun::plain(format!("Unsupported element: {}", tag))],
        CAPTION_FONT_SIZE,
        error,
        ctx,
    );
    let block = PrintBlock {
        padding: Margins::all(6.0),
        border: Some(BoxBorder { width: 1.0, color: error, style: BorderStyle::Dashed }),
        children: vec![text_node(text, 0.0)],
        ..PrintBlock::default()
    };
    PrintNode::new(PrintKind::Block(block), gap(ctx, DEFAULT_BLOCK_GAP))
}
