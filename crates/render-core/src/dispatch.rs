//! Projects an element tree onto one back-end through that back-end's
//! [`DispatchTable`].
//!
//! Composites are handled here: the dispatcher renders nested sequences
//! first, then hands the opaque child outputs to the back-end's section or
//! columns renderer. Leaf renderers never recurse.

use crate::context::RenderContext;
use crate::fallback::RenderFallback;
use crate::presets::{DEFAULT_COLUMN_GAP, column_fractions};
use log::debug;
use quire_model::*;

pub type LeafFn<T, O> = for<'a> fn(&T, &RenderContext<'a>) -> O;

/// The rendered children of one column slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOutput<O> {
    /// Share of the row width, `0.0..=1.0`.
    pub fraction: f32,
    pub children: Vec<O>,
}

/// One function per element tag. Adding a tag means adding a field here and
/// filling it in each back-end.
pub struct DispatchTable<O> {
    pub section: for<'a> fn(&Section, Vec<O>, &RenderContext<'a>) -> O,
    pub columns: for<'a> fn(&Columns, Vec<ColumnOutput<O>>, &RenderContext<'a>) -> O,
    pub heading: LeafFn<Heading, O>,
    pub paragraph: LeafFn<Paragraph, O>,
    pub list: LeafFn<ListBlock, O>,
    pub caption: LeafFn<Caption, O>,
    pub callout: LeafFn<Callout, O>,
    pub code_block: LeafFn<CodeBlock, O>,
    pub table: LeafFn<Table, O>,
    pub key_value: LeafFn<KeyValue, O>,
    pub bar_chart: LeafFn<BarChart, O>,
    pub pie_chart: LeafFn<PieChart, O>,
    pub line_chart: LeafFn<LineChart, O>,
    pub image: LeafFn<Image, O>,
    pub divider: LeafFn<Divider, O>,
    pub spacer: LeafFn<Spacer, O>,
    pub page_break: for<'a> fn(&RenderContext<'a>) -> O,
    pub unknown: LeafFn<UnknownElement, O>,
}

/// Width left inside a section after its padding and border.
pub fn section_inner_width(section: &Section, width: f32) -> f32 {
    let padding = section.padding.map_or(0.0, |p| p.horizontal());
    let border = section
        .border
        .as_ref()
        .filter(|b| b.is_visible())
        .map_or(0.0, |b| b.width * 2.0);
    (width - padding - border).max(0.0)
}

/// Renders a sequence of elements in order.
pub fn project<O>(tree: &[Element], ctx: &RenderContext<'_>, table: &DispatchTable<O>) -> Vec<O> {
    tree.iter()
        .map(|element| project_element(element, ctx, table))
        .collect()
}

/// Renders one element, recursing through [`project`] for composites.
pub fn project_element<O>(
    element: &Element,
    parent: &RenderContext<'_>,
    table: &DispatchTable<O>,
) -> O {
    let ctx = parent.for_element(element);
    match &element.kind {
        ElementKind::Section(section) => {
            let inner = ctx.nested(section_inner_width(section, ctx.width));
            let children = project(&section.children, &inner, table);
            (table.section)(section, children, &ctx)
        }
        ElementKind::Columns(columns) => {
            let weights: Vec<f32> = columns.columns.iter().map(|c| c.width).collect();
            let fractions = column_fractions(&weights);
            let gap = columns.gap.unwrap_or(DEFAULT_COLUMN_GAP);
            let gaps = gap * columns.columns.len().saturating_sub(1) as f32;
            let usable = (ctx.width - gaps).max(0.0);
            debug!(
                "Projecting {} columns at depth {} with fractions {:?}",
                columns.columns.len(),
                ctx.depth,
                fractions
            );
            let outputs = columns
                .columns
                .iter()
                .zip(fractions)
                .map(|(column, fraction)| {
                    let inner = ctx.nested(usable * fraction);
                    ColumnOutput {
                        fraction,
                        children: project(&column.children, &inner, table),
                    }
                })
                .collect();
            (table.columns)(columns, outputs, &ctx)
        }
        ElementKind::Heading(e) => (table.heading)(e, &ctx),
        ElementKind::Paragraph(e) => (table.paragraph)(e, &ctx),
        ElementKind::List(e) => (table.list)(e, &ctx),
        ElementKind::Caption(e) => (table.caption)(e, &ctx),
        ElementKind::Callout(e) => (table.callout)(e, &ctx),
        ElementKind::CodeBlock(e) => (table.code_block)(e, &ctx),
        ElementKind::Table(e) => (table.table)(e, &ctx),
        ElementKind::KeyValue(e) => (table.key_value)(e, &ctx),
        ElementKind::BarChart(e) => (table.bar_chart)(e, &ctx),
        ElementKind::PieChart(e) => (table.pie_chart)(e, &ctx),
        ElementKind::LineChart(e) => (table.line_chart)(e, &ctx),
        ElementKind::Image(e) => (table.image)(e, &ctx),
        ElementKind::Divider(e) => (table.divider)(e, &ctx),
        ElementKind::Spacer(e) => (table.spacer)(e, &ctx),
        ElementKind::PageBreak => (table.page_break)(&ctx),
        ElementKind::Unknown(e) => {
            RenderFallback::UnknownElement {
                tag: e.tag.clone(),
                reason: e.reason.clone(),
            }
            .report();
            (table.unknown)(e, &ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ResolvedTheme, ThemeDefaults};
    use quire_style::{Margins, Theme};
    use serde_json::json;

    /// A trace back-end: every renderer reports its tag, id and width.
    fn trace_table() -> DispatchTable<String> {
        fn leaf<T>() -> LeafFn<T, String> {
            |_, ctx| format!("{}@{}", ctx.element_id.unwrap_or("-"), ctx.width)
        }
        DispatchTable {
            section: |_, children, ctx| {
                format!("section@{}[{}]", ctx.width, children.join(","))
            },
            columns: |_, cols, _| {
                let parts: Vec<String> = cols
                    .into_iter()
                    .map(|c| format!("{}:{}", c.fraction, c.children.join(",")))
                    .collect();
                format!("columns[{}]", parts.join("|"))
            },
            heading: leaf(),
            paragraph: leaf(),
            list: leaf(),
            caption: leaf(),
            callout: leaf(),
            code_block: leaf(),
            table: leaf(),
            key_value: leaf(),
            bar_chart: leaf(),
            pie_chart: leaf(),
            line_chart: leaf(),
            image: leaf(),
            divider: leaf(),
            spacer: leaf(),
            page_break: |_| "break".to_string(),
            unknown: |u, _| format!("unknown({})", u.tag.as_deref().unwrap_or("?")),
        }
    }

    fn theme() -> ResolvedTheme {
        ResolvedTheme::resolve(&Theme::default(), &ThemeDefaults::default())
    }

    #[test]
    fn columns_receive_normalized_fractions_and_widths() {
        let content = vec![
            validate_element(&json!({
                "type": "columns", "gap": 0, "columns": [
                    { "width": 1, "children": [{ "id": "a", "type": "spacer", "height": 1 }] },
                    { "width": 2, "children": [{ "id": "b", "type": "spacer", "height": 1 }] },
                    { "width": 1, "children": [] }
                ]
            }))
            .unwrap(),
        ];
        let theme = theme();
        let out = project(&content, &RenderContext::root(&theme, 400.0), &trace_table());
        assert_eq!(out, vec!["columns[0.25:a@100|0.5:b@200|0.25:]".to_string()]);
    }

    #[test]
    fn section_padding_narrows_children() {
        let mut section = Section {
            children: vec![
                Element::new(ElementKind::PageBreak),
                default_element("divider").unwrap().with_id("d"),
            ],
            padding: Some(Margins::all(10.0)),
            ..Default::default()
        };
        section.border = Some(quire_style::Border { width: 2.0, ..Default::default() });
        let content = vec![Element::new(ElementKind::Section(section))];
        let theme = theme();
        let out = project(&content, &RenderContext::root(&theme, 300.0), &trace_table());
        assert_eq!(out, vec!["section@300[break,d@276]".to_string()]);
    }

    #[test]
    fn unknown_elements_use_the_placeholder_renderer() {
        let _ = env_logger::builder().is_test(true).try_init();
        let content = load_content_lenient(&json!([{ "type": "hologram" }])).unwrap();
        let theme = theme();
        let out = project(&content, &RenderContext::root(&theme, 100.0), &trace_table());
        assert_eq!(out, vec!["unknown(hologram)".to_string()]);
    }

    #[test]
    fn projection_is_deterministic() {
        let doc = Document::default_template();
        let theme = theme();
        let ctx = RenderContext::root(&theme, 500.0);
        let table = trace_table();
        assert_eq!(project(&doc.content, &ctx, &table), project(&doc.content, &ctx, &table));
    }
}
