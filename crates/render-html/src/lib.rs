//! Interactive back-end.
//!
//! Projects a document onto a tree of [`HtmlNode`]s for the editing surface.
//! Every element wrapper carries `data-element-type`, and `data-element-id`
//! when the element has an id, so the editor can map clicks back to the
//! instruction tree.

mod blocks;
mod charts;
mod data;
mod inline;
mod node;
mod options;

pub use inline::inline_nodes;
pub use node::{HtmlElement, HtmlNode};
pub use options::InteractiveOptions;

use log::debug;
use quire_model::Document;
use quire_render_core::{DispatchTable, RenderContext, ResolvedTheme, ThemeDefaults, project};

/// Class added to the wrapper of the selected element.
pub const SELECTED_CLASS: &str = "quire-selected";

const PAGE_BREAK_CLASS: &str = "quire-page-break";

/// Screen defaults for theme fields the document leaves out.
pub fn screen_theme_defaults() -> ThemeDefaults {
    ThemeDefaults::default().with_font_family("Inter, system-ui, sans-serif")
}

/// The interactive renderer for every element tag.
pub fn interactive_table() -> DispatchTable<HtmlNode> {
    DispatchTable {
        section: blocks::section,
        columns: blocks::columns,
        heading: blocks::heading,
        paragraph: blocks::paragraph,
        list: blocks::list,
        caption: blocks::caption,
        callout: blocks::callout,
        code_block: blocks::code_block,
        table: data::table,
        key_value: data::key_value,
        bar_chart: charts::bar_chart,
        pie_chart: charts::pie_chart,
        line_chart: charts::line_chart,
        image: blocks::image,
        divider: blocks::divider,
        spacer: blocks::spacer,
        page_break: blocks::page_break,
        unknown: blocks::unknown,
    }
}

/// Renders the document body as a fragment tree.
///
/// The same document and options always produce the same tree.
pub fn render_interactive(doc: &Document, options: &InteractiveOptions) -> Vec<HtmlNode> {
    let theme = ResolvedTheme::resolve(&doc.theme, &screen_theme_defaults());
    let width = doc.page_settings.content_width();
    let ctx = RenderContext::root(&theme, width);
    let mut nodes = project(&doc.content, &ctx, &interactive_table());

    if !options.show_page_breaks {
        strip_page_breaks(&mut nodes);
    }
    if let Some(id) = options.selected_id.as_deref() {
        let outline = format!("2px solid {}", theme.primary.to_hex());
        if !nodes.iter_mut().any(|n| mark_selected(n, id, &outline)) {
            debug!("Selected element '{}' is not in the document", id);
        }
    }
    nodes
}

fn strip_page_breaks(nodes: &mut Vec<HtmlNode>) {
    nodes.retain(|n| !n.as_element().is_some_and(|el| el.has_class(PAGE_BREAK_CLASS)));
    for node in nodes.iter_mut() {
        if let Some(el) = node.as_element_mut() {
            strip_page_breaks(&mut el.children);
        }
    }
}

fn mark_selected(node: &mut HtmlNode, id: &str, outline: &str) -> bool {
    let Some(el) = node.as_element_mut() else {
        return false;
    };
    if el.get_attr("data-element-id") == Some(id) {
        let class = match el.get_attr("class") {
            Some(existing) => format!("{} {}", existing, SELECTED_CLASS),
            None => SELECTED_CLASS.to_string(),
        };
        el.set_attr("class", class);
        el.set_style("outline", outline);
        el.set_style("outline-offset", "2px");
        return true;
    }
    el.children.iter_mut().any(|c| mark_selected(c, id, outline))
}

/// The standalone preview page as a node tree: the rendered fragment inside
/// a page-sized container.
fn preview_page(doc: &Document, options: &InteractiveOptions) -> HtmlNode {
    let theme = ResolvedTheme::resolve(&doc.theme, &screen_theme_defaults());
    let page = doc.page_settings.page_size();
    let margins = doc.page_settings.margins;

    let container = HtmlElement::new("div")
        .attr("class", "quire-page")
        .style("width", format!("{}px", page.width))
        .style("min-height", format!("{}px", page.height))
        .style("box-sizing", "border-box")
        .style(
            "padding",
            format!("{}px {}px {}px {}px", margins.top, margins.right, margins.bottom, margins.left),
        )
        .style("margin", "24px auto")
        .style("background-color", theme.background.to_hex())
        .style("color", theme.text.to_hex())
        .style("font-family", theme.font_family.clone())
        .children(render_interactive(doc, options));

    let head = HtmlElement::new("head")
        .child(HtmlElement::new("meta").attr("charset", "utf-8"))
        .child(HtmlElement::new("title").text(doc.metadata.title.clone()));
    let body = HtmlElement::new("body")
        .style("margin", "0")
        .style("background-color", "#f3f4f6")
        .child(container);

    HtmlElement::new("html").child(head).child(body).into()
}

/// A standalone HTML page showing the document at page width.
pub fn render_preview_html(doc: &Document, options: &InteractiveOptions) -> String {
    format!("<!DOCTYPE html>\n{}\n", preview_page(doc, options).to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_model::{parse_document, validate_document};
    use serde_json::json;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn doc(content: serde_json::Value) -> Document {
        validate_document(&json!({ "metadata": { "title": "T" }, "content": content })).unwrap()
    }

    #[test]
    fn wrappers_carry_element_identity() {
        let d = doc(json!([
            { "type": "heading", "id": "h1", "level": 1, "content": "Title" },
            { "type": "paragraph", "content": "no id" }
        ]));
        let nodes = render_interactive(&d, &InteractiveOptions::default());
        assert_eq!(nodes.len(), 2);
        let heading = nodes[0].as_element().unwrap();
        assert_eq!(heading.get_attr("data-element-id"), Some("h1"));
        assert_eq!(heading.get_attr("data-element-type"), Some("heading"));
        assert_eq!(nodes[1].as_element().unwrap().get_attr("data-element-id"), None);
    }

    #[test]
    fn selection_outlines_nested_element_only() {
        let d = doc(json!([
            { "type": "section", "id": "s", "children": [
                { "type": "paragraph", "id": "p", "content": "inner" }
            ]}
        ]));
        let nodes = render_interactive(&d, &InteractiveOptions::default().with_selected("p"));
        let section = nodes[0].as_element().unwrap();
        assert!(!section.has_class(SELECTED_CLASS));
        let paragraph = nodes[0].find_by_element_id("p").unwrap();
        assert!(paragraph.has_class(SELECTED_CLASS));
        assert_eq!(paragraph.get_style("outline"), Some("2px solid #2563eb"));
    }

    #[test]
    fn empty_bar_chart_shows_placeholder() {
        init_logger();
        let d = doc(json!([{ "type": "barChart", "data": [] }]));
        let nodes = render_interactive(&d, &InteractiveOptions::default());
        let empty = nodes[0].find(&|el| el.has_class("quire-chart-empty")).unwrap();
        assert_eq!(HtmlNode::from(empty.clone()).text_content(), "No data");
    }

    #[test]
    fn columns_split_by_weight() {
        let d = doc(json!([{ "type": "columns", "columns": [
            { "width": 1, "children": [] },
            { "width": 2, "children": [] },
            { "width": 1, "children": [] }
        ]}]));
        let nodes = render_interactive(&d, &InteractiveOptions::default());
        let row = nodes[0].as_element().unwrap();
        let flex: Vec<&str> = row
            .children
            .iter()
            .filter_map(|c| c.as_element()?.get_style("flex"))
            .collect();
        assert_eq!(flex, vec!["0 1 25%", "0 1 50%", "0 1 25%"]);
    }

    #[test]
    fn section_styles_stay_on_section_wrapper() {
        let d = doc(json!([{
            "type": "section", "id": "s", "backgroundColor": "#fafafa",
            "padding": { "top": 10, "right": 10, "bottom": 10, "left": 10 },
            "children": [{ "type": "columns", "columns": [
                { "width": 1, "children": [{
                    "type": "table", "id": "t", "headers": ["A", "B"], "rows": [["1", "2"]],
                    "headerStyle": { "backgroundColor": "#111111", "color": "#eeeeee" },
                    "cellStyle": { "color": "#333333" }
                }]}
            ]}]
        }]));
        let nodes = render_interactive(&d, &InteractiveOptions::default());
        let section = nodes[0].as_element().unwrap();
        assert_eq!(section.get_style("background-color"), Some("#fafafa"));
        assert_eq!(section.get_style("padding"), Some("10px 10px 10px 10px"));

        let table = nodes[0].find_by_element_id("t").unwrap();
        assert_eq!(table.get_style("background-color"), None);
        assert_eq!(table.get_style("padding"), None);
        let th = HtmlNode::from(table.clone()).find(&|el| el.tag == "th").cloned().unwrap();
        assert_eq!(th.get_style("background-color"), Some("#111111"));
        assert_eq!(th.get_style("color"), Some("#eeeeee"));
        let td = HtmlNode::from(table.clone()).find(&|el| el.tag == "td").cloned().unwrap();
        assert_eq!(td.get_style("color"), Some("#333333"));
    }

    #[test]
    fn page_break_markers_can_be_hidden() {
        let d = doc(json!([
            { "type": "paragraph", "content": "a" },
            { "type": "pageBreak" },
            { "type": "paragraph", "content": "b" }
        ]));
        assert_eq!(render_interactive(&d, &InteractiveOptions::default()).len(), 3);
        let hidden = render_interactive(&d, &InteractiveOptions::default().with_page_breaks(false));
        assert_eq!(hidden.len(), 2);
    }

    #[test]
    fn projection_is_deterministic() {
        let d = Document::default_template();
        let options = InteractiveOptions::default().with_selected("x");
        assert_eq!(render_interactive(&d, &options), render_interactive(&d, &options));
    }

    #[test]
    fn unknown_elements_render_placeholder() {
        init_logger();
        let value = json!([{ "type": "hologram" }, { "type": "divider" }]);
        let content = quire_model::load_content_lenient(&value).unwrap();
        let mut d = Document::default_template();
        d.content = content;
        let nodes = render_interactive(&d, &InteractiveOptions::default());
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].text_content().contains("Unsupported element: hologram"));
    }

    #[test]
    fn preview_is_a_standalone_page() {
        let d = parse_document(r#"{"metadata":{"title":"Q&A"},"content":[{"type":"paragraph","content":"**hi**"}]}"#).unwrap();
        let html = render_preview_html(&d, &InteractiveOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Q&amp;A</title>"));
        assert!(html.contains("<strong>hi</strong>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn preview_container_holds_the_fragment() {
        let d = doc(json!([
            { "type": "heading", "id": "h", "level": 1, "content": "Top" },
            { "type": "paragraph", "id": "p", "content": "</div>" }
        ]));
        let page = preview_page(&d, &InteractiveOptions::default());
        let container = page.find(&|el| el.has_class("quire-page")).unwrap();
        assert_eq!(container.children.len(), 2);
        let ids: Vec<_> = container
            .children
            .iter()
            .filter_map(|c| c.as_element()?.get_attr("data-element-id"))
            .collect();
        assert_eq!(ids, vec!["h", "p"]);
        assert!(page.to_html().contains("&lt;/div&gt;"));
    }
}
