mod common;

use common::fixtures::*;
use quire::{HtmlNode, InteractiveOptions, render_interactive, render_preview_html, validate_document};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_every_wrapper_keeps_its_element_id() {
    init_logger();
    let doc = validate_document(&document(json!([
        { "type": "section", "id": "intro", "children": [
            heading(2, "Welcome", Some("welcome")),
            { "type": "columns", "id": "cols", "columns": [
                { "width": 1, "children": [paragraph("left")] },
                { "width": 1, "children": [{ "type": "paragraph", "id": "right", "content": "right" }] }
            ]}
        ]}
    ])))
    .unwrap();

    let nodes = render_interactive(&doc, &InteractiveOptions::default());
    for id in ["intro", "welcome", "cols", "right"] {
        assert!(nodes[0].find_by_element_id(id).is_some(), "missing wrapper for {}", id);
    }
    let html = nodes[0].to_html();
    assert!(html.contains(r#"data-element-id="right""#));
}

#[test]
fn test_selection_moves_between_renders() {
    init_logger();
    let doc = validate_document(&document(json!([
        heading(1, "A", Some("a")),
        heading(1, "B", Some("b"))
    ])))
    .unwrap();

    let first = render_interactive(&doc, &InteractiveOptions::default().with_selected("a"));
    let second = render_interactive(&doc, &InteractiveOptions::default().with_selected("b"));
    assert!(first[0].as_element().unwrap().has_class("quire-selected"));
    assert!(!second[0].as_element().unwrap().has_class("quire-selected"));
    assert!(second[1].as_element().unwrap().has_class("quire-selected"));
}

#[test]
fn test_rendering_is_idempotent() {
    init_logger();
    let doc = validate_document(&document(json!([
        bar_chart(vec![("a", 1.0), ("b", 0.0)]),
        table(&["x"], vec![vec!["1"], vec!["2"]]),
        paragraph("**bold** and `code`")
    ])))
    .unwrap();
    let options = InteractiveOptions::default();
    let once: Vec<String> = render_interactive(&doc, &options).iter().map(HtmlNode::to_html).collect();
    let twice: Vec<String> = render_interactive(&doc, &options).iter().map(HtmlNode::to_html).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_markup_is_escaped_in_html() {
    init_logger();
    let doc = validate_document(&document(json!([paragraph("<script>alert(1)</script>")]))).unwrap();
    let html = render_interactive(&doc, &InteractiveOptions::default())[0].to_html();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_preview_page_wraps_fragment() {
    init_logger();
    let mut value = document(json!([heading(1, "Preview", None)]));
    value["metadata"]["title"] = json!("Q1 & Q2");
    let doc = validate_document(&value).unwrap();

    let page = render_preview_html(&doc, &InteractiveOptions::default());
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Q1 &amp; Q2</title>"));
    assert!(page.contains("Preview"));
}
