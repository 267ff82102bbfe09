//! Renders the editing surface for a document with one element selected and
//! writes a standalone `preview.html`.

use quire::{InteractiveOptions, QuireError, render_interactive, render_preview_html, validate_document};
use serde_json::json;

fn main() -> Result<(), QuireError> {
    env_logger::init();

    let doc = validate_document(&json!({
        "metadata": { "title": "Preview" },
        "content": [
            { "type": "heading", "id": "title", "level": 1, "content": "Editing surface" },
            { "type": "callout", "id": "tip", "variant": "info", "content": "Click an element to select it." },
            { "type": "pieChart", "id": "share", "title": "Share", "donut": true, "data": [
                { "label": "A", "value": 3 },
                { "label": "B", "value": 2 }
            ]}
        ]
    }))?;

    let options = InteractiveOptions::default().with_selected("tip");
    for node in render_interactive(&doc, &options) {
        if let Some(el) = node.as_element() {
            println!("<{}> {:?}", el.tag, el.get_attr("data-element-id"));
        }
    }

    std::fs::write("preview.html", render_preview_html(&doc, &options))?;
    println!("Wrote preview.html");
    Ok(())
}
