use serde_json::{Value, json};

/// A minimal valid document around `content`
pub fn document(content: Value) -> Value {
    json!({
        "metadata": { "title": "Test Document" },
        "content": content
    })
}

/// A document with extra top-level fields (pageSettings, theme, header, footer)
pub fn document_with(extra: Value, content: Value) -> Value {
    let mut doc = document(content);
    if let (Some(target), Some(fields)) = (doc.as_object_mut(), extra.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    doc
}

pub fn heading(level: u8, text: &str, id: Option<&str>) -> Value {
    let mut el = json!({ "type": "heading", "level": level, "content": text });
    if let Some(id) = id {
        el["id"] = json!(id);
    }
    el
}

pub fn paragraph(text: &str) -> Value {
    json!({ "type": "paragraph", "content": text })
}

pub fn page_break() -> Value {
    json!({ "type": "pageBreak" })
}

pub fn section(title: Option<&str>, children: Vec<Value>) -> Value {
    let mut el = json!({ "type": "section", "children": children });
    if let Some(title) = title {
        el["title"] = json!(title);
    }
    el
}

pub fn table(headers: &[&str], rows: Vec<Vec<&str>>) -> Value {
    json!({ "type": "table", "headers": headers, "rows": rows })
}

pub fn bar_chart(data: Vec<(&str, f64)>) -> Value {
    let data: Vec<Value> = data
        .into_iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect();
    json!({ "type": "barChart", "data": data })
}

/// Paragraphs enough to run over several A4 pages
pub fn long_content(paragraphs: usize) -> Vec<Value> {
    (0..paragraphs)
        .map(|i| paragraph(&format!("Paragraph {} with enough words to fill most of a printed line of body text.", i)))
        .collect()
}
