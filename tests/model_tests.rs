mod common;

use common::fixtures::*;
use quire::ops::{add_element, duplicate_element, find_element, move_element, remove_element, update_element};
use quire::{
    Document, EditError, ElementId, ElementKind, default_element, load_content_lenient, parse_document,
    validate_document,
};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> Document {
    validate_document(&document(json!([
        heading(1, "Title", Some("title")),
        section(None, vec![json!({ "type": "paragraph", "id": "body", "content": "Body" })]),
    ])))
    .unwrap()
}

#[test]
fn test_serialized_documents_validate_back_to_themselves() {
    init_logger();
    let doc = validate_document(&document_with(
        json!({
            "theme": { "primaryColor": "#123456", "fontFamily": "Georgia" },
            "footer": { "enabled": true, "pageNumberTemplate": "{page}" }
        }),
        json!([
            section(Some("S"), vec![paragraph("p")]),
            { "type": "keyValue", "items": [{ "key": "k", "value": "v" }] },
            { "type": "pieChart", "donut": true, "data": [{ "label": "a", "value": 2 }] },
            page_break()
        ]),
    ))
    .unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(parse_document(&json).unwrap(), doc);
}

#[test]
fn test_every_default_element_survives_validation() {
    init_logger();
    let tags = [
        "section", "columns", "heading", "paragraph", "list", "caption", "callout", "codeBlock",
        "table", "keyValue", "barChart", "pieChart", "lineChart", "image", "divider", "spacer",
        "pageBreak",
    ];
    let content: Vec<_> = tags.iter().map(|t| default_element(t).unwrap()).collect();
    let mut doc = sample();
    doc.content = content;
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(validate_document(&value).unwrap(), doc);
    assert!(default_element("hologram").is_none());
}

#[test]
fn test_edits_return_new_trees() {
    init_logger();
    let doc = sample();

    let added = add_element(&doc.content, default_element("divider").unwrap(), Some(1)).unwrap();
    assert_eq!(added.len(), 3);
    assert!(matches!(added[1].kind, ElementKind::Divider(_)));
    assert_eq!(doc.content.len(), 2);

    let updated = update_element(&doc.content, "body", |el| {
        let mut el = el.clone();
        if let ElementKind::Paragraph(p) = &mut el.kind {
            p.content = "Edited".into();
        }
        el
    })
    .unwrap();
    let ElementKind::Paragraph(p) = &find_element(&updated, "body").unwrap().kind else {
        panic!("body should stay a paragraph");
    };
    assert_eq!(p.content, "Edited");

    let removed = remove_element(&doc.content, "body").unwrap();
    assert!(find_element(&removed, "body").is_none());

    let duplicated = duplicate_element(&doc.content, "title", ElementId::new("title-2")).unwrap();
    assert!(find_element(&duplicated, "title-2").is_some());

    let moved = move_element(&doc.content, 0, 1).unwrap();
    assert_eq!(moved[1].id_str(), Some("title"));
}

#[test]
fn test_edit_errors_are_reported() {
    init_logger();
    let doc = sample();
    assert_eq!(
        remove_element(&doc.content, "nope").unwrap_err(),
        EditError::NotFound("nope".into())
    );
    assert_eq!(
        move_element(&doc.content, 0, 9).unwrap_err(),
        EditError::IndexOutOfRange { index: 9, len: 2 }
    );
}

#[test]
fn test_lenient_loading_keeps_valid_siblings() {
    init_logger();
    let content = load_content_lenient(&json!([
        paragraph("kept"),
        { "type": "hologram" },
        { "type": "heading", "level": 9, "content": "bad level" }
    ]))
    .unwrap();
    assert_eq!(content.len(), 3);
    assert!(matches!(content[0].kind, ElementKind::Paragraph(_)));
    assert!(matches!(content[1].kind, ElementKind::Unknown(_)));
    assert!(matches!(content[2].kind, ElementKind::Unknown(_)));
}

#[test]
fn test_strict_validation_reports_json_paths() {
    init_logger();
    let err = validate_document(&document(json!([
        section(None, vec![json!({ "type": "heading", "level": 1 })])
    ])))
    .unwrap_err();
    assert!(err.path.starts_with("content[0].children[0]"), "path was {}", err.path);
}
