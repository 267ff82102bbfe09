mod common;

use common::fixtures::*;
use common::pdf_assertions::{
    extract_link_annotations, get_page_dimensions, info_entry, page_text, used_font_names,
};
use common::{TestResult, generate_compressed_pdf, generate_pdf, run_pipeline};
use quire::{PrintPipelineBuilder, QuireError, ValidationError};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_text_content_reaches_the_page() -> TestResult {
    init_logger();
    let doc = document(json!([
        heading(1, "Quarterly Report", None),
        paragraph("Revenue grew steadily"),
        section(Some("Highlights"), vec![paragraph("Margins improved")]),
    ]));

    let pdf = generate_pdf(&doc)?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Quarterly Report");
    assert_pdf_contains_text!(pdf, "Revenue grew steadily");
    assert_pdf_contains_text!(pdf, "Highlights");
    assert_pdf_contains_text!(pdf, "Margins improved");
    Ok(())
}

#[test]
fn test_page_breaks_start_new_pages() -> TestResult {
    init_logger();
    let doc = document(json!([
        page_break(),
        paragraph("First"),
        page_break(),
        paragraph("Second"),
        page_break(),
        page_break(),
        paragraph("Third"),
    ]));

    let pdf = generate_pdf(&doc)?;
    assert_pdf_page_count!(pdf, 3);
    assert!(page_text(&pdf.doc, 1).contains("First"));
    assert!(page_text(&pdf.doc, 2).contains("Second"));
    assert!(page_text(&pdf.doc, 3).contains("Third"));
    Ok(())
}

#[test]
fn test_long_content_flows_over_pages() -> TestResult {
    init_logger();
    let pdf = generate_pdf(&document(json!(long_content(120))))?;
    assert_pdf_min_pages!(pdf, 3);
    assert_pdf_contains_text!(pdf, "Paragraph 0 ");
    assert_pdf_contains_text!(pdf, "Paragraph 119 ");
    Ok(())
}

#[test]
fn test_long_table_repeats_header_row() -> TestResult {
    init_logger();
    let rows: Vec<Vec<String>> = (0..100).map(|i| vec![format!("Row {}", i), format!("{}", i * 10)]).collect();
    let doc = document(json!([{ "type": "table", "headers": ["Name", "Amount"], "rows": rows }]));

    let pdf = generate_pdf(&doc)?;
    assert_pdf_min_pages!(pdf, 2);
    assert!(page_text(&pdf.doc, 2).contains("Name"));
    assert!(page_text(&pdf.doc, 2).contains("Amount"));
    assert_pdf_contains_text!(pdf, "Row 99");
    Ok(())
}

#[test]
fn test_page_settings_set_media_box() -> TestResult {
    init_logger();
    let doc = document_with(
        json!({ "pageSettings": { "paperSize": "Letter", "orientation": "landscape" } }),
        json!([paragraph("Wide")]),
    );
    let pdf = generate_pdf(&doc)?;
    assert_eq!(get_page_dimensions(&pdf.doc, 1), Some((792.0, 612.0)));
    Ok(())
}

#[test]
fn test_missing_paper_size_uses_a4() -> TestResult {
    init_logger();
    let pdf = generate_pdf(&document(json!([paragraph("Default")])))?;
    let (width, height) = get_page_dimensions(&pdf.doc, 1).ok_or("no media box")?;
    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
    Ok(())
}

#[test]
fn test_header_footer_and_page_numbers_on_every_page() -> TestResult {
    init_logger();
    let doc = document_with(
        json!({
            "header": { "enabled": true, "content": [paragraph("ACME Corp")] },
            "footer": { "enabled": true, "pageNumberTemplate": "Page {page} of {total}" }
        }),
        json!([paragraph("One"), page_break(), paragraph("Two")]),
    );

    let pdf = generate_pdf(&doc)?;
    assert_pdf_page_count!(pdf, 2);
    for (page, label) in [(1, "Page 1 of 2"), (2, "Page 2 of 2")] {
        let text = page_text(&pdf.doc, page);
        assert!(text.contains("ACME Corp"), "header missing on page {}: {}", page, text);
        assert!(text.contains(label), "footer missing on page {}: {}", page, text);
    }
    Ok(())
}

#[test]
fn test_disabled_header_is_not_drawn() -> TestResult {
    init_logger();
    let doc = document_with(
        json!({ "header": { "enabled": false, "content": [paragraph("Hidden banner")] } }),
        json!([paragraph("Body")]),
    );
    let pdf = generate_pdf(&doc)?;
    assert_pdf_not_contains_text!(pdf, "Hidden banner");
    Ok(())
}

#[test]
fn test_inline_links_become_uri_annotations() -> TestResult {
    init_logger();
    let doc = document(json!([paragraph("See [the docs](https://example.com/docs) for details.")]));

    let pdf = generate_pdf(&doc)?;
    assert_pdf_contains_text!(pdf, "the docs");
    let links = extract_link_annotations(&pdf.doc);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].uri, "https://example.com/docs");
    assert_eq!(links[0].page, 1);
    let rect = links[0].rect.ok_or("link without rect")?;
    assert!(rect[2] > rect[0] && rect[3] > rect[1]);
    Ok(())
}

#[test]
fn test_metadata_lands_in_info_dictionary() -> TestResult {
    init_logger();
    let mut doc = document(json!([]));
    doc["metadata"] = json!({
        "title": "Annual Review",
        "author": "Finance Team",
        "subject": "FY results",
        "keywords": "finance, annual"
    });

    let pdf = generate_pdf(&doc)?;
    assert_pdf_page_count!(pdf, 1);
    assert_eq!(info_entry(&pdf.doc, "Title").as_deref(), Some("Annual Review"));
    assert_eq!(info_entry(&pdf.doc, "Author").as_deref(), Some("Finance Team"));
    assert_eq!(info_entry(&pdf.doc, "Subject").as_deref(), Some("FY results"));
    assert_eq!(info_entry(&pdf.doc, "Keywords").as_deref(), Some("finance, annual"));
    Ok(())
}

#[test]
fn test_theme_font_family_selects_base14_fonts() -> TestResult {
    init_logger();
    let doc = document_with(
        json!({ "theme": { "fontFamily": "Courier New, monospace" } }),
        json!([heading(2, "Mono", None), paragraph("Body")]),
    );
    let pdf = generate_pdf(&doc)?;
    let fonts = used_font_names(&pdf.doc);
    assert!(fonts.contains(&"Courier-Bold".to_string()), "fonts: {:?}", fonts);
    assert!(fonts.contains(&"Courier".to_string()), "fonts: {:?}", fonts);
    assert!(!fonts.iter().any(|f| f.starts_with("Helvetica")), "fonts: {:?}", fonts);
    Ok(())
}

#[test]
fn test_unsupported_colors_do_not_fail_generation() -> TestResult {
    init_logger();
    let doc = document_with(
        json!({ "theme": { "primaryColor": "oklch(0.6 0.2 250)", "textColor": "rgb(20, 20, 20)" } }),
        json!([
            { "type": "section", "backgroundColor": "lab(90% 0 0)", "children": [paragraph("Still here")] },
            { "type": "heading", "level": 2, "content": "Colored", "color": "hsl(210, 50%, 40%)" }
        ]),
    );
    let pdf = generate_pdf(&doc)?;
    assert_pdf_contains_text!(pdf, "Still here");
    assert_pdf_contains_text!(pdf, "Colored");
    Ok(())
}

#[test]
fn test_empty_chart_prints_no_data() -> TestResult {
    init_logger();
    let pdf = generate_pdf(&document(json!([bar_chart(vec![])])))?;
    assert_pdf_contains_text!(pdf, "No data");
    Ok(())
}

#[test]
fn test_charts_print_their_labels() -> TestResult {
    init_logger();
    let doc = document(json!([
        bar_chart(vec![("North", 40.0), ("South", 25.0)]),
        { "type": "pieChart", "title": "Share", "showLegend": true,
          "data": [{ "label": "Alpha", "value": 3 }, { "label": "Beta", "value": 1 }] },
        { "type": "lineChart", "title": "Trend",
          "series": [{ "label": "Sales", "values": [{ "x": 2023, "y": 1 }, { "x": 2024, "y": 3 }] }] }
    ]));
    let pdf = generate_pdf(&doc)?;
    assert_pdf_contains_text!(pdf, "North");
    assert_pdf_contains_text!(pdf, "Share");
    assert_pdf_contains_text!(pdf, "Alpha");
    assert_pdf_contains_text!(pdf, "Trend");
    assert_pdf_contains_text!(pdf, "2024");
    Ok(())
}

#[test]
fn test_compressed_output_is_readable() -> TestResult {
    init_logger();
    let pdf = generate_compressed_pdf(&document(json!([paragraph("Packed")])))?;
    assert_pdf_contains_text!(pdf, "Packed");
    Ok(())
}

#[test]
fn test_ragged_table_is_rejected_before_rendering() {
    init_logger();
    let doc = document(json!([table(&["a", "b", "c"], vec![vec!["1", "2"]])]));
    let pipeline = PrintPipelineBuilder::new().build().unwrap();
    match run_pipeline(&pipeline, &doc) {
        Err(QuireError::Validation(ValidationError { path, .. })) => assert_eq!(path, "content[0].rows[0]"),
        Err(other) => panic!("expected a validation error, got {}", other),
        Ok(_) => panic!("expected a validation error"),
    }
}
