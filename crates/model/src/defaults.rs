//! Starter instances for every tag, used when the editing layer inserts a
//! fresh element or starts a new document.

use crate::document::{Document, Footer};
use crate::element::*;
use quire_style::TextAlign;

fn datum(label: &str, value: f64) -> ChartDatum {
    ChartDatum {
        label: label.to_string(),
        value,
        color: None,
    }
}

/// A valid default instance of `tag`, or `None` for a tag the model does not
/// know.
pub fn default_element(tag: &str) -> Option<Element> {
    let kind = match tag {
        "section" => ElementKind::Section(Section {
            title: Some("New section".into()),
            children: vec![default_element("paragraph")?],
            ..Default::default()
        }),
        "columns" => ElementKind::Columns(Columns {
            columns: vec![
                Column { width: 1.0, children: vec![default_element("paragraph")?] },
                Column { width: 1.0, children: vec![default_element("paragraph")?] },
            ],
            gap: Some(16.0),
            margin_bottom: None,
        }),
        "heading" => ElementKind::Heading(Heading {
            level: 2,
            content: "Heading".into(),
            color: None,
            align: None,
            margin_bottom: None,
        }),
        "paragraph" => ElementKind::Paragraph(Paragraph {
            content: "Write your text here.".into(),
            color: None,
            font_size: None,
            align: None,
            margin_bottom: None,
        }),
        "list" => ElementKind::List(ListBlock {
            ordered: false,
            items: vec!["First item".into(), "Second item".into()],
            color: None,
            margin_bottom: None,
        }),
        "caption" => ElementKind::Caption(Caption {
            content: "Caption".into(),
            color: None,
            align: Some(TextAlign::Center),
            margin_bottom: None,
        }),
        "callout" => ElementKind::Callout(Callout {
            variant: CalloutVariant::Info,
            content: "Something worth pointing out.".into(),
            title: None,
            margin_bottom: None,
        }),
        "codeBlock" => ElementKind::CodeBlock(CodeBlock {
            code: "fn main() {}".into(),
            language: Some("rust".into()),
            show_line_numbers: false,
            margin_bottom: None,
        }),
        "table" => ElementKind::Table(Table {
            headers: vec!["Name".into(), "Value".into()],
            rows: vec![vec!["Alpha".into(), "1".into()], vec!["Beta".into(), "2".into()]],
            header_style: None,
            cell_style: None,
            alternate_row_color: None,
            margin_bottom: None,
        }),
        "keyValue" => ElementKind::KeyValue(KeyValue {
            items: vec![KeyValueItem { key: "Key".into(), value: "Value".into() }],
            layout: KeyValueLayout::Vertical,
            margin_bottom: None,
        }),
        "barChart" => ElementKind::BarChart(BarChart {
            data: vec![datum("A", 3.0), datum("B", 5.0), datum("C", 2.0)],
            title: Some("Bar chart".into()),
            orientation: ChartOrientation::Horizontal,
            width: None,
            height: None,
            show_values: true,
            colors: None,
            margin_bottom: None,
        }),
        "pieChart" => ElementKind::PieChart(PieChart {
            data: vec![datum("A", 40.0), datum("B", 35.0), datum("C", 25.0)],
            title: Some("Pie chart".into()),
            donut: false,
            show_legend: true,
            width: None,
            height: None,
            colors: None,
            margin_bottom: None,
        }),
        "lineChart" => ElementKind::LineChart(LineChart {
            series: vec![LineSeries {
                label: "Series".into(),
                color: None,
                values: (0..5)
                    .map(|i| LinePoint { x: i as f64, y: (i * i) as f64 })
                    .collect(),
            }],
            title: Some("Line chart".into()),
            show_points: true,
            show_grid: true,
            width: None,
            height: None,
            margin_bottom: None,
        }),
        "image" => ElementKind::Image(Image {
            src: "https://placehold.co/600x300".into(),
            alt: Some("Placeholder image".into()),
            width: None,
            height: None,
            align: Some(TextAlign::Center),
            margin_bottom: None,
        }),
        "divider" => ElementKind::Divider(Divider::default()),
        "spacer" => ElementKind::Spacer(Spacer {
            height: 24.0,
            margin_bottom: None,
        }),
        "pageBreak" => ElementKind::PageBreak,
        _ => return None,
    };
    Some(Element::new(kind))
}

impl Document {
    /// A small valid document to start editing from.
    pub fn default_template() -> Document {
        let content = ["heading", "paragraph", "list"]
            .iter()
            .filter_map(|tag| default_element(tag))
            .map(|mut el| {
                if let ElementKind::Heading(h) = &mut el.kind {
                    h.level = 1;
                    h.content = "Untitled Document".into();
                }
                el
            })
            .collect();

        let mut doc = Document::new("Untitled Document", content);
        doc.footer = Some(Footer {
            enabled: true,
            content: Vec::new(),
            page_number_template: Some("Page {page} of {total}".into()),
        });
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate_document, validate_element};

    #[test]
    fn every_default_is_valid() {
        for tag in ELEMENT_TAGS {
            let el = default_element(tag).unwrap();
            let value = serde_json::to_value(&el).unwrap();
            let back = validate_element(&value).unwrap();
            assert_eq!(back, el, "default {tag} should survive a round trip");
        }
    }

    #[test]
    fn unknown_tag_has_no_default() {
        assert!(default_element("carousel").is_none());
    }

    #[test]
    fn template_is_valid() {
        let doc = Document::default_template();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(validate_document(&value).unwrap(), doc);
    }
}
