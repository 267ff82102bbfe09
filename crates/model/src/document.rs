use crate::element::Element;
use crate::error::ValidationError;
use crate::validate::validate_document;
use quire_style::dimension::page_size;
use quire_style::{Margins, Orientation, PaperSize, Theme, sanitize_colors};
use quire_types::Size;
use serde::{Deserialize, Serialize};

/// The root of an instruction tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub metadata: Metadata,
    #[serde(default)]
    pub page_settings: PageSettings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Top-level elements. Order here is the only ordering signal.
    pub content: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(default)]
    pub paper_size: PaperSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_margins")]
    pub margins: Margins,
}

fn default_margins() -> Margins {
    Margins::all(40.0)
}

fn default_enabled() -> bool {
    true
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            orientation: Orientation::default(),
            margins: default_margins(),
        }
    }
}

impl PageSettings {
    /// Page size in points after orientation.
    pub fn page_size(&self) -> Size {
        page_size(self.paper_size, self.orientation)
    }

    /// Width left for content between the side margins.
    pub fn content_width(&self) -> f32 {
        (self.page_size().width - self.margins.horizontal()).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Element>,
    /// Text with `{page}` and `{total}` placeholders, e.g. `"Page {page} of {total}"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number_template: Option<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, content: Vec<Element>) -> Self {
        Self {
            metadata: Metadata {
                title: title.into(),
                ..Default::default()
            },
            page_settings: PageSettings::default(),
            theme: Theme::default(),
            header: None,
            footer: None,
            content,
        }
    }

    pub fn enabled_header(&self) -> Option<&Header> {
        self.header.as_ref().filter(|h| h.enabled)
    }

    pub fn enabled_footer(&self) -> Option<&Footer> {
        self.footer.as_ref().filter(|f| f.enabled)
    }

    /// A copy with every color-bearing field rewritten to hex, checked again
    /// against the schema. This is the form the print target receives.
    pub fn sanitized_for_print(&self) -> Result<Document, ValidationError> {
        let mut value = serde_json::to_value(self)
            .map_err(|e| ValidationError::at_root(e.to_string()))?;
        let rewritten = sanitize_colors(&mut value);
        log::debug!("Sanitized {} color values for print", rewritten);
        validate_document(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Heading};
    use serde_json::json;

    #[test]
    fn page_settings_default_to_a4_portrait() {
        let settings = PageSettings::default();
        assert_eq!(settings.paper_size, PaperSize::A4);
        assert_eq!(settings.orientation, Orientation::Portrait);
        assert!((settings.content_width() - (595.28 - 80.0)).abs() < 1e-3);
    }

    #[test]
    fn sanitized_copy_has_hex_colors() {
        let mut doc = Document::new(
            "T",
            vec![Element::new(ElementKind::Heading(Heading {
                level: 1,
                content: "Hi".into(),
                color: Some("rgb(255, 0, 0)".into()),
                align: None,
                margin_bottom: None,
            }))],
        );
        doc.theme.primary_color = Some("oklch(0.5 0.1 20)".into());
        let clean = doc.sanitized_for_print().unwrap();
        assert_eq!(clean.theme.primary_color.as_deref(), Some("#000000"));
        let value = serde_json::to_value(&clean.content[0]).unwrap();
        assert_eq!(value, json!({ "type": "heading", "level": 1, "content": "Hi", "color": "#ff0000" }));
    }
}
