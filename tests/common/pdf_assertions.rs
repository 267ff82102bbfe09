use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Text of one page (1-based)
pub fn page_text(doc: &LopdfDocument, page_num: u32) -> String {
    doc.extract_text(&[page_num]).unwrap_or_default()
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj.as_reference() {
        Ok(id) => doc.get_dictionary(id).ok(),
        Err(_) => obj.as_dict().ok(),
    }
}

/// BaseFont names of every font the pages can use
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::BTreeSet::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else { continue };
        let Some(resources) = page.get(b"Resources").ok().and_then(|r| resolve(doc, r)) else { continue };
        let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve(doc, f)) else { continue };
        for (_name, font) in font_dict.iter() {
            if let Some(base) = resolve(doc, font).and_then(|f| f.get(b"BaseFont").ok()) {
                if let Ok(name) = base.as_name() {
                    fonts.insert(String::from_utf8_lossy(name).into_owned());
                }
            }
        }
    }
    fonts.into_iter().collect()
}

/// BaseFont names the page content actually selects with `Tf`
pub fn used_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = std::collections::BTreeSet::new();
    for page_id in doc.get_pages().values() {
        let Ok(page) = doc.get_dictionary(*page_id) else { continue };
        let Some(resources) = page.get(b"Resources").ok().and_then(|r| resolve(doc, r)) else { continue };
        let Some(font_dict) = resources.get(b"Font").ok().and_then(|f| resolve(doc, f)) else { continue };
        let Ok(bytes) = doc.get_page_content(*page_id) else { continue };
        let Ok(content) = lopdf::content::Content::decode(&bytes) else { continue };
        for op in content.operations.iter().filter(|op| op.operator == "Tf") {
            let Some(resource) = op.operands.first().and_then(|o| o.as_name().ok()) else { continue };
            let base = font_dict
                .get(resource)
                .ok()
                .and_then(|f| resolve(doc, f))
                .and_then(|f| f.get(b"BaseFont").ok())
                .and_then(|b| b.as_name().ok());
            if let Some(base) = base {
                fonts.insert(String::from_utf8_lossy(base).into_owned());
            }
        }
    }
    fonts.into_iter().collect()
}

/// A URI link annotation
#[derive(Debug)]
pub struct LinkAnnotation {
    pub page: u32,
    pub rect: Option<[f32; 4]>,
    pub uri: String,
}

/// Extract URI link annotations from PDF pages
pub fn extract_link_annotations(doc: &LopdfDocument) -> Vec<LinkAnnotation> {
    let mut annotations = Vec::new();
    for (page_num, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else { continue };
        let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else { continue };
        for annot in annots {
            let Some(annot) = resolve(doc, annot) else { continue };
            if annot.get(b"Subtype").and_then(Object::as_name).ok() != Some(b"Link".as_slice()) {
                continue;
            }
            let uri = annot
                .get(b"A")
                .ok()
                .and_then(|a| resolve(doc, a))
                .and_then(|a| a.get(b"URI").ok())
                .and_then(|u| u.as_str().ok())
                .map(|u| String::from_utf8_lossy(u).into_owned())
                .unwrap_or_default();
            let rect = annot.get(b"Rect").and_then(Object::as_array).ok().and_then(|arr| {
                let v: Vec<f32> = arr.iter().filter_map(|o| o.as_float().ok()).collect();
                (v.len() == 4).then(|| [v[0], v[1], v[2], v[3]])
            });
            annotations.push(LinkAnnotation { page: page_num, rect, uri });
        }
    }
    annotations
}

/// Get page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page_num).copied()?;
    let media_box = doc.get_dictionary(page_id).ok()?.get(b"MediaBox").ok()?.as_array().ok()?;
    if media_box.len() < 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()? - media_box[0].as_float().ok()?;
    let height = media_box[3].as_float().ok()? - media_box[1].as_float().ok()?;
    Some((width, height))
}

/// A string entry of the document Info dictionary
pub fn info_entry(doc: &LopdfDocument, key: &str) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok().and_then(|i| resolve(doc, i))?;
    let value = info.get(key.as_bytes()).ok()?.as_str().ok()?;
    Some(String::from_utf8_lossy(value).into_owned())
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should have a font matching '{}', found: {:?}",
            $pattern,
            fonts
        );
    };
}
