//! Base-14 font selection, width estimates and text encoding.
//!
//! The producer never embeds fonts, so widths are per-family averages rather
//! than real glyph metrics. Every face of every family is registered in the
//! shared resource dictionary under a fixed `F<n>` name.

use crate::node::{FontFamily, TextRun};
use log::debug;
use quire_style::{FontStyle, FontWeight};

/// Every face the producer can select, in resource order.
pub const FACES: [(FontFamily, FontWeight, FontStyle); 12] = [
    (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal),
    (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Normal),
    (FontFamily::Helvetica, FontWeight::Regular, FontStyle::Italic),
    (FontFamily::Helvetica, FontWeight::Bold, FontStyle::Italic),
    (FontFamily::Times, FontWeight::Regular, FontStyle::Normal),
    (FontFamily::Times, FontWeight::Bold, FontStyle::Normal),
    (FontFamily::Times, FontWeight::Regular, FontStyle::Italic),
    (FontFamily::Times, FontWeight::Bold, FontStyle::Italic),
    (FontFamily::Courier, FontWeight::Regular, FontStyle::Normal),
    (FontFamily::Courier, FontWeight::Bold, FontStyle::Normal),
    (FontFamily::Courier, FontWeight::Regular, FontStyle::Italic),
    (FontFamily::Courier, FontWeight::Bold, FontStyle::Italic),
];

impl FontFamily {
    /// Picks the closest base-14 family for a CSS font-family list.
    pub fn from_css(family: &str) -> Self {
        let lower = family.to_ascii_lowercase();
        let chosen = if lower.contains("mono") || lower.contains("courier") {
            FontFamily::Courier
        } else if lower.contains("times") || (lower.contains("serif") && !lower.contains("sans")) {
            FontFamily::Times
        } else {
            FontFamily::Helvetica
        };
        debug!("Font family '{}' maps to {:?}", family, chosen);
        chosen
    }

    fn base_name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
            FontFamily::Courier => "Courier",
        }
    }

    /// Average advance of one character as a fraction of the font size.
    pub fn char_width(self, weight: FontWeight) -> f32 {
        match (self, weight == FontWeight::Bold) {
            (FontFamily::Courier, _) => 0.6,
            (FontFamily::Helvetica, false) => 0.5,
            (FontFamily::Helvetica, true) => 0.55,
            (FontFamily::Times, false) => 0.45,
            (FontFamily::Times, true) => 0.5,
        }
    }
}

/// PostScript name of a base-14 face, e.g. `Helvetica-BoldOblique`.
pub fn styled_font_name(family: FontFamily, weight: FontWeight, style: FontStyle) -> String {
    let bold = weight == FontWeight::Bold;
    let italic = style == FontStyle::Italic;
    let base = family.base_name();
    if !bold && !italic {
        return match family {
            FontFamily::Times => "Times-Roman".to_string(),
            _ => base.to_string(),
        };
    }
    let slant = match family {
        FontFamily::Times => "Italic",
        _ => "Oblique",
    };
    let mut name = format!("{}-", base);
    if bold {
        name.push_str("Bold");
    }
    if italic {
        name.push_str(slant);
    }
    name
}

/// Resource name (`F1`..`F12`) of a face.
pub fn resource_name(family: FontFamily, weight: FontWeight, style: FontStyle) -> String {
    let index = FACES
        .iter()
        .position(|face| *face == (family, weight, style))
        .unwrap_or(0);
    format!("F{}", index + 1)
}

/// The family a run is set in inside a block of `family`.
pub fn run_family(run: &TextRun, family: FontFamily) -> FontFamily {
    if run.monospace { FontFamily::Courier } else { family }
}

/// Estimated width of `text` in points.
pub fn text_width(text: &str, family: FontFamily, weight: FontWeight, font_size: f32) -> f32 {
    text.chars().count() as f32 * family.char_width(weight) * font_size
}

/// Encodes text for a WinAnsiEncoding font. Characters outside the code page
/// become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) <= 255 => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_names_follow_base14() {
        let name = |f, w, s| styled_font_name(f, w, s);
        assert_eq!(name(FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal), "Helvetica");
        assert_eq!(name(FontFamily::Helvetica, FontWeight::Bold, FontStyle::Italic), "Helvetica-BoldOblique");
        assert_eq!(name(FontFamily::Times, FontWeight::Regular, FontStyle::Normal), "Times-Roman");
        assert_eq!(name(FontFamily::Times, FontWeight::Regular, FontStyle::Italic), "Times-Italic");
        assert_eq!(name(FontFamily::Courier, FontWeight::Bold, FontStyle::Normal), "Courier-Bold");
    }

    #[test]
    fn resource_names_are_stable() {
        assert_eq!(resource_name(FontFamily::Helvetica, FontWeight::Regular, FontStyle::Normal), "F1");
        assert_eq!(resource_name(FontFamily::Times, FontWeight::Bold, FontStyle::Normal), "F6");
        assert_eq!(resource_name(FontFamily::Courier, FontWeight::Bold, FontStyle::Italic), "F12");
    }

    #[test]
    fn css_families_map_to_base14() {
        assert_eq!(FontFamily::from_css("Inter, sans-serif"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_css("Georgia, serif"), FontFamily::Times);
        assert_eq!(FontFamily::from_css("JetBrains Mono"), FontFamily::Courier);
    }

    #[test]
    fn win_ansi_maps_typographic_punctuation() {
        assert_eq!(to_win_ansi("a\u{2022}b"), vec![b'a', 0x95, b'b']);
        assert_eq!(to_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(to_win_ansi("\u{4e2d}"), vec![b'?']);
    }
}
