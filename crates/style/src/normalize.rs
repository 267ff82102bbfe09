//! Normalizes arbitrary CSS-like color expressions to the hex form the print
//! target accepts.
//!
//! The normalizer never fails: anything it cannot convert becomes
//! [`DEFAULT_HEX`]. Known-but-unsupported color spaces additionally log a
//! warning so authors can see why a color went black.

use crate::parsers::{StyleParseError, parse_color, parse_hex_color, run_parser};
use log::{debug, warn};
use quire_types::Color;

/// The fallback for empty or unparseable input.
pub const DEFAULT_HEX: &str = "#000000";

/// The fixed named-color table. Anything outside it is treated as unparseable.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("transparent", "#ffffff"),
];

/// Color functions the print target has no equivalent for.
const UNSUPPORTED_SPACES: &[&str] = &[
    "lab(",
    "lch(",
    "oklab(",
    "oklch(",
    "hwb(",
    "color(",
    "color-mix(",
    "device-cmyk(",
    "light-dark(",
];

const SUPPORTED_FUNCTIONS: &[&str] = &["rgb(", "rgba(", "hsl(", "hsla("];

fn lookup_named(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

fn unsupported_space(lower: &str) -> Option<&'static str> {
    UNSUPPORTED_SPACES
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .copied()
}

/// Checks a `#...` literal and returns the 3 or 6 digit hex to emit for it.
///
/// 3 and 6 digit forms pass through verbatim; 4 and 8 digit forms lose their
/// alpha digits.
fn normalize_hex_literal(s: &str) -> Option<String> {
    run_parser(parse_hex_color, s).ok()?;
    let digits = &s[1..];
    match digits.len() {
        4 => Some(format!("#{}", &digits[..3])),
        8 => Some(format!("#{}", &digits[..6])),
        _ => Some(s.to_string()),
    }
}

/// Parses a color function, refusing the spaces the print target lacks.
fn parse_function(trimmed: &str) -> Result<Color, StyleParseError> {
    let lower = trimmed.to_ascii_lowercase();
    if let Some(space) = unsupported_space(&lower) {
        return Err(StyleParseError::UnsupportedColorSpace(
            space.trim_end_matches('(').to_string(),
        ));
    }
    run_parser(parse_color, trimmed)
}

/// Converts a color expression to a 3 or 6 digit hex string.
///
/// Returns [`DEFAULT_HEX`] for `None`, empty and unparseable input.
pub fn to_hex(color: Option<&str>) -> String {
    let Some(raw) = color else {
        return DEFAULT_HEX.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_HEX.to_string();
    }

    if trimmed.starts_with('#') {
        return normalize_hex_literal(trimmed).unwrap_or_else(|| {
            debug!("Malformed hex color '{}', using {}", trimmed, DEFAULT_HEX);
            DEFAULT_HEX.to_string()
        });
    }

    if let Some(hex) = lookup_named(trimmed) {
        return hex.to_string();
    }

    match parse_function(trimmed) {
        Ok(color) => color.to_hex(),
        Err(e @ StyleParseError::UnsupportedColorSpace(_)) => {
            warn!("Color '{}': {}; falling back to {}", trimmed, e, DEFAULT_HEX);
            DEFAULT_HEX.to_string()
        }
        Err(e) if looks_like_color(trimmed) => {
            warn!("Could not parse color '{}': {}; using {}", trimmed, e, DEFAULT_HEX);
            DEFAULT_HEX.to_string()
        }
        Err(_) => {
            debug!("Unrecognized color '{}', using {}", trimmed, DEFAULT_HEX);
            DEFAULT_HEX.to_string()
        }
    }
}

/// Normalizes and parses in one step, returning `fallback` when the input is
/// absent or empty. Unparseable input still resolves to black, matching
/// [`to_hex`].
pub fn resolve_color(color: Option<&str>, fallback: Color) -> Color {
    match color.map(str::trim) {
        None | Some("") => fallback,
        Some(value) => run_parser(parse_hex_color, &to_hex(Some(value))).unwrap_or(Color::BLACK),
    }
}

/// Whether a string is recognizably meant as a color: a hex literal, a color
/// function (supported or not) or a name from the fixed table.
///
/// Keywords such as `solid` or `center` are not colors.
pub fn looks_like_color(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.starts_with('#') {
        return true;
    }
    if lookup_named(trimmed).is_some() {
        return true;
    }
    let lower = trimmed.to_ascii_lowercase();
    SUPPORTED_FUNCTIONS.iter().any(|f| lower.starts_with(f)) || unsupported_space(&lower).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_passes_through_verbatim() {
        assert_eq!(to_hex(Some("#abc")), "#abc");
        assert_eq!(to_hex(Some("#A1B2C3")), "#A1B2C3");
        assert_eq!(to_hex(Some("  #abc ")), "#abc");
    }

    #[test]
    fn hex_with_alpha_drops_alpha() {
        assert_eq!(to_hex(Some("#11223344")), "#112233");
        assert_eq!(to_hex(Some("#abcd")), "#abc");
        assert_eq!(to_hex(Some("#12345")), DEFAULT_HEX);
        assert_eq!(to_hex(Some("#xyz")), DEFAULT_HEX);
    }

    #[test]
    fn rgb_functions_convert() {
        assert_eq!(to_hex(Some("rgb(255,0,0)")), "#ff0000");
        assert_eq!(to_hex(Some("rgba(0, 0, 255, 0.2)")), "#0000ff");
    }

    #[test]
    fn hsl_functions_convert() {
        assert_eq!(to_hex(Some("hsl(0, 100%, 50%)")), "#ff0000");
        assert_eq!(to_hex(Some("hsla(120, 100%, 50%, .5)")), "#00ff00");
    }

    #[test]
    fn named_colors_resolve_case_insensitively() {
        assert_eq!(to_hex(Some("Red")), "#ff0000");
        assert_eq!(to_hex(Some("transparent")), "#ffffff");
        assert_eq!(to_hex(Some("magenta")), "#ff00ff");
    }

    #[test]
    fn garbage_falls_back_to_black() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(to_hex(Some("not-a-color")), "#000000");
        assert_eq!(to_hex(Some("")), "#000000");
        assert_eq!(to_hex(None), "#000000");
        assert_eq!(to_hex(Some("rgb(1,2")), "#000000");
    }

    #[test]
    fn unsupported_spaces_fall_back_without_panicking() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(to_hex(Some("lab(29.2345% 39.3825 20.0664)")), DEFAULT_HEX);
        assert_eq!(to_hex(Some("oklch(70% 0.1 200)")), DEFAULT_HEX);
        assert_eq!(to_hex(Some("color(display-p3 1 0 0)")), DEFAULT_HEX);
    }

    #[test]
    fn unsupported_space_is_named_in_the_error() {
        assert_eq!(
            parse_function("oklch(70% 0.1 200)"),
            Err(StyleParseError::UnsupportedColorSpace("oklch".into()))
        );
        assert!(matches!(parse_function("rgb(1,2"), Err(StyleParseError::Parse(_))));
        assert_eq!(parse_function("rgb(0, 0, 255)"), Ok(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn resolve_color_uses_fallback_only_for_absent_values() {
        assert_eq!(resolve_color(None, Color::WHITE), Color::WHITE);
        assert_eq!(resolve_color(Some(" "), Color::WHITE), Color::WHITE);
        assert_eq!(resolve_color(Some("blue"), Color::WHITE), Color::rgb(0, 0, 255));
        assert_eq!(resolve_color(Some("bogus"), Color::WHITE), Color::BLACK);
    }

    #[test]
    fn looks_like_color_ignores_keywords() {
        assert!(looks_like_color("#fff"));
        assert!(looks_like_color("rgb(1,2,3)"));
        assert!(looks_like_color("oklch(1 0 0)"));
        assert!(looks_like_color("Yellow"));
        assert!(!looks_like_color("solid"));
        assert!(!looks_like_color("center"));
        assert!(!looks_like_color("dashed"));
    }
}
