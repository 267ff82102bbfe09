//! Deep color sanitizing over untyped JSON, run before a tree is handed to the
//! print target.

use crate::normalize::{looks_like_color, to_hex};
use log::{debug, warn};
use serde_json::Value;

/// What a key says about the strings under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Plain,
    /// `background` or `border`: may hold a color or a keyword like `solid`.
    MaybeColor,
    /// Names a color outright, e.g. `textColor` or `colors`.
    Color,
}

fn key_kind(key: &str) -> KeyKind {
    let lower = key.to_ascii_lowercase();
    if lower.contains("color") {
        KeyKind::Color
    } else if lower.contains("background") || lower.contains("border") {
        KeyKind::MaybeColor
    } else {
        KeyKind::Plain
    }
}

/// Rewrites every color-bearing string in `value` to hex.
///
/// A string is rewritten when its object key contains `color`, `background`
/// or `border` (or it sits in an array under such a key) and it looks like a
/// color. Non-color strings under `background`/`border` keys, such as
/// `borderStyle: "solid"`, are left alone. Under a key naming a color, a
/// string that is not recognizably a color is logged and replaced by the
/// default. Returns the number of strings rewritten.
pub fn sanitize_colors(value: &mut Value) -> usize {
    sanitize_value(value, KeyKind::Plain)
}

fn sanitize_value(value: &mut Value, kind: KeyKind) -> usize {
    match value {
        Value::Object(map) => map
            .iter_mut()
            .map(|(key, child)| sanitize_value(child, key_kind(key)))
            .sum(),
        Value::Array(items) => items
            .iter_mut()
            .map(|item| sanitize_value(item, kind))
            .sum(),
        Value::String(s) => match kind {
            KeyKind::Plain => 0,
            _ if looks_like_color(s) => rewrite(s),
            KeyKind::Color if !s.trim().is_empty() => {
                warn!("'{}' is not a recognized color, using {}", s, to_hex(Some(s)));
                rewrite(s)
            }
            _ => 0,
        },
        _ => 0,
    }
}

fn rewrite(s: &mut String) -> usize {
    let hex = to_hex(Some(s));
    if *s == hex {
        return 0;
    }
    debug!("Sanitized color '{}' -> '{}'", s, hex);
    *s = hex;
    1
}
