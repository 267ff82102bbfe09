use log::debug;
use quire_style::resolve_color;
use quire_types::Color;

/// Fallback series colors when neither the element nor the theme supplies any.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0x25, 0x63, 0xeb),
    Color::rgb(0x10, 0xb9, 0x81),
    Color::rgb(0xf5, 0x9e, 0x0b),
    Color::rgb(0xef, 0x44, 0x44),
    Color::rgb(0x8b, 0x5c, 0xf6),
    Color::rgb(0x06, 0xb6, 0xd4),
    Color::rgb(0xec, 0x48, 0x99),
    Color::rgb(0x64, 0x74, 0x8b),
];

/// Chooses the color of datum `index`.
///
/// Precedence: the datum's own color, then the element's `colors` list, then
/// the theme palette, then [`DEFAULT_PALETTE`]. Lists cycle, so index `i`
/// takes entry `i % len`.
pub fn pick_color(
    index: usize,
    explicit: Option<&str>,
    element_colors: &[String],
    theme_palette: &[Color],
) -> Color {
    let fallback = cycle(theme_palette, index).unwrap_or(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]);
    if let Some(color) = explicit.filter(|c| !c.trim().is_empty()) {
        return resolve_color(Some(color), fallback);
    }
    if let Some(color) = cycle(element_colors, index) {
        debug!("Chart datum {} takes element color '{}'", index, color);
        return resolve_color(Some(color.as_str()), fallback);
    }
    fallback
}

fn cycle<T: Clone>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}
