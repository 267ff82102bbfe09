//! Presentation constants both back-ends agree on, so a document looks the
//! same on screen and on paper.

use quire_model::{CalloutVariant, Table};
use quire_types::Color;
use std::borrow::Cow;

use crate::fallback::RenderFallback;

pub const BODY_FONT_SIZE: f32 = 11.0;
pub const CAPTION_FONT_SIZE: f32 = 9.0;
pub const CODE_FONT_SIZE: f32 = 9.5;
pub const LINE_HEIGHT: f32 = 1.4;
pub const DEFAULT_BLOCK_GAP: f32 = 12.0;
pub const DEFAULT_COLUMN_GAP: f32 = 16.0;
pub const DEFAULT_CHART_HEIGHT: f32 = 220.0;
pub const DEFAULT_DIVIDER_THICKNESS: f32 = 1.0;

/// Horizontal bar charts: label gutter, value gutter, bar thickness, row gap.
pub const BAR_LABEL_WIDTH: f32 = 90.0;
pub const BAR_VALUE_WIDTH: f32 = 40.0;
pub const BAR_THICKNESS: f32 = 16.0;
pub const BAR_ROW_GAP: f32 = 8.0;
/// Space under a vertical bar or line plot for category labels.
pub const AXIS_LABEL_HEIGHT: f32 = 20.0;
/// Space left of a line plot for y tick labels.
pub const AXIS_LABEL_WIDTH: f32 = 36.0;

pub fn heading_font_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 21.0,
        3 => 17.0,
        4 => 14.0,
        5 => 12.0,
        _ => 11.0,
    }
}

/// Chart box size: the authored size capped to the available width, or the
/// full width and the default height.
pub fn chart_box(width: Option<f32>, height: Option<f32>, available: f32) -> (f32, f32) {
    let w = width.map_or(available, |w| w.min(available));
    (w.max(0.0), height.unwrap_or(DEFAULT_CHART_HEIGHT).max(0.0))
}

/// Accent and background tint for a callout box.
pub fn callout_colors(variant: CalloutVariant) -> (Color, Color) {
    let accent = match variant {
        CalloutVariant::Info => Color::rgb(0x25, 0x63, 0xeb),
        CalloutVariant::Warning => Color::rgb(0xd9, 0x77, 0x06),
        CalloutVariant::Success => Color::rgb(0x16, 0xa3, 0x4a),
        CalloutVariant::Error => Color::rgb(0xdc, 0x26, 0x26),
        CalloutVariant::Quote => Color::rgb(0x6b, 0x72, 0x80),
    };
    (accent, accent.lighten(0.9))
}

/// Splits the column weights into fractions of one. A zero sum shares the
/// width equally.
pub fn column_fractions(weights: &[f32]) -> Vec<f32> {
    if weights.is_empty() {
        return Vec::new();
    }
    let sum: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if sum <= 0.0 || !sum.is_finite() {
        let share = 1.0 / weights.len() as f32;
        return vec![share; weights.len()];
    }
    weights.iter().map(|w| w.max(0.0) / sum).collect()
}

/// Table rows with exactly one cell per header. Validation already rejects
/// ragged rows; this covers tables built in code.
pub fn table_rows(table: &Table) -> Vec<Cow<'_, [String]>> {
    let headers = table.headers.len();
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() == headers {
                return Cow::Borrowed(row.as_slice());
            }
            RenderFallback::TableShape { row: i, cells: row.len(), headers }.report();
            let mut fixed = row.clone();
            fixed.resize(headers, String::new());
            Cow::Owned(fixed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_normalize_by_sum() {
        assert_eq!(column_fractions(&[1.0, 2.0, 1.0]), vec![0.25, 0.5, 0.25]);
        assert_eq!(column_fractions(&[0.0, 0.0]), vec![0.5, 0.5]);
        assert!(column_fractions(&[]).is_empty());
    }

    #[test]
    fn chart_box_caps_to_slot() {
        assert_eq!(chart_box(Some(800.0), None, 300.0), (300.0, DEFAULT_CHART_HEIGHT));
        assert_eq!(chart_box(Some(100.0), Some(50.0), 300.0), (100.0, 50.0));
        assert_eq!(chart_box(None, None, 250.0).0, 250.0);
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() {
        let table = Table {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
            header_style: None,
            cell_style: None,
            alternate_row_color: None,
            margin_bottom: None,
        };
        let rows = table_rows(&table);
        assert_eq!(rows[0].as_ref(), ["1".to_string(), String::new()]);
        assert_eq!(rows[1].len(), 2);
    }
}
