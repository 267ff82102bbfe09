//! Chart geometry engine.
//!
//! Every function here is pure: it maps a slice of values plus a plot size to
//! positioned shapes in a top-left, y-down coordinate space. Back-ends only
//! translate those shapes into their own drawing primitives.

pub mod bar;
pub mod line;
pub mod palette;
pub mod path;
pub mod pie;

pub use bar::{BarGeometry, BarOrientation, BarRect, horizontal_bars, vertical_bars};
pub use line::{AxisTick, LineGeometry, SeriesGeometry, line_geometry};
pub use palette::{DEFAULT_PALETTE, pick_color};
pub use path::{PathSegment, to_segments};
pub use pie::{PieGeometry, PieSlice, pie_geometry};

/// Label shown in place of a chart with nothing to plot.
pub const NO_DATA_LABEL: &str = "No data";

/// The outcome of a geometry computation. Empty input never produces a
/// zero-sized plot; it produces [`ChartGeometry::Empty`] so back-ends can draw
/// the [`NO_DATA_LABEL`] placeholder instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry<T> {
    Empty,
    Plotted(T),
}

impl<T> ChartGeometry<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChartGeometry::Empty)
    }

    pub fn plotted(&self) -> Option<&T> {
        match self {
            ChartGeometry::Empty => None,
            ChartGeometry::Plotted(g) => Some(g),
        }
    }
}

/// Treats non-finite input as zero so no NaN reaches the output.
pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// A denominator that is never zero.
pub(crate) fn safe_denominator(v: f64) -> f64 {
    if v > 0.0 && v.is_finite() { v } else { 1.0 }
}

/// Formats a value label: integers print without a fractional part, other
/// values with up to two decimals.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_trims_trailing_zeros() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-12.0), "-12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.234), "1.23");
    }

    #[test]
    fn safe_denominator_never_zero() {
        assert_eq!(safe_denominator(0.0), 1.0);
        assert_eq!(safe_denominator(f64::NAN), 1.0);
        assert_eq!(safe_denominator(4.0), 4.0);
    }
}
