use crate::{ChartGeometry, finite_or_zero, safe_denominator};

/// Widest a vertical bar gets, in points.
pub const MAX_BAR_WIDTH: f64 = 40.0;
/// Horizontal space reserved per vertical bar before capping.
const BAR_SPACING: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// One positioned bar. `index` points back into the input data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub orientation: BarOrientation,
    pub bars: Vec<BarRect>,
    pub max: f64,
}

/// Largest value after clamping negatives to zero.
fn clamped_max(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|v| finite_or_zero(*v).max(0.0))
        .fold(0.0, f64::max)
}

fn scaled(value: f64, denominator: f64, extent: f64) -> f64 {
    finite_or_zero(value).max(0.0) / denominator * extent
}

/// Lays out one row per value. Bar length is `value / max * track`; rows are
/// `bar_height` tall and separated by `row_gap`.
pub fn horizontal_bars(
    values: &[f64],
    track: f64,
    bar_height: f64,
    row_gap: f64,
) -> ChartGeometry<BarGeometry> {
    if values.is_empty() {
        return ChartGeometry::Empty;
    }
    let max = clamped_max(values);
    let denominator = safe_denominator(max);
    let track = track.max(0.0);

    let bars = values
        .iter()
        .enumerate()
        .map(|(i, &value)| BarRect {
            index: i,
            x: 0.0,
            y: i as f64 * (bar_height + row_gap),
            width: scaled(value, denominator, track),
            height: bar_height,
            value,
        })
        .collect();

    ChartGeometry::Plotted(BarGeometry {
        orientation: BarOrientation::Horizontal,
        bars,
        max,
    })
}

/// Lays out columns across a `width` x `height` plot area.
///
/// Bar width is `min(40, width / n - 8)`, never below one point. The leftover
/// space is shared equally by the `n + 1` gaps around the bars. Bars grow up
/// from the bottom edge.
pub fn vertical_bars(values: &[f64], width: f64, height: f64) -> ChartGeometry<BarGeometry> {
    if values.is_empty() {
        return ChartGeometry::Empty;
    }
    let n = values.len() as f64;
    let width = width.max(0.0);
    let height = height.max(0.0);
    let bar_width = (width / n - BAR_SPACING).min(MAX_BAR_WIDTH).max(1.0);
    let gap = ((width - bar_width * n) / (n + 1.0)).max(0.0);
    let max = clamped_max(values);
    let denominator = safe_denominator(max);

    let bars = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let bar_height = scaled(value, denominator, height);
            BarRect {
                index: i,
                x: gap + i as f64 * (bar_width + gap),
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
                value,
            }
        })
        .collect();

    ChartGeometry::Plotted(BarGeometry {
        orientation: BarOrientation::Vertical,
        bars,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(g: ChartGeometry<BarGeometry>) -> Vec<BarRect> {
        match g {
            ChartGeometry::Plotted(g) => g.bars,
            ChartGeometry::Empty => panic!("expected bars"),
        }
    }

    #[test]
    fn horizontal_lengths_scale_to_max() {
        let bars = bars(horizontal_bars(&[10.0, 5.0, 0.0], 200.0, 12.0, 4.0));
        assert_eq!(bars[0].width, 200.0);
        assert_eq!(bars[1].width, 100.0);
        assert_eq!(bars[2].width, 0.0);
        assert_eq!(bars[2].y, 32.0);
    }

    #[test]
    fn all_zero_values_produce_finite_geometry() {
        for g in [
            horizontal_bars(&[0.0, 0.0], 100.0, 10.0, 2.0),
            vertical_bars(&[0.0, 0.0], 100.0, 50.0),
        ] {
            for bar in bars(g) {
                assert!(bar.x.is_finite() && bar.y.is_finite());
                assert_eq!(bar.width.min(bar.height), 0.0);
            }
        }
    }

    #[test]
    fn negative_values_clamp_to_zero_length() {
        let bars = bars(horizontal_bars(&[-5.0, 5.0], 100.0, 10.0, 0.0));
        assert_eq!(bars[0].width, 0.0);
        assert_eq!(bars[0].value, -5.0);
        assert_eq!(bars[1].width, 100.0);
    }

    #[test]
    fn vertical_layout_follows_width_formula() {
        // 4 bars over 400pt: min(40, 100 - 8) = 40; gap = (400 - 160) / 5 = 48.
        let bars = bars(vertical_bars(&[1.0, 2.0, 3.0, 4.0], 400.0, 100.0));
        assert_eq!(bars[0].width, 40.0);
        assert_eq!(bars[0].x, 48.0);
        assert_eq!(bars[1].x, 48.0 + 88.0);
        assert_eq!(bars[3].height, 100.0);
        assert_eq!(bars[3].y, 0.0);
        assert_eq!(bars[1].height, 50.0);
    }

    #[test]
    fn narrow_plots_floor_bar_width_at_one() {
        let bars = bars(vertical_bars(&[1.0; 10], 50.0, 10.0));
        assert!(bars.iter().all(|b| b.width == 1.0));
        assert!(bars.iter().all(|b| b.x >= 0.0));
    }

    #[test]
    fn empty_data_is_empty_geometry() {
        assert!(horizontal_bars(&[], 100.0, 10.0, 2.0).is_empty());
        assert!(vertical_bars(&[], 100.0, 10.0).is_empty());
    }
}
