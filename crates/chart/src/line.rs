use crate::{ChartGeometry, finite_or_zero};
use kurbo::{BezPath, Point};

/// Number of labelled values on the y axis.
pub const Y_TICK_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Vertical position inside the plot area.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub index: usize,
    pub points: Vec<Point>,
}

impl SeriesGeometry {
    pub fn polyline(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for p in points {
                path.line_to(*p);
            }
        }
        path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub y_min: f64,
    pub y_max: f64,
    pub ticks: Vec<AxisTick>,
    /// Horizontal position of each index slot shared by all series.
    pub slots: Vec<f64>,
    pub series: Vec<SeriesGeometry>,
}

fn slot_x(index: usize, count: usize, width: f64) -> f64 {
    if count <= 1 {
        width / 2.0
    } else {
        index as f64 / (count - 1) as f64 * width
    }
}

/// Places every series in a `width` x `height` plot area.
///
/// Points are spaced evenly by index; series share the slots of the longest
/// one. The y axis runs from `min(0, min y)` to `max y` so zero is always on
/// it, and a flat range gets a span of one.
pub fn line_geometry(series: &[Vec<f64>], width: f64, height: f64) -> ChartGeometry<LineGeometry> {
    let count = series.iter().map(Vec::len).max().unwrap_or(0);
    if count == 0 {
        return ChartGeometry::Empty;
    }
    let width = width.max(0.0);
    let height = height.max(0.0);

    let ys = series.iter().flatten().map(|y| finite_or_zero(*y));
    let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    let y_min = lo.min(0.0);
    let span = if hi > y_min { hi - y_min } else { 1.0 };
    let y_max = y_min + span;

    let to_y = |value: f64| height - (finite_or_zero(value) - y_min) / span * height;

    let ticks = (0..Y_TICK_COUNT)
        .map(|k| {
            let value = y_min + span * k as f64 / (Y_TICK_COUNT - 1) as f64;
            AxisTick { value, y: to_y(value) }
        })
        .collect();

    let slots = (0..count).map(|i| slot_x(i, count, width)).collect();

    let series = series
        .iter()
        .enumerate()
        .map(|(index, values)| SeriesGeometry {
            index,
            points: values
                .iter()
                .enumerate()
                .map(|(i, &y)| Point::new(slot_x(i, count, width), to_y(y)))
                .collect(),
        })
        .collect();

    ChartGeometry::Plotted(LineGeometry {
        y_min,
        y_max,
        ticks,
        slots,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plotted(series: &[Vec<f64>]) -> LineGeometry {
        match line_geometry(series, 100.0, 50.0) {
            ChartGeometry::Plotted(g) => g,
            ChartGeometry::Empty => panic!("expected geometry"),
        }
    }

    #[test]
    fn axis_includes_zero() {
        let g = plotted(&[vec![10.0, 20.0, 30.0]]);
        assert_eq!(g.y_min, 0.0);
        assert_eq!(g.y_max, 30.0);
        let pts = &g.series[0].points;
        assert_eq!(pts[0], Point::new(0.0, 50.0 - 10.0 / 30.0 * 50.0));
        assert_eq!(pts[1].x, 50.0);
        assert_eq!(pts[2], Point::new(100.0, 0.0));
    }

    #[test]
    fn negative_values_extend_axis_down() {
        let g = plotted(&[vec![-10.0, 10.0]]);
        assert_eq!(g.y_min, -10.0);
        assert_eq!(g.y_max, 10.0);
        assert_eq!(g.ticks.len(), 5);
        assert_eq!(g.ticks[2].value, 0.0);
        assert_eq!(g.ticks[2].y, 25.0);
    }

    #[test]
    fn flat_range_uses_unit_span() {
        let g = plotted(&[vec![0.0, 0.0]]);
        assert_eq!(g.y_max - g.y_min, 1.0);
        assert!(g.series[0].points.iter().all(|p| p.y == 50.0));
    }

    #[test]
    fn single_point_is_centered() {
        let g = plotted(&[vec![4.0]]);
        assert_eq!(g.series[0].points[0].x, 50.0);
    }

    #[test]
    fn series_share_index_slots() {
        let g = plotted(&[vec![1.0, 2.0, 3.0], vec![1.0]]);
        assert_eq!(g.slots, vec![0.0, 50.0, 100.0]);
        assert_eq!(g.series[1].points[0].x, 0.0);
    }

    #[test]
    fn no_points_is_empty() {
        assert!(line_geometry(&[], 10.0, 10.0).is_empty());
        assert!(line_geometry(&[vec![], vec![]], 10.0, 10.0).is_empty());
    }
}
