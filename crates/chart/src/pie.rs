use crate::{ChartGeometry, finite_or_zero, safe_denominator};
use kurbo::{Arc, BezPath, Point, Vec2};

/// Angle of the first slice edge, in degrees. -90 is 12 o'clock in y-down space.
pub const START_ANGLE_DEG: f64 = -90.0;
/// Inner radius of a donut as a share of the outer radius.
pub const DONUT_RATIO: f64 = 0.6;

const ARC_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub value: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// Sweep in degrees, always non-negative.
    pub sweep: f64,
    /// Share of the total, `0.0..=100.0`.
    pub percentage: f64,
    pub path: BezPath,
    /// Where a slice label sits: halfway along the wedge at mid angle.
    pub label_anchor: Point,
}

impl PieSlice {
    /// The slice outline as an SVG path `d` attribute.
    pub fn svg_path(&self) -> String {
        self.path.to_svg()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieGeometry {
    pub center: Point,
    pub radius: f64,
    pub inner_radius: Option<f64>,
    pub total: f64,
    pub slices: Vec<PieSlice>,
}

fn polar(center: Point, radius: f64, angle_rad: f64) -> Point {
    center + Vec2::from_angle(angle_rad) * radius
}

fn wedge_path(center: Point, radius: f64, inner: Option<f64>, start: f64, sweep: f64) -> BezPath {
    let mut path = BezPath::new();
    let outer = Arc::new(center, (radius, radius), start, sweep, 0.0);
    match inner {
        Some(inner_radius) => {
            path.move_to(polar(center, radius, start));
            path.extend(outer.append_iter(ARC_TOLERANCE));
            path.line_to(polar(center, inner_radius, start + sweep));
            let back = Arc::new(center, (inner_radius, inner_radius), start + sweep, -sweep, 0.0);
            path.extend(back.append_iter(ARC_TOLERANCE));
        }
        None => {
            path.move_to(center);
            path.line_to(polar(center, radius, start));
            path.extend(outer.append_iter(ARC_TOLERANCE));
        }
    }
    path.close_path();
    path
}

/// Builds one wedge per value, in input order, clockwise from 12 o'clock.
///
/// Each sweep is `value / total * 360` degrees. A zero total divides by one
/// instead, so every slice gets a zero sweep rather than NaN. Negative values
/// count as zero.
pub fn pie_geometry(
    values: &[f64],
    center: Point,
    radius: f64,
    donut: bool,
) -> ChartGeometry<PieGeometry> {
    if values.is_empty() {
        return ChartGeometry::Empty;
    }
    let radius = radius.max(0.0);
    let inner_radius = donut.then_some(radius * DONUT_RATIO);
    let clamped: Vec<f64> = values.iter().map(|v| finite_or_zero(*v).max(0.0)).collect();
    let total: f64 = clamped.iter().sum();
    let denominator = safe_denominator(total);

    let label_radius = match inner_radius {
        Some(inner) => (inner + radius) / 2.0,
        None => radius * 0.65,
    };

    let mut cursor = START_ANGLE_DEG;
    let slices = clamped
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let share = value / denominator;
            let sweep = share * 360.0;
            let start = cursor;
            cursor += sweep;

            let start_rad = start.to_radians();
            let sweep_rad = sweep.to_radians();
            PieSlice {
                index: i,
                value: values[i],
                start_angle: start,
                sweep,
                percentage: share * 100.0,
                path: wedge_path(center, radius, inner_radius, start_rad, sweep_rad),
                label_anchor: polar(center, label_radius, start_rad + sweep_rad / 2.0),
            }
        })
        .collect();

    ChartGeometry::Plotted(PieGeometry {
        center,
        radius,
        inner_radius,
        total,
        slices,
    })
}
